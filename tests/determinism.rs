use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use elector_apportion::apportion::{huntington_hill, sainte_lague};
use elector_apportion::dataset::AggregatedInputs;
use elector_apportion::types::{CandidateId, CandidateVoteTotals, StateId, StatePopulation};
use elector_apportion::{ApportionConfig, ElectorApportioner};

fn populations(entries: &[(&str, u64)]) -> StatePopulation {
    entries.iter().map(|&(s, p)| (StateId::from(s), p)).collect()
}

fn votes(entries: &[(&str, u64)]) -> CandidateVoteTotals {
    entries.iter().map(|&(c, v)| (CandidateId::from(c), v)).collect()
}

#[test]
fn population_ties_go_to_lower_state_identifier() {
    // Insertion order must not matter, only identifier order.
    let mut pops = StatePopulation::new();
    pops.insert(StateId::from("ZZ"), 500);
    pops.insert(StateId::from("AA"), 500);
    pops.insert(StateId::from("MM"), 500);

    let seats = huntington_hill::allocate(&pops, 5).unwrap();

    assert_eq!(seats[&StateId::from("AA")], 2);
    assert_eq!(seats[&StateId::from("MM")], 2);
    assert_eq!(seats[&StateId::from("ZZ")], 1);
}

#[test]
fn geometric_mean_ties_are_exact() {
    // 1000 / sqrt(1 * 2) == 6000 / sqrt(8 * 9) once B holds eight seats,
    // though the two quotients round to different floats.
    let seats = huntington_hill::allocate(&populations(&[("A", 1_000), ("B", 6_000)]), 10).unwrap();

    assert_eq!(seats[&StateId::from("A")], 2);
    assert_eq!(seats[&StateId::from("B")], 8);

    // With the names swapped the tied seat follows the identifier, not the state.
    let seats = huntington_hill::allocate(&populations(&[("A", 6_000), ("B", 1_000)]), 10).unwrap();

    assert_eq!(seats[&StateId::from("A")], 9);
    assert_eq!(seats[&StateId::from("B")], 1);
}

#[test]
fn vote_ties_go_to_lower_candidate_identifier() {
    // 450 / 3 == 150 / 1 exactly on the second seat.
    let result = sainte_lague::allocate(&votes(&[("Rep", 450), ("Dem", 150)]), 2).unwrap();

    assert_eq!(result.electors[&CandidateId::from("Dem")], 1);
    assert_eq!(result.electors[&CandidateId::from("Rep")], 1);
}

#[test]
fn repeated_runs_are_identical() {
    let pops = populations(&[
        ("CA", 39_538_223),
        ("TX", 29_145_505),
        ("FL", 21_538_187),
        ("NY", 20_201_249),
        ("WY", 576_851),
        ("VT", 643_077),
        ("DE", 989_948),
        ("ND", 779_094),
    ]);

    let first = huntington_hill::allocate(&pops, 120).unwrap();
    for _ in 0..20 {
        assert_eq!(huntington_hill::allocate(&pops, 120).unwrap(), first);
    }

    let tally = votes(&[("Dem", 100), ("Rep", 100), ("Other", 100)]);
    let first = sainte_lague::allocate(&tally, 7).unwrap();
    for _ in 0..20 {
        assert_eq!(sainte_lague::allocate(&tally, 7).unwrap(), first);
    }
}

#[test]
fn pipeline_reports_are_identical_apart_from_timestamp() {
    let mut vote_map = BTreeMap::new();
    vote_map.insert(StateId::from("A"), votes(&[("Dem", 700), ("Rep", 500)]));
    vote_map.insert(StateId::from("B"), votes(&[("Dem", 150), ("Rep", 450)]));
    vote_map.insert(StateId::from("C"), votes(&[("Dem", 0), ("Rep", 0)]));

    let inputs = AggregatedInputs {
        populations: populations(&[("A", 1_250), ("B", 620), ("C", 80)]),
        votes: vote_map,
        eligible: [CandidateId::from("Dem"), CandidateId::from("Rep")].into_iter().collect(),
        dataset: None,
    };

    let mut config = ApportionConfig::electoral_college(2020);
    config.total_electors = 10;
    let apportioner = ElectorApportioner::new(config);

    let fixed_time = Utc.timestamp_opt(0, 0).unwrap();
    let mut reports = Vec::new();
    for _ in 0..5 {
        let mut report = apportioner.run(&inputs).unwrap();
        report.generated_at = fixed_time;
        reports.push(serde_json::to_string_pretty(&report).unwrap());
    }

    assert!(reports.windows(2).all(|w| w[0] == w[1]), "reports differ between runs");
}
