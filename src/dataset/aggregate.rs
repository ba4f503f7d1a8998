use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::dataset::record::ElectionRecord;
use crate::dataset::version::DatasetVersion;
use crate::types::{CandidateId, CandidateVoteTotals, StateId, StatePopulation};

/// Where the Huntington-Hill population figures come from.
#[derive(Debug, Clone, Default)]
pub enum PopulationSource {
    /// Total votes cast in the state, across every candidate.
    #[default]
    Turnout,
    /// Caller-supplied figures. States without votes are dropped; states with
    /// votes but no entry are left missing for the pipeline to reject.
    Explicit(StatePopulation),
}

/// Clean, per-state inputs for the apportioners.
#[derive(Debug, Clone, Default)]
pub struct AggregatedInputs {
    pub populations: StatePopulation,
    pub votes: BTreeMap<StateId, CandidateVoteTotals>,
    /// Candidates at or above the national eligibility threshold.
    pub eligible: BTreeSet<CandidateId>,
    pub dataset: Option<DatasetVersion>,
}

/// Fold year-filtered records into per-state populations and per-state,
/// per-party vote totals.
///
/// Parties whose national share is below `threshold` are left out of every
/// state. Each eligible party appears in every state, at zero where it had no
/// votes, so every state has someone to give its electors to.
pub fn aggregate(
    records: &[ElectionRecord],
    population_source: PopulationSource,
    threshold: f64,
) -> AggregatedInputs {
    let mut raw: BTreeMap<StateId, CandidateVoteTotals> = BTreeMap::new();
    for record in records {
        *raw.entry(record.state.clone())
            .or_default()
            .entry(record.party.candidate_id())
            .or_default() += record.votes;
    }

    let mut national: BTreeMap<CandidateId, u64> = BTreeMap::new();
    for totals in raw.values() {
        for (candidate, &votes) in totals {
            *national.entry(candidate.clone()).or_default() += votes;
        }
    }
    let eligible = eligible_candidates(&national, threshold);
    info!(
        candidates = national.len(),
        eligible = eligible.len(),
        threshold,
        "computed national eligibility"
    );

    let populations: StatePopulation = match population_source {
        PopulationSource::Turnout => raw
            .iter()
            .map(|(state, totals)| (state.clone(), totals.values().sum()))
            .collect(),
        PopulationSource::Explicit(all) => {
            let total = all.len();
            let kept: StatePopulation = all
                .into_iter()
                .filter(|(state, _)| raw.contains_key(state))
                .collect();
            debug!(dropped = total - kept.len(), "dropped populations for states without votes");
            kept
        }
    };

    let votes: BTreeMap<StateId, CandidateVoteTotals> = raw
        .into_iter()
        .map(|(state, totals)| {
            let filtered: CandidateVoteTotals = eligible
                .iter()
                .map(|c| (c.clone(), totals.get(c).copied().unwrap_or(0)))
                .collect();
            (state, filtered)
        })
        .collect();

    AggregatedInputs {
        populations,
        votes,
        eligible,
        dataset: None,
    }
}

fn eligible_candidates(national: &BTreeMap<CandidateId, u64>, threshold: f64) -> BTreeSet<CandidateId> {
    let total: u64 = national.values().sum();
    if total == 0 {
        return national.keys().cloned().collect();
    }

    national
        .iter()
        .filter(|(_, votes)| **votes as f64 / total as f64 >= threshold)
        .map(|(candidate, _)| candidate.clone())
        .collect()
}
