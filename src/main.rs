use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use elector_apportion::config::ConfigError;
use elector_apportion::dataset::{self, LoadError, PopulationSource};
use elector_apportion::types::{ApportionError, CandidateId, ElectionReport};
use elector_apportion::{ApportionConfig, ElectorApportioner};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Apportion(#[from] ApportionError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Simulate a proportional Electoral College from county-level returns.
#[derive(Parser)]
#[command(version)]
struct Opts {
    /// County presidential returns CSV.
    #[arg(long)]
    input: PathBuf,
    /// Election year to apportion.
    #[arg(long)]
    year: Option<u16>,
    /// Size of the national elector pool.
    #[arg(long, allow_negative_numbers = true)]
    electors: Option<i64>,
    /// Minimum national vote share for a party to receive electors.
    #[arg(long)]
    threshold: Option<f64>,
    /// Optional `state,population` CSV; defaults to turnout.
    #[arg(long)]
    populations: Option<PathBuf>,
    /// JSON configuration file. Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    match run(opts) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: Opts) -> Result<String, CliError> {
    let mut config = match &opts.config {
        Some(path) => ApportionConfig::from_path(path)?,
        None => ApportionConfig::default(),
    };
    if let Some(year) = opts.year {
        config.election_year = year;
    }
    if let Some(electors) = opts.electors {
        config = config.with_total_electors(electors)?;
    }
    if let Some(threshold) = opts.threshold {
        config.eligibility_threshold = threshold;
    }
    config.validate()?;

    let loaded = dataset::load_election(&opts.input, config.election_year)?;
    let population_source = match &opts.populations {
        Some(path) => PopulationSource::Explicit(dataset::read_populations_from_path(path)?),
        None => PopulationSource::Turnout,
    };

    let mut inputs = dataset::aggregate(&loaded.records, population_source, config.eligibility_threshold);
    inputs.dataset = Some(loaded.dataset);

    let report = ElectorApportioner::new(config).run(&inputs)?;

    match opts.format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => Ok(render_text(&inputs.eligible, &report)),
    }
}

/// Plain-text summary: eligible candidates, one line per state, then national totals.
fn render_text(eligible: &BTreeSet<CandidateId>, report: &ElectionReport) -> String {
    let eligible: Vec<&str> = eligible.iter().map(CandidateId::as_str).collect();
    let mut lines = vec![format!("Eligible candidates: {}", eligible.join(", "))];

    lines.extend(report.allocations.iter().map(|(state, allocation)| {
        let parts: Vec<String> = allocation
            .electors
            .iter()
            .map(|(candidate, n)| format!("{candidate}: {n}"))
            .collect();
        let marker = if allocation.fallback_applied { " [fallback]" } else { "" };
        format!("{state} ({}): {{{}}}{marker}", allocation.seats, parts.join(", "))
    }));

    let totals: Vec<String> = report
        .national_totals
        .iter()
        .map(|(candidate, n)| format!("{candidate}: {n}"))
        .collect();
    lines.push(String::new());
    lines.push(format!("National totals: {{{}}}", totals.join(", ")));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use elector_apportion::dataset::AggregatedInputs;
    use elector_apportion::types::{CandidateVoteTotals, StateId};

    use super::*;

    fn id(s: &str) -> CandidateId {
        CandidateId::from(s)
    }

    #[test]
    fn text_lists_eligible_candidates_even_without_electors() {
        let mut votes: BTreeMap<StateId, CandidateVoteTotals> = BTreeMap::new();
        votes.insert(
            StateId::from("A"),
            [(id("Dem"), 90u64), (id("Grn"), 0), (id("Rep"), 30)].into_iter().collect(),
        );
        votes.insert(
            StateId::from("B"),
            [(id("Dem"), 0u64), (id("Grn"), 0), (id("Rep"), 0)].into_iter().collect(),
        );
        let inputs = AggregatedInputs {
            populations: [(StateId::from("A"), 120u64), (StateId::from("B"), 10)].into_iter().collect(),
            votes,
            eligible: [id("Dem"), id("Grn"), id("Rep")].into_iter().collect(),
            dataset: None,
        };
        let mut config = ApportionConfig::default();
        config.total_electors = 6;

        let report = ElectorApportioner::new(config).run(&inputs).unwrap();
        let text = render_text(&inputs.eligible, &report);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Eligible candidates: Dem, Grn, Rep");
        assert!(lines[1].starts_with("A ("));
        assert!(lines[2].starts_with("B (1): {Dem: 1, Grn: 0, Rep: 0} [fallback]"));
        assert_eq!(lines[3], "");
        assert!(lines[4].starts_with("National totals: {Dem: "));
        assert!(text.ends_with("}\n"));
    }
}
