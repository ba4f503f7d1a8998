use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::dataset::filter::filter_year;
use crate::dataset::record::{ElectionRecord, Party, RawRow};
use crate::dataset::version::DatasetVersion;
use crate::types::{StateId, StatePopulation};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Line {line}: invalid vote count {value:?}")]
    InvalidVotes { line: u64, value: String },
    #[error("Line {line}: invalid population {value:?}")]
    InvalidPopulation { line: u64, value: String },
    #[error("No usable records for year {0}")]
    NoRecordsForYear(u16),
}

/// Records of one election year plus the digest of the file they came from.
#[derive(Debug, Clone)]
pub struct LoadedElection {
    pub records: Vec<ElectionRecord>,
    pub dataset: DatasetVersion,
}

/// Read every usable row of a county returns CSV.
///
/// Rows with no candidate or no party are skipped. Text fields are trimmed.
/// `NA` or blank vote counts read as zero.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ElectionRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let raw: RawRow = row.deserialize(Some(&headers))?;

        let (Some(candidate), Some(party)) = (non_blank(raw.candidate), non_blank(raw.party)) else {
            skipped += 1;
            continue;
        };

        records.push(ElectionRecord {
            year: raw.year,
            state: StateId::new(raw.state),
            county: non_blank(raw.county_name),
            candidate,
            party: Party::normalize(&party),
            votes: parse_votes(raw.candidatevotes.as_deref(), line)?,
            mode: non_blank(raw.mode).map(|m| m.to_uppercase()),
        });
    }

    debug!(records = records.len(), skipped, "read election records");
    Ok(records)
}

pub fn read_records_from_path(path: &Path) -> Result<Vec<ElectionRecord>, LoadError> {
    let f = std::fs::File::open(path)?;
    read_records(f)
}

/// Read a returns file, keep only `year`, and fingerprint the raw bytes.
pub fn load_election(path: &Path, year: u16) -> Result<LoadedElection, LoadError> {
    let bytes = std::fs::read(path)?;
    let dataset = DatasetVersion::from_content(&bytes);

    let records = filter_year(read_records(bytes.as_slice())?, year);
    if records.is_empty() {
        return Err(LoadError::NoRecordsForYear(year));
    }

    info!(
        path = %path.display(),
        year,
        records = records.len(),
        dataset = dataset.as_str(),
        "loaded election returns"
    );
    Ok(LoadedElection { records, dataset })
}

#[derive(Debug, Deserialize)]
struct PopulationRow {
    state: String,
    population: String,
}

/// Read a `state,population` CSV. Later rows for the same state replace
/// earlier ones.
pub fn read_populations<R: Read>(reader: R) -> Result<StatePopulation, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut populations = StatePopulation::new();

    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let raw: PopulationRow = row.deserialize(Some(&headers))?;

        let population = raw
            .population
            .replace(',', "")
            .parse::<u64>()
            .map_err(|_| LoadError::InvalidPopulation {
                line,
                value: raw.population.clone(),
            })?;
        populations.insert(StateId::new(raw.state), population);
    }

    Ok(populations)
}

pub fn read_populations_from_path(path: &Path) -> Result<StatePopulation, LoadError> {
    let f = std::fs::File::open(path)?;
    read_populations(f)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_votes(raw: Option<&str>, line: u64) -> Result<u64, LoadError> {
    let value = raw.map(str::trim).unwrap_or("");
    if value.is_empty() || value.eq_ignore_ascii_case("NA") {
        return Ok(0);
    }

    // Some vintages write counts as floats ("1234.0").
    if let Ok(votes) = value.parse::<u64>() {
        return Ok(votes);
    }
    match value.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => Ok(v as u64),
        _ => Err(LoadError::InvalidVotes {
            line,
            value: value.to_string(),
        }),
    }
}
