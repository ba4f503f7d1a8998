use std::path::Path;

use thiserror::Error;

use crate::apportion::seats_from_signed;
use crate::types::ApportionError;

/// Size of the real Electoral College.
pub const ELECTORAL_COLLEGE_SIZE: u32 = 538;

/// National vote share below which a candidate takes no part in the
/// per-state split.
pub const DEFAULT_ELIGIBILITY_THRESHOLD: f64 = 0.05;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Eligibility threshold must lie in [0, 1], got {0}")]
    InvalidThreshold(f64),
    #[error("Elector pool must be a positive number of seats, got {0}")]
    InvalidElectors(i64),
    #[error("Invalid elector pool: {0}")]
    Seats(#[from] ApportionError),
}

// Serializable, comparable, explicit defaults. Carried verbatim into every
// report so a report states the parameters it was computed with.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ApportionConfig {
    pub version: String,
    pub total_electors: u32,
    /// Only read by the dataset loader; the apportioners are year-agnostic.
    pub election_year: u16,
    pub eligibility_threshold: f64,
}

impl ApportionConfig {
    pub fn electoral_college(election_year: u16) -> Self {
        Self {
            version: "1".into(),
            total_electors: ELECTORAL_COLLEGE_SIZE,
            election_year,
            eligibility_threshold: DEFAULT_ELIGIBILITY_THRESHOLD,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let f = std::fs::File::open(path)?;
        let config: ApportionConfig = serde_json::from_reader(f)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the elector pool with a signed value from an outer boundary.
    pub fn with_total_electors(mut self, total_electors: i64) -> Result<Self, ConfigError> {
        self.total_electors = seats_from_signed(total_electors)?;
        if self.total_electors == 0 {
            return Err(ConfigError::InvalidElectors(0));
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_electors == 0 {
            return Err(ConfigError::InvalidElectors(0));
        }
        if !(0.0..=1.0).contains(&self.eligibility_threshold) {
            return Err(ConfigError::InvalidThreshold(self.eligibility_threshold));
        }
        Ok(())
    }
}

impl Default for ApportionConfig {
    fn default() -> Self {
        Self::electoral_college(2020)
    }
}
