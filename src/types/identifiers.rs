use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a state (postal code or full name, as found in the input).
///
/// Ordering is lexicographic and doubles as the tie-break order: when two
/// states have exactly equal priority, the lower identifier wins.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    pub fn new(raw: impl Into<String>) -> Self {
        StateId(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(raw: &str) -> Self {
        StateId::new(raw)
    }
}

/// Identifier of a candidate (or normalized party label) within a state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(raw: impl Into<String>) -> Self {
        CandidateId(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(raw: &str) -> Self {
        CandidateId::new(raw)
    }
}
