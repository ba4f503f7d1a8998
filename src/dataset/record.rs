use serde::Deserialize;

use crate::types::{CandidateId, StateId};

/// Party bucket a raw party label is folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Party {
    Democrat,
    Republican,
    Other,
}

impl Party {
    /// Substring match on the uppercased label, so "DEMOCRAT", "DEMOCRATIC"
    /// and "DEMOCRATIC-FARMER-LABOR" all land on the same bucket.
    pub fn normalize(raw: &str) -> Self {
        let upper = raw.trim().to_uppercase();
        if upper.contains("DEMOCRAT") {
            Party::Democrat
        } else if upper.contains("REPUBLICAN") {
            Party::Republican
        } else {
            Party::Other
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Party::Democrat => "Dem",
            Party::Republican => "Rep",
            Party::Other => "Other",
        }
    }

    /// Identifier under which this party's votes are apportioned.
    pub fn candidate_id(self) -> CandidateId {
        CandidateId::from(self.label())
    }
}

/// One cleaned row of county-level returns. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionRecord {
    pub year: u16,
    pub state: StateId,
    pub county: Option<String>,
    pub candidate: String,
    pub party: Party,
    pub votes: u64,
    pub mode: Option<String>,
}

impl ElectionRecord {
    /// Rows that summarize a county rather than report a candidate.
    pub fn is_summary_row(&self) -> bool {
        matches!(
            self.candidate.to_uppercase().as_str(),
            "TOTAL VOTES CAST" | "REGISTERED VOTERS - TOTAL"
        )
    }

    /// Rows carrying the all-modes total for a county.
    pub fn is_total_mode(&self) -> bool {
        matches!(self.mode.as_deref(), Some("TOTAL") | Some("TOTAL VOTES"))
    }
}

/// Row shape of the county presidential returns CSV. Unused columns are
/// ignored by the reader.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRow {
    pub year: u16,
    pub state: String,
    pub county_name: Option<String>,
    pub candidate: Option<String>,
    pub party: Option<String>,
    pub candidatevotes: Option<String>,
    pub mode: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_labels_fold_by_substring() {
        assert_eq!(Party::normalize("democrat"), Party::Democrat);
        assert_eq!(Party::normalize(" DEMOCRATIC-FARMER-LABOR "), Party::Democrat);
        assert_eq!(Party::normalize("Republican"), Party::Republican);
        assert_eq!(Party::normalize("LIBERTARIAN"), Party::Other);
        assert_eq!(Party::normalize("GREEN").label(), "Other");
    }

    #[test]
    fn summary_rows_are_detected_case_insensitively() {
        let record = ElectionRecord {
            year: 2020,
            state: StateId::from("OHIO"),
            county: None,
            candidate: "Total Votes Cast".into(),
            party: Party::Other,
            votes: 10,
            mode: Some("TOTAL".into()),
        };
        assert!(record.is_summary_row());
        assert!(record.is_total_mode());
    }
}
