use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ApportionConfig;
use crate::dataset::DatasetVersion;
use crate::types::allocation::{CandidateElectorTotals, StateAllocation, StateElectorCount};
use crate::types::identifiers::StateId;

/// The full result of one apportionment run.
/// Fully self-contained and serializable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionReport {
    pub config: ApportionConfig,

    /// Digest of the raw input the aggregates came from, when known.
    pub dataset: Option<DatasetVersion>,

    pub state_electors: StateElectorCount,
    pub allocations: BTreeMap<StateId, StateAllocation>,
    pub national_totals: CandidateElectorTotals,

    /// States where every eligible candidate had zero votes.
    pub degenerate_states: Vec<StateId>,

    pub generated_at: DateTime<Utc>, // informational only
}

impl ElectionReport {
    pub fn total_electors(&self) -> u32 {
        self.national_totals.values().sum()
    }
}
