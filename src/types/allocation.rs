use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::identifiers::{CandidateId, StateId};

/// Population figure per state. Only read by the Huntington-Hill pass.
pub type StatePopulation = BTreeMap<StateId, u64>;

/// Votes per candidate within a single state.
pub type CandidateVoteTotals = BTreeMap<CandidateId, u64>;

/// Electors per state, as produced by Huntington-Hill.
pub type StateElectorCount = BTreeMap<StateId, u32>;

/// Electors per candidate, either within a state or summed nationally.
pub type CandidateElectorTotals = BTreeMap<CandidateId, u32>;

/// Contract violations surfaced by the apportioners.
///
/// Every variant is an invalid-input failure: the caller passed arguments the
/// algorithms cannot satisfy. Nothing here is transient, so nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApportionError {
    #[error("No states to apportion")]
    EmptyInput,

    #[error("Cannot give {states} states at least one seat each from {seats} seats")]
    TooFewSeats { seats: u32, states: usize },

    #[error("Population for {0} must be positive")]
    NonPositivePopulation(StateId),

    #[error("Seat count must not be negative: {0}")]
    NegativeSeats(i64),

    #[error("Seat count out of range: {0}")]
    SeatsOutOfRange(i64),

    #[error("Cannot distribute {seats} seats among zero candidates")]
    NoCandidates { seats: u32 },

    #[error("No population entry for state with votes: {0}")]
    MissingPopulation(StateId),

    #[error("No vote totals for state with a population: {0}")]
    MissingVotes(StateId),
}

/// Outcome of one Sainte-Lague run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteAllocation {
    pub electors: CandidateElectorTotals,
    /// Set when every candidate had zero votes and seats were dealt
    /// round-robin by candidate identifier instead.
    pub fallback_applied: bool,
}

impl VoteAllocation {
    pub fn total(&self) -> u32 {
        self.electors.values().sum()
    }
}

/// Per-state record kept in the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateAllocation {
    pub seats: u32,
    pub votes: CandidateVoteTotals,
    pub electors: CandidateElectorTotals,
    pub fallback_applied: bool,
}
