pub mod allocation;
pub mod identifiers;
pub mod report;

pub use allocation::{
    ApportionError, CandidateElectorTotals, CandidateVoteTotals, StateAllocation,
    StateElectorCount, StatePopulation, VoteAllocation,
};
pub use identifiers::{CandidateId, StateId};
pub use report::ElectionReport;
