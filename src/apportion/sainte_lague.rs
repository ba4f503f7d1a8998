use tracing::warn;

use crate::apportion::divisor::{apportion, DivisorMethod, Priority};
use crate::types::{ApportionError, CandidateElectorTotals, CandidateVoteTotals, VoteAllocation};

/// Sainte-Lague: odd divisors 1, 3, 5, ... and no seat floor.
#[derive(Debug, Default, Clone, Copy)]
pub struct SainteLague;

impl DivisorMethod for SainteLague {
    fn initial_seats(&self) -> u32 {
        0
    }

    fn divisor(&self, seats: u32) -> f64 {
        f64::from(2 * seats + 1)
    }

    fn exact_priority(&self, weight: u64, seats: u32) -> Priority {
        Priority::new(u128::from(weight), 2 * u128::from(seats) + 1)
    }
}

/// Split `seats` among candidates in proportion to their votes.
///
/// A candidate with zero votes never wins a seat while anyone has votes.
/// When every candidate has zero votes, seats are dealt round-robin in
/// candidate order and the result is flagged with `fallback_applied`.
pub fn allocate(votes: &CandidateVoteTotals, seats: u32) -> Result<VoteAllocation, ApportionError> {
    if votes.is_empty() {
        if seats == 0 {
            return Ok(VoteAllocation {
                electors: CandidateElectorTotals::new(),
                fallback_applied: false,
            });
        }
        return Err(ApportionError::NoCandidates { seats });
    }

    if votes.values().all(|&v| v == 0) {
        let electors = round_robin(votes, seats);
        if seats > 0 {
            warn!(
                candidates = votes.len(),
                seats, "all candidates have zero votes, dealing seats round-robin"
            );
        }
        return Ok(VoteAllocation {
            electors,
            fallback_applied: seats > 0,
        });
    }

    let result = apportion(&SainteLague, votes, seats);
    debug_assert_eq!(result.rounds, seats);

    Ok(VoteAllocation {
        electors: result.seats,
        fallback_applied: false,
    })
}

fn round_robin(votes: &CandidateVoteTotals, seats: u32) -> CandidateElectorTotals {
    let count = votes.len() as u32;
    votes
        .keys()
        .enumerate()
        .map(|(i, candidate)| {
            let i = i as u32;
            let share = seats / count + u32::from(i < seats % count);
            (candidate.clone(), share)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CandidateId;

    fn votes(entries: &[(&str, u64)]) -> CandidateVoteTotals {
        entries.iter().map(|&(c, v)| (CandidateId::from(c), v)).collect()
    }

    #[test]
    fn thirds_tie_exactly() {
        assert_eq!(SainteLague.exact_priority(1, 1), SainteLague.exact_priority(5, 7));

        // The ninth seat is 5/15 against 1/3; the lower identifier takes it.
        let result = allocate(&votes(&[("B", 1), ("A", 5)]), 9).unwrap();
        assert_eq!(result.electors[&CandidateId::from("A")], 8);
        assert_eq!(result.electors[&CandidateId::from("B")], 1);
    }

    #[test]
    fn round_robin_starts_from_lowest_identifier() {
        let electors = round_robin(&votes(&[("Z", 0), ("A", 0), ("M", 0)]), 5);
        assert_eq!(electors[&CandidateId::from("A")], 2);
        assert_eq!(electors[&CandidateId::from("M")], 2);
        assert_eq!(electors[&CandidateId::from("Z")], 1);
    }

    #[test]
    fn zero_seats_over_zero_votes_is_not_degenerate() {
        let result = allocate(&votes(&[("A", 0)]), 0).unwrap();
        assert!(!result.fallback_applied);
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn empty_candidates_with_seats_is_rejected() {
        let err = allocate(&CandidateVoteTotals::new(), 2).unwrap_err();
        assert_eq!(err, ApportionError::NoCandidates { seats: 2 });
    }
}
