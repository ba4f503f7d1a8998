use tracing::debug;

use crate::apportion::divisor::{apportion, Apportionment, DivisorMethod, Priority};
use crate::types::{ApportionError, StateElectorCount, StateId, StatePopulation};

/// Huntington-Hill: geometric-mean divisor `sqrt(n * (n + 1))`, one seat floor.
#[derive(Debug, Default, Clone, Copy)]
pub struct HuntingtonHill;

impl DivisorMethod for HuntingtonHill {
    fn initial_seats(&self) -> u32 {
        1
    }

    fn divisor(&self, seats: u32) -> f64 {
        let n = f64::from(seats);
        (n * (n + 1.0)).sqrt()
    }

    /// `p / sqrt(n(n+1))` orders the same as `p^2 / (n(n+1))`, which stays
    /// in integers.
    fn exact_priority(&self, weight: u64, seats: u32) -> Priority {
        let w = u128::from(weight);
        let n = u128::from(seats);
        Priority::new(w * w, n * (n + 1))
    }
}

/// Distribute `total_seats` across states in proportion to population.
///
/// Every state receives at least one seat and the result always sums to
/// `total_seats`. Exact priority ties go to the lower [`StateId`].
pub fn allocate(
    populations: &StatePopulation,
    total_seats: u32,
) -> Result<StateElectorCount, ApportionError> {
    allocate_with_rounds(populations, total_seats).map(|a| a.seats)
}

/// Same as [`allocate`], also reporting how many seats were assigned beyond
/// the one-seat floor.
pub fn allocate_with_rounds(
    populations: &StatePopulation,
    total_seats: u32,
) -> Result<Apportionment<StateId>, ApportionError> {
    if populations.is_empty() {
        return Err(ApportionError::EmptyInput);
    }
    if (total_seats as usize) < populations.len() {
        return Err(ApportionError::TooFewSeats {
            seats: total_seats,
            states: populations.len(),
        });
    }
    if let Some((state, _)) = populations.iter().find(|(_, population)| **population == 0) {
        return Err(ApportionError::NonPositivePopulation(state.clone()));
    }

    let result = apportion(&HuntingtonHill, populations, total_seats);

    debug_assert_eq!(result.seats.values().sum::<u32>(), total_seats);
    debug_assert!(result.seats.values().all(|&s| s >= 1));
    debug!(
        states = populations.len(),
        total_seats,
        rounds = result.rounds,
        "huntington-hill apportionment complete"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populations(entries: &[(&str, u64)]) -> StatePopulation {
        entries.iter().map(|&(s, p)| (StateId::from(s), p)).collect()
    }

    #[test]
    fn divisor_is_geometric_mean() {
        assert!((HuntingtonHill.divisor(1) - 2f64.sqrt()).abs() < 1e-12);
        assert!((HuntingtonHill.divisor(2) - 6f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn exact_priority_sees_ties_floats_miss() {
        // 1000 / sqrt(2) and 6000 / sqrt(72) differ in the last float bit.
        assert_ne!(HuntingtonHill.priority(1000, 1), HuntingtonHill.priority(6000, 8));
        assert_eq!(
            HuntingtonHill.exact_priority(1000, 1),
            HuntingtonHill.exact_priority(6000, 8)
        );
    }

    #[test]
    fn zero_population_is_rejected() {
        let err = allocate(&populations(&[("A", 10), ("B", 0)]), 3).unwrap_err();
        assert_eq!(err, ApportionError::NonPositivePopulation(StateId::from("B")));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(allocate(&StatePopulation::new(), 5), Err(ApportionError::EmptyInput));
    }
}
