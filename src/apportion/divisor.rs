use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use tracing::trace;

/// A highest-averages divisor rule.
///
/// Entities start at `initial_seats()` and each further seat goes to the one
/// with the largest `weight / divisor(current_seats)`.
pub trait DivisorMethod {
    fn initial_seats(&self) -> u32;

    fn divisor(&self, seats: u32) -> f64;

    /// Priority as an exact fraction. Any fraction that orders the same way
    /// as `weight / divisor(seats)` will do; Huntington-Hill uses the square.
    fn exact_priority(&self, weight: u64, seats: u32) -> Priority;

    /// Floating-point priority, for logs only. Seat awards never read it.
    fn priority(&self, weight: u64, seats: u32) -> f64 {
        weight as f64 / self.divisor(seats)
    }
}

/// Non-negative fraction compared by cross-multiplication, so mathematically
/// equal priorities compare equal and fall through to the identifier.
#[derive(Debug, Clone, Copy)]
pub struct Priority {
    numerator: u128,
    denominator: u128,
}

impl Priority {
    pub fn new(numerator: u128, denominator: u128) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator.checked_mul(other.denominator);
        let rhs = other.numerator.checked_mul(self.denominator);
        match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            // Only reachable with weights far beyond any real population.
            _ => (self.numerator as f64 / self.denominator as f64)
                .total_cmp(&(other.numerator as f64 / other.denominator as f64)),
        }
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Priority {}

/// Result of a divisor run, before any method-specific checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apportionment<K> {
    pub seats: BTreeMap<K, u32>,
    /// Seats handed out after the initial floor.
    pub rounds: u32,
}

/// Heap entry. Orders by priority, then by *lower* key, so the max-heap pops
/// the highest priority and breaks exact ties towards the smaller identifier.
struct PriorityEntry<'a, K> {
    priority: Priority,
    key: &'a K,
    seats: u32,
}

impl<K: Ord> Ord for PriorityEntry<'_, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.key.cmp(self.key))
    }
}

impl<K: Ord> PartialOrd for PriorityEntry<'_, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> PartialEq for PriorityEntry<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> Eq for PriorityEntry<'_, K> {}

/// Distribute `total` seats over `weights` with the given divisor rule.
///
/// Callers validate their own preconditions. If `total` is below the initial
/// floor, every entity still keeps its floor and no rounds run.
pub fn apportion<K, M>(method: &M, weights: &BTreeMap<K, u64>, total: u32) -> Apportionment<K>
where
    K: Ord + Clone,
    M: DivisorMethod + ?Sized,
{
    let initial = method.initial_seats();
    let floor = u64::from(initial) * weights.len() as u64;
    let remaining = u64::from(total).saturating_sub(floor);

    let mut seats: BTreeMap<K, u32> = weights.keys().map(|k| (k.clone(), initial)).collect();

    let mut heap: BinaryHeap<PriorityEntry<'_, K>> = weights
        .iter()
        .map(|(key, &weight)| PriorityEntry {
            priority: method.exact_priority(weight, initial),
            key,
            seats: initial,
        })
        .collect();

    let mut rounds = 0;
    for _ in 0..remaining {
        let Some(top) = heap.pop() else { break };
        let weight = weights[top.key];
        let next = top.seats + 1;

        trace!(
            round = rounds + 1,
            seats = next,
            priority = method.priority(weight, top.seats),
            "awarded seat"
        );

        if let Some(slot) = seats.get_mut(top.key) {
            *slot = next;
        }
        rounds += 1;

        heap.push(PriorityEntry {
            priority: method.exact_priority(weight, next),
            key: top.key,
            seats: next,
        });
    }

    Apportionment { seats, rounds }
}
