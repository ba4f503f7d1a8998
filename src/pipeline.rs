use std::collections::BTreeMap;

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::apportion::{huntington_hill, sainte_lague};
use crate::config::ApportionConfig;
use crate::dataset::AggregatedInputs;
use crate::types::{
    ApportionError, CandidateElectorTotals, ElectionReport, StateAllocation, StateId,
};

/// Two-stage elector apportionment: Huntington-Hill across states, then
/// Sainte-Lague within each state.
///
/// Holds no state besides its configuration; `run` is a pure function of its
/// inputs apart from the informational `generated_at` stamp.
#[derive(Debug, Clone)]
pub struct ElectorApportioner {
    config: ApportionConfig,
}

impl Default for ElectorApportioner {
    fn default() -> Self {
        Self::new(ApportionConfig::default())
    }
}

impl ElectorApportioner {
    pub fn new(config: ApportionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApportionConfig {
        &self.config
    }

    /// Apportion the configured pool across `inputs`.
    ///
    /// `inputs.populations` and `inputs.votes` must name the same states. A
    /// state with votes but no population is [`ApportionError::MissingPopulation`];
    /// a state with a population but no vote totals is
    /// [`ApportionError::MissingVotes`], rather than surfacing later as
    /// [`ApportionError::NoCandidates`] from the vote phase.
    pub fn run(&self, inputs: &AggregatedInputs) -> Result<ElectionReport, ApportionError> {
        // 0. Populations and vote totals must cover the same states
        if let Some(state) = inputs.votes.keys().find(|s| !inputs.populations.contains_key(*s)) {
            return Err(ApportionError::MissingPopulation(state.clone()));
        }
        if let Some(state) = inputs.populations.keys().find(|s| !inputs.votes.contains_key(*s)) {
            return Err(ApportionError::MissingVotes(state.clone()));
        }

        // 1. Population phase
        let state_electors = huntington_hill::allocate(&inputs.populations, self.config.total_electors)?;
        info!(
            states = state_electors.len(),
            total_electors = self.config.total_electors,
            eligible = inputs.eligible.len(),
            "apportioned electors across states"
        );

        // 2. Vote phase, one independent run per state
        let allocations: BTreeMap<StateId, StateAllocation> = state_electors
            .par_iter()
            .map(|(state, &seats)| {
                let votes = inputs.votes.get(state).cloned().unwrap_or_default();
                let result = sainte_lague::allocate(&votes, seats)?;
                debug!(state = state.as_str(), seats, electors = ?result.electors, "apportioned state");
                Ok((
                    state.clone(),
                    StateAllocation {
                        seats,
                        votes,
                        electors: result.electors,
                        fallback_applied: result.fallback_applied,
                    },
                ))
            })
            .collect::<Result<_, ApportionError>>()?;

        // 3. National totals
        let mut national_totals = CandidateElectorTotals::new();
        for allocation in allocations.values() {
            for (candidate, &electors) in &allocation.electors {
                *national_totals.entry(candidate.clone()).or_default() += electors;
            }
        }

        let degenerate_states: Vec<StateId> = allocations
            .iter()
            .filter(|(_, a)| a.fallback_applied)
            .map(|(state, _)| state.clone())
            .collect();

        debug_assert_eq!(
            national_totals.values().sum::<u32>(),
            self.config.total_electors,
            "national totals must conserve the elector pool"
        );

        Ok(ElectionReport {
            config: self.config.clone(),
            dataset: inputs.dataset.clone(),
            state_electors,
            allocations,
            national_totals,
            degenerate_states,
            generated_at: Utc::now(),
        })
    }
}

/// Convenience wrapper around [`ElectorApportioner::run`].
pub fn apportion_electors(
    config: &ApportionConfig,
    inputs: &AggregatedInputs,
) -> Result<ElectionReport, ApportionError> {
    ElectorApportioner::new(config.clone()).run(inputs)
}
