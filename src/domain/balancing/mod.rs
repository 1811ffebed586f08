//! Team balancing core.
//!
//! Pure functions only: callers pass snapshots of ratings and history and get
//! new values back. [`Balancer`] picks the search strategy for a run.

pub mod changes;
pub mod cost;
pub mod exact;
pub mod pair_counts;
pub mod stochastic;

pub use changes::{detect_changes, detect_changes_by_name};
pub use cost::{Assignment, CostModel, PENALTY_PER_REPEAT, score};
pub use exact::{Combinations, EXACT_PARTICIPANTS, best_exact_10};
pub use pair_counts::{DEFAULT_LOOKBACK, PairCounts, PairKey, build_pair_counts};
pub use stochastic::{DEFAULT_ITERATIONS, MIN_RANDOM_PARTICIPANTS, best_random};

use crate::domain::errors::BalanceError;
use crate::domain::participant::RatedParticipant;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Search strategy that produced an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStrategy {
    Exact,
    Random,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Exact => write!(f, "exact"),
            SearchStrategy::Random => write!(f, "random"),
        }
    }
}

/// Dispatches between the exact ten-player search and the random fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balancer {
    pub cost: CostModel,
    pub random_iterations: usize,
}

impl Default for Balancer {
    fn default() -> Self {
        Self {
            cost: CostModel::default(),
            random_iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl Balancer {
    pub fn new(cost: CostModel, random_iterations: usize) -> Self {
        Self {
            cost,
            random_iterations,
        }
    }

    /// Balances the participants, preferring the exact search when it applies.
    pub fn balance<R: Rng + ?Sized>(
        &self,
        participants: &[RatedParticipant],
        pair_counts: &PairCounts,
        rng: &mut R,
    ) -> Result<Assignment, BalanceError> {
        self.balance_with_strategy(participants, pair_counts, rng)
            .map(|(assignment, _)| assignment)
    }

    /// Like [`Balancer::balance`], also reporting which strategy produced the result.
    pub fn balance_with_strategy<R: Rng + ?Sized>(
        &self,
        participants: &[RatedParticipant],
        pair_counts: &PairCounts,
        rng: &mut R,
    ) -> Result<(Assignment, SearchStrategy), BalanceError> {
        let mut seen = HashSet::with_capacity(participants.len());
        if let Some(dup) = participants.iter().find(|p| !seen.insert(p.id.as_str())) {
            return Err(BalanceError::DuplicateParticipant { id: dup.id.clone() });
        }

        if let Some(best) = best_exact_10(participants, pair_counts, &self.cost) {
            debug!(
                "Balancer: exact search over {} players, cost={}",
                participants.len(),
                best.total_cost
            );
            return Ok((best, SearchStrategy::Exact));
        }

        best_random(
            participants,
            self.random_iterations.max(1),
            pair_counts,
            &self.cost,
            rng,
        )
        .map(|best| {
            debug!(
                "Balancer: random search over {} players ({} iterations), cost={}",
                participants.len(),
                self.random_iterations,
                best.total_cost
            );
            (best, SearchStrategy::Random)
        })
        .ok_or(BalanceError::InvalidInputSize {
            minimum: MIN_RANDOM_PARTICIPANTS,
            actual: participants.len(),
        })
    }
}

/// Balances with the default cost model and iteration count.
pub fn balance<R: Rng + ?Sized>(
    participants: &[RatedParticipant],
    pair_counts: &PairCounts,
    rng: &mut R,
) -> Result<Assignment, BalanceError> {
    Balancer::default().balance(participants, pair_counts, rng)
}
