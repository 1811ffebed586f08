//! Balance session: roster, history and the last two assignments.
//!
//! All state is owned here and passed explicitly into the pure balancing
//! core. Mutating operations take `&mut self`, so balancing runs are
//! serialized and always see a consistent roster and history.

use crate::config::BalancerConfig;
use crate::domain::balancing::{Assignment, SearchStrategy, build_pair_counts, detect_changes};
use crate::domain::errors::{BalanceError, RosterError};
use crate::domain::history::MatchRecord;
use crate::domain::participant::{Participant, Side, apply_match_result};
use crate::domain::roster::Roster;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Select exactly {expected} participants (currently {actual})")]
    SelectionMismatch { expected: usize, actual: usize },

    #[error("No teams to record: run a balance first")]
    NoAssignment,

    #[error(transparent)]
    Balance(#[from] BalanceError),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// Result of one balancing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    pub assignment: Assignment,
    pub strategy: SearchStrategy,
    /// Participant id -> switched sides since the previous assignment.
    pub changes: HashMap<String, bool>,
}

/// Everything a session persists between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Newest first.
    #[serde(default)]
    pub history: Vec<MatchRecord>,
    #[serde(default)]
    pub current: Option<Assignment>,
    #[serde(default)]
    pub previous: Option<Assignment>,
}

#[derive(Debug, Clone)]
pub struct BalanceSession {
    config: BalancerConfig,
    roster: Roster,
    history: Vec<MatchRecord>,
    current: Option<Assignment>,
    previous: Option<Assignment>,
}

impl BalanceSession {
    pub fn new(config: BalancerConfig) -> Self {
        let roster = Roster::new(config.max_roster_size, config.required_selection);
        Self {
            config,
            roster,
            history: Vec::new(),
            current: None,
            previous: None,
        }
    }

    pub fn from_snapshot(config: BalancerConfig, snapshot: PersistedSession) -> Self {
        let roster = Roster::from_participants(
            snapshot.participants,
            config.max_roster_size,
            config.required_selection,
        );
        Self {
            config,
            roster,
            history: snapshot.history,
            current: snapshot.current,
            previous: snapshot.previous,
        }
    }

    pub fn snapshot(&self) -> PersistedSession {
        PersistedSession {
            participants: self.roster.participants().to_vec(),
            history: self.history.clone(),
            current: self.current.clone(),
            previous: self.previous.clone(),
        }
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// Match history, newest first.
    pub fn history(&self) -> &[MatchRecord] {
        &self.history
    }

    pub fn current(&self) -> Option<&Assignment> {
        self.current.as_ref()
    }

    pub fn previous(&self) -> Option<&Assignment> {
        self.previous.as_ref()
    }

    /// Balances the selected participants.
    ///
    /// The new assignment becomes both the current teams and the reference
    /// for the next run's change detection.
    pub fn auto_balance<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<BalanceReport, SessionError> {
        let selected = self.roster.selected_count();
        if selected != self.config.required_selection {
            return Err(SessionError::SelectionMismatch {
                expected: self.config.required_selection,
                actual: selected,
            });
        }

        let rated = self.roster.rated_selection(&self.config.rating_model());
        let pair_counts = build_pair_counts(&self.history, self.config.lookback);
        let (assignment, strategy) =
            self.config
                .balancer()
                .balance_with_strategy(&rated, &pair_counts, rng)?;

        let changes = detect_changes(self.previous.as_ref(), &assignment);
        info!(
            "Session: balanced {} players via {} search (A={}, B={}, cost={}, repeats={})",
            rated.len(),
            strategy,
            assignment.rating_a,
            assignment.rating_b,
            assignment.total_cost,
            assignment.repeat_cost
        );

        self.current = Some(assignment.clone());
        self.previous = Some(assignment.clone());

        Ok(BalanceReport {
            assignment,
            strategy,
            changes,
        })
    }

    /// Records the outcome of the current assignment.
    pub fn record_result(
        &mut self,
        winner: Side,
        recorded_at: DateTime<Utc>,
    ) -> Result<&MatchRecord, SessionError> {
        let assignment = self.current.clone().ok_or(SessionError::NoAssignment)?;

        let record =
            MatchRecord::from_assignment(&assignment, winner, self.history.len() + 1, recorded_at);
        let updated = apply_match_result(
            self.roster.participants(),
            &assignment.ids(winner),
            &assignment.ids(winner.opposite()),
        );
        self.roster.replace_participants(updated);

        info!(
            "Session: recorded match #{} (team {} won, cost={})",
            record.index, winner, record.cost
        );
        self.history.insert(0, record);
        self.previous = Some(assignment);

        Ok(&self.history[0])
    }

    pub fn clear_history(&mut self) {
        info!("Session: cleared {} history entries", self.history.len());
        self.history.clear();
    }
}
