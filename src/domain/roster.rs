//! Registered players and their selection state.

use crate::domain::errors::RosterError;
use crate::domain::participant::{Participant, RatedParticipant};
use crate::domain::rating::{RatingModel, is_known_rank};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default maximum number of registered participants.
pub const MAX_ROSTER_SIZE: usize = 20;

/// Default number of participants selected for a balanced match.
pub const REQUIRED_SELECTION: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
    max_size: usize,
    max_selected: usize,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(MAX_ROSTER_SIZE, REQUIRED_SELECTION)
    }
}

/// Players currently holding the longest win and loss streaks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakLeaders {
    pub longest_win: u32,
    pub win_names: Vec<String>,
    pub longest_loss: u32,
    pub loss_names: Vec<String>,
}

impl Roster {
    pub fn new(max_size: usize, max_selected: usize) -> Self {
        Self {
            participants: Vec::new(),
            max_size,
            max_selected,
        }
    }

    /// Wraps an existing participant list, e.g. one loaded from disk.
    pub fn from_participants(
        participants: Vec<Participant>,
        max_size: usize,
        max_selected: usize,
    ) -> Self {
        Self {
            participants,
            max_size,
            max_selected,
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Replaces every participant, e.g. with the output of `apply_match_result`.
    pub fn replace_participants(&mut self, participants: Vec<Participant>) {
        self.participants = participants;
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn max_selected(&self) -> usize {
        self.max_selected
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Participant, RosterError> {
        self.participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RosterError::NotFound { id: id.to_string() })
    }

    /// Looks a participant up by id, then by exact name if the name is unique.
    pub fn resolve(&self, key: &str) -> Option<&Participant> {
        if let Some(p) = self.get(key) {
            return Some(p);
        }
        let mut by_name = self.participants.iter().filter(|p| p.name == key);
        match (by_name.next(), by_name.next()) {
            (Some(p), None) => Some(p),
            _ => None,
        }
    }

    pub fn selected_count(&self) -> usize {
        self.participants.iter().filter(|p| p.selected).count()
    }

    pub fn selected(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.selected)
    }

    /// Effective ratings of the selected participants, in roster order.
    pub fn rated_selection(&self, model: &RatingModel) -> Vec<RatedParticipant> {
        self.selected().map(|p| p.rated(model)).collect()
    }

    /// Registers a new participant and returns its id.
    ///
    /// The newcomer is selected when there is room in the selection.
    pub fn add(
        &mut self,
        name: &str,
        rank: &str,
        allow_duplicate_name: bool,
    ) -> Result<String, RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if self.participants.len() >= self.max_size {
            return Err(RosterError::RosterFull { max: self.max_size });
        }
        if !allow_duplicate_name && self.participants.iter().any(|p| p.name == name) {
            return Err(RosterError::DuplicateName {
                name: name.to_string(),
            });
        }
        if !is_known_rank(rank) {
            warn!("Roster: '{}' registered with unknown rank '{}'", name, rank);
        }

        let mut participant = Participant::new(name, rank.trim());
        participant.selected = self.selected_count() < self.max_selected;
        let id = participant.id.clone();
        self.participants.push(participant);
        Ok(id)
    }

    pub fn remove(&mut self, id: &str) -> Result<Participant, RosterError> {
        let idx = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| RosterError::NotFound { id: id.to_string() })?;
        Ok(self.participants.remove(idx))
    }

    pub fn set_selected(&mut self, id: &str, selected: bool) -> Result<(), RosterError> {
        let already = self.get(id).map(|p| p.selected);
        if selected && already == Some(false) && self.selected_count() >= self.max_selected {
            return Err(RosterError::SelectionFull {
                max: self.max_selected,
            });
        }
        self.get_mut(id)?.selected = selected;
        Ok(())
    }

    /// Flips selection; returns the new state.
    pub fn toggle_selected(&mut self, id: &str) -> Result<bool, RosterError> {
        let selected = !self
            .get(id)
            .ok_or_else(|| RosterError::NotFound { id: id.to_string() })?
            .selected;
        self.set_selected(id, selected)?;
        Ok(selected)
    }

    pub fn update_rank(&mut self, id: &str, rank: &str) -> Result<(), RosterError> {
        if !is_known_rank(rank) {
            warn!("Roster: unknown rank '{}' for {}", rank, id);
        }
        self.get_mut(id)?.rank = rank.trim().to_string();
        Ok(())
    }

    pub fn reset_streak(&mut self, id: &str) -> Result<(), RosterError> {
        self.get_mut(id)?.reset_streak();
        Ok(())
    }

    pub fn reset_all_streaks(&mut self) {
        for p in &mut self.participants {
            p.reset_streak();
        }
    }

    pub fn streak_leaders(&self) -> StreakLeaders {
        let mut leaders = StreakLeaders::default();
        for p in &self.participants {
            let magnitude = p.streak.unsigned_abs();
            let (best, names) = if p.streak > 0 {
                (&mut leaders.longest_win, &mut leaders.win_names)
            } else if p.streak < 0 {
                (&mut leaders.longest_loss, &mut leaders.loss_names)
            } else {
                continue;
            };
            if magnitude > *best {
                *best = magnitude;
                names.clear();
                names.push(p.name.clone());
            } else if magnitude == *best {
                names.push(p.name.clone());
            }
        }
        leaders
    }
}
