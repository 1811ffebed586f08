use crate::domain::rating::RatingModel;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Which of the two teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Typed view of the signed streak counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakState {
    NoStreak,
    Winning(u32),
    Losing(u32),
}

impl StreakState {
    pub fn from_counter(streak: i32) -> Self {
        match streak {
            0 => StreakState::NoStreak,
            s if s > 0 => StreakState::Winning(s.unsigned_abs()),
            s => StreakState::Losing(s.unsigned_abs()),
        }
    }

    pub fn counter(self) -> i32 {
        match self {
            StreakState::NoStreak => 0,
            StreakState::Winning(k) => i32::try_from(k).unwrap_or(i32::MAX),
            StreakState::Losing(k) => -i32::try_from(k).unwrap_or(i32::MAX),
        }
    }

    /// A win extends a winning streak and replaces anything else with a 1-win streak.
    pub fn after_win(self) -> Self {
        match self {
            StreakState::Winning(k) => StreakState::Winning(k.saturating_add(1)),
            StreakState::NoStreak | StreakState::Losing(_) => StreakState::Winning(1),
        }
    }

    pub fn after_loss(self) -> Self {
        match self {
            StreakState::Losing(k) => StreakState::Losing(k.saturating_add(1)),
            StreakState::NoStreak | StreakState::Winning(_) => StreakState::Losing(1),
        }
    }
}

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub rank: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    /// Positive = consecutive wins, negative = consecutive losses.
    #[serde(default)]
    pub streak: i32,
}

impl Participant {
    pub fn new(name: impl Into<String>, rank: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            rank: rank.into(),
            selected: false,
            wins: 0,
            losses: 0,
            streak: 0,
        }
    }

    pub fn streak_state(&self) -> StreakState {
        StreakState::from_counter(self.streak)
    }

    pub fn record_win(&mut self) {
        self.wins = self.wins.saturating_add(1);
        self.streak = self.streak_state().after_win().counter();
    }

    pub fn record_loss(&mut self) {
        self.losses = self.losses.saturating_add(1);
        self.streak = self.streak_state().after_loss().counter();
    }

    /// Zeroes the streak. Win/loss totals are untouched.
    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }

    pub fn rated(&self, model: &RatingModel) -> RatedParticipant {
        RatedParticipant {
            id: self.id.clone(),
            name: self.name.clone(),
            rating: model.effective_rating(&self.rank, self.streak),
        }
    }
}

/// Optimizer input: a participant reduced to its effective rating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatedParticipant {
    pub id: String,
    pub name: String,
    pub rating: i32,
}

impl RatedParticipant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rating: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rating,
        }
    }
}

/// Applies a match outcome to a roster snapshot and returns the updated roster.
///
/// Participants listed in neither team are returned unchanged.
pub fn apply_match_result(
    roster: &[Participant],
    winning_ids: &[String],
    losing_ids: &[String],
) -> Vec<Participant> {
    roster
        .iter()
        .map(|p| {
            let mut updated = p.clone();
            if winning_ids.contains(&p.id) {
                updated.record_win();
            } else if losing_ids.contains(&p.id) {
                updated.record_loss();
            }
            updated
        })
        .collect()
}
