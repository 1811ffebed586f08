use crate::domain::balancing::Assignment;
use crate::domain::participant::Side;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded match. History is kept newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    /// 1-based sequence number ("match #n").
    pub index: usize,
    pub recorded_at: DateTime<Utc>,
    pub winner: Side,
    pub loser: Side,
    pub rating_a: i32,
    pub rating_b: i32,
    /// Total cost of the assignment that was played.
    pub cost: i32,
    /// Display names, kept for rendering.
    pub team_a: Vec<String>,
    pub team_b: Vec<String>,
    /// Participant ids. Absent in legacy records, which the pair counter skips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_a_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_b_ids: Option<Vec<String>>,
}

impl MatchRecord {
    pub fn from_assignment(
        assignment: &Assignment,
        winner: Side,
        index: usize,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            index,
            recorded_at,
            winner,
            loser: winner.opposite(),
            rating_a: assignment.rating_a,
            rating_b: assignment.rating_b,
            cost: assignment.total_cost,
            team_a: assignment.team_a.iter().map(|p| p.name.clone()).collect(),
            team_b: assignment.team_b.iter().map(|p| p.name.clone()).collect(),
            team_a_ids: Some(assignment.team_a.iter().map(|p| p.id.clone()).collect()),
            team_b_ids: Some(assignment.team_b.iter().map(|p| p.id.clone()).collect()),
        }
    }

    /// Ids of the given side, if the record carries them.
    pub fn team_ids(&self, side: Side) -> Option<&[String]> {
        match side {
            Side::A => self.team_a_ids.as_deref(),
            Side::B => self.team_b_ids.as_deref(),
        }
    }

    pub fn winning_ids(&self) -> Option<&[String]> {
        self.team_ids(self.winner)
    }
}
