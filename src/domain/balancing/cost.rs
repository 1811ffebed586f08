use crate::domain::balancing::pair_counts::PairCounts;
use crate::domain::participant::{RatedParticipant, Side};
use serde::{Deserialize, Serialize};

/// Cost added per prior same-team co-occurrence of a pair.
pub const PENALTY_PER_REPEAT: i32 = 20;

/// A scored split of the participants into two teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub team_a: Vec<RatedParticipant>,
    pub team_b: Vec<RatedParticipant>,
    /// `imbalance_cost + repeat_cost`
    pub total_cost: i32,
    pub rating_a: i32,
    pub rating_b: i32,
    /// `|rating_a - rating_b|`
    pub imbalance_cost: i32,
    pub repeat_cost: i32,
}

impl Assignment {
    pub fn team(&self, side: Side) -> &[RatedParticipant] {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    /// Side the participant with `id` plays on, if present.
    pub fn side_of(&self, id: &str) -> Option<Side> {
        if self.team_a.iter().any(|p| p.id == id) {
            Some(Side::A)
        } else if self.team_b.iter().any(|p| p.id == id) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn ids(&self, side: Side) -> Vec<String> {
        self.team(side).iter().map(|p| p.id.clone()).collect()
    }

    pub fn participants(&self) -> impl Iterator<Item = &RatedParticipant> {
        self.team_a.iter().chain(self.team_b.iter())
    }
}

/// Imbalance + teammate-repeat cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostModel {
    pub penalty_per_repeat: i32,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            penalty_per_repeat: PENALTY_PER_REPEAT,
        }
    }
}

impl CostModel {
    /// Scores two already-formed teams. Team sizes are not checked here.
    pub fn score(
        &self,
        team_a: Vec<RatedParticipant>,
        team_b: Vec<RatedParticipant>,
        pair_counts: &PairCounts,
    ) -> Assignment {
        let rating_a = rating_sum(&team_a);
        let rating_b = rating_sum(&team_b);
        let imbalance_cost = rating_a.saturating_sub(rating_b).saturating_abs();
        let repeat_cost = self
            .repeat_penalty(&team_a, pair_counts)
            .saturating_add(self.repeat_penalty(&team_b, pair_counts));

        Assignment {
            team_a,
            team_b,
            total_cost: imbalance_cost.saturating_add(repeat_cost),
            rating_a,
            rating_b,
            imbalance_cost,
            repeat_cost,
        }
    }

    /// Penalty over every unordered pair inside one team. Saturates instead of overflowing.
    pub fn repeat_penalty(&self, team: &[RatedParticipant], pair_counts: &PairCounts) -> i32 {
        if pair_counts.is_empty() {
            return 0;
        }
        let mut penalty: i32 = 0;
        for (i, a) in team.iter().enumerate() {
            for b in &team[i + 1..] {
                let times = i32::try_from(pair_counts.get(&a.id, &b.id)).unwrap_or(i32::MAX);
                penalty = penalty.saturating_add(times.saturating_mul(self.penalty_per_repeat));
            }
        }
        penalty
    }
}

fn rating_sum(team: &[RatedParticipant]) -> i32 {
    team.iter().fold(0i32, |sum, p| sum.saturating_add(p.rating))
}

/// Scores two teams with the default penalty.
pub fn score(
    team_a: Vec<RatedParticipant>,
    team_b: Vec<RatedParticipant>,
    pair_counts: &PairCounts,
) -> Assignment {
    CostModel::default().score(team_a, team_b, pair_counts)
}
