//! Exhaustive search over every 5-vs-5 split of ten participants.
//!
//! Participant 0 is pinned to team A, which removes the A/B label symmetry:
//! the remaining C(9,4) = 126 choices of team-A mates are exactly the distinct
//! partitions.

use crate::domain::balancing::cost::{Assignment, CostModel};
use crate::domain::balancing::pair_counts::PairCounts;
use crate::domain::participant::RatedParticipant;
use std::ops::Range;

/// Participant count the exact search handles.
pub const EXACT_PARTICIPANTS: usize = 10;

/// Number of distinct partitions of ten participants into two teams of five.
pub const EXACT_CANDIDATES: usize = 126;

/// Lexicographic k-combinations of an index range.
///
/// Yields `[a1, a2, ..]` with `a1 < a2 < ..` in the same order as nested
/// `for` loops would. Cloning restarts from the current position.
#[derive(Debug, Clone)]
pub struct Combinations {
    end: usize,
    current: Option<Vec<usize>>,
}

impl Combinations {
    pub fn new(range: Range<usize>, k: usize) -> Self {
        let len = range.end.saturating_sub(range.start);
        let current = (k <= len).then(|| (range.start..range.start + k).collect());
        Self {
            end: range.end,
            current,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let k = current.len();
        let mut next = current.clone();

        for i in (0..k).rev() {
            if next[i] < self.end - (k - i) {
                next[i] += 1;
                for j in i + 1..k {
                    next[j] = next[j - 1] + 1;
                }
                self.current = Some(next);
                break;
            }
        }

        Some(current)
    }
}

/// Team-A index sets with index 0 anchored, for `n` participants split in half.
pub fn anchored_team_a_indices(n: usize) -> impl Iterator<Item = Vec<usize>> {
    let mates = (n / 2).saturating_sub(1);
    Combinations::new(1..n, mates).map(|rest| {
        let mut team = Vec::with_capacity(rest.len() + 1);
        team.push(0);
        team.extend(rest);
        team
    })
}

/// Splits participants into (team A, team B), both in input order.
fn split_by_indices(
    participants: &[RatedParticipant],
    team_a_indices: &[usize],
) -> (Vec<RatedParticipant>, Vec<RatedParticipant>) {
    let mut in_a = vec![false; participants.len()];
    for &i in team_a_indices {
        in_a[i] = true;
    }
    let mut team_a = Vec::with_capacity(team_a_indices.len());
    let mut team_b = Vec::with_capacity(participants.len() - team_a_indices.len());
    for (p, &a) in participants.iter().zip(&in_a) {
        if a {
            team_a.push(p.clone());
        } else {
            team_b.push(p.clone());
        }
    }
    (team_a, team_b)
}

/// Every candidate assignment the exact search evaluates, in evaluation order.
pub fn exact_candidates<'a>(
    participants: &'a [RatedParticipant],
    pair_counts: &'a PairCounts,
    cost: &'a CostModel,
) -> impl Iterator<Item = Assignment> + 'a {
    anchored_team_a_indices(participants.len()).map(move |indices| {
        let (team_a, team_b) = split_by_indices(participants, &indices);
        cost.score(team_a, team_b, pair_counts)
    })
}

/// Minimum-cost split of exactly ten participants, `None` for any other count.
///
/// Ties keep the first minimum in enumeration order.
pub fn best_exact_10(
    participants: &[RatedParticipant],
    pair_counts: &PairCounts,
    cost: &CostModel,
) -> Option<Assignment> {
    if participants.len() != EXACT_PARTICIPANTS {
        return None;
    }

    let mut best: Option<Assignment> = None;
    for candidate in exact_candidates(participants, pair_counts, cost) {
        if best
            .as_ref()
            .is_none_or(|b| candidate.total_cost < b.total_cost)
        {
            best = Some(candidate);
        }
    }
    best
}
