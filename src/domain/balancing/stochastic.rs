use crate::domain::balancing::cost::{Assignment, CostModel};
use crate::domain::balancing::pair_counts::PairCounts;
use crate::domain::participant::RatedParticipant;
use rand::Rng;
use rand::seq::SliceRandom;

/// Default number of random splits tried.
pub const DEFAULT_ITERATIONS: usize = 3000;

/// Smallest participant count worth balancing.
pub const MIN_RANDOM_PARTICIPANTS: usize = 6;

/// Best of `iterations` uniformly shuffled midpoint splits.
///
/// Returns `None` below [`MIN_RANDOM_PARTICIPANTS`] or when `iterations` is 0.
/// With an odd count, team B gets the extra participant.
pub fn best_random<R: Rng + ?Sized>(
    participants: &[RatedParticipant],
    iterations: usize,
    pair_counts: &PairCounts,
    cost: &CostModel,
    rng: &mut R,
) -> Option<Assignment> {
    if participants.len() < MIN_RANDOM_PARTICIPANTS {
        return None;
    }

    let mid = participants.len() / 2;
    let mut shuffled = participants.to_vec();
    let mut best: Option<Assignment> = None;

    for _ in 0..iterations {
        shuffled.shuffle(rng);
        let (team_a, team_b) = shuffled.split_at(mid);
        let candidate = cost.score(team_a.to_vec(), team_b.to_vec(), pair_counts);
        if best
            .as_ref()
            .is_none_or(|b| candidate.total_cost < b.total_cost)
        {
            best = Some(candidate);
        }
    }
    best
}
