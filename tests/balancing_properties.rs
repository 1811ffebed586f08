use autobalance::domain::balancing::exact::exact_candidates;
use autobalance::domain::balancing::{
    Balancer, CostModel, PairCounts, best_exact_10, build_pair_counts, detect_changes, score,
};
use autobalance::domain::history::MatchRecord;
use autobalance::domain::participant::{RatedParticipant, Side};
use autobalance::domain::rating::{RANKS, effective_rating, streak_adjustment};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

const SCENARIO: [i32; 10] = [2700, 2300, 2100, 2000, 1900, 1800, 1350, 1300, 1250, 1200];

fn rated(ratings: &[i32]) -> Vec<RatedParticipant> {
    ratings
        .iter()
        .enumerate()
        .map(|(i, &r)| RatedParticipant::new(format!("id-{}", i), format!("Player {}", i), r))
        .collect()
}

fn record(index: usize, team_a: &[&str], team_b: &[&str]) -> MatchRecord {
    let ids = |team: &[&str]| team.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    MatchRecord {
        id: format!("match-{}", index),
        index,
        recorded_at: Utc::now(),
        winner: Side::A,
        loser: Side::B,
        rating_a: 0,
        rating_b: 0,
        cost: 0,
        team_a: ids(team_a),
        team_b: ids(team_b),
        team_a_ids: Some(ids(team_a)),
        team_b_ids: Some(ids(team_b)),
    }
}

/// Minimum cost over every 5-player team containing participant 0, by bitmask.
fn brute_force_min_cost(players: &[RatedParticipant], counts: &PairCounts) -> i32 {
    let cost = CostModel::default();
    let mut best = i32::MAX;
    for mask in 0u32..(1 << 10) {
        if mask & 1 == 0 || mask.count_ones() != 5 {
            continue;
        }
        let (a, b): (Vec<_>, Vec<_>) = players
            .iter()
            .enumerate()
            .partition(|(i, _)| mask & (1 << *i) != 0);
        let team_a = a.into_iter().map(|(_, p)| p.clone()).collect();
        let team_b = b.into_iter().map(|(_, p)| p.clone()).collect();
        best = best.min(cost.score(team_a, team_b, counts).total_cost);
    }
    best
}

#[test]
fn test_rank_table_is_monotonic() {
    let mut last = i32::MIN;
    for (label, _) in RANKS.iter() {
        let rating = effective_rating(label, 0);
        assert!(rating >= last, "{} dropped to {}", label, rating);
        last = rating;
    }
}

#[test]
fn test_streak_examples() {
    assert_eq!(streak_adjustment(2), 25);
    assert_eq!(streak_adjustment(-3), -50);
    assert_eq!(streak_adjustment(7), 100);
    assert_eq!(streak_adjustment(1), 0);
}

#[test]
fn test_scenario_reaches_true_minimum_imbalance() {
    let players = rated(&SCENARIO);
    let counts = PairCounts::default();

    let best = best_exact_10(&players, &counts, &CostModel::default()).expect("ten players");

    assert_eq!(best.imbalance_cost, brute_force_min_cost(&players, &counts));
    assert_eq!(best.repeat_cost, 0);
    assert_eq!(best.rating_a + best.rating_b, SCENARIO.iter().sum::<i32>());
}

#[test]
fn test_exact_cost_never_above_any_candidate() {
    let players = rated(&SCENARIO);
    let history = vec![
        record(
            3,
            &["id-0", "id-1", "id-6", "id-7", "id-8"],
            &["id-2", "id-3", "id-4", "id-5", "id-9"],
        ),
        record(
            2,
            &["id-0", "id-2", "id-6", "id-7", "id-9"],
            &["id-1", "id-3", "id-4", "id-5", "id-8"],
        ),
    ];
    let counts = build_pair_counts(&history, 3);
    let cost = CostModel::default();

    let best = best_exact_10(&players, &counts, &cost).expect("ten players");
    let candidates: Vec<_> = exact_candidates(&players, &counts, &cost).collect();

    assert_eq!(candidates.len(), 126);
    for candidate in &candidates {
        assert!(best.total_cost <= candidate.total_cost);
    }
    // First minimum in enumeration order wins.
    let first_min = candidates
        .iter()
        .find(|c| c.total_cost == best.total_cost)
        .expect("minimum is a candidate");
    assert_eq!(first_min, &best);
    assert_eq!(best.total_cost, brute_force_min_cost(&players, &counts));
}

#[test]
fn test_exact_candidates_are_distinct_partitions() {
    let players = rated(&SCENARIO);
    let counts = PairCounts::default();
    let mut seen = HashSet::new();
    for candidate in exact_candidates(&players, &counts, &CostModel::default()) {
        let mut a: Vec<_> = candidate.team_a.iter().map(|p| p.id.clone()).collect();
        a.sort();
        assert_eq!(candidate.team_a.len(), 5);
        assert_eq!(candidate.team_b.len(), 5);
        assert!(seen.insert(a));
    }
    assert_eq!(seen.len(), 126);
}

#[test]
fn test_lookback_ignores_older_records() {
    let history = vec![
        record(5, &["a", "b"], &["c", "d"]),
        record(4, &["a", "c"], &["b", "d"]),
        record(3, &["a", "d"], &["b", "c"]),
        record(2, &["old1", "old2"], &["c", "d"]),
        record(1, &["old1", "old2"], &["a", "b"]),
    ];
    let counts = build_pair_counts(&history, 3);
    assert_eq!(counts.get("old1", "old2"), 0);
    assert_eq!(counts.get("a", "b"), 1);
    assert_eq!(counts.get("c", "d"), 1);
}

#[test]
fn test_single_recent_co_occurrence_costs_twenty() {
    let history = vec![record(1, &["id-0", "id-1"], &["id-2", "id-3"])];
    let counts = build_pair_counts(&history, 3);
    let players = rated(&[1000, 1000, 1000, 1000]);

    let together = score(players[..2].to_vec(), players[2..].to_vec(), &counts);
    assert_eq!(together.repeat_cost, 40); // both old pairs reunited
    let one_pair = score(
        vec![players[0].clone(), players[1].clone()],
        vec![players[2].clone(), RatedParticipant::new("id-x", "X", 1000)],
        &counts,
    );
    assert_eq!(one_pair.repeat_cost, 20);
    assert_eq!(one_pair.total_cost, one_pair.imbalance_cost + one_pair.repeat_cost);
}

#[test]
fn test_balance_avoids_recent_teammates_when_ratings_tie() {
    let players = rated(&[1500; 10]);
    let history = vec![record(
        1,
        &["id-0", "id-1", "id-2", "id-3", "id-4"],
        &["id-5", "id-6", "id-7", "id-8", "id-9"],
    )];
    let counts = build_pair_counts(&history, 3);
    let mut rng = StdRng::seed_from_u64(99);

    let best = Balancer::default()
        .balance(&players, &counts, &mut rng)
        .expect("balances");

    // Best possible: each new team mixes the old teams 3/2,
    // reuniting C(3,2) + C(2,2) = 4 pairs per team.
    assert_eq!(best.imbalance_cost, 0);
    assert_eq!(best.repeat_cost, 8 * 20);
}

#[test]
fn test_change_detection_without_previous_is_empty() {
    let players = rated(&SCENARIO);
    let best = best_exact_10(&players, &PairCounts::default(), &CostModel::default())
        .expect("ten players");
    assert!(detect_changes(None, &best).is_empty());
    let same = detect_changes(Some(&best), &best);
    assert!(same.values().all(|&moved| !moved));
}
