//! Rank table and streak adjustment.
//!
//! A participant's effective rating is the base rating of their rank label
//! plus a bounded bonus (or malus) for their current win (or loss) streak.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rating used when a rank label is not in [`RANKS`].
pub const DEFAULT_RATING: i32 = 1200;

/// Rating points per streak step beyond the first.
pub const STREAK_UNIT: i32 = 25;

/// Maximum absolute streak adjustment.
pub const STREAK_CAP: i32 = 100;

/// Rank labels with their base ratings, lowest tier first.
pub const RANKS: [(&str, i32); 31] = [
    ("iron4", 600),
    ("iron3", 650),
    ("iron2", 700),
    ("iron1", 750),
    ("bronze4", 800),
    ("bronze3", 850),
    ("bronze2", 900),
    ("bronze1", 950),
    ("silver4", 1000),
    ("silver3", 1050),
    ("silver2", 1100),
    ("silver1", 1150),
    ("gold4", 1200),
    ("gold3", 1250),
    ("gold2", 1300),
    ("gold1", 1350),
    ("platinum4", 1400),
    ("platinum3", 1450),
    ("platinum2", 1500),
    ("platinum1", 1550),
    ("emerald4", 1600),
    ("emerald3", 1650),
    ("emerald2", 1700),
    ("emerald1", 1750),
    ("diamond4", 1800),
    ("diamond3", 1900),
    ("diamond2", 2000),
    ("diamond1", 2100),
    ("master", 2300),
    ("grandmaster", 2500),
    ("challenger", 2700),
];

fn lookup(rank: &str) -> Option<i32> {
    let needle = rank.trim();
    RANKS
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(needle))
        .map(|&(_, rating)| rating)
}

/// Returns true if `rank` names a tier of the rank table.
pub fn is_known_rank(rank: &str) -> bool {
    lookup(rank).is_some()
}

/// Rating model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingModel {
    pub default_rating: i32,
    pub streak_unit: i32,
    pub streak_cap: i32,
}

impl Default for RatingModel {
    fn default() -> Self {
        Self {
            default_rating: DEFAULT_RATING,
            streak_unit: STREAK_UNIT,
            streak_cap: STREAK_CAP,
        }
    }
}

impl RatingModel {
    /// Base rating of a rank label. Unknown labels fall back to the default rating.
    pub fn base_rating(&self, rank: &str) -> i32 {
        lookup(rank).unwrap_or_else(|| {
            debug!(
                "RatingModel: unknown rank '{}', using default rating {}",
                rank, self.default_rating
            );
            self.default_rating
        })
    }

    /// Streak bonus: zero below two in a row, then one unit per extra step, capped.
    pub fn streak_adjustment(&self, streak: i32) -> i32 {
        let magnitude = i64::from(streak).abs();
        if magnitude < 2 {
            return 0;
        }
        let cap = i64::from(self.streak_cap).abs();
        let raw = (magnitude - 1) * i64::from(self.streak_unit);
        let adjusted = (i64::from(streak.signum()) * raw).clamp(-cap, cap);
        // Clamped to the cap, which is itself an i32.
        adjusted as i32
    }

    /// Base rating plus streak adjustment, saturating at the `i32` bounds.
    pub fn effective_rating(&self, rank: &str, streak: i32) -> i32 {
        self.base_rating(rank).saturating_add(self.streak_adjustment(streak))
    }
}

/// Base rating plus streak adjustment using the default model.
pub fn effective_rating(rank: &str, streak: i32) -> i32 {
    RatingModel::default().effective_rating(rank, streak)
}

/// Streak adjustment using the default model.
pub fn streak_adjustment(streak: i32) -> i32 {
    RatingModel::default().streak_adjustment(streak)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratings_are_monotonic_over_table() {
        let ratings: Vec<i32> = RANKS
            .iter()
            .map(|(label, _)| effective_rating(label, 0))
            .collect();
        assert_eq!(ratings.len(), 31);
        for pair in ratings.windows(2) {
            assert!(pair[0] <= pair[1], "{} > {}", pair[0], pair[1]);
        }
        assert_eq!(ratings[0], 600);
        assert_eq!(ratings[30], 2700);
    }

    #[test]
    fn test_streak_adjustment_values() {
        for streak in -1..=1 {
            assert_eq!(streak_adjustment(streak), 0);
        }
        assert_eq!(streak_adjustment(2), 25);
        assert_eq!(streak_adjustment(3), 50);
        assert_eq!(streak_adjustment(4), 75);
        assert_eq!(streak_adjustment(5), 100);
        assert_eq!(streak_adjustment(7), 100);
        assert_eq!(streak_adjustment(-2), -25);
        assert_eq!(streak_adjustment(-3), -50);
        assert_eq!(streak_adjustment(-12), -100);
        assert_eq!(streak_adjustment(i32::MIN), -100);
        assert_eq!(streak_adjustment(i32::MAX), 100);
    }

    #[test]
    fn test_streak_adjustment_matches_closed_form() {
        for streak in -20i32..=20 {
            let expected = if streak.abs() < 2 {
                0
            } else {
                streak.signum() * std::cmp::min(100, (streak.abs() - 1) * 25)
            };
            assert_eq!(streak_adjustment(streak), expected, "streak {}", streak);
        }
    }

    #[test]
    fn test_unknown_rank_uses_default() {
        assert_eq!(effective_rating("wood7", 0), DEFAULT_RATING);
        assert_eq!(effective_rating("", 3), DEFAULT_RATING + 50);
        assert!(!is_known_rank("wood7"));
    }

    #[test]
    fn test_rank_lookup_ignores_case_and_whitespace() {
        assert_eq!(effective_rating("  Diamond2 ", 0), 2000);
        assert_eq!(effective_rating("CHALLENGER", -4), 2700 - 75);
        assert!(is_known_rank("Gold1"));
    }

    #[test]
    fn test_custom_model_parameters() {
        let model = RatingModel {
            default_rating: 1000,
            streak_unit: 10,
            streak_cap: 30,
        };
        assert_eq!(model.base_rating("nope"), 1000);
        assert_eq!(model.streak_adjustment(3), 20);
        assert_eq!(model.streak_adjustment(9), 30);
        assert_eq!(model.effective_rating("silver4", -9), 970);
    }

    #[test]
    fn test_effective_rating_saturates_on_extreme_models() {
        let high = RatingModel {
            default_rating: i32::MAX,
            ..RatingModel::default()
        };
        assert_eq!(high.effective_rating("unranked", 2), i32::MAX);

        let low = RatingModel {
            default_rating: i32::MIN,
            streak_unit: i32::MAX,
            streak_cap: i32::MAX,
        };
        assert_eq!(low.effective_rating("unranked", -5), i32::MIN);
    }
}
