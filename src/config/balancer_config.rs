//! Balancing configuration parsing from environment variables and TOML files.

use crate::domain::balancing::{
    Balancer, CostModel, DEFAULT_ITERATIONS, DEFAULT_LOOKBACK, PENALTY_PER_REPEAT,
};
use crate::domain::rating::{DEFAULT_RATING, RatingModel, STREAK_CAP, STREAK_UNIT};
use crate::domain::roster::{MAX_ROSTER_SIZE, REQUIRED_SELECTION};
use anyhow::{Result, bail};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Upper bound for `default_rating`, `streak_unit` and `streak_cap`.
pub const MAX_RATING_SETTING: i32 = 100_000;
/// Upper bound for `penalty_per_repeat`.
pub const MAX_PENALTY_PER_REPEAT: i32 = 10_000;

/// Tunables of the balancing run and roster limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancerConfig {
    /// Most recent matches considered for teammate repeats.
    pub lookback: usize,
    pub penalty_per_repeat: i32,
    pub streak_unit: i32,
    pub streak_cap: i32,
    pub default_rating: i32,
    pub random_iterations: usize,
    pub max_roster_size: usize,
    /// Selected participants required before balancing.
    pub required_selection: usize,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_LOOKBACK,
            penalty_per_repeat: PENALTY_PER_REPEAT,
            streak_unit: STREAK_UNIT,
            streak_cap: STREAK_CAP,
            default_rating: DEFAULT_RATING,
            random_iterations: DEFAULT_ITERATIONS,
            max_roster_size: MAX_ROSTER_SIZE,
            required_selection: REQUIRED_SELECTION,
        }
    }
}

/// Partial configuration as read from a TOML file. Missing keys keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BalancerConfigFile {
    pub lookback: Option<usize>,
    pub penalty_per_repeat: Option<i32>,
    pub streak_unit: Option<i32>,
    pub streak_cap: Option<i32>,
    pub default_rating: Option<i32>,
    pub random_iterations: Option<usize>,
    pub max_roster_size: Option<usize>,
    pub required_selection: Option<usize>,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl BalancerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lookback: env_or("AUTOBALANCE_LOOKBACK", defaults.lookback),
            penalty_per_repeat: env_or(
                "AUTOBALANCE_PENALTY_PER_REPEAT",
                defaults.penalty_per_repeat,
            ),
            streak_unit: env_or("AUTOBALANCE_STREAK_UNIT", defaults.streak_unit),
            streak_cap: env_or("AUTOBALANCE_STREAK_CAP", defaults.streak_cap),
            default_rating: env_or("AUTOBALANCE_DEFAULT_RATING", defaults.default_rating),
            random_iterations: env_or(
                "AUTOBALANCE_RANDOM_ITERATIONS",
                defaults.random_iterations,
            ),
            max_roster_size: env_or("AUTOBALANCE_MAX_ROSTER_SIZE", defaults.max_roster_size),
            required_selection: env_or(
                "AUTOBALANCE_REQUIRED_SELECTION",
                defaults.required_selection,
            ),
        }
    }

    /// Applies the keys present in a TOML document on top of this configuration.
    pub fn merge_toml(mut self, content: &str) -> Result<Self> {
        let file: BalancerConfigFile = toml::from_str(content)?;
        if let Some(v) = file.lookback {
            self.lookback = v;
        }
        if let Some(v) = file.penalty_per_repeat {
            self.penalty_per_repeat = v;
        }
        if let Some(v) = file.streak_unit {
            self.streak_unit = v;
        }
        if let Some(v) = file.streak_cap {
            self.streak_cap = v;
        }
        if let Some(v) = file.default_rating {
            self.default_rating = v;
        }
        if let Some(v) = file.random_iterations {
            self.random_iterations = v;
        }
        if let Some(v) = file.max_roster_size {
            self.max_roster_size = v;
        }
        if let Some(v) = file.required_selection {
            self.required_selection = v;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.required_selection < 2 || self.required_selection % 2 != 0 {
            bail!(
                "Invalid required_selection: {}. Must be an even number of at least 2",
                self.required_selection
            );
        }
        if self.max_roster_size < self.required_selection {
            bail!(
                "Invalid max_roster_size: {} is smaller than required_selection {}",
                self.max_roster_size,
                self.required_selection
            );
        }
        if self.random_iterations == 0 {
            bail!("Invalid random_iterations: must be at least 1");
        }
        if self.penalty_per_repeat < 0 || self.streak_unit < 0 || self.streak_cap < 0 {
            bail!("Penalty and streak settings must not be negative");
        }
        if self.penalty_per_repeat > MAX_PENALTY_PER_REPEAT {
            bail!(
                "Invalid penalty_per_repeat: {}. Must be at most {}",
                self.penalty_per_repeat,
                MAX_PENALTY_PER_REPEAT
            );
        }
        for (name, value) in [
            ("default_rating", self.default_rating),
            ("streak_unit", self.streak_unit),
            ("streak_cap", self.streak_cap),
        ] {
            if !(-MAX_RATING_SETTING..=MAX_RATING_SETTING).contains(&value) {
                bail!(
                    "Invalid {}: {}. Must be within ±{}",
                    name,
                    value,
                    MAX_RATING_SETTING
                );
            }
        }
        Ok(())
    }

    pub fn rating_model(&self) -> RatingModel {
        RatingModel {
            default_rating: self.default_rating,
            streak_unit: self.streak_unit,
            streak_cap: self.streak_cap,
        }
    }

    pub fn cost_model(&self) -> CostModel {
        CostModel {
            penalty_per_repeat: self.penalty_per_repeat,
        }
    }

    pub fn balancer(&self) -> Balancer {
        Balancer::new(self.cost_model(), self.random_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = BalancerConfig::default();
        assert_eq!(config.lookback, 3);
        assert_eq!(config.penalty_per_repeat, 20);
        assert_eq!(config.streak_unit, 25);
        assert_eq!(config.streak_cap, 100);
        assert_eq!(config.random_iterations, 3000);
        assert_eq!(config.max_roster_size, 20);
        assert_eq!(config.required_selection, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_toml_overrides_present_keys() {
        let config = BalancerConfig::default()
            .merge_toml("lookback = 5\npenalty_per_repeat = 35\n")
            .expect("valid toml");
        assert_eq!(config.lookback, 5);
        assert_eq!(config.penalty_per_repeat, 35);
        assert_eq!(config.streak_cap, 100);
        assert_eq!(config.cost_model().penalty_per_repeat, 35);
    }

    #[test]
    fn test_merge_toml_rejects_unknown_keys() {
        assert!(BalancerConfig::default().merge_toml("lookbak = 5").is_err());
        assert!(BalancerConfig::default().merge_toml("lookback = \"five\"").is_err());
    }

    #[test]
    fn test_validate_rejects_odd_selection() {
        let config = BalancerConfig {
            required_selection: 9,
            ..BalancerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BalancerConfig {
            max_roster_size: 8,
            ..BalancerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_settings() {
        let config = BalancerConfig {
            default_rating: i32::MAX,
            ..BalancerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BalancerConfig {
            default_rating: i32::MIN,
            ..BalancerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BalancerConfig {
            penalty_per_repeat: MAX_PENALTY_PER_REPEAT + 1,
            ..BalancerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BalancerConfig {
            streak_unit: MAX_RATING_SETTING + 1,
            ..BalancerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BalancerConfig {
            default_rating: MAX_RATING_SETTING,
            penalty_per_repeat: MAX_PENALTY_PER_REPEAT,
            streak_cap: MAX_RATING_SETTING,
            ..BalancerConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(
            config.rating_model().effective_rating("unranked", 2),
            MAX_RATING_SETTING + 25
        );
    }

    #[test]
    fn test_models_follow_config() {
        let config = BalancerConfig {
            streak_unit: 10,
            streak_cap: 15,
            default_rating: 999,
            ..BalancerConfig::default()
        };
        let model = config.rating_model();
        assert_eq!(model.effective_rating("unranked", 4), 999 + 15);
        assert_eq!(config.balancer().random_iterations, 3000);
    }
}
