//! Configuration module for Autobalance.
//!
//! Structured configuration loading from environment variables, with an
//! optional TOML file layered on top of the balancing settings.

mod balancer_config;
mod storage_config;

pub use balancer_config::{
    BalancerConfig, BalancerConfigFile, MAX_PENALTY_PER_REPEAT, MAX_RATING_SETTING,
};
pub use storage_config::StorageEnvConfig;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub balancer: BalancerConfig,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let balancer = BalancerConfig::from_env();
        let storage = StorageEnvConfig::from_env()?;
        let config = Self {
            balancer,
            data_dir: storage.data_dir,
        };
        config.balancer.validate()?;
        Ok(config)
    }

    /// Layers a TOML file of balancing settings over the current values.
    pub fn with_overrides(mut self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;
        self.balancer = self
            .balancer
            .merge_toml(&content)
            .context(format!("Failed to parse config TOML: {}", path.display()))?;
        self.balancer.validate()?;
        Ok(self)
    }
}
