//! Storage location parsing from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Where the session file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEnvConfig {
    pub data_dir: PathBuf,
}

impl StorageEnvConfig {
    /// `AUTOBALANCE_DATA_DIR`, falling back to `$HOME/.autobalance`.
    pub fn from_env() -> Result<Self> {
        if let Ok(dir) = env::var("AUTOBALANCE_DATA_DIR") {
            return Ok(Self {
                data_dir: PathBuf::from(dir),
            });
        }
        let home = env::var("HOME").context("Could not find HOME directory")?;
        Ok(Self {
            data_dir: PathBuf::from(home).join(".autobalance"),
        })
    }
}
