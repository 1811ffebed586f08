use crate::application::session::PersistedSession;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const SESSION_FILE: &str = "session.json";

/// JSON file store for the roster, history and last assignments.
pub struct SessionStore {
    file_path: PathBuf,
}

impl SessionStore {
    /// Store inside `data_dir`, creating the directory if needed.
    pub fn new(data_dir: &Path) -> Result<Self> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir).context("Failed to create data directory")?;
        }

        Ok(Self {
            file_path: data_dir.join(SESSION_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn load(&self) -> Result<Option<PersistedSession>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file_path).context("Failed to read session file")?;
        let session: PersistedSession =
            serde_json::from_str(&content).context("Failed to parse session JSON")?;

        info!(
            "Loaded session from {:?} ({} players, {} matches)",
            self.file_path,
            session.participants.len(),
            session.history.len()
        );
        Ok(Some(session))
    }

    pub fn save(&self, session: &PersistedSession) -> Result<()> {
        let content =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        // Atomic write: write to temp file then rename
        let temp_path = self.file_path.with_extension("tmp");
        fs::write(&temp_path, content).context("Failed to write temp session file")?;
        fs::rename(&temp_path, &self.file_path).context("Failed to rename session file")?;

        info!("Saved session to {:?}", self.file_path);
        Ok(())
    }
}
