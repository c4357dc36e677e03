//! Snapshot persistence
//!
//! One JSON blob under a fixed storage key in the platform data directory.
//! Written after every mutation and navigation, read once at startup,
//! removed only after a confirmed successful submission.

use crate::form::Snapshot;
use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// Fixed storage key; the snapshot lives in a file of this name
const STORAGE_KEY: &str = "collective-application-state.json";

/// File-backed store for the in-progress application
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Store in the platform data directory; None when no home directory
    /// can be resolved (persistence is then simply disabled)
    pub fn new() -> Option<Self> {
        ProjectDirs::from("com", "seventeen15", "collective-apply")
            .map(|dirs| Self::at_path(dirs.data_dir().join(STORAGE_KEY)))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Persist the snapshot, replacing any previous one
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(snapshot)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Load the persisted snapshot. A missing file means a fresh start;
    /// a file that fails to parse is treated the same way, logged and
    /// otherwise ignored.
    pub fn restore(&self) -> Option<Snapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!("could not read saved application state: {err}");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!("discarding unparseable application state: {err}");
                None
            }
        }
    }

    /// Remove the persisted snapshot; absent is not an error
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Whether a snapshot is currently persisted
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
