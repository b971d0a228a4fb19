//! # Storage Module - Game State Persistence
//!
//! The whole world lives in one JSON document:
//!
//! ```text
//! {
//!   "players":        { "<sender id>": { ...player... } },
//!   "active_battles": { "<challenger>_<target>": { ...battle... } },
//!   "zones":          { "Forest": { "element_bonus": "Plant", ... } },
//!   "items":          { },
//!   "deities":        { "<sender id>": { "name": ..., "chosen": [] } }
//! }
//! ```
//!
//! Writes are atomic: the destination is locked with `fs2`, the new content
//! goes to a unique temp file which is fsynced and renamed over it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chatrpg::storage::StateStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = StateStore::new("data/game_state.json");
//!     let state = store.load().await?;
//!     store.save(&state).await?;
//!     Ok(())
//! }
//! ```

use fs2::FileExt;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::game::errors::GameError;
use crate::game::types::GameState;

/// File-backed store for the [`GameState`] document.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state document.
    ///
    /// A missing file yields a fresh world which is written out immediately.
    /// An unreadable or corrupt file is moved aside and replaced by a fresh
    /// world; only failing to write that fresh world is an error.
    pub async fn load(&self) -> Result<GameState, GameError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "No state file at {}; creating a new world",
                    self.path.display()
                );
                return self.fresh().await;
            }
            Err(e) => {
                warn!("Failed to read state file {}: {}", self.path.display(), e);
                return self.fresh().await;
            }
        };

        match serde_json::from_str::<GameState>(&content) {
            Ok(mut state) => {
                if state.zones.is_empty() {
                    state.zones = GameState::new().zones;
                }
                info!(
                    "Loaded game state from {} ({} players, {} active battles)",
                    self.path.display(),
                    state.players.len(),
                    state.active_battles.len()
                );
                Ok(state)
            }
            Err(e) => {
                warn!(
                    "State file {} is corrupt ({}); starting a new world",
                    self.path.display(),
                    e
                );
                self.quarantine().await;
                self.fresh().await
            }
        }
    }

    /// Persist `state` atomically as pretty JSON.
    pub async fn save(&self, state: &GameState) -> Result<(), GameError> {
        let content = serde_json::to_string_pretty(state)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Self::write_file_locked(&self.path, &content).await?;
        debug!(
            "Saved game state to {} ({} bytes)",
            self.path.display(),
            content.len()
        );
        Ok(())
    }

    async fn fresh(&self) -> Result<GameState, GameError> {
        let state = GameState::new();
        self.save(&state).await?;
        Ok(state)
    }

    /// Move an unparseable state file aside so it can be inspected later.
    async fn quarantine(&self) {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
        let mut aside = self.path.clone().into_os_string();
        aside.push(format!(".corrupt-{}", stamp));
        match tokio::fs::rename(&self.path, &aside).await {
            Ok(()) => warn!("Moved corrupt state file to {:?}", aside),
            Err(e) => warn!("Could not move corrupt state file aside: {}", e),
        }
    }

    /// Helper function to write content to a file with exclusive locking
    async fn write_file_locked(path: &Path, content: &str) -> Result<(), GameError> {
        use std::fs::{self, File, OpenOptions};
        use std::io::Write;

        // fs2 locks are synchronous
        let lock_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)?;

        lock_file.lock_exclusive()?;

        let dir = path.parent().filter(|d| !d.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
        let base = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("game_state.json");
        let mut counter = 0u32;
        let tmp_path = loop {
            let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(mut tmp) => {
                    tmp.write_all(content.as_bytes())?;
                    tmp.flush()?;
                    let _ = tmp.sync_all();
                    break candidate;
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    counter = counter.saturating_add(1);
                    continue;
                }
                Err(e) => return Err(GameError::Io(e)),
            }
        };

        fs::rename(&tmp_path, path)?;

        // persist the rename (best-effort)
        if let Ok(dir_file) = File::open(dir) {
            let _ = dir_file.sync_all();
        }

        drop(lock_file);
        Ok(())
    }
}
