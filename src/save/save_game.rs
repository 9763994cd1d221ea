//! Progress save/load
//!
//! The whole tracker is saved as one JSON document: the player snapshot, the
//! current quest period and the activity log.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::activity::ActivityLog;
use crate::progression::{PlayerState, RankTable, StateError};
use crate::quests::SessionSnapshot;

/// Save file version for compatibility checking
pub const SAVE_VERSION: u32 = 1;

/// Complete save data structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub player: PlayerState,
    #[serde(default)]
    pub session: Option<SessionSnapshot>,
    #[serde(default)]
    pub activity: ActivityLog,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            player: PlayerState::default(),
            session: None,
            activity: ActivityLog::default(),
        }
    }
}

impl SaveData {
    /// Fresh save for a new player under `ranks`
    pub fn fresh(ranks: &RankTable) -> Self {
        Self {
            player: PlayerState::new(ranks),
            ..Self::default()
        }
    }
}

/// Save error types
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("Invalid save data: {0}")]
    InvalidData(#[from] StateError),
}

/// Get the save directory path
pub fn save_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "questline", "Questline") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        // Fallback to current directory
        PathBuf::from(".")
    }
}

/// Default location of the save file
pub fn save_path() -> PathBuf {
    save_directory().join("progress.json")
}

/// Write a save file, creating its directory if needed
pub fn save_to(path: &Path, data: &SaveData) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(data)?;
    // Write to a sibling file first so a crash never leaves half a save
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;

    log::debug!("Progress saved to {:?}", path);
    Ok(())
}

/// Read a save file and check its version. Invariants are not checked here.
pub fn load_from(path: &Path) -> Result<SaveData, SaveError> {
    let data = fs::read_to_string(path)?;
    let save: SaveData = serde_json::from_str(&data)?;

    if save.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save.version,
        });
    }

    log::info!("Progress loaded from {:?}", path);
    Ok(save)
}

/// Load a save, falling back to a fresh one.
///
/// A file that cannot be read or parsed is replaced wholesale. A file that
/// parses but holds a player state breaking its invariants keeps the session
/// and activity log and gets a fresh player.
pub fn load_or_default(path: &Path, ranks: &RankTable) -> SaveData {
    if !path.exists() {
        log::info!("No save at {:?}, starting fresh", path);
        return SaveData::fresh(ranks);
    }

    let mut save = match load_from(path) {
        Ok(save) => save,
        Err(e) => {
            log::warn!("Failed to load save: {}, starting fresh", e);
            return SaveData::fresh(ranks);
        }
    };

    if let Err(e) = save.player.validate() {
        log::warn!("Saved player state is corrupt ({}), resetting progression", e);
        save.player = PlayerState::new(ranks);
    }
    save
}
