//! RON configuration loader
//!
//! Loads the quest catalog and rank table from external RON files, with
//! fallback to the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::progression::RankTable;
use crate::quests::{default_quest_catalog, CatalogError, QuestCatalog};

pub const QUESTS_FILE: &str = "quests.ron";
pub const RANKS_FILE: &str = "ranks.ron";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid quest catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Manages all external configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataManager {
    /// Daily quests
    pub catalog: QuestCatalog,
    /// Rank thresholds
    pub ranks: RankTable,
}

/// Get the configuration directory
pub fn config_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "questline", "Questline") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        PathBuf::from("./config")
    }
}

impl DataManager {
    /// Load from the platform config directory
    pub fn new() -> Self {
        Self::load_from(&config_directory())
    }

    /// Load each file from `base_path`, falling back to defaults for any
    /// file that is missing or invalid
    pub fn load_from(base_path: &Path) -> Self {
        Self {
            catalog: Self::load_catalog(base_path),
            ranks: Self::load_ranks(base_path),
        }
    }

    fn load_catalog(base_path: &Path) -> QuestCatalog {
        let path = base_path.join(QUESTS_FILE);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match ron::from_str::<QuestCatalog>(&content) {
                    Ok(catalog) => match catalog.validate() {
                        Ok(()) => {
                            log::info!("Loaded {} quests from {:?}", catalog.len(), path);
                            return catalog;
                        }
                        Err(e) => log::warn!("Ignoring {}: {}", QUESTS_FILE, e),
                    },
                    Err(e) => log::warn!("Failed to parse {}: {}", QUESTS_FILE, e),
                },
                Err(e) => log::warn!("Failed to read {}: {}", QUESTS_FILE, e),
            }
        }
        default_quest_catalog()
    }

    fn load_ranks(base_path: &Path) -> RankTable {
        let path = base_path.join(RANKS_FILE);
        if path.exists() {
            match fs::read_to_string(&path) {
                // Table invariants are enforced during deserialization
                Ok(content) => match ron::from_str::<RankTable>(&content) {
                    Ok(ranks) => return ranks,
                    Err(e) => log::warn!("Failed to parse {}: {}", RANKS_FILE, e),
                },
                Err(e) => log::warn!("Failed to read {}: {}", RANKS_FILE, e),
            }
        }
        RankTable::default()
    }

    /// Quest catalog
    pub fn catalog(&self) -> &QuestCatalog {
        &self.catalog
    }

    /// Rank table
    pub fn ranks(&self) -> &RankTable {
        &self.ranks
    }
}

/// Validate and write an edited quest catalog
pub fn save_catalog(base_path: &Path, catalog: &QuestCatalog) -> Result<(), DataError> {
    catalog.validate()?;
    fs::create_dir_all(base_path)?;
    let content = ron::ser::to_string_pretty(catalog, ron::ser::PrettyConfig::default())?;
    fs::write(base_path.join(QUESTS_FILE), content)?;
    log::info!("Saved {} quests to {:?}", catalog.len(), base_path);
    Ok(())
}

/// Export all default data to RON files for easy editing
pub fn export_default_data(base_path: &Path) -> Result<(), DataError> {
    save_catalog(base_path, &default_quest_catalog())?;

    let ranks = ron::ser::to_string_pretty(&RankTable::default(), ron::ser::PrettyConfig::default())?;
    fs::write(base_path.join(RANKS_FILE), ranks)?;

    Ok(())
}
