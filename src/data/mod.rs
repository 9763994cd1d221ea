//! External configuration
//!
//! Quest catalog and rank table loaded from RON files, so the daily quests
//! can be edited without touching progression state.

pub mod loader;

pub use loader::{DataManager, DataError, config_directory, save_catalog, export_default_data};
