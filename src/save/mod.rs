//! Save/load system
//!
//! Handles persisting progression between sessions.

pub mod save_game;

pub use save_game::{
    SaveData, SaveError, SAVE_VERSION,
    save_to, load_from, load_or_default,
    save_directory, save_path,
};
