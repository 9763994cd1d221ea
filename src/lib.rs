//! Questline - A terminal daily-quest tracker
//!
//! Clear your daily quests, earn XP, level up and climb the hunter
//! ranks from E to Monarch.

pub mod quests;
pub mod progression;
pub mod activity;
pub mod game;
pub mod data;
pub mod save;
pub mod insight;
pub mod ui;

// Re-export commonly used types
pub use game::{Game, GameState};
pub use progression::{PlayerState, ProgressionEngine, Rank, RankTable};
pub use quests::{Quest, QuestCatalog};
