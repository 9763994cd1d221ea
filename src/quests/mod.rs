//! Daily quests
//!
//! The quest catalog and the per-day session that gates completions.

pub mod catalog;
pub mod session;

pub use catalog::{Quest, QuestKind, QuestCatalog, CatalogError, default_quest_catalog};
pub use session::{QuestSession, Completion, SessionSnapshot};
