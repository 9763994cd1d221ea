//! Progression systems
//!
//! XP, levels, ranks, streaks and personal bests, plus the engine that
//! advances them one quest completion at a time.

pub mod xp;
pub mod rank;
pub mod streak;
pub mod bests;
pub mod player;
pub mod engine;
pub mod notify;
pub mod achievements;

pub use xp::{xp_required_for_level, roll_over, level_progress, Rollover};
pub use rank::{Rank, RankTable, RankThreshold, RankTableError};
pub use bests::{BestRecord, PersonalBest, PersonalBests};
pub use player::{PlayerState, StatName, Stats, StateError};
pub use engine::ProgressionEngine;
pub use notify::{diff, Notifier, ProgressEvent, Subscriber};
pub use achievements::{Achievement, all_achievements, unlocked_ids};
