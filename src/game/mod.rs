//! Game module - tracker state ownership and the calendar clock

mod state;
mod time;

pub use state::{Game, GameState, GameMessage, MessageCategory, StoragePaths};
pub use time::{Clock, SystemClock, FixedClock};
