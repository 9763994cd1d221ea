//! Progression engine
//!
//! Turns one accepted quest completion into the next player state. The
//! engine is pure: it borrows the old state and returns a new one, and never
//! fires events or touches storage. Duplicate completions are filtered out by
//! the quest session before they get here.

use chrono::NaiveDate;

use super::player::PlayerState;
use super::rank::RankTable;
use super::streak;
use super::xp::roll_over;
use crate::quests::Quest;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressionEngine {
    ranks: RankTable,
}

impl ProgressionEngine {
    pub fn new(ranks: RankTable) -> Self {
        Self { ranks }
    }

    pub fn ranks(&self) -> &RankTable {
        &self.ranks
    }

    /// Apply one quest completion on `date`
    pub fn apply_completion(&self, state: &PlayerState, quest: &Quest, date: NaiveDate) -> PlayerState {
        let reward = quest.xp_reward as u64;

        let stats = state.stats.incremented(quest.stat);
        let rolled = roll_over(state.level, state.xp.saturating_add(reward));
        let rank = self.ranks.evaluate(state.rank, rolled.level);
        let (streak, last_completion_date) =
            streak::advance(state.streak, state.last_completion_date, date);
        let personal_bests = state.personal_bests.record_step(rolled.level, streak, reward);

        if rolled.gained > 0 {
            log::debug!(
                "Quest '{}' raised level {} -> {}",
                quest.id,
                state.level,
                rolled.level
            );
        }

        PlayerState {
            level: rolled.level,
            xp: rolled.xp,
            rank,
            stats,
            streak,
            personal_bests,
            last_completion_date,
        }
    }

    /// Re-run rank evaluation alone, e.g. after a level was edited externally.
    /// The rank never moves backwards.
    pub fn reevaluate_rank(&self, state: &PlayerState) -> PlayerState {
        PlayerState {
            rank: self.ranks.evaluate(state.rank, state.level),
            ..state.clone()
        }
    }
}
