//! Achievement definitions
//!
//! Achievements are derived from the player state rather than stored. Every
//! condition reads a value that never decreases, so once unlocked an
//! achievement stays unlocked.

use super::player::PlayerState;
use super::rank::Rank;

/// Achievement definition
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: char,
    condition: fn(&PlayerState) -> bool,
}

impl Achievement {
    pub fn is_unlocked(&self, state: &PlayerState) -> bool {
        (self.condition)(state)
    }
}

/// Get all achievement definitions
pub fn all_achievements() -> Vec<Achievement> {
    vec![
        // Completion achievements
        Achievement {
            id: "first_blood",
            name: "First Blood",
            description: "First task completed",
            icon: '🩸',
            condition: |s| s.stats.total() > 0,
        },
        // Streak achievements
        Achievement {
            id: "dungeon_survivor",
            name: "Dungeon Survivor",
            description: "7-day streak",
            icon: '🛡',
            condition: |s| s.personal_bests.longest_streak >= 7,
        },
        Achievement {
            id: "elite_hunter",
            name: "Elite Hunter",
            description: "30-day streak",
            icon: '⚔',
            condition: |s| s.personal_bests.longest_streak >= 30,
        },
        Achievement {
            id: "placement_slayer",
            name: "Placement Slayer",
            description: "60-day streak",
            icon: '👑',
            condition: |s| s.personal_bests.longest_streak >= 60,
        },
        // Rank achievements
        Achievement {
            id: "rank_d_hunter",
            name: "Awakened",
            description: "Reach D Rank",
            icon: '★',
            condition: |s| s.rank >= Rank::D,
        },
        Achievement {
            id: "s_rank_hunter",
            name: "National Level Hunter",
            description: "Reach S Rank",
            icon: '✪',
            condition: |s| s.rank >= Rank::S,
        },
        Achievement {
            id: "shadow_monarch",
            name: "Shadow Monarch",
            description: "Reach the Monarch rank",
            icon: '♛',
            condition: |s| s.rank == Rank::Monarch,
        },
    ]
}

/// Ids of every achievement unlocked by `state`, in definition order
pub fn unlocked_ids(state: &PlayerState) -> Vec<&'static str> {
    all_achievements()
        .into_iter()
        .filter(|a| a.is_unlocked(state))
        .map(|a| a.id)
        .collect()
}

/// Achievements unlocked by `new` that were still locked in `old`
pub fn newly_unlocked(old: &PlayerState, new: &PlayerState) -> Vec<&'static str> {
    all_achievements()
        .into_iter()
        .filter(|a| !a.is_unlocked(old) && a.is_unlocked(new))
        .map(|a| a.id)
        .collect()
}
