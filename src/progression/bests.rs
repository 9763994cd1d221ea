//! Personal-bests ledger
//!
//! Records only ever grow. Highest level and longest streak keep the maximum
//! seen; total XP is a running sum independent of level rollovers.

use serde::{Deserialize, Serialize};

/// A tracked record, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BestRecord {
    HighestLevel,
    LongestStreak,
    TotalXpEarned,
}

impl BestRecord {
    pub const ALL: [BestRecord; 3] = [
        BestRecord::HighestLevel,
        BestRecord::LongestStreak,
        BestRecord::TotalXpEarned,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            BestRecord::HighestLevel => "Highest Level Achieved",
            BestRecord::LongestStreak => "Longest Streak",
            BestRecord::TotalXpEarned => "Total XP Earned",
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            BestRecord::LongestStreak => Some("days"),
            _ => None,
        }
    }
}

/// One record with its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalBest {
    pub record: BestRecord,
    pub value: u64,
}

impl PersonalBest {
    /// Formatted value with unit, e.g. "12 days"
    pub fn display_value(&self) -> String {
        match self.record.unit() {
            Some(unit) => format!("{} {}", self.value, unit),
            None => self.value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalBests {
    pub highest_level: u32,
    pub longest_streak: u32,
    pub total_xp_earned: u64,
}

impl Default for PersonalBests {
    fn default() -> Self {
        Self {
            highest_level: 1,
            longest_streak: 0,
            total_xp_earned: 0,
        }
    }
}

impl PersonalBests {
    /// Fold one progression step into the ledger
    pub fn record_step(&self, level: u32, streak: u32, xp_reward: u64) -> Self {
        Self {
            highest_level: self.highest_level.max(level),
            longest_streak: self.longest_streak.max(streak),
            total_xp_earned: self.total_xp_earned.saturating_add(xp_reward),
        }
    }

    pub fn get(&self, record: BestRecord) -> u64 {
        match record {
            BestRecord::HighestLevel => self.highest_level as u64,
            BestRecord::LongestStreak => self.longest_streak as u64,
            BestRecord::TotalXpEarned => self.total_xp_earned,
        }
    }

    /// All records in display order
    pub fn entries(&self) -> Vec<PersonalBest> {
        BestRecord::ALL
            .iter()
            .map(|&record| PersonalBest { record, value: self.get(record) })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_step_keeps_maximums() {
        let bests = PersonalBests { highest_level: 5, longest_streak: 10, total_xp_earned: 400 };
        let next = bests.record_step(3, 2, 25);
        assert_eq!(next.highest_level, 5);
        assert_eq!(next.longest_streak, 10);
        assert_eq!(next.total_xp_earned, 425);

        let next = next.record_step(6, 11, 0);
        assert_eq!(next.highest_level, 6);
        assert_eq!(next.longest_streak, 11);
        assert_eq!(next.total_xp_earned, 425);
    }

    #[test]
    fn test_entries_order_and_display() {
        let bests = PersonalBests { highest_level: 3, longest_streak: 7, total_xp_earned: 900 };
        let entries = bests.entries();
        let titles: Vec<_> = entries.iter().map(|e| e.record.title()).collect();
        assert_eq!(titles, ["Highest Level Achieved", "Longest Streak", "Total XP Earned"]);
        assert_eq!(entries[1].display_value(), "7 days");
        assert_eq!(entries[2].display_value(), "900");
    }
}
