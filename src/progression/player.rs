//! Player progression state
//!
//! The snapshot the engine consumes and produces. Everything here is plain
//! data so it can be diffed, cloned and saved as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bests::PersonalBests;
use super::rank::{Rank, RankTable};
use super::xp::xp_required_for_level;

/// Trainable stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatName {
    Discipline,
    Intelligence,
    Strength,
    Consistency,
    Focus,
}

impl StatName {
    pub const ALL: [StatName; 5] = [
        StatName::Discipline,
        StatName::Intelligence,
        StatName::Strength,
        StatName::Consistency,
        StatName::Focus,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StatName::Discipline => "Discipline",
            StatName::Intelligence => "Intelligence",
            StatName::Strength => "Strength",
            StatName::Consistency => "Consistency",
            StatName::Focus => "Focus",
        }
    }

    /// Single-character glyph for compact displays
    pub fn glyph(&self) -> char {
        match self {
            StatName::Discipline => '⚡',
            StatName::Intelligence => '✦',
            StatName::Strength => '⚔',
            StatName::Consistency => '↻',
            StatName::Focus => '◎',
        }
    }
}

impl std::fmt::Display for StatName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for StatName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatName::ALL
            .iter()
            .find(|stat| stat.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown stat: {}", s))
    }
}

/// Stat counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub discipline: u32,
    pub intelligence: u32,
    pub strength: u32,
    pub consistency: u32,
    pub focus: u32,
}

impl Stats {
    pub fn get(&self, stat: StatName) -> u32 {
        match stat {
            StatName::Discipline => self.discipline,
            StatName::Intelligence => self.intelligence,
            StatName::Strength => self.strength,
            StatName::Consistency => self.consistency,
            StatName::Focus => self.focus,
        }
    }

    fn get_mut(&mut self, stat: StatName) -> &mut u32 {
        match stat {
            StatName::Discipline => &mut self.discipline,
            StatName::Intelligence => &mut self.intelligence,
            StatName::Strength => &mut self.strength,
            StatName::Consistency => &mut self.consistency,
            StatName::Focus => &mut self.focus,
        }
    }

    /// Copy with one stat raised by 1
    pub fn incremented(&self, stat: StatName) -> Self {
        let mut next = *self;
        let value = next.get_mut(stat);
        *value = value.saturating_add(1);
        next
    }

    pub fn total(&self) -> u64 {
        StatName::ALL.iter().map(|&s| self.get(s) as u64).sum()
    }

    /// All stats paired with their values
    pub fn iter(&self) -> impl Iterator<Item = (StatName, u32)> + '_ {
        StatName::ALL.iter().map(move |&s| (s, self.get(s)))
    }

    /// Lowest-valued stat, first in declaration order on ties
    pub fn weakest(&self) -> StatName {
        self.iter()
            .min_by_key(|&(_, value)| value)
            .map(|(stat, _)| stat)
            .unwrap_or(StatName::Discipline)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("level must be at least 1")]
    ZeroLevel,
    #[error("xp {xp} is not below the level {level} threshold of {required}")]
    XpOverflow { level: u32, xp: u64, required: u64 },
    #[error("personal best {0} is below the current value")]
    BestBelowCurrent(&'static str),
}

/// A player's long-lived progression state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub level: u32,
    pub xp: u64,
    pub rank: Rank,
    pub stats: Stats,
    pub streak: u32,
    pub personal_bests: PersonalBests,
    pub last_completion_date: Option<NaiveDate>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            rank: Rank::E,
            stats: Stats::default(),
            streak: 0,
            personal_bests: PersonalBests::default(),
            last_completion_date: None,
        }
    }
}

impl PlayerState {
    /// Fresh state starting at the lowest rank of `ranks`
    pub fn new(ranks: &RankTable) -> Self {
        Self {
            rank: ranks.lowest(),
            ..Self::default()
        }
    }

    /// XP needed to finish the current level
    pub fn xp_to_next(&self) -> u64 {
        xp_required_for_level(self.level)
    }

    /// Check the invariants a loaded snapshot must satisfy before it reaches
    /// the engine.
    ///
    /// The rank is not checked against a rank table. Tables are user
    /// configuration and ranks never regress, so any rank is kept as saved.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.level == 0 {
            return Err(StateError::ZeroLevel);
        }
        let required = xp_required_for_level(self.level);
        if self.xp >= required {
            return Err(StateError::XpOverflow { level: self.level, xp: self.xp, required });
        }
        if self.personal_bests.highest_level < self.level {
            return Err(StateError::BestBelowCurrent("highest level"));
        }
        if self.personal_bests.longest_streak < self.streak {
            return Err(StateError::BestBelowCurrent("longest streak"));
        }
        Ok(())
    }
}
