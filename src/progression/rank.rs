//! Hunter ranks
//!
//! Ranks are coarse tiers derived from level. The table is validated once at
//! construction and walked in ascending order on every evaluation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hunter rank, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Rank {
    #[default]
    E,
    D,
    C,
    B,
    A,
    S,
    SS,
    Monarch,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::E,
        Rank::D,
        Rank::C,
        Rank::B,
        Rank::A,
        Rank::S,
        Rank::SS,
        Rank::Monarch,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rank::E => "E",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
            Rank::SS => "SS",
            Rank::Monarch => "Monarch",
        }
    }

    /// Display label, e.g. "E Rank" or "Monarch"
    pub fn label(&self) -> String {
        match self {
            Rank::Monarch => "Monarch".to_string(),
            other => format!("{} Rank", other.name()),
        }
    }

    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Rank::E => (156, 163, 175),
            Rank::D => (74, 222, 128),
            Rank::C => (96, 165, 250),
            Rank::B => (192, 132, 252),
            Rank::A => (248, 113, 113),
            Rank::S => (250, 204, 21),
            Rank::SS => (251, 146, 60),
            Rank::Monarch => (168, 85, 247),
        }
    }

    pub fn ordinal(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the rank table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankThreshold {
    pub rank: Rank,
    pub min_level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankTableError {
    #[error("rank table is empty")]
    Empty,
    #[error("rank {next} must come after {prev} in the table")]
    RankOrder { prev: Rank, next: Rank },
    #[error("min level for {rank} ({min_level}) must be greater than {prev_min_level}")]
    LevelOrder {
        rank: Rank,
        min_level: u32,
        prev_min_level: u32,
    },
}

/// Ordered mapping from rank to minimum level.
///
/// Invariant: ranks and thresholds both strictly increase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RankThreshold>", into = "Vec<RankThreshold>")]
pub struct RankTable {
    entries: Vec<RankThreshold>,
}

impl RankTable {
    pub fn new(entries: Vec<RankThreshold>) -> Result<Self, RankTableError> {
        if entries.is_empty() {
            return Err(RankTableError::Empty);
        }
        for pair in entries.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if next.rank <= prev.rank {
                return Err(RankTableError::RankOrder { prev: prev.rank, next: next.rank });
            }
            if next.min_level <= prev.min_level {
                return Err(RankTableError::LevelOrder {
                    rank: next.rank,
                    min_level: next.min_level,
                    prev_min_level: prev.min_level,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Build a table from `(rank, min_level)` pairs
    pub fn from_pairs(pairs: &[(Rank, u32)]) -> Result<Self, RankTableError> {
        Self::new(
            pairs
                .iter()
                .map(|&(rank, min_level)| RankThreshold { rank, min_level })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[RankThreshold] {
        &self.entries
    }

    /// Lowest rank in the table
    pub fn lowest(&self) -> Rank {
        self.entries[0].rank
    }

    /// Highest rank whose threshold is met by `level`, if any
    pub fn rank_for_level(&self, level: u32) -> Option<Rank> {
        let mut found = None;
        for entry in &self.entries {
            if entry.min_level > level {
                break;
            }
            found = Some(entry.rank);
        }
        found
    }

    /// Re-evaluate `current` against `level`. Ranks only move forward.
    pub fn evaluate(&self, current: Rank, level: u32) -> Rank {
        match self.rank_for_level(level) {
            Some(candidate) if candidate > current => candidate,
            _ => current,
        }
    }

    /// Minimum level of the next rank above `current`
    pub fn next_threshold(&self, current: Rank) -> Option<RankThreshold> {
        self.entries.iter().find(|e| e.rank > current).copied()
    }

    pub fn min_level(&self, rank: Rank) -> Option<u32> {
        self.entries.iter().find(|e| e.rank == rank).map(|e| e.min_level)
    }
}

impl Default for RankTable {
    fn default() -> Self {
        Self {
            entries: vec![
                RankThreshold { rank: Rank::E, min_level: 0 },
                RankThreshold { rank: Rank::D, min_level: 4 },
                RankThreshold { rank: Rank::C, min_level: 8 },
                RankThreshold { rank: Rank::B, min_level: 13 },
                RankThreshold { rank: Rank::A, min_level: 21 },
                RankThreshold { rank: Rank::S, min_level: 31 },
                RankThreshold { rank: Rank::SS, min_level: 46 },
                RankThreshold { rank: Rank::Monarch, min_level: 60 },
            ],
        }
    }
}

impl TryFrom<Vec<RankThreshold>> for RankTable {
    type Error = RankTableError;

    fn try_from(entries: Vec<RankThreshold>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<RankTable> for Vec<RankThreshold> {
    fn from(table: RankTable) -> Self {
        table.entries
    }
}
