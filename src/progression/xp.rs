//! Experience and leveling
//!
//! XP thresholds and the level rollover loop.

/// XP cost of each level step, per level
pub const XP_PER_LEVEL: u64 = 100;

/// Calculate XP needed to advance from `level` to `level + 1`
pub fn xp_required_for_level(level: u32) -> u64 {
    XP_PER_LEVEL * level.max(1) as u64
}

/// Result of feeding XP into a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rollover {
    pub level: u32,
    pub xp: u64,
    /// Number of levels gained
    pub gained: u32,
}

/// Consume XP into levels until the remainder is below the next threshold.
///
/// A single reward may cross several level boundaries.
pub fn roll_over(level: u32, xp: u64) -> Rollover {
    let mut level = level.max(1);
    let mut xp = xp;
    let mut gained = 0;

    let mut threshold = xp_required_for_level(level);
    while xp >= threshold {
        xp -= threshold;
        level = level.saturating_add(1);
        gained += 1;
        threshold = xp_required_for_level(level);
    }

    Rollover { level, xp, gained }
}

/// Progress toward the next level as a 0.0-1.0 fraction
pub fn level_progress(level: u32, xp: u64) -> f64 {
    (xp as f64 / xp_required_for_level(level) as f64).clamp(0.0, 1.0)
}
