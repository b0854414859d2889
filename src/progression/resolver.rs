//! Level resolution
//!
//! Maps a total amount of experience onto the requirement curve.

use super::xp::{Level, RequirementTable};

/// Where a total amount of experience lands on the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub level: Level,
    /// Experience left over past `level`'s threshold
    pub remainder: u64,
}

impl RequirementTable {
    /// Find the highest level whose threshold does not exceed `total`.
    ///
    /// Experience past the cap is reported as remainder on MAX_LEVEL.
    pub fn resolve(&self, total: u64) -> Resolution {
        let thresholds = self.all_thresholds();
        // Thresholds are strictly increasing and start at 0, so at least one
        // entry always satisfies the predicate.
        let reached = thresholds.partition_point(|&t| t <= total);
        let level = Level::new(reached as u32).unwrap_or(Level::MIN);
        Resolution {
            level,
            remainder: total - self.threshold(level),
        }
    }

    /// Experience still missing to reach the level after `resolution`,
    /// or `None` at the cap
    pub fn experience_to_next(&self, resolution: &Resolution) -> Option<u64> {
        let next = resolution.level.next()?;
        Some(self.increment(next) - resolution.remainder)
    }
}
