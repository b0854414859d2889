//! Level curve data
//!
//! The experience curve cookies level along, as stored in `level_curve.ron`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::progression::{RequirementTable, MAX_LEVEL};

/// Level curve as written in data files.
///
/// `Increments` lists the experience needed to go from each level to the
/// next (levels 2..=MAX_LEVEL), `Thresholds` lists cumulative totals
/// (levels 1..=MAX_LEVEL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelCurveConfig {
    Increments(Vec<u64>),
    Thresholds(Vec<u64>),
}

impl LevelCurveConfig {
    /// Validate and build the requirement table
    pub fn build(&self) -> Result<RequirementTable, ConfigError> {
        match self {
            LevelCurveConfig::Increments(steps) => RequirementTable::from_increments(steps),
            LevelCurveConfig::Thresholds(totals) => RequirementTable::from_thresholds(totals.clone()),
        }
    }
}

/// Experience needed per level up to 50
const EARLY_INCREMENTS: [u64; 49] = [
    60, 80, 100, 120, 150, 180, 220, 270, 330, // 2-10
    400, 480, 570, 680, 810, 970, 1160, 1380, 1640, 1950, // 11-20
    2320, 2760, 3280, 3900, 4630, 5500, 6530, 7750, 9200, 10920, // 21-30
    12960, 15380, 18250, 21650, 25680, 30460, 36130, 42860, 50840, 60300, // 31-40
    71520, 84830, 100610, 119330, 141530, 167860, 199090, 236130, 280160, 332160, // 41-50
];

/// Flat per-level cost bands past level 50: (last level of band, cost)
const LATE_BANDS: [(u32, u64); 5] = [
    (60, 332_160),
    (65, 342_124),
    (70, 362_054),
    (80, 383_777),
    (90, 405_500),
];

/// The curve the game ships with
pub fn default_level_curve() -> LevelCurveConfig {
    let mut steps = EARLY_INCREMENTS.to_vec();
    for level in 51..=MAX_LEVEL {
        let cost = LATE_BANDS
            .iter()
            .find(|(last, _)| level <= *last)
            .map(|&(_, cost)| cost)
            .unwrap_or(LATE_BANDS[LATE_BANDS.len() - 1].1);
        steps.push(cost);
    }
    LevelCurveConfig::Increments(steps)
}
