//! Experience and leveling
//!
//! The level requirement curve: cumulative experience needed to reach each
//! cookie level, from level 1 up to the hard cap.

use std::fmt;

use crate::error::ConfigError;

/// Highest level a cookie can reach
pub const MAX_LEVEL: u32 = 90;

/// A cookie's progression rank, always within 1..=MAX_LEVEL
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u32);

impl Level {
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(MAX_LEVEL);

    /// Returns `None` outside 1..=MAX_LEVEL
    pub fn new(value: u32) -> Option<Self> {
        (1..=MAX_LEVEL).contains(&value).then_some(Level(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The following level, or `None` at the cap
    pub fn next(self) -> Option<Level> {
        Level::new(self.0 + 1)
    }

    pub fn is_max(self) -> bool {
        self.0 == MAX_LEVEL
    }

    /// Zero-based position in the threshold sequence
    fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cumulative experience required per level.
///
/// Invariants, checked on construction:
/// - exactly MAX_LEVEL entries
/// - level 1 requires 0
/// - strictly increasing afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementTable {
    thresholds: Vec<u64>,
}

impl RequirementTable {
    /// Build from absolute thresholds, one per level starting at level 1
    pub fn from_thresholds(thresholds: Vec<u64>) -> Result<Self, ConfigError> {
        if thresholds.len() != MAX_LEVEL as usize {
            return Err(ConfigError::WrongLevelCount {
                expected: MAX_LEVEL as usize,
                found: thresholds.len(),
            });
        }
        if thresholds[0] != 0 {
            return Err(ConfigError::FirstThresholdNonZero { found: thresholds[0] });
        }
        for (i, pair) in thresholds.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ConfigError::NonIncreasingThreshold {
                    level: i as u32 + 2,
                    previous: pair[0],
                    found: pair[1],
                });
            }
        }
        Ok(Self { thresholds })
    }

    /// Build from per-level increments: `increments[0]` is the experience
    /// needed to go from level 1 to level 2, and so on up to MAX_LEVEL.
    pub fn from_increments(increments: &[u64]) -> Result<Self, ConfigError> {
        let expected = MAX_LEVEL as usize - 1;
        if increments.len() != expected {
            // Report in levels so the message matches the thresholds form
            return Err(ConfigError::WrongLevelCount {
                expected: MAX_LEVEL as usize,
                found: increments.len() + 1,
            });
        }

        let mut thresholds = Vec::with_capacity(MAX_LEVEL as usize);
        let mut total = 0u64;
        thresholds.push(total);
        for (i, &step) in increments.iter().enumerate() {
            let level = i as u32 + 2;
            total = total
                .checked_add(step)
                .ok_or(ConfigError::CurveOverflow { level })?;
            thresholds.push(total);
        }

        // A zero increment is caught here as a repeated threshold
        Self::from_thresholds(thresholds)
    }

    /// Cumulative experience needed to reach `level` from level 1
    pub fn threshold(&self, level: Level) -> u64 {
        self.thresholds[level.index()]
    }

    /// Experience needed to advance from the previous level into `level`
    pub fn increment(&self, level: Level) -> u64 {
        match level.index() {
            0 => 0,
            i => self.thresholds[i] - self.thresholds[i - 1],
        }
    }

    pub fn max_level(&self) -> Level {
        Level::MAX
    }

    /// Threshold of the cap level
    pub fn max_threshold(&self) -> u64 {
        self.threshold(Level::MAX)
    }

    /// All thresholds in level order, index 0 being level 1
    pub fn all_thresholds(&self) -> &[u64] {
        &self.thresholds
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A simple curve for tests: level L needs 100 * (L - 1) experience
    pub(crate) fn linear_curve() -> RequirementTable {
        let thresholds = (0..MAX_LEVEL as u64).map(|i| i * 100).collect();
        RequirementTable::from_thresholds(thresholds).expect("linear curve is valid")
    }

    #[test]
    fn test_level_bounds() {
        assert!(Level::new(0).is_none());
        assert_eq!(Level::new(1), Some(Level::MIN));
        assert_eq!(Level::new(90), Some(Level::MAX));
        assert!(Level::new(91).is_none());
        assert_eq!(Level::MAX.next(), None);
        assert_eq!(Level::MIN.next().map(Level::get), Some(2));
    }

    #[test]
    fn test_thresholds_strictly_increase() {
        let table = linear_curve();
        assert_eq!(table.threshold(Level::MIN), 0);
        for pair in table.all_thresholds().windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert_eq!(table.max_threshold(), 8900);
    }

    #[test]
    fn test_from_increments_accumulates() {
        let increments: Vec<u64> = (2..=MAX_LEVEL as u64).map(|l| l * 10).collect();
        let table = RequirementTable::from_increments(&increments).unwrap();
        assert_eq!(table.threshold(Level::new(2).unwrap()), 20);
        assert_eq!(table.threshold(Level::new(3).unwrap()), 50);
        assert_eq!(table.increment(Level::new(3).unwrap()), 30);
        assert_eq!(table.increment(Level::MIN), 0);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = RequirementTable::from_thresholds(vec![0, 10, 20]).unwrap_err();
        assert!(matches!(err, ConfigError::WrongLevelCount { expected: 90, found: 3 }));

        let err = RequirementTable::from_increments(&[10; 10]).unwrap_err();
        assert!(matches!(err, ConfigError::WrongLevelCount { expected: 90, found: 11 }));
    }

    #[test]
    fn test_rejects_nonzero_start() {
        let thresholds = (1..=MAX_LEVEL as u64).collect();
        let err = RequirementTable::from_thresholds(thresholds).unwrap_err();
        assert!(matches!(err, ConfigError::FirstThresholdNonZero { found: 1 }));
    }

    #[test]
    fn test_rejects_flat_or_falling_curve() {
        let mut thresholds: Vec<u64> = (0..MAX_LEVEL as u64).map(|i| i * 100).collect();
        thresholds[10] = thresholds[9];
        let err = RequirementTable::from_thresholds(thresholds).unwrap_err();
        assert!(matches!(err, ConfigError::NonIncreasingThreshold { level: 11, previous: 900, found: 900 }));

        let mut increments = vec![5u64; MAX_LEVEL as usize - 1];
        increments[3] = 0;
        let err = RequirementTable::from_increments(&increments).unwrap_err();
        assert!(matches!(err, ConfigError::NonIncreasingThreshold { level: 5, .. }));
    }

    #[test]
    fn test_rejects_overflowing_curve() {
        let mut increments = vec![1u64; MAX_LEVEL as usize - 1];
        increments[40] = u64::MAX;
        let err = RequirementTable::from_increments(&increments).unwrap_err();
        assert!(matches!(err, ConfigError::CurveOverflow { level: 42 }));
    }
}
