//! Max level calculation
//!
//! Entry point that prices a jelly inventory and resolves the total against
//! the level curve. Both tables are handed in at construction and never
//! change afterwards, so one calculator can serve any number of threads.

use crate::error::CalcError;
use crate::items::{total_experience, Inventory, JellyValueTable, JellyValues, UpgradeTier};
use super::xp::{Level, RequirementTable};

/// Outcome of a max level calculation.
///
/// `threshold(achieved_level) + remainder == total_experience` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationResult {
    pub achieved_level: Level,
    pub total_experience: u64,
    pub remainder: u64,
    /// Experience missing for the next level, `None` at the cap
    pub experience_to_next_level: Option<u64>,
}

impl CalculationResult {
    pub fn is_capped(&self) -> bool {
        self.achieved_level.is_max()
    }
}

/// Computes the highest level reachable from a fresh jelly inventory
#[derive(Debug, Clone)]
pub struct ProgressionCalculator<V = JellyValueTable> {
    curve: RequirementTable,
    values: V,
}

impl<V: JellyValues> ProgressionCalculator<V> {
    pub fn new(curve: RequirementTable, values: V) -> Self {
        Self { curve, values }
    }

    pub fn curve(&self) -> &RequirementTable {
        &self.curve
    }

    pub fn values(&self) -> &V {
        &self.values
    }

    /// Highest level reachable by feeding every jelly in `inventory` at
    /// upgrade tier `tier`, starting from level 1 with no experience.
    ///
    /// Checks the tier first, then the inventory keys, then the quantities;
    /// the first problem found is returned.
    pub fn calculate_max_level(
        &self,
        inventory: &Inventory,
        tier: i64,
    ) -> Result<CalculationResult, CalcError> {
        let tier = UpgradeTier::new(tier)?;
        let total = total_experience(&self.values, inventory, tier)?;
        let resolution = self.curve.resolve(total);

        log::debug!(
            "{} jelly entries at tier {} -> {} exp, level {} (+{})",
            inventory.len(),
            tier,
            total,
            resolution.level,
            resolution.remainder
        );

        Ok(CalculationResult {
            achieved_level: resolution.level,
            total_experience: total,
            remainder: resolution.remainder,
            experience_to_next_level: self.curve.experience_to_next(&resolution),
        })
    }
}
