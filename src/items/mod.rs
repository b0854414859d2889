//! Jelly items
//!
//! Jelly classes, their experience values and the inventories that hold them.

pub mod jelly;
pub mod inventory;

pub use jelly::{JellyValues, JellyValueTable, NominalLevel, UpgradeTier, JELLY_LEVELS, MAX_TIER, TIER_COUNT};
pub use inventory::{Inventory, total_experience};
