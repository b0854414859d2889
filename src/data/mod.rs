//! Balance data
//!
//! This module handles loading the level curve and jelly values from
//! external RON files, so game-balance changes need no rebuild.

pub mod loader;
pub mod curve;
pub mod jellies;

pub use loader::{BalanceData, default_data_dir, export_default_data, JELLIES_FILE, LEVEL_CURVE_FILE};
pub use curve::{LevelCurveConfig, default_level_curve};
pub use jellies::{JellyValueConfig, default_jelly_values};
