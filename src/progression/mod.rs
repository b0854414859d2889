//! Progression systems

pub mod xp;
pub mod resolver;
pub mod calculator;

pub use xp::{Level, RequirementTable, MAX_LEVEL};
pub use resolver::Resolution;
pub use calculator::{CalculationResult, ProgressionCalculator};
