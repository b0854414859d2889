//! Cookiecalc - Max level calculator for cookie experience jellies
//!
//! Prices a stack of EXP jellies at an upgrade tier and finds the highest
//! cookie level that much experience reaches, capped at level 90.

pub mod error;
pub mod progression;
pub mod items;
pub mod data;
pub mod api;

// Re-export commonly used types
pub use error::{CalcError, ConfigError, DomainError, ValidationError};
pub use progression::{CalculationResult, Level, ProgressionCalculator, RequirementTable, MAX_LEVEL};
pub use items::{Inventory, JellyValues, JellyValueTable, NominalLevel, UpgradeTier};
pub use data::BalanceData;
