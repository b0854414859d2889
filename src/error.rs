//! Error types
//!
//! Configuration errors are fatal at startup. Validation and domain errors are
//! per-request and never leave a partial result behind.

use std::path::PathBuf;

use thiserror::Error;

/// Balance data that cannot be used to build the engine's tables
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("level curve must define {expected} levels, found {found}")]
    WrongLevelCount { expected: usize, found: usize },

    #[error("level 1 must require 0 experience, found {found}")]
    FirstThresholdNonZero { found: u64 },

    #[error("level {level} requires {found} experience, not more than the previous level's {previous}")]
    NonIncreasingThreshold { level: u32, previous: u64, found: u64 },

    #[error("level curve overflows at level {level}")]
    CurveOverflow { level: u32 },

    #[error("jelly Lv.{level} has no value for tier {tier}")]
    MissingJellyValue { level: u8, tier: u8 },

    #[error("jelly Lv.{level} defines {found} tier values, expected {expected}")]
    WrongTierCount { level: u8, expected: usize, found: usize },

    #[error("jelly table has an entry for undefined level Lv.{level}")]
    UnknownJellyLevel { level: u8 },

    #[error("jelly Lv.{level} at tier {tier} must be worth more than 0 experience")]
    ZeroJellyValue { level: u8, tier: u8 },

    #[error("jelly Lv.{level} drops from {previous} to {found} experience at tier {tier}")]
    DecreasingJellyValue { level: u8, tier: u8, previous: u64, found: u64 },

    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize {what}: {message}")]
    Serialize { what: &'static str, message: String },

    #[error("failed to write {path:?}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

/// A calculation request that cannot be served as given
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("jelly upgrade level must be between 0 and 5, got {tier}")]
    TierOutOfRange { tier: i64 },

    #[error("jelly level {level} is not defined (expected 1 to 8)")]
    UnknownNominalLevel { level: u32 },

    #[error("unrecognised jelly label {label:?} (expected \"Lv.1\" to \"Lv.8\")")]
    UnknownJellyLabel { label: String },

    #[error("jelly Lv.{level} has negative quantity {quantity}")]
    NegativeQuantity { level: u8, quantity: i64 },

    #[error("jelly Lv.{level} quantity {quantity} pushes total experience past the supported range")]
    ExperienceOverflow { level: u8, quantity: i64 },
}

impl ValidationError {
    /// Request field the error refers to
    pub fn field(&self) -> String {
        match self {
            ValidationError::TierOutOfRange { .. } => "jelly_upgrade".to_string(),
            ValidationError::UnknownNominalLevel { level } => format!("jellies.Lv.{}", level),
            ValidationError::UnknownJellyLabel { label } => format!("jellies.{}", label),
            ValidationError::NegativeQuantity { level, .. }
            | ValidationError::ExperienceOverflow { level, .. } => format!("jellies.Lv.{}", level),
        }
    }
}

/// A value table lookup outside the table's defined domain.
///
/// Validation runs before every lookup, so this indicates a broken table
/// implementation rather than bad input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no experience value defined for jelly Lv.{level} at tier {tier}")]
pub struct DomainError {
    pub level: u8,
    pub tier: u8,
}

/// Anything the calculator can fail with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("internal error: {0}")]
    Domain(#[from] DomainError),
}

impl CalcError {
    /// True when the caller sent bad input, false for internal faults
    pub fn is_client_error(&self) -> bool {
        matches!(self, CalcError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_fields() {
        assert_eq!(ValidationError::TierOutOfRange { tier: 6 }.field(), "jelly_upgrade");
        assert_eq!(ValidationError::UnknownNominalLevel { level: 9 }.field(), "jellies.Lv.9");
        assert_eq!(
            ValidationError::NegativeQuantity { level: 1, quantity: -1 }.field(),
            "jellies.Lv.1"
        );
        assert_eq!(
            ValidationError::UnknownJellyLabel { label: "Mega".into() }.field(),
            "jellies.Mega"
        );
    }

    #[test]
    fn test_client_vs_internal() {
        let client: CalcError = ValidationError::TierOutOfRange { tier: -1 }.into();
        let internal: CalcError = DomainError { level: 3, tier: 2 }.into();
        assert!(client.is_client_error());
        assert!(!internal.is_client_error());
        assert!(internal.to_string().starts_with("internal error"));
    }

    #[test]
    fn test_threshold_message_names_previous_requirement() {
        let err = ConfigError::NonIncreasingThreshold { level: 5, previous: 300, found: 300 };
        assert!(err.to_string().contains("previous level's 300"));
    }
}
