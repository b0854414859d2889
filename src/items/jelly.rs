//! Experience jellies
//!
//! Jelly classes, upgrade tiers and the table that prices one jelly in
//! experience.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ConfigError, DomainError, ValidationError};

/// Number of jelly classes, labelled Lv.1 to Lv.8
pub const JELLY_LEVELS: u8 = 8;
/// Highest jelly upgrade tier
pub const MAX_TIER: u8 = 5;
/// Number of tier columns (Base plus five upgrades)
pub const TIER_COUNT: usize = MAX_TIER as usize + 1;

/// Label prefix used for jelly classes in requests and data files
const LABEL_PREFIX: &str = "Lv.";

/// A jelly class (1..=8).
///
/// Unrelated to cookie [`Level`](crate::progression::Level); the two never
/// convert into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NominalLevel(u8);

impl NominalLevel {
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        match u8::try_from(value) {
            Ok(v) if (1..=JELLY_LEVELS).contains(&v) => Ok(NominalLevel(v)),
            _ => Err(ValidationError::UnknownNominalLevel { level: value }),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All jelly classes in ascending order
    pub fn all() -> impl Iterator<Item = NominalLevel> {
        (1..=JELLY_LEVELS).map(NominalLevel)
    }

    /// "Lv.3" style label
    pub fn label(self) -> String {
        format!("{}{}", LABEL_PREFIX, self.0)
    }

    /// Extract the number from a "Lv.N" label without range checking it.
    /// Leading zeros and signs are rejected so each class has one spelling.
    pub fn parse_label(label: &str) -> Option<u32> {
        let digits = label.strip_prefix(LABEL_PREFIX)?;
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for NominalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", LABEL_PREFIX, self.0)
    }
}

/// Jelly upgrade tier (0 = Base, 1..=5 = upgrades)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UpgradeTier(u8);

impl UpgradeTier {
    pub const BASE: UpgradeTier = UpgradeTier(0);
    pub const MAX: UpgradeTier = UpgradeTier(MAX_TIER);

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        match u8::try_from(value) {
            Ok(v) if v <= MAX_TIER => Ok(UpgradeTier(v)),
            _ => Err(ValidationError::TierOutOfRange { tier: value }),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All tiers from Base upwards
    pub fn all() -> impl Iterator<Item = UpgradeTier> {
        (0..=MAX_TIER).map(UpgradeTier)
    }

    /// "Base" for tier 0, "Lv.N" otherwise
    pub fn label(self) -> String {
        match self.0 {
            0 => "Base".to_string(),
            n => format!("{}{}", LABEL_PREFIX, n),
        }
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UpgradeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Prices one jelly of a class at a tier
pub trait JellyValues {
    /// Experience granted by a single jelly.
    ///
    /// Fails with [`DomainError`] if the pair is not covered, never returns 0
    /// for a missing entry.
    fn value_per_unit(&self, level: NominalLevel, tier: UpgradeTier) -> Result<u64, DomainError>;
}

/// Complete jelly value table covering every class and tier.
///
/// Every value is positive and non-decreasing across tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JellyValueTable {
    values: [[u64; TIER_COUNT]; JELLY_LEVELS as usize],
}

impl JellyValueTable {
    /// Build from rows keyed by jelly class number, each listing Base..=Lv.5
    pub fn from_rows(rows: &BTreeMap<u8, Vec<u64>>) -> Result<Self, ConfigError> {
        if let Some(&level) = rows.keys().find(|&&l| !(1..=JELLY_LEVELS).contains(&l)) {
            return Err(ConfigError::UnknownJellyLevel { level });
        }

        let mut values = [[0u64; TIER_COUNT]; JELLY_LEVELS as usize];
        for level in NominalLevel::all() {
            let row = rows
                .get(&level.get())
                .ok_or(ConfigError::MissingJellyValue { level: level.get(), tier: 0 })?;
            if row.len() != TIER_COUNT {
                return Err(ConfigError::WrongTierCount {
                    level: level.get(),
                    expected: TIER_COUNT,
                    found: row.len(),
                });
            }

            for (tier, &value) in row.iter().enumerate() {
                let tier = tier as u8;
                if value == 0 {
                    return Err(ConfigError::ZeroJellyValue { level: level.get(), tier });
                }
                if tier > 0 && value < row[tier as usize - 1] {
                    return Err(ConfigError::DecreasingJellyValue {
                        level: level.get(),
                        tier,
                        previous: row[tier as usize - 1],
                        found: value,
                    });
                }
            }
            values[level.index()].copy_from_slice(row);
        }

        Ok(Self { values })
    }

    /// The table as rows keyed by jelly class number
    pub fn to_rows(&self) -> BTreeMap<u8, Vec<u64>> {
        NominalLevel::all()
            .map(|level| (level.get(), self.values[level.index()].to_vec()))
            .collect()
    }
}

impl JellyValues for JellyValueTable {
    fn value_per_unit(&self, level: NominalLevel, tier: UpgradeTier) -> Result<u64, DomainError> {
        self.values
            .get(level.index())
            .and_then(|row| row.get(tier.index()))
            .copied()
            .ok_or(DomainError { level: level.get(), tier: tier.get() })
    }
}
