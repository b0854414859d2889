//! Jelly inventory
//!
//! A per-request bag of jelly quantities and the aggregation that turns it
//! into a single experience total.

use std::collections::BTreeMap;

use crate::error::{CalcError, ValidationError};
use super::jelly::{JellyValues, NominalLevel, UpgradeTier};

/// Jelly quantities keyed by raw jelly class number.
///
/// Entries are stored as given and validated when the inventory is priced,
/// so a caller can learn exactly which entry was rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    quantities: BTreeMap<u32, i64>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, level: u32, quantity: i64) -> Self {
        self.set(level, quantity);
        self
    }

    /// Set the quantity for a jelly class, replacing any previous value
    pub fn set(&mut self, level: u32, quantity: i64) {
        self.quantities.insert(level, quantity);
    }

    /// Quantity held for a jelly class (0 if absent)
    pub fn quantity(&self, level: u32) -> i64 {
        self.quantities.get(&level).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, i64)> + '_ {
        self.quantities.iter().map(|(&level, &qty)| (level, qty))
    }

    /// Check every key, then every quantity, returning typed entries
    fn validated(&self) -> Result<Vec<(NominalLevel, i64)>, ValidationError> {
        let entries = self
            .iter()
            .map(|(level, qty)| NominalLevel::new(level).map(|nominal| (nominal, qty)))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(&(level, quantity)) = entries.iter().find(|(_, qty)| *qty < 0) {
            return Err(ValidationError::NegativeQuantity { level: level.get(), quantity });
        }
        Ok(entries)
    }
}

impl FromIterator<(u32, i64)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (u32, i64)>>(iter: I) -> Self {
        Self { quantities: iter.into_iter().collect() }
    }
}

/// Total experience granted by `inventory` at `tier`.
///
/// Arithmetic is exact; a total that does not fit in a u64 is rejected
/// rather than wrapped.
pub fn total_experience<V: JellyValues + ?Sized>(
    values: &V,
    inventory: &Inventory,
    tier: UpgradeTier,
) -> Result<u64, CalcError> {
    let mut total = 0u64;
    for (level, quantity) in inventory.validated()? {
        if quantity == 0 {
            continue;
        }
        let per_unit = values.value_per_unit(level, tier)?;
        let overflow = ValidationError::ExperienceOverflow { level: level.get(), quantity };
        let gained = (quantity as u64)
            .checked_mul(per_unit)
            .ok_or_else(|| overflow.clone())?;
        total = total.checked_add(gained).ok_or(overflow)?;
    }
    Ok(total)
}
