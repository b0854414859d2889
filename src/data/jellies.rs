//! Jelly value data
//!
//! Experience per jelly as stored in `jellies.ron`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::items::JellyValueTable;

/// Jelly values keyed by class number, each row listing Base then Lv.1..=Lv.5
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JellyValueConfig {
    pub values: BTreeMap<u8, Vec<u64>>,
}

impl JellyValueConfig {
    /// Validate and build the value table
    pub fn build(&self) -> Result<JellyValueTable, ConfigError> {
        JellyValueTable::from_rows(&self.values)
    }
}

impl From<&JellyValueTable> for JellyValueConfig {
    fn from(table: &JellyValueTable) -> Self {
        Self { values: table.to_rows() }
    }
}

/// The jelly values the game ships with
pub fn default_jelly_values() -> JellyValueConfig {
    let rows: [(u8, [u64; 6]); 8] = [
        (1, [14, 14, 14, 15, 15, 15]),
        (2, [60, 61, 62, 63, 64, 66]),
        (3, [150, 152, 155, 158, 161, 165]),
        (4, [400, 404, 412, 420, 428, 440]),
        (5, [800, 808, 824, 840, 856, 880]),
        (6, [1600, 1616, 1648, 1680, 1712, 1760]),
        (7, [3000, 3030, 3090, 3150, 3210, 3300]),
        (8, [8000, 8080, 8240, 8400, 8560, 8800]),
    ];
    JellyValueConfig {
        values: rows.iter().map(|(level, row)| (*level, row.to_vec())).collect(),
    }
}
