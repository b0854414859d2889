//! RON data loader
//!
//! Loads the balance tables from external RON files, with fallback to the
//! built-in defaults when a file is absent. A file that exists but does not
//! parse or validate is an error; the engine never runs on a broken table.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ConfigError;
use crate::items::JellyValueTable;
use crate::progression::{ProgressionCalculator, RequirementTable};
use super::curve::{default_level_curve, LevelCurveConfig};
use super::jellies::{default_jelly_values, JellyValueConfig};

pub const LEVEL_CURVE_FILE: &str = "level_curve.ron";
pub const JELLIES_FILE: &str = "jellies.ron";

/// Validated balance tables, ready to hand to a calculator
#[derive(Debug, Clone)]
pub struct BalanceData {
    /// Cumulative experience per cookie level
    pub curve: RequirementTable,
    /// Experience per jelly
    pub jellies: JellyValueTable,
}

impl BalanceData {
    /// The tables the game ships with
    pub fn builtin() -> Result<Self, ConfigError> {
        Ok(Self {
            curve: default_level_curve().build()?,
            jellies: default_jelly_values().build()?,
        })
    }

    /// Load from `dir`, using built-in tables for any file that is missing
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let curve = match read_ron::<LevelCurveConfig>(&dir.join(LEVEL_CURVE_FILE))? {
            Some(config) => config.build()?,
            None => default_level_curve().build()?,
        };
        let jellies = match read_ron::<JellyValueConfig>(&dir.join(JELLIES_FILE))? {
            Some(config) => config.build()?,
            None => default_jelly_values().build()?,
        };

        log::info!(
            "Balance data ready: cap level {} at {} exp",
            curve.max_level(),
            curve.max_threshold()
        );
        Ok(Self { curve, jellies })
    }

    pub fn into_calculator(self) -> ProgressionCalculator {
        ProgressionCalculator::new(self.curve, self.jellies)
    }
}

/// Parse a RON file, or `None` if it does not exist
fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("{:?} not found, using built-in defaults", path);
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::Read { path: path.to_path_buf(), source });
        }
    };
    let parsed = ron::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    log::info!("Loaded {:?}", path);
    Ok(Some(parsed))
}

/// Where balance data lives when no directory is given
pub fn default_data_dir() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "cookiecalc", "Cookiecalc") {
        proj_dirs.config_dir().join("data")
    } else {
        PathBuf::from("assets/data")
    }
}

/// Export the built-in tables to RON files for easy editing
pub fn export_default_data(dir: &Path) -> Result<(), ConfigError> {
    fs::create_dir_all(dir).map_err(|source| ConfigError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    write_ron(&dir.join(LEVEL_CURVE_FILE), "level curve", &default_level_curve())?;
    write_ron(&dir.join(JELLIES_FILE), "jelly values", &default_jelly_values())?;

    log::info!("Exported default balance data to {:?}", dir);
    Ok(())
}

fn write_ron<T: Serialize>(path: &Path, what: &'static str, value: &T) -> Result<(), ConfigError> {
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|e| ConfigError::Serialize { what, message: e.to_string() })?;
    fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
