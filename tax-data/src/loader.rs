//! Jurisdiction parameter tables.
//!
//! Tables live under `<params_dir>/<JURISDICTION>/<year>.yaml`:
//!
//! ```text
//! tax_parameters/
//! ├── FEDERAL/
//! │   ├── 2023.yaml
//! │   └── 2024.yaml
//! └── CA/
//!     └── 2024.yaml
//! ```
//!
//! Each file maps filing-status names to [`JurisdictionParams`]. When the
//! requested year has no file, the latest year on hand is used instead.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tax_core::{JurisdictionParams, JurisdictionTable, TaxParameters};
use tracing::{debug, info};

use crate::error::ConfigError;

/// Reads and validates jurisdiction tables from a parameter directory.
#[derive(Debug, Clone)]
pub struct ParameterLoader {
    params_dir: PathBuf,
}

impl ParameterLoader {
    pub fn new(params_dir: impl Into<PathBuf>) -> Self {
        Self {
            params_dir: params_dir.into(),
        }
    }

    /// Loads the federal table and the table for `state` for `year`.
    pub fn load(
        &self,
        year: i32,
        state: &str,
    ) -> Result<TaxParameters, ConfigError> {
        Ok(TaxParameters {
            federal: self.load_table("federal", year)?,
            state: self.load_table(state, year)?,
        })
    }

    /// Loads one jurisdiction's table, falling back to its latest year.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoParameterFiles`] if the jurisdiction has no
    ///   numerically named file at all
    /// - [`ConfigError::Parse`] if the file is not valid YAML or fails
    ///   bracket validation
    pub fn load_table(
        &self,
        jurisdiction: &str,
        year: i32,
    ) -> Result<JurisdictionTable, ConfigError> {
        let dir = self.params_dir.join(jurisdiction.to_uppercase());
        let (file_year, path) = self.resolve_file(jurisdiction, &dir, year)?;

        let statuses: BTreeMap<String, JurisdictionParams> = load_yaml(&path)?;
        let table = JurisdictionTable {
            jurisdiction: jurisdiction.to_string(),
            year: file_year,
            statuses,
        };
        table
            .validate()
            .map_err(|e| ConfigError::parse(&path, e))?;

        debug!(jurisdiction, year = file_year, path = %path.display(), "loaded tax parameters");
        Ok(table)
    }

    fn resolve_file(
        &self,
        jurisdiction: &str,
        dir: &Path,
        year: i32,
    ) -> Result<(i32, PathBuf), ConfigError> {
        let exact = dir.join(format!("{year}.yaml"));
        if exact.is_file() {
            return Ok((year, exact));
        }

        let latest = available_years(dir)
            .into_iter()
            .max()
            .ok_or_else(|| ConfigError::NoParameterFiles {
                jurisdiction: jurisdiction.to_string(),
                dir: dir.to_path_buf(),
            })?;

        info!(
            jurisdiction,
            requested = year,
            using = latest,
            "no parameter file for year; using latest available"
        );
        Ok((latest, dir.join(format!("{latest}.yaml"))))
    }
}

/// Years of every `<year>.yaml` file in `dir`. Other files are ignored.
fn available_years(dir: &Path) -> Vec<i32> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "yaml"))
        .filter_map(|path| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .filter(|stem| stem.chars().all(|c| c.is_ascii_digit()))
                .and_then(|stem| stem.parse().ok())
        })
        .collect()
}

/// Reads and deserializes a YAML file.
pub(crate) fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    serde_yaml::from_str(&content).map_err(|e| ConfigError::parse(path, e))
}
