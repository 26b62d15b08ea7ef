//! Configuration management.
//!
//! Provides the on-disk layout of inputs and outputs and the run policy
//! options applied by the batch driver.

use crate::constants::{
    AVAILABILITY_FILE_PREFIX, CLEAN_DIR_NAME, DATA_ROOT_NAME, IDS_FILE_NAME, LOCATIONS_FILE_NAME,
    RAW_DIR_NAME,
};
use crate::error::{ProcessorError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// What to do with a record whose identifier is not in the identifier table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingIdPolicy {
    /// Abort the whole run (the identifier table must be regenerated first)
    #[default]
    Abort,
    /// Log a warning and leave the record out of both outputs
    Skip,
}

/// Locations of every file the processor reads or writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Directory of raw scraper JSON files
    pub raw_dir: PathBuf,

    /// Directory receiving per-date availability files and the registry
    pub output_dir: PathBuf,

    /// External id to internal id table
    pub ids_file: PathBuf,

    /// Persisted location registry
    pub locations_file: PathBuf,
}

impl PathConfig {
    /// Standard layout beneath a data root:
    ///
    /// ```text
    /// root/
    ///   univaf_raw/             raw JSON arrays, one file per scrape
    ///   univaf_clean/
    ///     ids_external.csv
    ///     locations_univaf.csv
    ///     availabilities_YYYY-MM-DD.csv
    /// ```
    pub fn from_root(root: &Path) -> Self {
        let clean_dir = root.join(CLEAN_DIR_NAME);
        Self {
            raw_dir: root.join(RAW_DIR_NAME),
            ids_file: clean_dir.join(IDS_FILE_NAME),
            locations_file: clean_dir.join(LOCATIONS_FILE_NAME),
            output_dir: clean_dir,
        }
    }

    /// Default data root under the user's data directory
    pub fn default_root() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            ProcessorError::configuration("Could not determine user data directory")
        })?;
        Ok(data_dir.join(DATA_ROOT_NAME))
    }

    /// Per-date availability output file
    pub fn availability_file(&self, date: NaiveDate) -> PathBuf {
        self.output_dir.join(format!(
            "{}{}.csv",
            AVAILABILITY_FILE_PREFIX,
            date.format("%Y-%m-%d")
        ))
    }

    /// Verify that the inputs a run depends on exist
    pub fn validate(&self) -> Result<()> {
        if !self.raw_dir.is_dir() {
            return Err(ProcessorError::configuration(format!(
                "Raw input directory does not exist: {}",
                self.raw_dir.display()
            )));
        }
        if !self.ids_file.is_file() {
            return Err(ProcessorError::configuration(format!(
                "Identifier table not found: {} (run the id assignment step first)",
                self.ids_file.display()
            )));
        }
        debug!("Validated path configuration: {:?}", self);
        Ok(())
    }
}

/// Global configuration for a processing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Input and output locations
    pub paths: PathConfig,

    /// Start from an empty registry instead of the persisted one
    pub clean_run: bool,

    /// Handling of records with unknown identifiers
    pub missing_id_policy: MissingIdPolicy,

    /// Display a progress bar while reading raw files
    pub show_progress: bool,
}

impl ProcessorConfig {
    /// Configuration using the standard layout beneath `root`
    pub fn new(root: &Path) -> Self {
        Self {
            paths: PathConfig::from_root(root),
            clean_run: false,
            missing_id_policy: MissingIdPolicy::default(),
            show_progress: false,
        }
    }

    /// Replace the raw input directory
    pub fn with_raw_dir(mut self, raw_dir: PathBuf) -> Self {
        self.paths.raw_dir = raw_dir;
        self
    }

    /// Replace the output directory; the registry file moves along with it
    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.paths.locations_file = output_dir.join(LOCATIONS_FILE_NAME);
        self.paths.output_dir = output_dir;
        self
    }

    /// Replace the identifier table path
    pub fn with_ids_file(mut self, ids_file: PathBuf) -> Self {
        self.paths.ids_file = ids_file;
        self
    }

    /// Ignore previously persisted location state
    pub fn with_clean_run(mut self) -> Self {
        self.clean_run = true;
        self
    }

    /// Set the unknown identifier policy
    pub fn with_missing_id_policy(mut self, policy: MissingIdPolicy) -> Self {
        self.missing_id_policy = policy;
        self
    }

    /// Enable progress bars
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }
}
