//! Raw file discovery
//!
//! Finds the raw scraper files belonging to a date and expands inclusive
//! date ranges into the list of dates to process.

use crate::constants::{FILENAME_DATE_PATTERN, PLATFORM_ARTIFACTS};
use crate::error::{ProcessorError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File discovery for a raw input directory
#[derive(Debug)]
pub struct FileDiscovery {
    raw_dir: PathBuf,
    date_pattern: Regex,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(raw_dir: PathBuf) -> Self {
        let date_pattern =
            Regex::new(FILENAME_DATE_PATTERN).expect("filename date pattern is a valid regex");
        Self {
            raw_dir,
            date_pattern,
        }
    }

    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    /// Raw files whose embedded `YYYYMMDD` token equals `date`, in
    /// lexicographic filename order.
    ///
    /// Only the top level of the raw directory is searched. Platform
    /// artifacts and hidden files are skipped.
    pub fn files_for_date(&self, date: NaiveDate) -> Result<Vec<PathBuf>> {
        if !self.raw_dir.is_dir() {
            return Err(ProcessorError::configuration(format!(
                "Raw input directory does not exist: {}",
                self.raw_dir.display()
            )));
        }

        let compact = date.format("%Y%m%d").to_string();
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.raw_dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(
                        "Error reading raw directory {}: {}",
                        self.raw_dir.display(),
                        e
                    );
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };

            if is_platform_artifact(name) {
                continue;
            }

            if self.file_date_token(name) == Some(compact.as_str()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        debug!("Found {} raw files for {}", files.len(), date);
        Ok(files)
    }

    /// The first compact date token in a filename, if any
    pub fn file_date_token<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        self.date_pattern
            .captures(file_name)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }
}

/// Check if a filename is an operating system artifact or hidden file
fn is_platform_artifact(name: &str) -> bool {
    name.starts_with('.') || PLATFORM_ARTIFACTS.contains(&name)
}

/// Every date from `start` to `end`, both inclusive, ascending
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    if end < start {
        return Err(ProcessorError::InvalidDateRange { start, end });
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}
