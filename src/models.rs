//! Core data structures for availability processing.
//!
//! Defines the raw scraper record shape, the canonical location snapshot and
//! availability observation, and the statistics reported by a run.

use crate::constants::AT_LEAST_ONE_SENTINEL;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One raw observation as emitted by an upstream scraper.
///
/// Every field is optional: sources populate different subsets, and a field
/// that is absent is treated the same as one that is `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub location_type: Option<String>,
    #[serde(default)]
    pub address_lines: Option<Vec<String>>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub position: Option<RawPosition>,
    #[serde(default)]
    pub availability: Option<RawAvailability>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// The availability sub-document of a raw record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAvailability {
    #[serde(default)]
    pub valid_at: Option<String>,
    #[serde(default)]
    pub available: Option<String>,
    #[serde(default)]
    pub available_count: Option<i64>,
    #[serde(default)]
    pub meta: Option<RawAvailabilityMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAvailabilityMeta {
    #[serde(default)]
    pub capacity: Option<Vec<CapacityEntry>>,
}

/// One slot of a capacity breakdown.
///
/// Sources disagree on the count field name; some also put an availability
/// flag string in `available`, which is not a usable count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityEntry {
    #[serde(default)]
    pub available_count: Option<i64>,
    #[serde(default)]
    pub available: Option<CapacityValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapacityValue {
    Count(i64),
    Flag(String),
}

/// Canonical location snapshot, keyed externally by internal id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub provider: Option<String>,
    #[serde(rename = "type")]
    pub location_type: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Availability of one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityValue {
    /// Exact number of open slots
    Count(i64),
    /// Confirmed available, count not reported
    AtLeastOne,
    /// Source could not tell
    Unknown,
}

impl fmt::Display for AvailabilityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityValue::Count(n) => write!(f, "{}", n),
            AvailabilityValue::AtLeastOne => f.write_str(AT_LEAST_ONE_SENTINEL),
            AvailabilityValue::Unknown => Ok(()),
        }
    }
}

/// One row of a per-date availability file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityObservation {
    pub internal_id: i64,
    /// UTC, second precision, `YYYY-MM-DD HH:MM:SS`
    pub timestamp_utc: String,
    pub utc_offset_hours: i32,
    pub availability: AvailabilityValue,
}

/// Statistics for a single processed date
#[derive(Debug, Clone, Default)]
pub struct DateStats {
    pub date: Option<NaiveDate>,
    pub files_read: usize,
    pub records_read: usize,
    pub rows_written: usize,
    pub records_skipped: usize,
    pub output_path: PathBuf,
}

/// Statistics for a whole run
#[derive(Debug, Default)]
pub struct RunStats {
    pub dates: Vec<DateStats>,
    pub locations_held: usize,
    pub locations_path: PathBuf,
    pub processing_time_ms: u128,
}

impl RunStats {
    pub fn total_rows(&self) -> usize {
        self.dates.iter().map(|d| d.rows_written).sum()
    }

    pub fn total_files(&self) -> usize {
        self.dates.iter().map(|d| d.files_read).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.dates.iter().map(|d| d.records_skipped).sum()
    }
}
