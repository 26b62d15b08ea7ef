//! Integration tests for the processor module
//!
//! Runs the batch driver over small raw directories built in temporary
//! data roots.


// Test helper functions and fixtures
use crate::config::ProcessorConfig;
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const TEST_UUID: &str = "0b4f7a52-61c3-4d8e-9f2a-3c5d7e9b1a24";

/// A temporary data root laid out the way a run expects it
pub struct TestDataRoot {
    pub temp_dir: TempDir,
}

impl TestDataRoot {
    /// Create the raw and clean directories plus an identifier table
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = Self { temp_dir };
        let paths = root.config().paths;

        fs::create_dir_all(&paths.raw_dir).unwrap();
        fs::create_dir_all(&paths.output_dir).unwrap();
        fs::write(
            &paths.ids_file,
            format!(
                "external_id,id\n\
                 univaf_v0:cvs:1234,101\n\
                 uuid:{},202\n\
                 univaf_v0:walgreens:77,303\n",
                TEST_UUID
            ),
        )
        .unwrap();

        root
    }

    pub fn config(&self) -> ProcessorConfig {
        ProcessorConfig::new(self.temp_dir.path())
    }

    /// Write a JSON array of records into the raw directory
    pub fn write_raw(&self, file_name: &str, records: &[Value]) -> PathBuf {
        let path = self.config().paths.raw_dir.join(file_name);
        fs::write(&path, serde_json::to_string(records).unwrap()).unwrap();
        path
    }

    pub fn availability_output(&self, date: NaiveDate) -> Option<String> {
        fs::read_to_string(self.config().paths.availability_file(date)).ok()
    }

    pub fn locations_output(&self) -> Option<String> {
        fs::read_to_string(self.config().paths.locations_file).ok()
    }
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 5, 20).unwrap()
}

/// A raw record for the CVS store in Massachusetts
pub fn cvs_record(valid_at: &str, available: &str, count: Option<i64>) -> Value {
    json!({
        "id": "cvs:1234",
        "name": "CVS PHARMACY #1234",
        "provider": "CVS",
        "location_type": "PHARMACY",
        "address_lines": ["100 Broad St"],
        "city": "SPRINGFIELD",
        "county": "hampden",
        "state": "MA",
        "postal_code": "1103",
        "position": { "latitude": 42.1015, "longitude": -72.5898 },
        "availability": {
            "valid_at": valid_at,
            "available": available,
            "available_count": count
        }
    })
}

/// A raw record with a UUID id for a New Jersey clinic whose address line
/// carries city and zip
pub fn clinic_record(valid_at: &str) -> Value {
    json!({
        "id": TEST_UUID,
        "name": "newark community clinic",
        "provider": "RiteAid",
        "location_type": "CLINIC",
        "address_lines": ["1 Main St, Newark, NJ 07102"],
        "city": null,
        "state": "nj",
        "postal_code": "07000",
        "availability": {
            "valid_at": valid_at,
            "available": "YES",
            "meta": {
                "capacity": [
                    { "date": "2021-05-20", "available_count": 3 },
                    { "date": "2021-05-21", "available": 4 }
                ]
            }
        }
    })
}

/// A raw record whose id is not in the identifier table
pub fn unknown_record() -> Value {
    json!({
        "id": "heb:555",
        "name": "HEB PHARMACY",
        "state": "TX",
        "availability": {
            "valid_at": "2021-05-20T15:00:00Z",
            "available": "NO"
        }
    })
}
