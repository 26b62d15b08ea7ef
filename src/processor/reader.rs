//! Raw file reading
//!
//! Each raw file holds one JSON array of records. Records are kept as JSON
//! values until they are processed so that a failing record can be
//! reported exactly as the source wrote it.

use crate::error::{ProcessorError, Result};
use crate::models::RawRecord;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Read the array of raw records in a file
pub fn read_raw_file(path: &Path) -> Result<Vec<Value>> {
    let file = File::open(path).map_err(|e| ProcessorError::FileRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let records: Vec<Value> =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| ProcessorError::FileRead {
            path: path.to_path_buf(),
            reason: format!("expected a JSON array of records: {}", e),
        })?;

    debug!("Read {} raw records from {}", records.len(), path.display());
    Ok(records)
}

/// Interpret one JSON value as a raw record
pub fn parse_record(value: &Value) -> Result<RawRecord> {
    Ok(RawRecord::deserialize(value)?)
}
