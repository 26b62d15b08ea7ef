//! Availability file writer
//!
//! Appends normalized observations to a per-date CSV file in the column
//! order of [`AVAILABILITY_COLUMNS`]
//! (`internal_id,timestamp_utc,utc_offset_hours,availability`).
//! The files carry no header row.
//!
//! [`AVAILABILITY_COLUMNS`]: crate::constants::AVAILABILITY_COLUMNS

use crate::error::Result;
use crate::models::AvailabilityObservation;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writer for one date's availability rows
#[derive(Debug)]
pub struct AvailabilityWriter {
    path: PathBuf,
    writer: csv::Writer<BufWriter<File>>,
    rows_written: usize,
}

impl AvailabilityWriter {
    /// Create (or truncate) the output file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));

        debug!("Opened availability output: {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            writer,
            rows_written: 0,
        })
    }

    /// Write one observation. Unknown availability is an empty field and
    /// "at least one" is the `+` sentinel.
    pub fn append(&mut self, observation: &AvailabilityObservation) -> Result<()> {
        self.writer.write_record([
            observation.internal_id.to_string(),
            observation.timestamp_utc.clone(),
            observation.utc_offset_hours.to_string(),
            observation.availability.to_string(),
        ])?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush all rows to disk and return how many were written
    pub fn close(mut self) -> Result<usize> {
        self.writer.flush()?;
        debug!(
            "Closed availability output {} ({} rows)",
            self.path.display(),
            self.rows_written
        );
        Ok(self.rows_written)
    }
}
