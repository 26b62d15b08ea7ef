//! Registry loading and persistence
//!
//! The registry is stored as a CSV table with one row per internal id, in
//! ascending id order, and columns
//! `id,uuid,name,provider,type,address,city,county,state,zip,lat,lng`.
//! Missing values are written as empty fields and read back as `None`.

use super::LocationRegistry;
use crate::constants::LOCATION_COLUMNS;
use crate::error::{ProcessorError, Result};
use crate::models::Location;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// One registry file row
#[derive(Debug, Serialize, Deserialize)]
struct LocationRow {
    id: i64,
    uuid: Option<String>,
    name: Option<String>,
    provider: Option<String>,
    #[serde(rename = "type")]
    location_type: Option<String>,
    address: Option<String>,
    city: Option<String>,
    county: Option<String>,
    state: Option<String>,
    zip: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

impl LocationRow {
    fn new(id: i64, location: &Location) -> Self {
        Self {
            id,
            uuid: location.uuid.clone(),
            name: location.name.clone(),
            provider: location.provider.clone(),
            location_type: location.location_type.clone(),
            address: location.address.clone(),
            city: location.city.clone(),
            county: location.county.clone(),
            state: location.state.clone(),
            zip: location.zip.clone(),
            lat: location.lat,
            lng: location.lng,
        }
    }

    fn into_entry(self) -> (i64, Location) {
        let location = Location {
            uuid: self.uuid,
            name: self.name,
            provider: self.provider,
            location_type: self.location_type,
            address: self.address,
            city: self.city,
            county: self.county,
            state: self.state,
            zip: self.zip,
            lat: self.lat,
            lng: self.lng,
        };
        (self.id, location)
    }
}

impl LocationRegistry {
    /// Load a registry from a CSV file.
    ///
    /// A missing file yields an empty registry. If the same id appears more
    /// than once, the later row wins.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "No location registry at {}, starting empty",
                path.display()
            );
            return Ok(Self::new());
        }

        debug!("Loading location registry: {}", path.display());

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| ProcessorError::FileRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let registry = reader
            .deserialize::<LocationRow>()
            .map(|row| row.map(LocationRow::into_entry))
            .collect::<std::result::Result<LocationRegistry, csv::Error>>()?;

        info!(
            "Loaded {} locations from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Write the registry to a CSV file, replacing any existing file.
    ///
    /// Rows go to a temporary file in the destination directory which is
    /// then renamed over `path`.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let temp = NamedTempFile::new_in(dir)?;
        self.write_csv(temp.as_file())?;
        temp.as_file().sync_all()?;

        temp.persist(path).map_err(|e| ProcessorError::Io(e.error))?;

        info!(
            "Wrote {} locations to {}",
            self.len(),
            path.display()
        );
        Ok(())
    }

    /// Write the registry as CSV to an arbitrary writer.
    ///
    /// The header row is always written, so an empty registry still
    /// produces a valid table.
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        writer.write_record(LOCATION_COLUMNS)?;
        for (id, location) in self.iter() {
            writer.serialize(LocationRow::new(id, location))?;
        }
        writer.flush()?;
        Ok(())
    }
}
