//! Record normalization
//!
//! Converts one raw scraper record into a canonical location snapshot and a
//! canonical availability observation.
//!
//! # Architecture
//!
//! - [`location`] - location field extraction and address repair
//! - [`timestamp`] - instant parsing, state timezones, UTC offsets
//! - [`availability`] - availability count extraction
//!
//! # Example
//!
//! ```rust
//! use univaf_processor::identifiers::IdentifierTable;
//! use univaf_processor::normalizer::{NormalizeOutcome, RecordNormalizer};
//! use univaf_processor::models::RawRecord;
//!
//! # fn example(raw: RawRecord) -> univaf_processor::Result<()> {
//! let ids = IdentifierTable::from_pairs([("univaf_v0:cvs:1", 17)]);
//! let normalizer = RecordNormalizer::new(&ids);
//!
//! if let NormalizeOutcome::Normalized(record) = normalizer.normalize(&raw)? {
//!     println!("{} -> {:?}", record.internal_id, record.observation.availability);
//! }
//! # Ok(())
//! # }
//! ```

pub mod availability;
pub mod location;
pub mod timestamp;

#[cfg(test)]
pub mod tests;

use crate::error::{ProcessorError, Result};
use crate::identifiers::{IdentifierTable, ResolveResult, composite_id};
use crate::models::{AvailabilityObservation, Location, RawRecord};
use tracing::warn;

pub use availability::extract_availability;
pub use location::{extract_location, normalize_zip, title_case};
pub use timestamp::{format_utc, parse_valid_at, resolve_time_zone, utc_offset_hours};

/// A fully normalized record
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub internal_id: i64,
    pub location: Location,
    pub observation: AvailabilityObservation,
}

/// Result of normalizing a record whose shape was valid
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeOutcome {
    Normalized(NormalizedRecord),
    /// The record's composite id is not in the identifier table
    UnresolvedId { composite_id: String },
}

/// Normalizes raw records against an identifier table
#[derive(Debug, Clone, Copy)]
pub struct RecordNormalizer<'a> {
    ids: &'a IdentifierTable,
}

impl<'a> RecordNormalizer<'a> {
    pub fn new(ids: &'a IdentifierTable) -> Self {
        Self { ids }
    }

    /// Normalize one raw record.
    ///
    /// An identifier missing from the table is not an error here; it is
    /// reported as [`NormalizeOutcome::UnresolvedId`] so the caller can
    /// choose between aborting and skipping. Every other failure is an
    /// error: no id at all, a missing or malformed availability document,
    /// an unparseable `valid_at`, or a state without a known timezone.
    pub fn normalize(&self, raw: &RawRecord) -> Result<NormalizeOutcome> {
        let raw_id = raw
            .id
            .as_deref()
            .ok_or(ProcessorError::MissingField { field: "id" })?;

        let composite = composite_id(raw_id);
        let internal_id = match self.ids.resolve(&composite) {
            ResolveResult::Found(id) => id,
            ResolveResult::Missing => {
                warn!("Id {} not found in identifier table", composite);
                return Ok(NormalizeOutcome::UnresolvedId {
                    composite_id: composite,
                });
            }
        };

        let location = extract_location(raw);

        let availability = raw
            .availability
            .as_ref()
            .ok_or(ProcessorError::MissingField {
                field: "availability",
            })?;
        let valid_at = availability
            .valid_at
            .as_deref()
            .ok_or(ProcessorError::MissingField {
                field: "availability.valid_at",
            })?;

        let instant = parse_valid_at(valid_at)?;
        let zone = resolve_time_zone(raw.state.as_deref())?;

        let observation = AvailabilityObservation {
            internal_id,
            timestamp_utc: format_utc(&instant),
            utc_offset_hours: utc_offset_hours(&instant, zone),
            availability: extract_availability(availability)?,
        };

        Ok(NormalizeOutcome::Normalized(NormalizedRecord {
            internal_id,
            location,
            observation,
        }))
    }
}
