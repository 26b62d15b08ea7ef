//! Tests for the record normalizer
//!
//! Unit tests for each extraction step plus end-to-end normalization of
//! representative scraper records.

pub mod location_tests;

// Test helper functions and fixtures
use crate::identifiers::IdentifierTable;
use crate::models::{
    CapacityEntry, CapacityValue, RawAvailability, RawAvailabilityMeta, RawPosition, RawRecord,
};

pub const TEST_UUID: &str = "9a6b1f3c-2e4d-4c8b-a1f0-7d3e5c2b1a90";

/// A complete record as a univaf-style source would produce it
pub fn create_test_record(id: &str) -> RawRecord {
    RawRecord {
        id: Some(id.to_string()),
        name: Some("CVS PHARMACY #1234".to_string()),
        provider: Some("CVS".to_string()),
        location_type: Some("PHARMACY".to_string()),
        address_lines: Some(vec!["100 Broad St".to_string(), "Suite 2".to_string()]),
        city: Some("SPRINGFIELD".to_string()),
        county: Some("hampden".to_string()),
        state: Some("MA".to_string()),
        postal_code: Some("01103-2201".to_string()),
        position: Some(RawPosition {
            latitude: Some(42.1015),
            longitude: Some(-72.5898),
        }),
        availability: Some(create_test_availability("YES", Some(12))),
    }
}

/// Availability document with a January (standard time) timestamp
pub fn create_test_availability(available: &str, count: Option<i64>) -> RawAvailability {
    RawAvailability {
        valid_at: Some("2021-01-15T12:30:45.250Z".to_string()),
        available: Some(available.to_string()),
        available_count: count,
        meta: None,
    }
}

/// Capacity breakdown entry using `available_count`
pub fn count_entry(count: i64) -> CapacityEntry {
    CapacityEntry {
        available_count: Some(count),
        available: None,
    }
}

/// Capacity breakdown entry using `available`
pub fn available_entry(count: i64) -> CapacityEntry {
    CapacityEntry {
        available_count: None,
        available: Some(CapacityValue::Count(count)),
    }
}

pub fn with_capacity(mut availability: RawAvailability, entries: Vec<CapacityEntry>) -> RawAvailability {
    availability.meta = Some(RawAvailabilityMeta {
        capacity: Some(entries),
    });
    availability
}

/// Identifier table holding the ids used by the fixtures
pub fn create_test_ids() -> IdentifierTable {
    IdentifierTable::from_pairs([
        ("univaf_v0:cvs:1234".to_string(), 101),
        (format!("uuid:{}", TEST_UUID), 202),
    ])
}
