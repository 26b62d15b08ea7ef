//! Tests for the location registry


// Test helper functions and fixtures
use crate::models::Location;

/// Create a fully populated location
pub fn create_test_location(name: &str) -> Location {
    Location {
        uuid: Some("5c1e0d6a-7f2b-4e3c-9d8a-1b2c3d4e5f60".to_string()),
        name: Some(name.to_string()),
        provider: Some("walgreens".to_string()),
        location_type: Some("pharmacy".to_string()),
        address: Some("1 Main St,Floor 2".to_string()),
        city: Some("Newark".to_string()),
        county: Some("Essex".to_string()),
        state: Some("NJ".to_string()),
        zip: Some("07102".to_string()),
        lat: Some(40.735657),
        lng: Some(-74.1723667),
    }
}

/// Create a location with only a name and a state
pub fn create_sparse_location(name: &str) -> Location {
    Location {
        name: Some(name.to_string()),
        state: Some("MA".to_string()),
        ..Default::default()
    }
}
