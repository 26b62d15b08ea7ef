//! Tests for location extraction

use super::*;
use crate::models::Location;
use crate::normalizer::location::{apply_address_fix, extract_location, normalize_zip, title_case};

#[test]
fn test_extract_full_location() {
    let record = create_test_record("cvs:1234");
    let location = extract_location(&record);

    assert_eq!(location.uuid, None);
    assert_eq!(location.name.as_deref(), Some("Cvs Pharmacy #1234"));
    assert_eq!(location.provider.as_deref(), Some("cvs"));
    assert_eq!(location.location_type.as_deref(), Some("pharmacy"));
    assert_eq!(location.address.as_deref(), Some("100 Broad St,Suite 2"));
    assert_eq!(location.city.as_deref(), Some("Springfield"));
    assert_eq!(location.county.as_deref(), Some("Hampden"));
    assert_eq!(location.state.as_deref(), Some("MA"));
    assert_eq!(location.zip.as_deref(), Some("01103"));
    assert_eq!(location.lat, Some(42.1015));
    assert_eq!(location.lng, Some(-72.5898));
}

#[test]
fn test_uuid_only_for_uuid_ids() {
    let record = create_test_record(TEST_UUID);
    assert_eq!(extract_location(&record).uuid.as_deref(), Some(TEST_UUID));

    let record = create_test_record("cvs:1234");
    assert_eq!(extract_location(&record).uuid, None);
}

#[test]
fn test_absent_fields_stay_empty() {
    let record = RawRecord {
        id: Some("cvs:1234".to_string()),
        position: Some(RawPosition {
            latitude: Some(40.0),
            longitude: None,
        }),
        ..Default::default()
    };

    let location = extract_location(&record);

    assert_eq!(
        location,
        Location {
            lat: Some(40.0),
            ..Default::default()
        }
    );
}

#[test]
fn test_title_case() {
    assert_eq!(title_case("WALGREENS DRUG STORE"), "Walgreens Drug Store");
    assert_eq!(title_case("o'brien's"), "O'Brien'S");
    assert_eq!(title_case("st. mary-of-the-woods"), "St. Mary-Of-The-Woods");
    assert_eq!(title_case("pharmacy #12b"), "Pharmacy #12B");
    assert_eq!(title_case(""), "");
}

#[test]
fn test_case_normalization_is_idempotent() {
    for value in ["CVS PHARMACY #1234", "mcallen", "Prince George's", "e. orange"] {
        let once = title_case(value);
        assert_eq!(title_case(&once), once);
    }

    let record = create_test_record("cvs:1234");
    let first = extract_location(&record);

    let renormalized = RawRecord {
        id: record.id.clone(),
        name: first.name.clone(),
        provider: first.provider.clone(),
        location_type: first.location_type.clone(),
        city: first.city.clone(),
        county: first.county.clone(),
        state: first.state.clone(),
        postal_code: first.zip.clone(),
        ..Default::default()
    };
    let second = extract_location(&renormalized);

    assert_eq!(second.name, first.name);
    assert_eq!(second.provider, first.provider);
    assert_eq!(second.location_type, first.location_type);
    assert_eq!(second.city, first.city);
    assert_eq!(second.county, first.county);
    assert_eq!(second.state, first.state);
    assert_eq!(second.zip, first.zip);
}

#[test]
fn test_normalize_zip() {
    assert_eq!(normalize_zip("02139").as_deref(), Some("02139"));
    assert_eq!(normalize_zip("2139").as_deref(), Some("02139"));
    assert_eq!(normalize_zip("98101-1234").as_deref(), Some("98101"));
    assert_eq!(normalize_zip("981011234").as_deref(), Some("98101"));
    assert_eq!(normalize_zip(" 7001").as_deref(), Some("07001"));
    assert_eq!(normalize_zip("123").as_deref(), Some("00123"));
    assert_eq!(normalize_zip("ABCDE"), None);
    assert_eq!(normalize_zip(""), None);
}

#[test]
fn test_zip_always_five_digits() {
    for input in ["1", "12", "123", "1234", "12345", "123456", "00000-0000"] {
        let zip = normalize_zip(input).unwrap();
        assert_eq!(zip.len(), 5, "zip for {:?}", input);
        assert!(zip.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_nj_address_split() {
    let record = RawRecord {
        id: Some("rite_aid:77".to_string()),
        address_lines: Some(vec!["123 Main St, Springfield, 07001".to_string()]),
        state: Some("NJ".to_string()),
        ..Default::default()
    };

    let location = extract_location(&record);

    assert_eq!(location.address.as_deref(), Some("123 Main St"));
    assert_eq!(location.city.as_deref(), Some("Springfield"));
    assert_eq!(location.zip.as_deref(), Some("07001"));
}

#[test]
fn test_nj_address_split_overrides_listed_fields() {
    let mut location = Location {
        address: Some("9 Elm Ave, Trenton, NJ 08608".to_string()),
        city: Some("Wrong".to_string()),
        state: Some("NJ".to_string()),
        zip: Some("00000".to_string()),
        ..Default::default()
    };

    apply_address_fix(&mut location);

    assert_eq!(location.address.as_deref(), Some("9 Elm Ave"));
    assert_eq!(location.city.as_deref(), Some("Trenton"));
    assert_eq!(location.zip.as_deref(), Some("08608"));
}

#[test]
fn test_nj_address_without_segments_untouched() {
    let mut location = Location {
        address: Some("9 Elm Ave".to_string()),
        city: Some("Trenton".to_string()),
        state: Some("NJ".to_string()),
        zip: Some("08608".to_string()),
        ..Default::default()
    };
    let before = location.clone();

    apply_address_fix(&mut location);

    assert_eq!(location, before);
}

#[test]
fn test_nj_address_without_packed_zip_untouched() {
    let record = RawRecord {
        id: Some("cvs:9".to_string()),
        address_lines: Some(vec!["100 Route 1, Building A".to_string()]),
        city: Some("EDISON".to_string()),
        state: Some("NJ".to_string()),
        postal_code: Some("08817".to_string()),
        ..Default::default()
    };

    let location = extract_location(&record);

    assert_eq!(location.address.as_deref(), Some("100 Route 1, Building A"));
    assert_eq!(location.city.as_deref(), Some("Edison"));
    assert_eq!(location.zip.as_deref(), Some("08817"));
}

#[test]
fn test_nj_marker_without_zip_splits_city_only() {
    let mut location = Location {
        address: Some("9 Elm Ave, Trenton, NJ".to_string()),
        city: Some("Wrong".to_string()),
        zip: Some("08608".to_string()),
        ..Default::default()
    };

    apply_address_fix(&mut location);

    assert_eq!(location.address.as_deref(), Some("9 Elm Ave"));
    assert_eq!(location.city.as_deref(), Some("Trenton"));
    assert_eq!(location.zip.as_deref(), Some("08608"));
}

#[test]
fn test_address_fix_other_states_untouched() {
    let record = RawRecord {
        id: Some("cvs:1".to_string()),
        address_lines: Some(vec!["1 Main St, Albany, 12207".to_string()]),
        state: Some("NY".to_string()),
        ..Default::default()
    };

    let location = extract_location(&record);

    assert_eq!(location.address.as_deref(), Some("1 Main St, Albany, 12207"));
    assert_eq!(location.city, None);
    assert_eq!(location.zip, None);
}
