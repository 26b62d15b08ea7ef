//! Location metadata extraction
//!
//! Turns the location fields of a raw record into a canonical [`Location`]
//! snapshot: case folding, address joining, postal code padding, and the
//! New Jersey address repair.

use crate::constants::{ADDRESS_FIX_STATE, ZIP_LENGTH};
use crate::identifiers::is_uuid;
use crate::models::{Location, RawRecord};
use tracing::{debug, warn};

/// Build a location snapshot from a raw record.
///
/// Each field is taken independently; a field missing from the record stays
/// `None`. `uuid` is set only when the raw id itself is a UUID.
pub fn extract_location(raw: &RawRecord) -> Location {
    let position = raw.position.as_ref();

    let mut location = Location {
        uuid: raw.id.as_deref().filter(|id| is_uuid(id)).map(str::to_string),
        name: raw.name.as_deref().map(title_case),
        provider: raw.provider.as_deref().map(str::to_lowercase),
        location_type: raw.location_type.as_deref().map(str::to_lowercase),
        address: raw.address_lines.as_ref().map(|lines| lines.join(",")),
        city: raw.city.as_deref().map(title_case),
        county: raw.county.as_deref().map(title_case),
        state: raw.state.as_deref().map(str::to_uppercase),
        zip: raw.postal_code.as_deref().and_then(normalize_zip),
        lat: position.and_then(|p| p.latitude),
        lng: position.and_then(|p| p.longitude),
    };

    apply_address_fix(&mut location);
    location
}

/// Title-case a string: the first letter of every run of letters is upper
/// case, the rest lower case. Non-letters (spaces, digits, apostrophes)
/// start a new run.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_is_letter = false;

    for c in value.chars() {
        if previous_is_letter {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }

    result
}

/// Normalize a postal code to exactly five zero-padded digits.
///
/// Anything after the fifth character (ZIP+4 suffixes and the like) is
/// dropped. Returns `None` when the leading characters are not a number.
pub fn normalize_zip(postal_code: &str) -> Option<String> {
    let head: String = postal_code.trim().chars().take(ZIP_LENGTH).collect();

    match head.trim().parse::<u32>() {
        Ok(number) => Some(format!("{:0width$}", number, width = ZIP_LENGTH)),
        Err(_) => {
            warn!("Ignoring unparseable postal code '{}'", postal_code);
            None
        }
    }
}

/// Some New Jersey listings pack city and zip into the address line, as in
/// `123 Main St, Springfield, NJ 07001`. Split them back out.
///
/// Requires an address with at least two `", "` separated segments that
/// either ends in a five digit zip or carries `", NJ"`. The zip is replaced
/// only when the address ends in five digits.
pub fn apply_address_fix(location: &mut Location) {
    let Some(address) = location.address.clone() else {
        return;
    };

    let state_marker = format!(", {}", ADDRESS_FIX_STATE);
    let carries_state = address.contains(&state_marker);
    let is_target_state =
        carries_state || location.state.as_deref() == Some(ADDRESS_FIX_STATE);
    if !is_target_state {
        return;
    }

    let segments: Vec<&str> = address.split(", ").collect();
    if segments.len() < 2 {
        return;
    }

    let packed_zip = packed_zip(&address);
    if packed_zip.is_none() && !carries_state {
        return;
    }

    debug!("Splitting packed address '{}'", address);
    if let Some(zip) = packed_zip {
        location.zip = Some(zip);
    }
    location.city = Some(segments[1].to_string());
    location.address = Some(segments[0].to_string());
}

/// The trailing five digits of an address, if it ends in them
fn packed_zip(address: &str) -> Option<String> {
    let tail: Vec<char> = address.chars().rev().take(ZIP_LENGTH).collect();
    if tail.len() == ZIP_LENGTH && tail.iter().all(char::is_ascii_digit) {
        Some(tail.into_iter().rev().collect())
    } else {
        None
    }
}
