//! Observation time handling
//!
//! Parses `valid_at` instants, resolves the local timezone of a record from
//! its state, and derives the UTC timestamp and whole-hour UTC offset
//! written to the availability files.

use crate::constants::{STATE_TIME_ZONES, UTC_TIMESTAMP_FORMAT};
use crate::error::{ProcessorError, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};
use chrono_tz::Tz;

/// Parse a timezone-aware instant.
///
/// Accepts RFC 3339 (`2021-05-20T14:03:11.123Z`), the space separated
/// variant, and offsets without a colon. An instant without any offset is
/// taken to be UTC.
pub fn parse_valid_at(value: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|source| ProcessorError::TimestampParsing {
            value: value.to_string(),
            source,
        })?;

    Ok(naive.and_utc().fixed_offset())
}

/// Primary timezone of a state, looked up by postal code or full name
pub fn resolve_time_zone(state: Option<&str>) -> Result<Tz> {
    let not_found = || ProcessorError::TimezoneResolution {
        state: state.map(str::to_string),
    };

    let key = state.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(not_found)?;

    let (_, _, zone) = STATE_TIME_ZONES
        .iter()
        .find(|(code, name, _)| code.eq_ignore_ascii_case(key) || name.eq_ignore_ascii_case(key))
        .ok_or_else(not_found)?;

    zone.parse::<Tz>().map_err(|_| not_found())
}

/// Whole hours between the instant's local time in `zone` and UTC,
/// truncated toward zero
pub fn utc_offset_hours(instant: &DateTime<FixedOffset>, zone: Tz) -> i32 {
    let local = instant.with_timezone(&zone);
    local.offset().fix().local_minus_utc() / 3600
}

/// Format an instant as UTC with second precision and no zone suffix
pub fn format_utc(instant: &DateTime<FixedOffset>) -> String {
    instant
        .with_timezone(&Utc)
        .format(UTC_TIMESTAMP_FORMAT)
        .to_string()
}
