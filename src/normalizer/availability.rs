//! Availability count extraction
//!
//! Sources report availability in several shapes: a bare yes/no flag, an
//! explicit total, or a per-slot capacity breakdown. This module reduces
//! all of them to an [`AvailabilityValue`].

use crate::constants::availability_flags;
use crate::error::{ProcessorError, Result};
use crate::models::{AvailabilityValue, CapacityEntry, CapacityValue, RawAvailability};

/// Determine the availability of one observation.
///
/// Priority for a `yes` flag: explicit `available_count`, then the sum of
/// the capacity breakdown, then [`AvailabilityValue::AtLeastOne`]. A `no`
/// flag is always zero and `UNKNOWN` is always unknown; any other flag is
/// an error.
pub fn extract_availability(availability: &RawAvailability) -> Result<AvailabilityValue> {
    let flag = availability.available.as_deref().ok_or_else(|| {
        ProcessorError::malformed_availability("record has no 'available' flag")
    })?;

    if flag.eq_ignore_ascii_case(availability_flags::YES) {
        if let Some(count) = availability.available_count {
            if count < 0 {
                return Err(ProcessorError::malformed_availability(format!(
                    "negative available_count {}",
                    count
                )));
            }
            return Ok(AvailabilityValue::Count(count));
        }

        let capacity = availability
            .meta
            .as_ref()
            .and_then(|meta| meta.capacity.as_ref());

        match capacity {
            Some(entries) => sum_capacity(entries).map(AvailabilityValue::Count),
            None => Ok(AvailabilityValue::AtLeastOne),
        }
    } else if flag.eq_ignore_ascii_case(availability_flags::NO) {
        Ok(AvailabilityValue::Count(0))
    } else if flag == availability_flags::UNKNOWN {
        Ok(AvailabilityValue::Unknown)
    } else {
        Err(ProcessorError::malformed_availability(format!(
            "unrecognized 'available' flag '{}'",
            flag
        )))
    }
}

/// Sum a capacity breakdown, preferring `available_count` over `available`
/// in each entry. Negative counts and a total past `i64::MAX` are errors.
pub fn sum_capacity(entries: &[CapacityEntry]) -> Result<i64> {
    entries.iter().enumerate().try_fold(0i64, |total, (index, entry)| {
        let count = match (entry.available_count, &entry.available) {
            (Some(count), _) => count,
            (None, Some(CapacityValue::Count(count))) => *count,
            (None, Some(CapacityValue::Flag(flag))) => {
                return Err(ProcessorError::malformed_availability(format!(
                    "capacity entry {} has no count (available = '{}')",
                    index, flag
                )));
            }
            (None, None) => {
                return Err(ProcessorError::malformed_availability(format!(
                    "capacity entry {} has no count",
                    index
                )));
            }
        };
        if count < 0 {
            return Err(ProcessorError::malformed_availability(format!(
                "capacity entry {} has negative count {}",
                index, count
            )));
        }
        total.checked_add(count).ok_or_else(|| {
            ProcessorError::malformed_availability(format!(
                "capacity total overflows at entry {}",
                index
            ))
        })
    })
}
