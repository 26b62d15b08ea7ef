//! Application constants for the availability processor
//!
//! This module contains file layout names, column orders, identifier
//! prefixes, and the state to timezone mapping used throughout the crate.

// =============================================================================
// Directory Layout and File Names
// =============================================================================

/// Directory (under the data root) holding raw scraper output
pub const RAW_DIR_NAME: &str = "univaf_raw";

/// Directory (under the data root) receiving the cleaned tables
pub const CLEAN_DIR_NAME: &str = "univaf_clean";

/// Name of the data root under the user's data directory
pub const DATA_ROOT_NAME: &str = "univaf";

/// Identifier table produced by the id assignment step
pub const IDS_FILE_NAME: &str = "ids_external.csv";

/// Persisted location registry
pub const LOCATIONS_FILE_NAME: &str = "locations_univaf.csv";

/// Prefix of the per-date availability files
pub const AVAILABILITY_FILE_PREFIX: &str = "availabilities_";

/// Files dropped by desktop platforms that must never be read as raw input
pub const PLATFORM_ARTIFACTS: &[&str] = &[".DS_Store", "Thumbs.db", "desktop.ini"];

/// Matches the compact `YYYYMMDD` date token embedded in raw filenames
pub const FILENAME_DATE_PATTERN: &str = r"(?:^|_)(\d{8})(?:[_.]|$)";

// =============================================================================
// Identifiers
// =============================================================================

/// Composite id prefix for raw ids that are UUIDs
pub const UUID_ID_PREFIX: &str = "uuid";

/// Composite id prefix for every other raw id
pub const UNIVAF_V0_ID_PREFIX: &str = "univaf_v0";

/// Identifier table column holding the composite id
pub const IDS_EXTERNAL_ID_COLUMN: &str = "external_id";

/// Identifier table column holding the internal id
pub const IDS_INTERNAL_ID_COLUMN: &str = "id";

// =============================================================================
// Output Tables
// =============================================================================

/// Location registry columns, in file order
pub const LOCATION_COLUMNS: &[&str] = &[
    "id", "uuid", "name", "provider", "type", "address", "city", "county", "state", "zip", "lat",
    "lng",
];

/// Availability columns, in file order (the files themselves carry no header)
pub const AVAILABILITY_COLUMNS: &[&str] = &[
    "internal_id",
    "timestamp_utc",
    "utc_offset_hours",
    "availability",
];

/// Rendered availability for "at least one, exact count unknown"
pub const AT_LEAST_ONE_SENTINEL: &str = "+";

/// Output format of UTC timestamps (second precision, no suffix)
pub const UTC_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Length of a normalized postal code
pub const ZIP_LENGTH: usize = 5;

/// State whose listings sometimes pack city and zip into the address
pub const ADDRESS_FIX_STATE: &str = "NJ";

// =============================================================================
// Availability Flags
// =============================================================================

pub mod availability_flags {
    /// Matched case-insensitively
    pub const YES: &str = "yes";

    /// Matched case-insensitively
    pub const NO: &str = "no";

    /// Matched exactly
    pub const UNKNOWN: &str = "UNKNOWN";
}

// =============================================================================
// State Time Zones
// =============================================================================

/// Primary IANA timezone for each US state, district and territory.
///
/// Entries are `(postal code, full name, timezone)`. States spanning several
/// zones map to the zone covering most of their population.
pub const STATE_TIME_ZONES: &[(&str, &str, &str)] = &[
    ("AL", "Alabama", "America/Chicago"),
    ("AK", "Alaska", "America/Anchorage"),
    ("AZ", "Arizona", "America/Phoenix"),
    ("AR", "Arkansas", "America/Chicago"),
    ("CA", "California", "America/Los_Angeles"),
    ("CO", "Colorado", "America/Denver"),
    ("CT", "Connecticut", "America/New_York"),
    ("DE", "Delaware", "America/New_York"),
    ("DC", "District of Columbia", "America/New_York"),
    ("FL", "Florida", "America/New_York"),
    ("GA", "Georgia", "America/New_York"),
    ("HI", "Hawaii", "Pacific/Honolulu"),
    ("ID", "Idaho", "America/Denver"),
    ("IL", "Illinois", "America/Chicago"),
    ("IN", "Indiana", "America/Indiana/Indianapolis"),
    ("IA", "Iowa", "America/Chicago"),
    ("KS", "Kansas", "America/Chicago"),
    ("KY", "Kentucky", "America/New_York"),
    ("LA", "Louisiana", "America/Chicago"),
    ("ME", "Maine", "America/New_York"),
    ("MD", "Maryland", "America/New_York"),
    ("MA", "Massachusetts", "America/New_York"),
    ("MI", "Michigan", "America/Detroit"),
    ("MN", "Minnesota", "America/Chicago"),
    ("MS", "Mississippi", "America/Chicago"),
    ("MO", "Missouri", "America/Chicago"),
    ("MT", "Montana", "America/Denver"),
    ("NE", "Nebraska", "America/Chicago"),
    ("NV", "Nevada", "America/Los_Angeles"),
    ("NH", "New Hampshire", "America/New_York"),
    ("NJ", "New Jersey", "America/New_York"),
    ("NM", "New Mexico", "America/Denver"),
    ("NY", "New York", "America/New_York"),
    ("NC", "North Carolina", "America/New_York"),
    ("ND", "North Dakota", "America/North_Dakota/Center"),
    ("OH", "Ohio", "America/New_York"),
    ("OK", "Oklahoma", "America/Chicago"),
    ("OR", "Oregon", "America/Los_Angeles"),
    ("PA", "Pennsylvania", "America/New_York"),
    ("RI", "Rhode Island", "America/New_York"),
    ("SC", "South Carolina", "America/New_York"),
    ("SD", "South Dakota", "America/Chicago"),
    ("TN", "Tennessee", "America/Chicago"),
    ("TX", "Texas", "America/Chicago"),
    ("UT", "Utah", "America/Denver"),
    ("VT", "Vermont", "America/New_York"),
    ("VA", "Virginia", "America/New_York"),
    ("WA", "Washington", "America/Los_Angeles"),
    ("WV", "West Virginia", "America/New_York"),
    ("WI", "Wisconsin", "America/Chicago"),
    ("WY", "Wyoming", "America/Denver"),
    ("AS", "American Samoa", "Pacific/Pago_Pago"),
    ("GU", "Guam", "Pacific/Guam"),
    ("MP", "Northern Mariana Islands", "Pacific/Saipan"),
    ("PR", "Puerto Rico", "America/Puerto_Rico"),
    ("VI", "Virgin Islands", "America/St_Thomas"),
];
