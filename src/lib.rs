//! UNIVAF Processor Library
//!
//! Normalizes raw vaccine appointment availability scrapes into two
//! analysis-ready outputs: a location registry keyed by internal id, and one
//! availability time-series file per day.
//!
//! This library provides tools for:
//! - Resolving source identifiers against an external identifier table
//! - Normalizing location metadata, observation times and availability counts
//! - Maintaining a last-write-wins location registry across runs
//! - Writing per-date availability files
//! - Driving a batch over a range of dates

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod identifiers;
pub mod models;
pub mod normalizer;
pub mod processor;
pub mod registry;

// Re-export commonly used types
pub use config::{MissingIdPolicy, ProcessorConfig};
pub use error::{ProcessorError, Result};
pub use identifiers::IdentifierTable;
pub use models::{AvailabilityObservation, AvailabilityValue, Location, RawRecord, RunStats};
pub use normalizer::{NormalizeOutcome, RecordNormalizer};
pub use processor::BatchProcessor;
pub use registry::LocationRegistry;
