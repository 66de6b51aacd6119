//! Unified error handling for trip detection.
//!
//! Two families of failures exist: validation errors (malformed input for a
//! single run) and configuration errors (rejected at engine construction).
//! Nothing here is retryable; the engine performs no I/O.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TripDetectError>;

/// Errors produced by the trip detection engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripDetectError {
    /// Records were not sorted ascending by capture timestamp.
    ///
    /// `segment_records` states sortedness as a precondition and fails fast
    /// rather than producing nonsensical trips. The engine façade sorts
    /// defensively, so this only reaches callers invoking the segmenter
    /// directly.
    #[error("record '{record_id}' is out of order: capture time precedes the previous record")]
    UnsortedRecords { record_id: String },

    /// A record carried exactly one of latitude/longitude.
    #[error("record '{record_id}' has a partial coordinate: latitude and longitude must both be present or both absent")]
    PartialCoordinate { record_id: String },

    /// A record's coordinate is non-finite or outside degree range.
    #[error("record '{record_id}' has an invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        record_id: String,
        latitude: f64,
        longitude: f64,
    },

    /// A configuration threshold was zero, negative or non-finite.
    #[error("configuration value '{key}' must be a positive finite number (got {value})")]
    InvalidThreshold { key: &'static str, value: f64 },

    /// GPS clustering is enabled but no location references were supplied.
    #[error("location gazetteer is empty while GPS clustering is enabled")]
    EmptyGazetteer,
}
