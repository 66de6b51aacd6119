//! # Trip Matcher
//!
//! Trip segmentation and naming library for photo sync pipelines.
//!
//! This library provides:
//! - Temporal-gap + spatial-proximity trip segmentation
//! - A static gazetteer for coordinate-to-place-name resolution
//! - Date-range trip naming with optional location suffixes
//! - A single façade (`TripDetectionEngine`) composing the pipeline
//!
//! The engine consumes one `PhotoRecord` per photo (identifier, capture
//! timestamp, optional GPS coordinate) and partitions the stream into
//! chronologically ordered, named [`Trip`]s. Metadata extraction, file
//! staging and uploads are external collaborators; this crate only decides
//! trip membership and names.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tripmatch::{
//!     Coordinate, DetectConfig, LocationGazetteer, PhotoRecord, TripDetectionEngine,
//! };
//!
//! let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//! let sf = Coordinate::new(37.7749, -122.4194);
//! let records = vec![
//!     PhotoRecord::new("IMG_0001.jpg", day.and_hms_opt(9, 0, 0).unwrap(), Some(sf)),
//!     PhotoRecord::new("IMG_0002.jpg", day.and_hms_opt(14, 0, 0).unwrap(), Some(sf)),
//!     PhotoRecord::new("IMG_0003.jpg", day.and_hms_opt(20, 0, 0).unwrap(), Some(sf)),
//! ];
//!
//! let engine =
//!     TripDetectionEngine::new(DetectConfig::default(), LocationGazetteer::builtin()).unwrap();
//! let trips = engine.run(records).unwrap();
//!
//! assert_eq!(trips.len(), 1);
//! assert_eq!(trips[0].name, "2025-03-14-San-Francisco");
//! assert_eq!(trips[0].gps_count, 3);
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Result, TripDetectError};

// Geographic utilities (great-circle distance)
pub mod geo_utils;
pub use geo_utils::haversine_distance_km;

// Static location lookup table
pub mod gazetteer;
pub use gazetteer::{LocationGazetteer, LocationReference, LocationResolver};

// Trip boundary detection (the core fold)
pub mod segment;
pub use segment::{segment_records, BoundaryReason, TripGroup};

// Trip naming strategies
pub mod naming;
pub use naming::{name_trip, DateRangeNaming, TripNamingStrategy};

// Detection engine façade
pub mod engine;
pub use engine::TripDetectionEngine;

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate in decimal degrees.
///
/// # Example
/// ```
/// use tripmatch::Coordinate;
/// let point = Coordinate::new(51.5074, -0.1278); // London
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both components are finite and within degree range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// One input photo: identifier, capture timestamp, optional coordinate.
///
/// Capture timestamps are timezone-naive local times; records without a
/// usable timestamp are rejected by the upstream metadata layer and never
/// reach this crate. The engine reads records, it never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Stable identifier (typically the file path or name).
    pub id: String,
    /// Capture timestamp (timezone-naive local time).
    pub taken_at: NaiveDateTime,
    /// GPS fix, when the photo carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
}

impl PhotoRecord {
    /// Create a record from an already-assembled coordinate.
    pub fn new(
        id: impl Into<String>,
        taken_at: NaiveDateTime,
        coordinate: Option<Coordinate>,
    ) -> Self {
        Self {
            id: id.into(),
            taken_at,
            coordinate,
        }
    }

    /// Create a record from separately-optional latitude/longitude fields,
    /// as they arrive from EXIF extraction.
    ///
    /// Fails when exactly one of the two components is present.
    pub fn from_parts(
        id: impl Into<String>,
        taken_at: NaiveDateTime,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Self> {
        let id = id.into();
        let coordinate = match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            (None, None) => None,
            _ => {
                return Err(TripDetectError::PartialCoordinate { record_id: id });
            }
        };
        Ok(Self {
            id,
            taken_at,
            coordinate,
        })
    }
}

/// A finalized trip: membership, date span and display name.
///
/// Member identifiers are in chronological capture order. Every input
/// record for a run belongs to exactly one trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Member record identifiers, chronological order.
    pub members: Vec<String>,
    /// Earliest member capture timestamp.
    pub start: NaiveDateTime,
    /// Latest member capture timestamp.
    pub end: NaiveDateTime,
    /// Number of members carrying a GPS fix.
    pub gps_count: u32,
    /// Resolved place name, when the gazetteer matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    /// Generated display name, e.g. `2025-03-14-San-Francisco`.
    pub name: String,
    /// Why this trip was closed (diagnostic only).
    pub close_reason: String,
}

impl Trip {
    /// Number of member photos.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Trips are never empty, but the conventional check is provided.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Calendar day span of the trip, inclusive.
    pub fn days_span(&self) -> i64 {
        (self.end.date() - self.start.date()).num_days() + 1
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the GPS location-continuity check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpsClusterConfig {
    /// When false, a medium gap never splits a trip on location.
    pub enabled: bool,

    /// Distance from the trip's representative coordinate at which a
    /// medium-gap record counts as "moved away". Default: 50.0 km
    pub cluster_radius_km: f64,

    /// Minimum GPS-bearing members in the open trip before its
    /// representative coordinate is trusted for the check. Default: 5
    pub min_location_photos: u32,
}

impl Default for GpsClusterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cluster_radius_km: 50.0,
            min_location_photos: 5,
        }
    }
}

/// Configuration for trip boundary detection.
///
/// Key names and defaults match the sync tool's `trip_detection` config
/// block, so an existing JSON config deserializes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// A gap at or below this many hours always continues the trip.
    /// Default: 8.0
    pub short_gap_hours: f64,

    /// A gap at or above this many days always starts a new trip.
    /// Default: 3.0
    pub long_gap_days: f64,

    /// Minimum members for a trip to be worth filing. Carried for the
    /// downstream filing layer; segmentation emits small trips as-is.
    /// Default: 3
    pub min_photos_per_trip: u32,

    /// Location-continuity settings for the medium gap band.
    pub gps_clustering: GpsClusterConfig,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            short_gap_hours: 8.0,
            long_gap_days: 3.0,
            min_photos_per_trip: 3,
            gps_clustering: GpsClusterConfig::default(),
        }
    }
}

impl DetectConfig {
    /// The long-gap threshold expressed in hours.
    pub fn long_gap_hours(&self) -> f64 {
        self.long_gap_days * 24.0
    }

    /// Validate thresholds. Called once at engine construction.
    pub fn validate(&self) -> Result<()> {
        let thresholds: [(&'static str, f64); 3] = [
            ("short_gap_hours", self.short_gap_hours),
            ("long_gap_days", self.long_gap_days),
            (
                "gps_clustering.cluster_radius_km",
                self.gps_clustering.cluster_radius_km,
            ),
        ];
        for (key, value) in thresholds {
            if !value.is_finite() || value <= 0.0 {
                return Err(TripDetectError::InvalidThreshold { key, value });
            }
        }
        if self.gps_clustering.min_location_photos == 0 {
            return Err(TripDetectError::InvalidThreshold {
                key: "gps_clustering.min_location_photos",
                value: 0.0,
            });
        }
        Ok(())
    }
}
