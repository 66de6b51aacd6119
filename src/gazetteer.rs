//! Static location gazetteer.
//!
//! Resolves a coordinate to a place name by scanning a fixed, ordered list
//! of reference points. Definition order is the tie-break: when radii
//! overlap, the first matching reference wins. Extending coverage means
//! appending entries, never touching the algorithm.

use serde::{Deserialize, Serialize};

use crate::geo_utils::haversine_distance_km;
use crate::Coordinate;

/// Capability interface for coordinate-to-name resolution.
///
/// The engine and namer depend only on this contract, so callers can
/// substitute an online geocoder without modifying segmentation.
pub trait LocationResolver {
    /// Resolve a coordinate to a place name, or `None` when unknown.
    fn resolve(&self, coord: &Coordinate) -> Option<&str>;
}

/// One gazetteer entry: a named center with a match radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationReference {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub name: String,
}

impl LocationReference {
    pub fn new(latitude: f64, longitude: f64, radius_km: f64, name: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            radius_km,
            name: name.into(),
        }
    }

    /// Center of this reference as a coordinate.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Whether a coordinate falls within this reference's radius.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        haversine_distance_km(coord, &self.center()) <= self.radius_km
    }
}

/// Ordered, read-only lookup table mapping coordinate neighborhoods to
/// place names.
///
/// The table is configuration data supplied at construction and shared
/// freely across concurrent detection runs.
///
/// # Example
/// ```
/// use tripmatch::{Coordinate, LocationGazetteer, LocationResolver};
///
/// let gazetteer = LocationGazetteer::builtin();
/// let sf = Coordinate::new(37.7749, -122.4194);
///
/// assert_eq!(gazetteer.resolve(&sf), Some("San-Francisco"));
/// assert_eq!(gazetteer.resolve(&Coordinate::new(0.0, 0.0)), None);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationGazetteer {
    references: Vec<LocationReference>,
}

impl LocationGazetteer {
    /// Create a gazetteer from an ordered list of references.
    pub fn new(references: Vec<LocationReference>) -> Self {
        Self { references }
    }

    /// The reference table the sync tool ships with: major cities with a
    /// generous 100 km radius each.
    pub fn builtin() -> Self {
        Self::new(vec![
            // California
            LocationReference::new(37.7749, -122.4194, 100.0, "San-Francisco"),
            LocationReference::new(34.0522, -118.2437, 100.0, "Los-Angeles"),
            LocationReference::new(32.7157, -117.1611, 100.0, "San-Diego"),
            // Hawaii
            LocationReference::new(21.3099, -157.8581, 100.0, "Hawaii"),
            // New York
            LocationReference::new(40.7128, -74.0060, 100.0, "New-York"),
            // International
            LocationReference::new(48.8566, 2.3522, 100.0, "Paris"),
            LocationReference::new(51.5074, -0.1278, 100.0, "London"),
            LocationReference::new(35.6762, 139.6503, 100.0, "Tokyo"),
        ])
    }

    /// Number of references.
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Whether the table has no references.
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// The references in definition order.
    pub fn references(&self) -> &[LocationReference] {
        &self.references
    }

    /// Append a reference. Later entries lose ties against earlier ones.
    pub fn push(&mut self, reference: LocationReference) {
        self.references.push(reference);
    }
}

impl LocationResolver for LocationGazetteer {
    fn resolve(&self, coord: &Coordinate) -> Option<&str> {
        self.references
            .iter()
            .find(|r| r.contains(coord))
            .map(|r| r.name.as_str())
    }
}
