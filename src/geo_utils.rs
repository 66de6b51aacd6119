//! Geographic utilities.
//!
//! Great-circle distance on a spherical-earth approximation. This is the
//! only geometry the segmenter and gazetteer need; sub-kilometer accuracy
//! is irrelevant at trip-detection scale.

use crate::Coordinate;

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the great-circle distance between two coordinates in
/// kilometers using the haversine formula.
///
/// Symmetric, and zero for identical coordinates. Inputs are assumed to be
/// within valid degree ranges (see [`Coordinate::is_valid`]); out-of-range
/// values are a caller contract violation.
///
/// # Example
/// ```
/// use tripmatch::{haversine_distance_km, Coordinate};
///
/// let london = Coordinate::new(51.5074, -0.1278);
/// let paris = Coordinate::new(48.8566, 2.3522);
///
/// let dist = haversine_distance_km(&london, &paris);
/// assert!((dist - 343.5).abs() < 5.0);
/// ```
pub fn haversine_distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().asin()
}
