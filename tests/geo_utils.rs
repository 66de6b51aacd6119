//! Tests for geo_utils module

use tripmatch::geo_utils::*;
use tripmatch::Coordinate;

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn test_haversine_same_point() {
    let p = Coordinate::new(51.5074, -0.1278);
    assert_eq!(haversine_distance_km(&p, &p), 0.0);
}

#[test]
fn test_haversine_known_value() {
    // London to Paris is approximately 344 km
    let london = Coordinate::new(51.5074, -0.1278);
    let paris = Coordinate::new(48.8566, 2.3522);
    let dist = haversine_distance_km(&london, &paris);
    assert!(approx_eq(dist, 343.5, 5.0));
}

#[test]
fn test_haversine_symmetric() {
    let sf = Coordinate::new(37.7749, -122.4194);
    let tokyo = Coordinate::new(35.6762, 139.6503);
    assert_eq!(
        haversine_distance_km(&sf, &tokyo),
        haversine_distance_km(&tokyo, &sf)
    );
}

#[test]
fn test_haversine_long_haul() {
    // San Francisco to London is approximately 8,600 km
    let sf = Coordinate::new(37.7749, -122.4194);
    let london = Coordinate::new(51.5074, -0.1278);
    let dist = haversine_distance_km(&sf, &london);
    assert!(approx_eq(dist, 8_616.0, 50.0));
}

#[test]
fn test_haversine_antipodal_near_half_circumference() {
    let p = Coordinate::new(37.7749, -122.4194);
    let antipode = Coordinate::new(-37.7749, 57.5806);
    let dist = haversine_distance_km(&p, &antipode);
    // Half the spherical circumference: pi * 6371
    assert!(approx_eq(dist, std::f64::consts::PI * EARTH_RADIUS_KM, 1.0));
}

#[test]
fn test_coordinate_validity() {
    assert!(Coordinate::new(0.0, 0.0).is_valid());
    assert!(Coordinate::new(-90.0, 180.0).is_valid());
    assert!(!Coordinate::new(90.1, 0.0).is_valid());
    assert!(!Coordinate::new(0.0, -180.5).is_valid());
    assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
}
