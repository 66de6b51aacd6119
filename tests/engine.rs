//! Tests for engine module

use chrono::{NaiveDate, NaiveDateTime};
use tripmatch::{
    Coordinate, DetectConfig, LocationGazetteer, LocationResolver, PhotoRecord,
    TripDetectionEngine, TripDetectError,
};

const SF: Coordinate = Coordinate {
    latitude: 37.7749,
    longitude: -122.4194,
};
const LONDON: Coordinate = Coordinate {
    latitude: 51.5074,
    longitude: -0.1278,
};

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn default_engine() -> TripDetectionEngine {
    TripDetectionEngine::new(DetectConfig::default(), LocationGazetteer::builtin()).unwrap()
}

#[test]
fn test_end_to_end_single_day_san_francisco() {
    // Three SF photos with 5h and 6h gaps: one trip, named and counted.
    let records = vec![
        PhotoRecord::new("IMG_0001.jpg", at(14, 9), Some(SF)),
        PhotoRecord::new("IMG_0002.jpg", at(14, 14), Some(SF)),
        PhotoRecord::new("IMG_0003.jpg", at(14, 20), Some(SF)),
    ];

    let trips = default_engine().run(records).unwrap();

    assert_eq!(trips.len(), 1);
    let trip = &trips[0];
    assert_eq!(trip.name, "2025-03-14-San-Francisco");
    assert_eq!(trip.members.len(), 3);
    assert_eq!(trip.gps_count, 3);
    assert_eq!(trip.close_reason, "end of input");
}

#[test]
fn test_end_to_end_conservative_default_on_sparse_gps() {
    // SF morning, London evening, 11h gap. Only one GPS photo precedes the
    // gap, so the location check is not trusted and the trip continues.
    let records = vec![
        PhotoRecord::new("sf.jpg", at(14, 9), Some(SF)),
        PhotoRecord::new("london.jpg", at(14, 20), Some(LONDON)),
    ];

    let trips = default_engine().run(records).unwrap();
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].gps_count, 2);
}

#[test]
fn test_defensive_sort_matches_sorted_input() {
    let sorted = vec![
        PhotoRecord::new("a.jpg", at(14, 9), Some(SF)),
        PhotoRecord::new("b.jpg", at(14, 14), Some(SF)),
        PhotoRecord::new("c.jpg", at(20, 10), Some(SF)),
    ];
    let shuffled = vec![sorted[2].clone(), sorted[0].clone(), sorted[1].clone()];

    let engine = default_engine();
    let from_sorted = engine.run(sorted).unwrap();
    let from_shuffled = engine.run(shuffled).unwrap();

    assert_eq!(from_sorted, from_shuffled);
    assert_eq!(from_sorted.len(), 2);
}

#[test]
fn test_trips_ordered_by_start_and_partition_input() {
    let mut records: Vec<PhotoRecord> = (0..6)
        .map(|i| PhotoRecord::new(format!("sf-{i}.jpg"), at(14, 9 + i), Some(SF)))
        .collect();
    records.push(PhotoRecord::new("later.jpg", at(20, 10), None));
    records.push(PhotoRecord::new("last.jpg", at(25, 10), Some(SF)));

    let trips = default_engine().run(records).unwrap();
    assert_eq!(trips.len(), 3);

    let starts: Vec<_> = trips.iter().map(|t| t.start).collect();
    let mut ordered = starts.clone();
    ordered.sort();
    assert_eq!(starts, ordered);

    let member_total: usize = trips.iter().map(|t| t.members.len()).sum();
    assert_eq!(member_total, 8);
    assert!(trips.iter().all(|t| !t.is_empty()));
}

#[test]
fn test_invalid_coordinate_names_offending_record() {
    let records = vec![
        PhotoRecord::new("ok.jpg", at(14, 9), Some(SF)),
        PhotoRecord::new("bad.jpg", at(14, 10), Some(Coordinate::new(95.0, 0.0))),
    ];

    let err = default_engine().run(records).unwrap_err();
    match err {
        TripDetectError::InvalidCoordinate { record_id, .. } => {
            assert_eq!(record_id, "bad.jpg");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_run_yields_no_trips() {
    let trips = default_engine().run(vec![]).unwrap();
    assert!(trips.is_empty());
}

#[test]
fn test_zero_threshold_rejected_at_construction() {
    let config = DetectConfig {
        short_gap_hours: 0.0,
        ..DetectConfig::default()
    };

    let err = TripDetectionEngine::new(config, LocationGazetteer::builtin()).unwrap_err();
    assert_eq!(
        err,
        TripDetectError::InvalidThreshold {
            key: "short_gap_hours",
            value: 0.0
        }
    );
}

#[test]
fn test_negative_radius_rejected_at_construction() {
    let mut config = DetectConfig::default();
    config.gps_clustering.cluster_radius_km = -5.0;

    let err = TripDetectionEngine::new(config, LocationGazetteer::builtin()).unwrap_err();
    assert!(matches!(err, TripDetectError::InvalidThreshold { .. }));
}

#[test]
fn test_empty_gazetteer_rejected_when_clustering_enabled() {
    let err = TripDetectionEngine::new(DetectConfig::default(), LocationGazetteer::new(vec![]))
        .unwrap_err();
    assert_eq!(err, TripDetectError::EmptyGazetteer);
}

#[test]
fn test_empty_gazetteer_accepted_when_clustering_disabled() {
    let mut config = DetectConfig::default();
    config.gps_clustering.enabled = false;

    let engine = TripDetectionEngine::new(config, LocationGazetteer::new(vec![])).unwrap();
    let trips = engine
        .run(vec![PhotoRecord::new("a.jpg", at(14, 9), Some(SF))])
        .unwrap();

    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].location_name, None);
    assert_eq!(trips[0].name, "2025-03-14");
}

#[test]
fn test_custom_resolver_injection() {
    struct Everywhere;
    impl LocationResolver for Everywhere {
        fn resolve(&self, _coord: &Coordinate) -> Option<&str> {
            Some("Somewhere")
        }
    }

    let engine =
        TripDetectionEngine::with_resolver(DetectConfig::default(), Box::new(Everywhere)).unwrap();
    let trips = engine
        .run(vec![PhotoRecord::new("a.jpg", at(14, 9), Some(SF))])
        .unwrap();

    assert_eq!(trips[0].name, "2025-03-14-Somewhere");
}

#[test]
fn test_engine_reusable_across_runs() {
    // The engine holds no state between runs: identical inputs give
    // identical outputs.
    let engine = default_engine();
    let records = vec![
        PhotoRecord::new("a.jpg", at(14, 9), Some(SF)),
        PhotoRecord::new("b.jpg", at(14, 14), Some(SF)),
    ];

    let first = engine.run(records.clone()).unwrap();
    let second = engine.run(records).unwrap();
    assert_eq!(first, second);
}
