//! Trip detection engine façade.
//!
//! Composes the segmenter and namer into the single entry point callers
//! use: validate, sort, segment, name. The engine holds no state across
//! runs and is safe to share across threads for independent photo sets.

use log::{debug, info};

use crate::gazetteer::{LocationGazetteer, LocationResolver};
use crate::naming::{name_trip, DateRangeNaming, TripNamingStrategy};
use crate::segment::segment_records;
use crate::{DetectConfig, PhotoRecord, Result, Trip, TripDetectError};

/// The trip detection pipeline: records in, ordered named trips out.
///
/// Configuration is validated at construction, so `run` can only fail on
/// malformed records. The gazetteer and naming strategy are injected
/// behind their capability traits; [`TripDetectionEngine::new`] wires the
/// built-in implementations.
pub struct TripDetectionEngine {
    config: DetectConfig,
    resolver: Box<dyn LocationResolver + Send + Sync>,
    naming: Box<dyn TripNamingStrategy + Send + Sync>,
}

impl std::fmt::Debug for TripDetectionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripDetectionEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TripDetectionEngine {
    /// Create an engine with a static gazetteer and date-range naming.
    ///
    /// Fails on non-positive thresholds, or on an empty gazetteer while
    /// GPS clustering is enabled.
    pub fn new(config: DetectConfig, gazetteer: LocationGazetteer) -> Result<Self> {
        config.validate()?;
        if config.gps_clustering.enabled && gazetteer.is_empty() {
            return Err(TripDetectError::EmptyGazetteer);
        }
        Ok(Self {
            config,
            resolver: Box::new(gazetteer),
            naming: Box::new(DateRangeNaming),
        })
    }

    /// Create an engine with a custom location resolver (e.g. an online
    /// geocoder). The resolver is trusted to be non-trivial.
    pub fn with_resolver(
        config: DetectConfig,
        resolver: Box<dyn LocationResolver + Send + Sync>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            resolver,
            naming: Box::new(DateRangeNaming),
        })
    }

    /// Replace the naming strategy.
    pub fn with_naming(mut self, naming: Box<dyn TripNamingStrategy + Send + Sync>) -> Self {
        self.naming = naming;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Partition records into named trips.
    ///
    /// Records are sorted defensively by capture timestamp (stable, so
    /// equal timestamps keep their input order) rather than trusting the
    /// caller's ordering. Coordinates are validated first; a non-finite or
    /// out-of-range coordinate fails the whole run with the offending
    /// record id.
    ///
    /// The returned trips partition the input exactly and are ordered by
    /// non-decreasing start timestamp.
    pub fn run(&self, mut records: Vec<PhotoRecord>) -> Result<Vec<Trip>> {
        for record in &records {
            if let Some(coord) = record.coordinate {
                if !coord.is_valid() {
                    return Err(TripDetectError::InvalidCoordinate {
                        record_id: record.id.clone(),
                        latitude: coord.latitude,
                        longitude: coord.longitude,
                    });
                }
            }
        }

        let total = records.len();
        records.sort_by_key(|r| r.taken_at);
        debug!("running trip detection over {total} records");

        let groups = segment_records(records, &self.config)?;

        let trips: Vec<Trip> = groups
            .into_iter()
            .map(|group| name_trip(group, self.resolver.as_ref(), self.naming.as_ref()))
            .collect();

        info!("segmented {} records into {} trips", total, trips.len());
        Ok(trips)
    }
}
