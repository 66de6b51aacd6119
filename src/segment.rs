//! Trip boundary detection.
//!
//! This module provides the core segmentation fold: an ordered stream of
//! photo records is partitioned into trips by combining a temporal-gap
//! heuristic with a spatial-proximity heuristic.
//!
//! The decision order per record is fixed and is the tie-break policy:
//! 1. Gap at or below `short_gap_hours` → always the same trip. Location
//!    is never consulted; back-to-back shooting is one outing even when
//!    GPS jitter suggests otherwise.
//! 2. Gap at or above `long_gap_days` → always a new trip.
//! 3. Anything between (the medium band) → consult location continuity.
//!    Missing GPS on either side means "don't know" and continues the
//!    trip; under-splitting is the deliberate bias when data is sparse.

use std::fmt;

use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::geo_utils::haversine_distance_km;
use crate::{Coordinate, DetectConfig, PhotoRecord, Result, TripDetectError};

/// Why a trip was closed. Diagnostic only; never feeds back into the
/// segmentation decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoundaryReason {
    /// The gap to the next record was at or above the long-gap threshold.
    LongGap { gap_hours: f64 },
    /// A medium gap combined with a move beyond the cluster radius.
    LocationChange { gap_hours: f64, distance_km: f64 },
    /// The input ended while this trip was still open.
    EndOfInput,
}

impl fmt::Display for BoundaryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LongGap { gap_hours } => {
                write!(f, "long gap ({:.1} days)", gap_hours / 24.0)
            }
            Self::LocationChange {
                gap_hours,
                distance_km,
            } => write!(
                f,
                "location change after {gap_hours:.1}h gap ({distance_km:.0} km)"
            ),
            Self::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// The accumulating trip under construction.
///
/// Holds the time-ordered members plus the anchor state the boundary
/// decision needs: the last member's timestamp and the representative
/// coordinate. The representative is the most recent GPS fix, not a
/// centroid — the check asks "have we moved from where we just were",
/// which separates continued travel from a finished excursion.
///
/// Groups exist only inside one segmentation pass; they are converted into
/// immutable [`Trip`](crate::Trip) values as soon as a boundary is decided.
#[derive(Debug, Clone)]
pub struct TripGroup {
    records: Vec<PhotoRecord>,
    representative: Option<Coordinate>,
    gps_count: u32,
    close_reason: Option<BoundaryReason>,
}

impl TripGroup {
    /// Open a new group with its first member. Groups are never empty.
    pub fn open(first: PhotoRecord) -> Self {
        let mut group = Self {
            records: Vec::new(),
            representative: None,
            gps_count: 0,
            close_reason: None,
        };
        group.push(first);
        group
    }

    /// Append a member and update the anchor state.
    pub fn push(&mut self, record: PhotoRecord) {
        if let Some(coord) = record.coordinate {
            self.representative = Some(coord);
            self.gps_count += 1;
        }
        self.records.push(record);
    }

    /// Mark the group closed with the reason the boundary was drawn.
    pub fn close(&mut self, reason: BoundaryReason) {
        self.close_reason = Some(reason);
    }

    /// Capture timestamp of the most recent member.
    pub fn last_taken_at(&self) -> NaiveDateTime {
        self.records[self.records.len() - 1].taken_at
    }

    /// Elapsed hours from the last member to a candidate record.
    pub fn gap_hours_to(&self, record: &PhotoRecord) -> f64 {
        let gap = record.taken_at - self.last_taken_at();
        gap.num_milliseconds() as f64 / 3_600_000.0
    }

    /// The most recent GPS fix among members, if any member carried one.
    pub fn representative(&self) -> Option<Coordinate> {
        self.representative
    }

    /// Number of members carrying a GPS fix.
    pub fn gps_count(&self) -> u32 {
        self.gps_count
    }

    /// Members in chronological order.
    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a live group; provided for convention.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Why the group was closed, once segmentation decided a boundary.
    pub fn close_reason(&self) -> Option<BoundaryReason> {
        self.close_reason
    }

    /// Consume the group, yielding its members.
    pub fn into_records(self) -> Vec<PhotoRecord> {
        self.records
    }
}

/// Decide whether `record` breaks the open group.
///
/// Returns `None` to continue the trip, or the boundary reason to close it
/// and open a new one. Rule order is fixed; see the module docs.
fn split_reason(
    group: &TripGroup,
    record: &PhotoRecord,
    config: &DetectConfig,
) -> Option<BoundaryReason> {
    let gap_hours = group.gap_hours_to(record);

    // Rule 1: short gap always continues, regardless of coordinates.
    if gap_hours <= config.short_gap_hours {
        return None;
    }

    // Rule 2: long gap always splits, regardless of coordinates.
    if gap_hours >= config.long_gap_hours() {
        return Some(BoundaryReason::LongGap { gap_hours });
    }

    // Rule 3: medium band. Location is consulted only here, and only when
    // both sides have trustworthy GPS data.
    let gps = &config.gps_clustering;
    if !gps.enabled {
        return None;
    }
    if group.gps_count() < gps.min_location_photos {
        return None;
    }
    let coord = record.coordinate?;
    let anchor = group.representative()?;

    let distance_km = haversine_distance_km(&coord, &anchor);
    if distance_km <= gps.cluster_radius_km {
        None
    } else {
        Some(BoundaryReason::LocationChange {
            gap_hours,
            distance_km,
        })
    }
}

/// Partition a time-ordered record stream into trip groups.
///
/// Precondition: `records` is sorted ascending by capture timestamp. The
/// segmenter does not sort; unsorted input fails fast with
/// [`TripDetectError::UnsortedRecords`] naming the offending record. The
/// [`TripDetectionEngine`](crate::TripDetectionEngine) façade sorts
/// defensively before calling in.
///
/// Every input record lands in exactly one group, in its original order.
/// The final group is closed with [`BoundaryReason::EndOfInput`].
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tripmatch::{segment_records, DetectConfig, PhotoRecord};
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
/// let records = vec![
///     PhotoRecord::new("a.jpg", day.and_hms_opt(9, 0, 0).unwrap(), None),
///     PhotoRecord::new("b.jpg", day.and_hms_opt(11, 0, 0).unwrap(), None),
/// ];
///
/// let groups = segment_records(records, &DetectConfig::default()).unwrap();
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].len(), 2);
/// ```
pub fn segment_records(
    records: Vec<PhotoRecord>,
    config: &DetectConfig,
) -> Result<Vec<TripGroup>> {
    let mut groups: Vec<TripGroup> = Vec::new();

    let mut iter = records.into_iter();
    let first = match iter.next() {
        Some(r) => r,
        None => return Ok(groups),
    };
    let mut open = TripGroup::open(first);

    for record in iter {
        if record.taken_at < open.last_taken_at() {
            return Err(TripDetectError::UnsortedRecords {
                record_id: record.id,
            });
        }

        match split_reason(&open, &record, config) {
            Some(reason) => {
                debug!(
                    "closing trip of {} records at '{}': {}",
                    open.len(),
                    record.id,
                    reason
                );
                open.close(reason);
                groups.push(std::mem::replace(&mut open, TripGroup::open(record)));
            }
            None => open.push(record),
        }
    }

    open.close(BoundaryReason::EndOfInput);
    groups.push(open);

    Ok(groups)
}
