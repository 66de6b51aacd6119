//! Trip naming.
//!
//! Converts a finalized [`TripGroup`] into an immutable [`Trip`] with a
//! date-range display name and an optional location suffix. Naming is
//! deterministic: the same group and resolver always produce byte-identical
//! output. Name collisions between separate visits to the same place are
//! left to the filing layer.

use chrono::{Datelike, NaiveDateTime};

use crate::gazetteer::LocationResolver;
use crate::segment::{BoundaryReason, TripGroup};
use crate::Trip;

/// Capability interface for building a trip's display name.
///
/// The default [`DateRangeNaming`] matches the sync tool's folder naming;
/// callers wanting a different scheme implement this without touching
/// segmentation.
pub trait TripNamingStrategy {
    /// Build the display name from the trip's date span and resolved
    /// location, if any.
    fn display_name(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        location: Option<&str>,
    ) -> String;
}

/// Default naming: `YYYY-MM-DD` for single-day trips,
/// `YYYY-MM-DD to MM-DD` for multi-day trips within one calendar year,
/// both dates fully formatted across a year boundary. A resolved location
/// is appended as `-Name`; an unknown location adds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRangeNaming;

impl TripNamingStrategy for DateRangeNaming {
    fn display_name(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        location: Option<&str>,
    ) -> String {
        let start_date = start.date();
        let end_date = end.date();

        let mut name = if start_date == end_date {
            start.format("%Y-%m-%d").to_string()
        } else if start_date.year() == end_date.year() {
            format!("{} to {}", start.format("%Y-%m-%d"), end.format("%m-%d"))
        } else {
            // Cross-year span: the short end form would be ambiguous.
            format!("{} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
        };

        if let Some(location) = location {
            name.push('-');
            name.push_str(location);
        }

        name
    }
}

/// Finalize a trip group into an immutable [`Trip`].
///
/// The date span is the min/max of member timestamps. The location is the
/// resolver applied to the group's representative coordinate when at least
/// one member carries GPS, otherwise `None`.
pub fn name_trip(
    group: TripGroup,
    resolver: &dyn LocationResolver,
    naming: &dyn TripNamingStrategy,
) -> Trip {
    let records = group.records();

    let mut start = records[0].taken_at;
    let mut end = records[0].taken_at;
    for record in records {
        if record.taken_at < start {
            start = record.taken_at;
        }
        if record.taken_at > end {
            end = record.taken_at;
        }
    }

    let location_name = group
        .representative()
        .and_then(|coord| resolver.resolve(&coord))
        .map(str::to_owned);

    let name = naming.display_name(start, end, location_name.as_deref());
    let gps_count = group.gps_count();
    let close_reason = group
        .close_reason()
        .unwrap_or(BoundaryReason::EndOfInput)
        .to_string();

    Trip {
        members: group.into_records().into_iter().map(|r| r.id).collect(),
        start,
        end,
        gps_count,
        location_name,
        name,
        close_reason,
    }
}
