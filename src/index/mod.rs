//! Per-listing facet indexes.
//!
//! A [`FacetIndex`] is the precomputed snapshot of every facet and bucket
//! membership for one listing. It is derived offline from a
//! [`RawListing`](crate::listing::RawListing), persisted alongside it, and
//! read-only at query time; the aggregator and the evaluator both consume
//! it without touching the raw attributes again.
//!
//! All maps are `BTreeMap`s over the closed taxonomy vocabularies so that
//! the same attributes always serialize to the same bytes.

mod builder;
mod hours;

use std::collections::{BTreeMap, BTreeSet};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::taxonomy::{
    AmenityKey, DineOptionKey, DistanceBucket, NearbyCategoryKey, PriceBucket, RatingBuckets,
    ReviewCountBuckets, StandoutTagKey,
};

pub use builder::{IndexBuilder, build_facet_index};
pub use hours::parse_weekly_hours;

/// Minutes in a day; also the exclusive upper bound of an interval end.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// One listing's facet memberships, immutable once computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetIndex {
    /// One flag per amenity in the taxonomy.
    pub amenities: BTreeMap<AmenityKey, bool>,
    /// "Is there at least one place of this category within this distance",
    /// as the full category by bucket grid, cumulative across buckets.
    pub nearby: BTreeMap<NearbyCategoryKey, BTreeMap<DistanceBucket, bool>>,
    pub price_bucket: PriceBucket,
    pub rating_buckets: RatingBuckets,
    pub review_count_buckets: ReviewCountBuckets,
    /// One flag per dine option in the taxonomy.
    pub dine_options: BTreeMap<DineOptionKey, bool>,
    pub standout_tags: BTreeSet<StandoutTagKey>,
    pub neighborhood: Option<String>,
    /// Normalized weekly schedule; empty when hours were absent or malformed.
    pub parsed_hours: WeeklyHours,
    /// IANA timezone; `None` forces the open-now predicate to indeterminate.
    pub timezone: Option<Tz>,
}

impl FacetIndex {
    /// Whether the listing has the amenity. Absent keys read as false.
    #[must_use]
    pub fn has_amenity(&self, key: AmenityKey) -> bool {
        self.amenities.get(&key).copied().unwrap_or(false)
    }

    /// Whether at least one place of `category` lies within `bucket`.
    #[must_use]
    pub fn nearby_within(&self, category: NearbyCategoryKey, bucket: DistanceBucket) -> bool {
        self.nearby
            .get(&category)
            .and_then(|buckets| buckets.get(&bucket))
            .copied()
            .unwrap_or(false)
    }

    /// Whether the listing offers the dine option.
    #[must_use]
    pub fn offers(&self, option: DineOptionKey) -> bool {
        self.dine_options.get(&option).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn has_tag(&self, tag: StandoutTagKey) -> bool {
        self.standout_tags.contains(&tag)
    }

    /// Whether the open-now predicate can ever resolve for this listing:
    /// a non-empty schedule and a known timezone.
    #[must_use]
    pub fn has_hours(&self) -> bool {
        !self.parsed_hours.is_empty() && self.timezone.is_some()
    }
}

/// A half-open `[start, end)` span of minutes within one day.
///
/// `end_minute` may be [`MINUTES_PER_DAY`] for spans that run to midnight;
/// overnight periods are split into two intervals on adjacent days before
/// they get here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct OpenInterval {
    pub start_minute: u16,
    pub end_minute: u16,
}

impl OpenInterval {
    #[must_use]
    pub const fn new(start_minute: u16, end_minute: u16) -> Self {
        Self {
            start_minute,
            end_minute,
        }
    }

    /// Whether the minute-of-day falls inside this interval.
    #[must_use]
    pub const fn contains(&self, minute: u16) -> bool {
        self.start_minute <= minute && minute < self.end_minute
    }
}

/// Open intervals for each day of the week, Monday first.
///
/// Intervals within a day are sorted by start and never overlap; the
/// normalization in [`parse_weekly_hours`] coalesces raw periods that do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    days: [Vec<OpenInterval>; 7],
}

impl WeeklyHours {
    /// A schedule with no open time at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from per-day interval lists, sorting and coalescing
    /// overlapping or touching intervals within each day.
    #[must_use]
    pub fn from_days(mut days: [Vec<OpenInterval>; 7]) -> Self {
        for intervals in &mut days {
            intervals.sort_unstable();
            *intervals = coalesce(std::mem::take(intervals));
        }
        Self { days }
    }

    /// True when no day has any open interval.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    /// Intervals for a day (0 = Monday). Out-of-range days are empty.
    #[must_use]
    pub fn intervals_on(&self, day: usize) -> &[OpenInterval] {
        self.days.get(day).map_or(&[], Vec::as_slice)
    }

    /// Whether the listing is open at `minute` on `day` (0 = Monday).
    #[must_use]
    pub fn is_open_at(&self, day: usize, minute: u16) -> bool {
        self.intervals_on(day)
            .iter()
            .any(|interval| interval.contains(minute))
    }
}

/// Merge sorted intervals that overlap or touch; drops empty spans.
fn coalesce(intervals: Vec<OpenInterval>) -> Vec<OpenInterval> {
    let mut merged: Vec<OpenInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if interval.start_minute >= interval.end_minute {
            continue;
        }
        match merged.last_mut() {
            Some(last) if interval.start_minute <= last.end_minute => {
                last.end_minute = last.end_minute.max(interval.end_minute);
            }
            _ => merged.push(interval),
        }
    }
    merged
}
