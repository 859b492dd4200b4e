//! Facet index construction.
//!
//! `build_facet_index` is a pure function of the raw listing and the
//! configuration: the same attributes always produce the same index, so
//! the result can be persisted and recomputed only when the source
//! changes. Every malformed sub-field degrades on its own and never fails
//! the whole index: bad hours leave the schedule empty, an unknown
//! timezone stays `None`, unknown labels are skipped.

use std::collections::{BTreeMap, HashMap};

use chrono_tz::Tz;
use rayon::prelude::*;
use tracing::debug;

use crate::config::Config;
use crate::listing::{ListingId, RawListing};
use crate::taxonomy::{
    AmenityKey, DineOptionKey, DistanceBucket, NearbyCategoryKey, bucketize_distance_miles,
    bucketize_rating, bucketize_review_count, extract_standout_tags, parse_price_to_bucket,
};

use super::hours::{HoursMemo, parse_weekly_hours};
use super::{FacetIndex, WeeklyHours};

/// Compute one listing's facet index.
#[must_use]
pub fn build_facet_index(listing: &RawListing, config: &Config) -> FacetIndex {
    assemble(listing, config, parse_weekly_hours(&listing.hours))
}

/// Batch index builder with memoized hours parsing.
///
/// Chains repeat one weekly schedule across locations; the memo avoids
/// re-normalizing it per listing. Individual results are identical to
/// [`build_facet_index`].
pub struct IndexBuilder {
    config: Config,
    hours_memo: HoursMemo,
}

impl IndexBuilder {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let hours_memo = HoursMemo::new(config.builder.hours_memo_capacity);
        Self { config, hours_memo }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Index one listing, reusing memoized hours where possible.
    #[must_use]
    pub fn build(&self, listing: &RawListing) -> FacetIndex {
        assemble(listing, &self.config, self.hours_memo.parse(&listing.hours))
    }

    /// Index a batch of listings in parallel, keyed by listing id.
    /// Listings sharing an id collapse to a single entry.
    #[must_use]
    pub fn build_all(&self, listings: &[RawListing]) -> HashMap<ListingId, FacetIndex> {
        let indexes: HashMap<ListingId, FacetIndex> = listings
            .par_iter()
            .map(|listing| (listing.id.clone(), self.build(listing)))
            .collect();
        debug!(
            target: "index",
            listings = listings.len(),
            indexed = indexes.len(),
            memoized_schedules = self.hours_memo.len(),
            "batch index build complete"
        );
        indexes
    }
}

fn assemble(listing: &RawListing, config: &Config, parsed_hours: WeeklyHours) -> FacetIndex {
    if !listing.hours.is_empty() && parsed_hours.is_empty() {
        debug!(
            target: "index",
            listing = %listing.id,
            periods = listing.hours.len(),
            "no usable open periods; open-now will be indeterminate"
        );
    }

    FacetIndex {
        amenities: amenity_flags(listing),
        nearby: nearby_flags(listing),
        price_bucket: parse_price_to_bucket(
            listing.price_text.as_deref().unwrap_or(""),
            &config.price,
        ),
        rating_buckets: bucketize_rating(listing.rating),
        review_count_buckets: bucketize_review_count(listing.review_count),
        dine_options: dine_option_flags(listing, config),
        standout_tags: extract_standout_tags(&free_text(listing)),
        neighborhood: listing
            .neighborhood
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        parsed_hours,
        timezone: parse_timezone(listing),
    }
}

/// Full amenity grid; labels the taxonomy does not know are skipped.
fn amenity_flags(listing: &RawListing) -> BTreeMap<AmenityKey, bool> {
    let mut flags: BTreeMap<AmenityKey, bool> =
        AmenityKey::all().iter().map(|key| (*key, false)).collect();
    for label in &listing.amenity_labels {
        if let Some(key) = AmenityKey::from_label(label) {
            flags.insert(key, true);
        }
    }
    flags
}

/// Full dine-option grid from the feed's transaction tags.
fn dine_option_flags(listing: &RawListing, config: &Config) -> BTreeMap<DineOptionKey, bool> {
    let mut flags: BTreeMap<DineOptionKey, bool> = DineOptionKey::all()
        .iter()
        .map(|key| (*key, false))
        .collect();
    for tag in &listing.transactions {
        if let Some(key) = DineOptionKey::from_transaction(tag) {
            flags.insert(key, true);
        }
    }
    // Listings with no transaction data at all are table-service
    // restaurants in this directory, not ghost kitchens.
    if config.builder.assume_dine_in && listing.transactions.is_empty() {
        flags.insert(DineOptionKey::DineIn, true);
    }
    flags
}

/// Full category × distance grid. A flag is true when at least one place
/// of the category lies within the bucket; cumulativity comes from
/// bucketizing the closest qualifying place.
fn nearby_flags(
    listing: &RawListing,
) -> BTreeMap<NearbyCategoryKey, BTreeMap<DistanceBucket, bool>> {
    let mut closest: BTreeMap<NearbyCategoryKey, f64> = BTreeMap::new();
    for place in &listing.nearby_places {
        let Some(category) = NearbyCategoryKey::from_label(&place.category) else {
            continue;
        };
        if !place.distance_miles.is_finite() || place.distance_miles < 0.0 {
            continue;
        }
        closest
            .entry(category)
            .and_modify(|distance| *distance = distance.min(place.distance_miles))
            .or_insert(place.distance_miles);
    }

    NearbyCategoryKey::all()
        .iter()
        .map(|category| {
            let buckets = closest
                .get(category)
                .copied()
                .map(bucketize_distance_miles)
                .unwrap_or_default();
            let grid = DistanceBucket::all()
                .iter()
                .map(|bucket| (*bucket, buckets.satisfies(*bucket)))
                .collect();
            (*category, grid)
        })
        .collect()
}

fn free_text(listing: &RawListing) -> String {
    let mut text = String::new();
    if let Some(description) = &listing.description {
        text.push_str(description);
        text.push('\n');
    }
    for excerpt in &listing.review_excerpts {
        text.push_str(excerpt);
        text.push('\n');
    }
    text
}

fn parse_timezone(listing: &RawListing) -> Option<Tz> {
    let raw = listing.timezone.as_deref()?;
    match raw.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            debug!(
                target: "index",
                listing = %listing.id,
                timezone = %raw,
                "unrecognized timezone; open-now will be indeterminate"
            );
            None
        }
    }
}
