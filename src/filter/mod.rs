//! Filter state, evaluation, and the query-param codec.
//!
//! [`ActiveFilterState`] is the one request-scoped mutable structure in
//! the engine: the set of selections a visitor has made. The evaluator
//! matches it against a scope's indexes; the codec round-trips it through
//! the flat parameter map a URL query string decodes to.

mod codec;
mod evaluate;

pub use codec::{from_query_string, parse_filter_params, serialize_filter_params, to_query_string};
pub use evaluate::evaluate;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::taxonomy::{
    AmenityKey, DineOptionKey, DistanceBucket, NearbyCategoryKey, PriceBucket, RatingBucket,
    ReviewCountBucket, StandoutTagKey,
};

/// The visitor's current filter selection.
///
/// Set-valued categories compose differently during evaluation: within
/// neighborhoods and price the selections are alternatives (OR), within
/// every other set each selection is a requirement (AND). Rating and
/// review count are single minimum thresholds, not sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFilterState {
    pub amenities: BTreeSet<AmenityKey>,
    /// Required (category, ring) pairs, e.g. "a hotel within a quarter mile".
    pub nearby: BTreeSet<(NearbyCategoryKey, DistanceBucket)>,
    /// Acceptable neighborhoods; matching ignores case.
    pub neighborhoods: BTreeSet<String>,
    /// Acceptable price buckets.
    pub price_buckets: BTreeSet<PriceBucket>,
    pub min_rating: Option<RatingBucket>,
    pub min_review_count: Option<ReviewCountBucket>,
    pub dine_options: BTreeSet<DineOptionKey>,
    pub standout_tags: BTreeSet<StandoutTagKey>,
    pub open_now: bool,
}

impl ActiveFilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No selections at all. The evaluator returns every candidate
    /// unchanged for an empty state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amenities.is_empty()
            && self.nearby.is_empty()
            && self.neighborhoods.is_empty()
            && self.price_buckets.is_empty()
            && self.min_rating.is_none()
            && self.min_review_count.is_none()
            && self.dine_options.is_empty()
            && self.standout_tags.is_empty()
            && !self.open_now
    }

    #[must_use]
    pub fn with_amenity(mut self, key: AmenityKey) -> Self {
        self.amenities.insert(key);
        self
    }

    #[must_use]
    pub fn with_nearby(mut self, category: NearbyCategoryKey, bucket: DistanceBucket) -> Self {
        self.nearby.insert((category, bucket));
        self
    }

    #[must_use]
    pub fn with_neighborhood(mut self, neighborhood: impl Into<String>) -> Self {
        self.neighborhoods.insert(neighborhood.into());
        self
    }

    #[must_use]
    pub fn with_price(mut self, bucket: PriceBucket) -> Self {
        self.price_buckets.insert(bucket);
        self
    }

    #[must_use]
    pub fn with_min_rating(mut self, bucket: RatingBucket) -> Self {
        self.min_rating = Some(bucket);
        self
    }

    #[must_use]
    pub fn with_min_review_count(mut self, bucket: ReviewCountBucket) -> Self {
        self.min_review_count = Some(bucket);
        self
    }

    #[must_use]
    pub fn with_dine_option(mut self, key: DineOptionKey) -> Self {
        self.dine_options.insert(key);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: StandoutTagKey) -> Self {
        self.standout_tags.insert(tag);
        self
    }

    #[must_use]
    pub fn with_open_now(mut self) -> Self {
        self.open_now = true;
        self
    }
}
