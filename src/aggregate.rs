//! Per-scope facet aggregation.
//!
//! One pass over a scope's indexes produces the count of listings behind
//! every facet key, for the chip counts next to each filter option.
//! Closed-vocabulary facets are pre-seeded with every key so a zero count
//! is an explicit `0`, not an absent entry; neighborhoods are an open
//! vocabulary and carry only values that occur. Counts only change when
//! the scope's listing set does, so they cache well under a coarse TTL.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{CacheStats, TtlCache};
use crate::config::AggregationConfig;
use crate::index::FacetIndex;
use crate::listing::{ListingId, ScopeId};
use crate::taxonomy::{
    AmenityKey, DineOptionKey, DistanceBucket, NearbyCategoryKey, PriceBucket, RatingBucket,
    ReviewCountBucket, StandoutTagKey,
};

/// Facet counts for one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedFacets {
    /// Listings aggregated, the denominator for every other count.
    pub total_listings: u64,
    /// Listings whose index carries a usable schedule and timezone; the
    /// most an open-now filter could ever match here.
    pub listings_with_hours: u64,
    pub amenities: BTreeMap<AmenityKey, u64>,
    pub nearby: BTreeMap<NearbyCategoryKey, BTreeMap<DistanceBucket, u64>>,
    pub price: BTreeMap<PriceBucket, u64>,
    pub ratings: BTreeMap<RatingBucket, u64>,
    pub review_counts: BTreeMap<ReviewCountBucket, u64>,
    pub dine_options: BTreeMap<DineOptionKey, u64>,
    pub standout_tags: BTreeMap<StandoutTagKey, u64>,
    /// Verbatim neighborhood names as indexed.
    pub neighborhoods: BTreeMap<String, u64>,
}

impl AggregatedFacets {
    /// Zero counts across the full taxonomy.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_listings: 0,
            listings_with_hours: 0,
            amenities: AmenityKey::all().iter().map(|key| (*key, 0)).collect(),
            nearby: NearbyCategoryKey::all()
                .iter()
                .map(|category| {
                    let grid = DistanceBucket::all().iter().map(|b| (*b, 0)).collect();
                    (*category, grid)
                })
                .collect(),
            price: PriceBucket::all().iter().map(|key| (*key, 0)).collect(),
            ratings: RatingBucket::all().iter().map(|key| (*key, 0)).collect(),
            review_counts: ReviewCountBucket::all().iter().map(|key| (*key, 0)).collect(),
            dine_options: DineOptionKey::all().iter().map(|key| (*key, 0)).collect(),
            standout_tags: StandoutTagKey::all().iter().map(|key| (*key, 0)).collect(),
            neighborhoods: BTreeMap::new(),
        }
    }

    /// Neighborhoods ordered by count descending, ties alphabetical.
    #[must_use]
    pub fn neighborhoods_by_count(&self) -> Vec<(&str, u64)> {
        self.neighborhoods
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
            .collect()
    }
}

impl Default for AggregatedFacets {
    fn default() -> Self {
        Self::empty()
    }
}

/// Count facet memberships across one scope's indexes in a single pass.
/// An empty scope yields all-zero counts.
#[must_use]
pub fn aggregate_facets(indexes: &HashMap<ListingId, FacetIndex>) -> AggregatedFacets {
    let mut agg = AggregatedFacets::empty();

    for index in indexes.values() {
        agg.total_listings += 1;
        if index.has_hours() {
            agg.listings_with_hours += 1;
        }

        for (key, present) in &index.amenities {
            if *present {
                *agg.amenities.entry(*key).or_insert(0) += 1;
            }
        }
        for (category, grid) in &index.nearby {
            let counts = agg.nearby.entry(*category).or_default();
            for (bucket, within) in grid {
                if *within {
                    *counts.entry(*bucket).or_insert(0) += 1;
                }
            }
        }
        *agg.price.entry(index.price_bucket).or_insert(0) += 1;
        for bucket in RatingBucket::all() {
            if index.rating_buckets.satisfies(*bucket) {
                *agg.ratings.entry(*bucket).or_insert(0) += 1;
            }
        }
        for bucket in ReviewCountBucket::all() {
            if index.review_count_buckets.satisfies(*bucket) {
                *agg.review_counts.entry(*bucket).or_insert(0) += 1;
            }
        }
        for (key, offered) in &index.dine_options {
            if *offered {
                *agg.dine_options.entry(*key).or_insert(0) += 1;
            }
        }
        for tag in &index.standout_tags {
            *agg.standout_tags.entry(*tag).or_insert(0) += 1;
        }
        if let Some(hood) = &index.neighborhood {
            *agg.neighborhoods.entry(hood.clone()).or_insert(0) += 1;
        }
    }

    agg
}

/// Per-scope cache of aggregated counts.
pub struct AggregateCache {
    scopes: TtlCache<ScopeId, Arc<AggregatedFacets>>,
}

impl AggregateCache {
    #[must_use]
    pub fn new(config: &AggregationConfig) -> Self {
        Self {
            scopes: TtlCache::new(config.ttl(), config.max_scopes),
        }
    }

    /// Counts for `scope`, aggregating on a miss. A hit can lag listing
    /// churn by up to the TTL, which chip badges tolerate.
    pub fn facets_for(
        &self,
        scope: &str,
        indexes: &HashMap<ListingId, FacetIndex>,
    ) -> Arc<AggregatedFacets> {
        let key: ScopeId = scope.to_string();
        if let Some(facets) = self.scopes.get(&key) {
            return facets;
        }

        let facets = Arc::new(aggregate_facets(indexes));
        debug!(
            target: "aggregate",
            scope = %scope,
            listings = facets.total_listings,
            with_hours = facets.listings_with_hours,
            neighborhoods = facets.neighborhoods.len(),
            "aggregated facet counts"
        );
        self.scopes.insert(key, Arc::clone(&facets));
        facets
    }

    /// Drop every cached scope, forcing re-aggregation on next access.
    pub fn clear(&self) {
        self.scopes.clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.scopes.stats()
    }
}
