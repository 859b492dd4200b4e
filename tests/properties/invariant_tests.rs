use std::collections::HashMap;

use proptest::prelude::*;

use dinescope::aggregate::aggregate_facets;
use dinescope::config::Config;
use dinescope::filter::{ActiveFilterState, evaluate};
use dinescope::index::{FacetIndex, build_facet_index};
use dinescope::listing::{ListingId, RawListing};
use dinescope::taxonomy::{
    DistanceBucket, RatingBucket, ReviewCountBucket, bucketize_distance_miles, bucketize_rating,
    bucketize_review_count,
};
use dinescope::test_utils::fixtures::{index_scope, listing_ids, strip_scope};

use crate::strategies::{arb_amenity, arb_filter_state, arb_raw_listing};

fn indexed(listings: &[RawListing]) -> HashMap<ListingId, FacetIndex> {
    let config = Config::default();
    listings
        .iter()
        .map(|listing| (listing.id.clone(), build_facet_index(listing, &config)))
        .collect()
}

proptest! {
    // =========================================================================
    // Cumulative Bucket Invariants
    // =========================================================================

    #[test]
    fn test_rating_buckets_imply_looser_thresholds(rating in prop::option::of(any::<f64>())) {
        let buckets = bucketize_rating(rating);
        prop_assert!(!buckets.four_half_plus || buckets.four_plus);
        prop_assert!(!buckets.four_plus || buckets.three_half_plus);
    }

    #[test]
    fn test_review_buckets_imply_looser_thresholds(count in prop::option::of(any::<u64>())) {
        let buckets = bucketize_review_count(count);
        prop_assert!(!buckets.thousand_plus || buckets.five_hundred_plus);
        prop_assert!(!buckets.five_hundred_plus || buckets.hundred_plus);
    }

    #[test]
    fn test_distance_rings_nest_outward(miles in any::<f64>()) {
        let buckets = bucketize_distance_miles(miles);
        prop_assert!(!buckets.quarter_mile || buckets.half_mile);
        prop_assert!(!buckets.half_mile || buckets.one_mile);
    }

    // =========================================================================
    // Evaluation Invariants
    // =========================================================================

    #[test]
    fn test_empty_state_echoes_any_candidate_list(
        ids in prop::collection::vec("[a-z]{1,8}", 0..12)
    ) {
        let indexes = index_scope(&strip_scope());
        let result = evaluate(&indexes, &ids, &ActiveFilterState::new(), None, None);
        prop_assert_eq!(result, ids);
    }

    #[test]
    fn test_results_are_a_subsequence_of_the_candidates(mut state in arb_filter_state()) {
        // Open-now consults the wall clock; pinned off to keep runs stable.
        state.open_now = false;
        let listings = strip_scope();
        let indexes = index_scope(&listings);
        let ids = listing_ids(&listings);

        let result = evaluate(&indexes, &ids, &state, None, None);
        let mut cursor = ids.iter();
        for id in &result {
            prop_assert!(cursor.any(|candidate| candidate == id));
        }
    }

    #[test]
    fn test_adding_an_amenity_never_grows_the_result(
        mut state in arb_filter_state(),
        extra in arb_amenity(),
    ) {
        state.open_now = false;
        let listings = strip_scope();
        let indexes = index_scope(&listings);
        let ids = listing_ids(&listings);

        let base = evaluate(&indexes, &ids, &state, None, None);
        let narrowed = evaluate(&indexes, &ids, &state.with_amenity(extra), None, None);
        prop_assert!(narrowed.iter().all(|id| base.contains(id)));
    }

    // =========================================================================
    // Aggregation Invariants
    // =========================================================================

    #[test]
    fn test_no_count_exceeds_the_scope_size(
        listings in prop::collection::vec(arb_raw_listing(), 0..8)
    ) {
        let indexes = indexed(&listings);
        let agg = aggregate_facets(&indexes);

        prop_assert_eq!(agg.total_listings, indexes.len() as u64);
        prop_assert!(agg.listings_with_hours <= agg.total_listings);
        for count in agg.amenities.values() {
            prop_assert!(*count <= agg.total_listings);
        }
        for count in agg.dine_options.values() {
            prop_assert!(*count <= agg.total_listings);
        }
        for count in agg.standout_tags.values() {
            prop_assert!(*count <= agg.total_listings);
        }
        for count in agg.neighborhoods.values() {
            prop_assert!(*count <= agg.total_listings);
        }
        for grid in agg.nearby.values() {
            for count in grid.values() {
                prop_assert!(*count <= agg.total_listings);
            }
        }
    }

    #[test]
    fn test_price_tiers_partition_any_scope(
        listings in prop::collection::vec(arb_raw_listing(), 0..8)
    ) {
        let agg = aggregate_facets(&indexed(&listings));
        let sum: u64 = agg.price.values().sum();
        prop_assert_eq!(sum, agg.total_listings);
    }

    #[test]
    fn test_aggregated_thresholds_stay_monotone(
        listings in prop::collection::vec(arb_raw_listing(), 0..8)
    ) {
        let agg = aggregate_facets(&indexed(&listings));

        prop_assert!(
            agg.ratings[&RatingBucket::FourHalfPlus] <= agg.ratings[&RatingBucket::FourPlus]
        );
        prop_assert!(
            agg.ratings[&RatingBucket::FourPlus] <= agg.ratings[&RatingBucket::ThreeHalfPlus]
        );
        prop_assert!(
            agg.review_counts[&ReviewCountBucket::ThousandPlus]
                <= agg.review_counts[&ReviewCountBucket::FiveHundredPlus]
        );
        prop_assert!(
            agg.review_counts[&ReviewCountBucket::FiveHundredPlus]
                <= agg.review_counts[&ReviewCountBucket::HundredPlus]
        );
        for grid in agg.nearby.values() {
            prop_assert!(grid[&DistanceBucket::QuarterMile] <= grid[&DistanceBucket::HalfMile]);
            prop_assert!(grid[&DistanceBucket::HalfMile] <= grid[&DistanceBucket::OneMile]);
        }
    }

    // =========================================================================
    // Builder Determinism
    // =========================================================================

    #[test]
    fn test_index_building_is_deterministic(listing in arb_raw_listing()) {
        let config = Config::default();
        prop_assert_eq!(
            build_facet_index(&listing, &config),
            build_facet_index(&listing, &config)
        );
    }
}
