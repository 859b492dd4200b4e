//! Facet count aggregation over the shared strip fixture, and the JSON
//! shape chip badges consume.

use std::sync::Arc;

use dinescope::aggregate::{AggregateCache, aggregate_facets};
use dinescope::config::AggregationConfig;
use dinescope::taxonomy::{
    AmenityKey, DineOptionKey, DistanceBucket, NearbyCategoryKey, PriceBucket, RatingBucket,
    ReviewCountBucket, StandoutTagKey,
};
use dinescope::test_utils::fixtures::{index_scope, strip_scope};
use dinescope::test_utils::{TestCase, run_table_tests};

#[test]
fn headline_counts_cover_the_whole_scope() {
    let agg = aggregate_facets(&index_scope(&strip_scope()));

    assert_eq!(agg.total_listings, 6);
    // Starlite has no hours and Esquina has no timezone.
    assert_eq!(agg.listings_with_hours, 4);
}

#[test]
fn amenity_counts_include_explicit_zeros() {
    let agg = aggregate_facets(&index_scope(&strip_scope()));

    assert_eq!(agg.amenities[&AmenityKey::Wifi], 2);
    assert_eq!(agg.amenities[&AmenityKey::Parking], 1);
    assert_eq!(agg.amenities[&AmenityKey::AcceptsCreditCards], 2);
    assert_eq!(agg.amenities[&AmenityKey::WheelchairAccessible], 1);
    assert_eq!(agg.amenities[&AmenityKey::KidFriendly], 1);
    assert_eq!(agg.amenities[&AmenityKey::ServesAlcohol], 1);

    // Unrepresented keys are still present, counted at zero.
    assert_eq!(agg.amenities[&AmenityKey::OutdoorSeating], 0);
    assert_eq!(agg.amenities[&AmenityKey::GoodForGroups], 0);
}

#[test]
fn price_tiers_partition_and_numeric_buckets_accumulate() {
    let agg = aggregate_facets(&index_scope(&strip_scope()));

    assert_eq!(agg.price[&PriceBucket::Budget], 2);
    assert_eq!(agg.price[&PriceBucket::Moderate], 1);
    assert_eq!(agg.price[&PriceBucket::Upscale], 2);
    assert_eq!(agg.price[&PriceBucket::Unknown], 1);
    let partition: u64 = agg.price.values().sum();
    assert_eq!(partition, agg.total_listings);

    // Cumulative families shrink as the threshold climbs.
    assert_eq!(agg.ratings[&RatingBucket::ThreeHalfPlus], 5);
    assert_eq!(agg.ratings[&RatingBucket::FourPlus], 5);
    assert_eq!(agg.ratings[&RatingBucket::FourHalfPlus], 3);
    assert_eq!(agg.review_counts[&ReviewCountBucket::HundredPlus], 5);
    assert_eq!(agg.review_counts[&ReviewCountBucket::FiveHundredPlus], 4);
    assert_eq!(agg.review_counts[&ReviewCountBucket::ThousandPlus], 2);
}

#[test]
fn dine_option_counts_reflect_the_assumption_rules() {
    let agg = aggregate_facets(&index_scope(&strip_scope()));

    // Jade assumed, Ember explicit; Bacchanal's transaction list names
    // only reservations, so it does not count toward dine-in.
    assert_eq!(agg.dine_options[&DineOptionKey::DineIn], 2);
    assert_eq!(agg.dine_options[&DineOptionKey::Takeout], 3);
    assert_eq!(agg.dine_options[&DineOptionKey::Delivery], 1);
    assert_eq!(agg.dine_options[&DineOptionKey::Reservations], 2);
}

#[test]
fn nearby_rings_count_cumulatively() {
    let agg = aggregate_facets(&index_scope(&strip_scope()));

    let casino = &agg.nearby[&NearbyCategoryKey::Casino];
    assert_eq!(casino[&DistanceBucket::QuarterMile], 1);
    assert_eq!(casino[&DistanceBucket::HalfMile], 1);
    assert_eq!(casino[&DistanceBucket::OneMile], 1);

    // Jade's park sits at 0.3 miles, past the quarter-mile ring.
    let park = &agg.nearby[&NearbyCategoryKey::Park];
    assert_eq!(park[&DistanceBucket::QuarterMile], 0);
    assert_eq!(park[&DistanceBucket::HalfMile], 1);
    assert_eq!(park[&DistanceBucket::OneMile], 1);

    let theater = &agg.nearby[&NearbyCategoryKey::MovieTheater];
    assert!(theater.values().all(|count| *count == 0));
}

#[test]
fn standout_tag_counts_across_the_fixture() -> Result<(), String> {
    let agg = aggregate_facets(&index_scope(&strip_scope()));

    let cases = vec![
        TestCase {
            name: "good value",
            input: StandoutTagKey::GoodValue,
            expected: 3,
        },
        TestCase {
            name: "quick service",
            input: StandoutTagKey::QuickService,
            expected: 2,
        },
        TestCase {
            name: "fresh food",
            input: StandoutTagKey::FreshFood,
            expected: 2,
        },
        TestCase {
            name: "friendly staff",
            input: StandoutTagKey::FriendlyStaff,
            expected: 2,
        },
        TestCase {
            name: "clean",
            input: StandoutTagKey::Clean,
            expected: 1,
        },
        TestCase {
            name: "crab legs",
            input: StandoutTagKey::CrabLegs,
            expected: 1,
        },
        TestCase {
            name: "dessert selection",
            input: StandoutTagKey::DessertSelection,
            expected: 1,
        },
        TestCase {
            name: "large selection",
            input: StandoutTagKey::LargeSelection,
            expected: 1,
        },
    ];

    run_table_tests(cases, |tag| agg.standout_tags[&tag])?;
    Ok(())
}

#[test]
fn neighborhoods_rank_by_count_then_name() {
    let agg = aggregate_facets(&index_scope(&strip_scope()));

    assert_eq!(
        agg.neighborhoods_by_count(),
        vec![
            ("Chinatown", 2),
            ("Westside", 2),
            ("Downtown", 1),
            ("The Strip", 1),
        ]
    );
}

#[test]
fn serialized_counts_use_snake_case_keys() {
    let agg = aggregate_facets(&index_scope(&strip_scope()));
    let v = serde_json::to_value(&agg).expect("serializable counts");

    assert_eq!(v["total_listings"], 6);
    assert_eq!(v["listings_with_hours"], 4);
    assert_eq!(v["amenities"]["wifi"], 2);
    assert_eq!(v["amenities"]["accepts_credit_cards"], 2);
    assert_eq!(v["price"]["budget"], 2);
    assert_eq!(v["ratings"]["four_half_plus"], 3);
    assert_eq!(v["review_counts"]["thousand_plus"], 2);
    assert_eq!(v["dine_options"]["takeout"], 3);
    assert_eq!(v["nearby"]["casino"]["quarter_mile"], 1);
    assert_eq!(v["standout_tags"]["good_value"], 3);
    assert_eq!(v["neighborhoods"]["Chinatown"], 2);
}

#[test]
fn cache_hands_out_the_same_snapshot_until_cleared() {
    let cache = AggregateCache::new(&AggregationConfig {
        ttl_seconds: 3600,
        max_scopes: 8,
    });
    let indexes = index_scope(&strip_scope());

    let first = cache.facets_for("strip", &indexes);
    let second = cache.facets_for("strip", &indexes);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.stats().hits, 1);
    assert_eq!(cache.stats().misses, 1);

    cache.clear();
    let third = cache.facets_for("strip", &indexes);
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(third.total_listings, first.total_listings);
    assert_eq!(cache.stats().misses, 2);
}
