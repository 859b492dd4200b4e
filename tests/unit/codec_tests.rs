//! Shareable-link encoding and decoding through the public codec.

use dinescope::filter::{
    ActiveFilterState, from_query_string, parse_filter_params, serialize_filter_params,
    to_query_string,
};
use dinescope::taxonomy::{
    AmenityKey, DineOptionKey, DistanceBucket, NearbyCategoryKey, PriceBucket, RatingBucket,
    ReviewCountBucket,
};
use dinescope::test_utils::{TestCase, run_table_tests};

#[test]
fn canonical_link_for_a_typical_chip_selection() {
    let state = ActiveFilterState::new()
        .with_amenity(AmenityKey::Wifi)
        .with_neighborhood("Green Valley, The")
        .with_price(PriceBucket::Budget)
        .with_open_now();

    // Keys sort alphabetically; the hood name is encoded inside the list
    // and then once more as a query value.
    assert_eq!(
        to_query_string(&state),
        "amenities=wifi&hoods=Green%2520Valley%252C%2520The&open=1&price=%24"
    );
}

#[test]
fn links_round_trip_via_each_form() {
    let state = ActiveFilterState::new()
        .with_nearby(NearbyCategoryKey::Casino, DistanceBucket::OneMile)
        .with_nearby(NearbyCategoryKey::Hotel, DistanceBucket::QuarterMile)
        .with_dine_option(DineOptionKey::Reservations)
        .with_min_review_count(ReviewCountBucket::HundredPlus)
        .with_neighborhood("Downtown");

    let map = serialize_filter_params(&state);
    assert_eq!(map["near"], "casino:1,hotel:0.25");
    assert_eq!(parse_filter_params(&map), state);

    let query = to_query_string(&state);
    assert_eq!(from_query_string(&query), state);
    assert_eq!(from_query_string(&format!("?{query}")), state);
}

#[test]
fn marketing_links_parse_like_the_app_wrote_them() {
    let state = from_query_string("?price=%24%2C%24%24&hoods=Chinatown&rating=3.5&open=1");

    assert_eq!(
        state.price_buckets,
        [PriceBucket::Budget, PriceBucket::Moderate]
            .into_iter()
            .collect()
    );
    assert_eq!(
        state.neighborhoods,
        ["Chinatown".to_string()].into_iter().collect()
    );
    assert_eq!(state.min_rating, Some(RatingBucket::ThreeHalfPlus));
    assert!(state.open_now);
}

#[test]
fn open_flag_accepts_a_few_spellings() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "numeric one",
            input: "open=1",
            expected: true,
        },
        TestCase {
            name: "uppercase true",
            input: "open=TRUE",
            expected: true,
        },
        TestCase {
            name: "yes",
            input: "open=yes",
            expected: true,
        },
        TestCase {
            name: "zero is off",
            input: "open=0",
            expected: false,
        },
        TestCase {
            name: "empty value is off",
            input: "open=",
            expected: false,
        },
        TestCase {
            name: "absent key is off",
            input: "",
            expected: false,
        },
    ];

    run_table_tests(cases, |input| from_query_string(input).open_now)?;
    Ok(())
}

#[test]
fn malformed_near_pairs_are_dropped() {
    let state = from_query_string("near=hotel:0.25,park,casino:ten");
    assert_eq!(
        state.nearby,
        [(NearbyCategoryKey::Hotel, DistanceBucket::QuarterMile)]
            .into_iter()
            .collect()
    );
}

#[test]
fn unknown_keys_slide_off() {
    let state = from_query_string("utm_campaign=summer&amenities=wifi&fbclid=abc123");
    assert_eq!(state.amenities, [AmenityKey::Wifi].into_iter().collect());
    assert!(state.nearby.is_empty());
    assert!(!state.open_now);
}
