//! E2E Scenario: Shareable Links
//!
//! Filter selections travel between visitors as query strings. Covers:
//! - Pasting a link and landing on the filtered directory
//! - Serializing the current selection back into a canonical link
//! - Tracking params and hand edits that must not corrupt the state
//! - Link stability regardless of the order chips were clicked
//! - Links that carry the open-now chip

use chrono::{DateTime, Utc};
use dinescope::config::OpenNowConfig;
use dinescope::filter::{
    ActiveFilterState, evaluate, from_query_string, to_query_string,
};
use dinescope::listing::ListingId;
use dinescope::opennow::OpenNowCache;
use dinescope::taxonomy::{
    AmenityKey, DistanceBucket, NearbyCategoryKey, PriceBucket, RatingBucket, ReviewCountBucket,
    StandoutTagKey,
};
use dinescope::test_utils::fixtures::{index_scope, listing_ids, strip_scope};

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn ids(expected: &[&str]) -> Vec<ListingId> {
    expected.iter().map(|id| (*id).to_string()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// A pasted link reconstructs the selection and filters the directory.
#[test]
fn test_pasted_link_filters_the_directory() {
    let listings = strip_scope();
    let indexes = index_scope(&listings);
    let candidates = listing_ids(&listings);

    let state = from_query_string("?amenities=wifi&price=%24");
    assert!(state.amenities.contains(&AmenityKey::Wifi));
    assert!(state.price_buckets.contains(&PriceBucket::Budget));
    assert_eq!(evaluate(&indexes, &candidates, &state, None, None), ids(&["wok"]));
}

/// Serializing a selection and reopening the link lands on the same state
/// and the same results.
#[test]
fn test_links_round_trip_without_drift() {
    let listings = strip_scope();
    let indexes = index_scope(&listings);
    let candidates = listing_ids(&listings);

    let selection = ActiveFilterState::new()
        .with_amenity(AmenityKey::AcceptsCreditCards)
        .with_nearby(NearbyCategoryKey::Casino, DistanceBucket::HalfMile)
        .with_neighborhood("The Strip")
        .with_price(PriceBucket::Upscale)
        .with_min_rating(RatingBucket::FourPlus)
        .with_min_review_count(ReviewCountBucket::ThousandPlus)
        .with_tag(StandoutTagKey::CrabLegs);

    let link = to_query_string(&selection);
    let reopened = from_query_string(&link);
    assert_eq!(reopened, selection);
    assert_eq!(
        evaluate(&indexes, &candidates, &reopened, None, None),
        evaluate(&indexes, &candidates, &selection, None, None)
    );
    assert_eq!(
        evaluate(&indexes, &candidates, &reopened, None, None),
        ids(&["bacchanal"])
    );
}

/// Tracking params ride along in real links; re-serializing sheds them.
#[test]
fn test_tracking_params_do_not_change_results() {
    let listings = strip_scope();
    let indexes = index_scope(&listings);
    let candidates = listing_ids(&listings);

    let clean = from_query_string("?amenities=wifi&price=%24");
    let noisy = from_query_string("?utm_source=newsletter&amenities=wifi&price=%24&page=3");
    assert_eq!(noisy, clean);
    assert_eq!(
        evaluate(&indexes, &candidates, &noisy, None, None),
        evaluate(&indexes, &candidates, &clean, None, None)
    );
    assert_eq!(to_query_string(&noisy), "amenities=wifi&price=%24");
}

/// The link does not depend on the order chips were clicked.
#[test]
fn test_click_order_never_changes_the_link() {
    let first = ActiveFilterState::new()
        .with_amenity(AmenityKey::Wifi)
        .with_amenity(AmenityKey::Parking)
        .with_price(PriceBucket::Budget)
        .with_price(PriceBucket::Moderate)
        .with_neighborhood("Chinatown")
        .with_neighborhood("Green Valley, The");
    let second = ActiveFilterState::new()
        .with_neighborhood("Green Valley, The")
        .with_price(PriceBucket::Moderate)
        .with_amenity(AmenityKey::Parking)
        .with_neighborhood("Chinatown")
        .with_price(PriceBucket::Budget)
        .with_amenity(AmenityKey::Wifi);

    assert_eq!(to_query_string(&first), to_query_string(&second));
    assert_eq!(from_query_string(&to_query_string(&first)), first);
}

/// A hand-edited link with sloppy casing still applies, open-now included.
#[test]
fn test_hand_edited_link_with_open_now() {
    let listings = strip_scope();
    let indexes = index_scope(&listings);
    let candidates = listing_ids(&listings);

    let cache = OpenNowCache::new(&OpenNowConfig {
        ttl_seconds: 3600,
        max_scopes: 8,
    });
    // Monday noon in Las Vegas, pinned so the link reads the snapshot.
    let noon = DateTime::parse_from_rfc3339("2024-06-03T19:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc);
    cache.open_set_at("the-strip", &indexes, noon);

    let state = from_query_string("?price=%24%2C%24%24&rating=4&open=YES");
    assert!(state.open_now);
    assert_eq!(
        evaluate(&indexes, &candidates, &state, Some("the-strip"), Some(&cache)),
        ids(&["wok"])
    );
}
