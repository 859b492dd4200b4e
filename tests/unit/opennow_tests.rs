//! Open-now evaluation and the per-scope snapshot cache.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use dinescope::config::OpenNowConfig;
use dinescope::index::FacetIndex;
use dinescope::listing::ListingId;
use dinescope::opennow::{OpenNowCache, OpenState, compute_open_set, open_state};
use dinescope::test_utils::fixtures::{index_scope, strip_scope};
use dinescope::test_utils::{TestCase, run_table_tests};

fn scope() -> HashMap<ListingId, FacetIndex> {
    index_scope(&strip_scope())
}

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

fn open_ids(set: &HashSet<ListingId>) -> Vec<&str> {
    let mut ids: Vec<&str> = set.iter().map(String::as_str).collect();
    ids.sort_unstable();
    ids
}

#[test]
fn weekday_noon_on_the_strip() -> Result<(), String> {
    let indexes = scope();
    // Monday 2024-06-03, 12:00 PDT.
    let noon = at("2024-06-03T19:00:00Z");

    let cases = vec![
        TestCase {
            name: "all-day buffet is open",
            input: "bacchanal",
            expected: OpenState::Open,
        },
        TestCase {
            name: "lunch counter is open",
            input: "wok",
            expected: OpenState::Open,
        },
        TestCase {
            name: "dinner steakhouse has not opened",
            input: "ember",
            expected: OpenState::Closed,
        },
        TestCase {
            name: "weekend-only spot is closed on monday",
            input: "jade",
            expected: OpenState::Closed,
        },
        TestCase {
            name: "no hours at all",
            input: "starlite",
            expected: OpenState::Unknown,
        },
        TestCase {
            name: "hours but no timezone",
            input: "esquina",
            expected: OpenState::Unknown,
        },
    ];

    run_table_tests(cases, |id| {
        let index = indexes.get(id).expect("fixture listing");
        open_state(index, noon)
    })?;
    Ok(())
}

#[test]
fn doors_follow_half_open_boundaries() -> Result<(), String> {
    let indexes = scope();

    // Bacchanal runs 0900-2200 Pacific every day.
    let cases = vec![
        TestCase {
            name: "one minute before opening",
            input: "2024-06-03T15:59:00Z",
            expected: OpenState::Closed,
        },
        TestCase {
            name: "opening minute",
            input: "2024-06-03T16:00:00Z",
            expected: OpenState::Open,
        },
        TestCase {
            name: "last minute of service",
            input: "2024-06-04T04:59:00Z",
            expected: OpenState::Open,
        },
        TestCase {
            name: "closing minute",
            input: "2024-06-04T05:00:00Z",
            expected: OpenState::Closed,
        },
        TestCase {
            name: "winter opening minute under PST",
            input: "2024-01-15T17:00:00Z",
            expected: OpenState::Open,
        },
    ];

    run_table_tests(cases, |timestamp| {
        let index = indexes.get("bacchanal").expect("fixture listing");
        open_state(index, at(timestamp))
    })?;
    Ok(())
}

#[test]
fn overnight_service_spills_past_midnight() -> Result<(), String> {
    let indexes = scope();

    // Jade Garden: Friday 1700-2300, Saturday 1700 through 0100 Sunday.
    let cases = vec![
        TestCase {
            name: "friday evening",
            input: "2024-06-08T00:30:00Z",
            expected: OpenState::Open,
        },
        TestCase {
            name: "saturday before opening",
            input: "2024-06-08T23:59:00Z",
            expected: OpenState::Closed,
        },
        TestCase {
            name: "half past midnight sunday",
            input: "2024-06-09T07:30:00Z",
            expected: OpenState::Open,
        },
        TestCase {
            name: "after the overnight close",
            input: "2024-06-09T08:30:00Z",
            expected: OpenState::Closed,
        },
    ];

    run_table_tests(cases, |timestamp| {
        let index = indexes.get("jade").expect("fixture listing");
        open_state(index, at(timestamp))
    })?;
    Ok(())
}

#[test]
fn unknown_never_reads_as_open() {
    assert!(OpenState::Open.is_open());
    assert!(!OpenState::Closed.is_open());
    assert!(!OpenState::Unknown.is_open());
}

#[test]
fn open_set_matches_the_individual_states() {
    let indexes = scope();
    let noon = at("2024-06-03T19:00:00Z");

    let set = compute_open_set(&indexes, noon);
    assert_eq!(open_ids(&set), ["bacchanal", "wok"]);
}

#[test]
fn snapshot_is_shared_within_the_ttl() {
    let indexes = scope();
    let cache = OpenNowCache::new(&OpenNowConfig {
        ttl_seconds: 60,
        max_scopes: 8,
    });

    let noon = at("2024-06-03T19:00:00Z");
    let first = cache.open_set_at("strip", &indexes, noon);
    assert_eq!(open_ids(&first), ["bacchanal", "wok"]);

    // Four in the afternoon, when the steakhouse would also be open. The
    // cached snapshot still answers, stale by contract.
    let afternoon = at("2024-06-03T23:00:00Z");
    let second = cache.open_set_at("strip", &indexes, afternoon);
    assert_eq!(open_ids(&second), ["bacchanal", "wok"]);

    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[test]
fn zero_ttl_recomputes_every_time() {
    let indexes = scope();
    let cache = OpenNowCache::new(&OpenNowConfig {
        ttl_seconds: 0,
        max_scopes: 8,
    });

    let noon = at("2024-06-03T19:00:00Z");
    let afternoon = at("2024-06-03T23:00:00Z");

    let at_noon = cache.open_set_at("strip", &indexes, noon);
    assert_eq!(open_ids(&at_noon), ["bacchanal", "wok"]);

    let later = cache.open_set_at("strip", &indexes, afternoon);
    assert_eq!(open_ids(&later), ["bacchanal", "ember", "wok"]);

    let stats = cache.stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 0);
}

#[test]
fn clear_forces_a_fresh_snapshot() {
    let indexes = scope();
    let cache = OpenNowCache::new(&OpenNowConfig {
        ttl_seconds: 60,
        max_scopes: 8,
    });

    let noon = at("2024-06-03T19:00:00Z");
    let _ = cache.open_set_at("strip", &indexes, noon);
    cache.clear();

    let afternoon = at("2024-06-03T23:00:00Z");
    let refreshed = cache.open_set_at("strip", &indexes, afternoon);
    assert_eq!(open_ids(&refreshed), ["bacchanal", "ember", "wok"]);
}
