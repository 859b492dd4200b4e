//! Filter evaluation over a scope's facet indexes.
//!
//! Composition is a single top-level AND across per-category checks.
//! Within neighborhoods and price the selections OR together; within
//! every other category each selection must hold. Each check lives in
//! its own function so the asymmetry stays auditable category by
//! category.
//!
//! Missing data never passes a filter: a candidate without an index is
//! excluded outright, and an indeterminate open state counts as closed.

use std::collections::HashMap;

use chrono::Utc;
use tracing::trace;

use crate::index::FacetIndex;
use crate::listing::ListingId;
use crate::opennow::{self, OpenNowCache};

use super::ActiveFilterState;

/// Evaluate `state` against the candidates, preserving their order.
///
/// An empty state returns `all_listing_ids` unchanged. When the open-now
/// filter is active and both a scope id and a cache are supplied, the
/// scope's cached open set answers for every candidate; otherwise each
/// candidate's open state is computed against the current wall clock.
#[must_use]
pub fn evaluate(
    indexes: &HashMap<ListingId, FacetIndex>,
    all_listing_ids: &[ListingId],
    state: &ActiveFilterState,
    scope: Option<&str>,
    open_now_cache: Option<&OpenNowCache>,
) -> Vec<ListingId> {
    if state.is_empty() {
        return all_listing_ids.to_vec();
    }

    let now = Utc::now();
    let open_set = if state.open_now {
        scope.and_then(|scope| {
            open_now_cache.map(|cache| cache.open_set_at(scope, indexes, now))
        })
    } else {
        None
    };

    let mut matched = Vec::new();
    let mut missing_index = 0_usize;

    for id in all_listing_ids {
        let Some(index) = indexes.get(id) else {
            missing_index += 1;
            continue;
        };
        let open_ok = !state.open_now
            || match &open_set {
                Some(set) => set.contains(id),
                None => opennow::open_state(index, now).is_open(),
            };
        if open_ok && matches_facets(index, state) {
            matched.push(id.clone());
        }
    }

    trace!(
        target: "filter",
        candidates = all_listing_ids.len(),
        matched = matched.len(),
        missing_index,
        cached_open_set = open_set.is_some(),
        "evaluated filter state"
    );

    matched
}

/// AND across the per-category checks. Open-now is handled by the caller
/// so the cached set is resolved once per call, not once per listing.
fn matches_facets(index: &FacetIndex, state: &ActiveFilterState) -> bool {
    amenities_match(index, state)
        && nearby_match(index, state)
        && neighborhood_matches(index, state)
        && price_matches(index, state)
        && rating_matches(index, state)
        && review_count_matches(index, state)
        && dine_options_match(index, state)
        && tags_match(index, state)
}

/// Every selected amenity must be present.
fn amenities_match(index: &FacetIndex, state: &ActiveFilterState) -> bool {
    state.amenities.iter().all(|key| index.has_amenity(*key))
}

/// Every selected (category, ring) pair must be satisfied.
fn nearby_match(index: &FacetIndex, state: &ActiveFilterState) -> bool {
    state
        .nearby
        .iter()
        .all(|(category, bucket)| index.nearby_within(*category, *bucket))
}

/// Any one of the selected neighborhoods will do; comparison ignores
/// ASCII case so "chinatown" in a link matches "Chinatown" in the index.
fn neighborhood_matches(index: &FacetIndex, state: &ActiveFilterState) -> bool {
    if state.neighborhoods.is_empty() {
        return true;
    }
    let Some(hood) = &index.neighborhood else {
        return false;
    };
    state
        .neighborhoods
        .iter()
        .any(|selected| selected.eq_ignore_ascii_case(hood))
}

/// Any one of the selected price buckets will do.
fn price_matches(index: &FacetIndex, state: &ActiveFilterState) -> bool {
    state.price_buckets.is_empty() || state.price_buckets.contains(&index.price_bucket)
}

fn rating_matches(index: &FacetIndex, state: &ActiveFilterState) -> bool {
    state
        .min_rating
        .is_none_or(|bucket| index.rating_buckets.satisfies(bucket))
}

fn review_count_matches(index: &FacetIndex, state: &ActiveFilterState) -> bool {
    state
        .min_review_count
        .is_none_or(|bucket| index.review_count_buckets.satisfies(bucket))
}

/// Every selected dine option must be offered.
fn dine_options_match(index: &FacetIndex, state: &ActiveFilterState) -> bool {
    state.dine_options.iter().all(|key| index.offers(*key))
}

/// Every selected tag must be carried.
fn tags_match(index: &FacetIndex, state: &ActiveFilterState) -> bool {
    state.standout_tags.iter().all(|tag| index.has_tag(*tag))
}
