//! Bidirectional filter-state ↔ query-param codec.
//!
//! Decoding is tolerant: set-valued params are comma-separated token
//! lists, unrecognized tokens and keys are dropped silently, and nothing
//! here ever errors. Encoding is canonical: inactive filters omit their
//! key, tokens are sorted, and two semantically equal states always
//! produce the same map, so equal filters make equal shareable links.
//!
//! Neighborhood names are an open vocabulary and may contain commas, so
//! each name is percent-encoded inside the `hoods` list. Every other
//! value is a closed-vocabulary token that needs no escaping.

use std::collections::BTreeMap;

use itertools::Itertools;

use super::ActiveFilterState;
use crate::taxonomy::{
    AmenityKey, DineOptionKey, DistanceBucket, NearbyCategoryKey, PriceBucket, RatingBucket,
    ReviewCountBucket, StandoutTagKey,
};

const PARAM_AMENITIES: &str = "amenities";
const PARAM_NEARBY: &str = "near";
const PARAM_NEIGHBORHOODS: &str = "hoods";
const PARAM_PRICE: &str = "price";
const PARAM_RATING: &str = "rating";
const PARAM_REVIEWS: &str = "reviews";
const PARAM_DINE: &str = "dine";
const PARAM_TAGS: &str = "tags";
const PARAM_OPEN: &str = "open";

/// Decode a flat parameter map into a filter state.
#[must_use]
pub fn parse_filter_params(params: &BTreeMap<String, String>) -> ActiveFilterState {
    let mut state = ActiveFilterState::default();
    for (key, value) in params {
        match key.as_str() {
            PARAM_AMENITIES => {
                state.amenities = split_tokens(value)
                    .filter_map(AmenityKey::from_token)
                    .collect();
            }
            PARAM_NEARBY => {
                state.nearby = split_tokens(value).filter_map(parse_near_token).collect();
            }
            PARAM_NEIGHBORHOODS => {
                state.neighborhoods = split_tokens(value).filter_map(decode_hood).collect();
            }
            PARAM_PRICE => {
                state.price_buckets = split_tokens(value)
                    .filter_map(PriceBucket::from_token)
                    .collect();
            }
            PARAM_RATING => state.min_rating = RatingBucket::from_token(value),
            PARAM_REVIEWS => state.min_review_count = ReviewCountBucket::from_token(value),
            PARAM_DINE => {
                state.dine_options = split_tokens(value)
                    .filter_map(DineOptionKey::from_token)
                    .collect();
            }
            PARAM_TAGS => {
                state.standout_tags = split_tokens(value)
                    .filter_map(StandoutTagKey::from_token)
                    .collect();
            }
            PARAM_OPEN => state.open_now = parse_open_token(value),
            _ => {}
        }
    }
    state
}

/// Encode a filter state as its canonical parameter map.
#[must_use]
pub fn serialize_filter_params(state: &ActiveFilterState) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();

    if !state.amenities.is_empty() {
        let value = join_sorted(state.amenities.iter().map(|k| k.param_token().to_string()));
        params.insert(PARAM_AMENITIES.to_string(), value);
    }
    if !state.nearby.is_empty() {
        let value = join_sorted(state.nearby.iter().map(|(category, bucket)| {
            format!("{}:{}", category.param_token(), bucket.param_token())
        }));
        params.insert(PARAM_NEARBY.to_string(), value);
    }
    if !state.neighborhoods.is_empty() {
        let value = join_sorted(
            state
                .neighborhoods
                .iter()
                .map(|hood| urlencoding::encode(hood).into_owned()),
        );
        params.insert(PARAM_NEIGHBORHOODS.to_string(), value);
    }
    if !state.price_buckets.is_empty() {
        let value = join_sorted(
            state
                .price_buckets
                .iter()
                .map(|b| b.param_token().to_string()),
        );
        params.insert(PARAM_PRICE.to_string(), value);
    }
    if let Some(bucket) = state.min_rating {
        params.insert(PARAM_RATING.to_string(), bucket.param_token().to_string());
    }
    if let Some(bucket) = state.min_review_count {
        params.insert(PARAM_REVIEWS.to_string(), bucket.param_token().to_string());
    }
    if !state.dine_options.is_empty() {
        let value = join_sorted(
            state
                .dine_options
                .iter()
                .map(|k| k.param_token().to_string()),
        );
        params.insert(PARAM_DINE.to_string(), value);
    }
    if !state.standout_tags.is_empty() {
        let value = join_sorted(
            state
                .standout_tags
                .iter()
                .map(|t| t.param_token().to_string()),
        );
        params.insert(PARAM_TAGS.to_string(), value);
    }
    if state.open_now {
        params.insert(PARAM_OPEN.to_string(), "1".to_string());
    }

    params
}

/// The canonical shareable-link query string for a state. Empty for an
/// empty state.
#[must_use]
pub fn to_query_string(state: &ActiveFilterState) -> String {
    serialize_filter_params(state)
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .join("&")
}

/// Decode a raw query string (with or without a leading `?`). Malformed
/// segments are dropped, never an error.
#[must_use]
pub fn from_query_string(query: &str) -> ActiveFilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = BTreeMap::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let Ok(key) = urlencoding::decode(key) else {
            continue;
        };
        let Ok(value) = urlencoding::decode(value) else {
            continue;
        };
        params.insert(key.into_owned(), value.into_owned());
    }
    parse_filter_params(&params)
}

fn split_tokens(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn parse_near_token(token: &str) -> Option<(NearbyCategoryKey, DistanceBucket)> {
    let (category, distance) = token.split_once(':')?;
    Some((
        NearbyCategoryKey::from_token(category.trim())?,
        DistanceBucket::from_token(distance.trim())?,
    ))
}

fn decode_hood(token: &str) -> Option<String> {
    let decoded = urlencoding::decode(token).ok()?;
    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_open_token(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

fn join_sorted(tokens: impl Iterator<Item = String>) -> String {
    tokens.sorted().join(",")
}
