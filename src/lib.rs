//! dinescope - faceted filtering engine for a dining directory.
//!
//! The engine turns one listing's raw attributes into an immutable
//! [`FacetIndex`](index::FacetIndex), aggregates per-scope facet counts for
//! filter UIs, evaluates an [`ActiveFilterState`](filter::ActiveFilterState)
//! against a scope's indexes, answers "open now" through a short-TTL
//! per-scope cache, and round-trips filter state through a compact
//! query-string representation.
//!
//! Everything is an in-process library call: no wire protocol, no storage,
//! no CLI. The data-access layer supplies [`RawListing`](listing::RawListing)
//! bundles and keeps them fresh; the rendering layer consumes matching
//! listing ids and aggregated counts.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod index;
pub mod listing;
pub mod opennow;
pub mod taxonomy;
pub mod test_utils;

pub use aggregate::{AggregateCache, AggregatedFacets, aggregate_facets};
pub use config::Config;
pub use error::{DsError, Result};
pub use filter::{
    ActiveFilterState, evaluate, from_query_string, parse_filter_params, serialize_filter_params,
    to_query_string,
};
pub use index::{FacetIndex, IndexBuilder, WeeklyHours, build_facet_index};
pub use listing::{ListingId, NearbyPlace, RawListing, RawOpenPeriod, ScopeId};
pub use opennow::{OpenNowCache, OpenState, open_state};
