//! Open-now evaluation against normalized weekly hours.
//!
//! A listing's open state at a point in time is tri-state: open, closed,
//! or unknown when the hours or timezone never made it into the index.
//! [`OpenState::is_open`] is the one place the tri-state collapses to the
//! boolean the filter needs, and unknown fails closed there.
//!
//! [`OpenNowCache`] memoizes each scope's open set for a short TTL so a
//! burst of requests on one city page computes the set once, not per
//! request. A cached set may be stale by up to the TTL; the open-now
//! filter tolerates that by contract.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Datelike, Timelike, Utc};
use tracing::debug;

use crate::cache::{CacheStats, TtlCache};
use crate::config::OpenNowConfig;
use crate::index::FacetIndex;
use crate::listing::{ListingId, ScopeId};

/// Whether a listing is open at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenState {
    Open,
    Closed,
    /// The index has no usable hours or no timezone; openness cannot be
    /// determined.
    Unknown,
}

impl OpenState {
    /// Collapse to the boolean the open-now filter uses. `Unknown` is
    /// treated as not open: a listing that cannot prove it is open is
    /// excluded rather than shown in error.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Evaluate one listing's open state at `now`.
///
/// The instant is converted to the listing's own timezone before the
/// weekly schedule is consulted, so a 7pm UTC request finds a Las Vegas
/// buffet in its lunch service, not its overnight close.
#[must_use]
pub fn open_state(index: &FacetIndex, now: DateTime<Utc>) -> OpenState {
    let Some(tz) = index.timezone else {
        return OpenState::Unknown;
    };
    if index.parsed_hours.is_empty() {
        return OpenState::Unknown;
    }

    let local = now.with_timezone(&tz);
    let day = local.weekday().num_days_from_monday() as usize;
    let minute = (local.hour() * 60 + local.minute()) as u16;

    if index.parsed_hours.is_open_at(day, minute) {
        OpenState::Open
    } else {
        OpenState::Closed
    }
}

/// The ids of all listings open at `now`, from a scope's index map.
#[must_use]
pub fn compute_open_set(
    indexes: &HashMap<ListingId, FacetIndex>,
    now: DateTime<Utc>,
) -> HashSet<ListingId> {
    indexes
        .iter()
        .filter(|(_, index)| open_state(index, now).is_open())
        .map(|(id, _)| id.clone())
        .collect()
}

/// Per-scope cache of open-listing sets.
pub struct OpenNowCache {
    scopes: TtlCache<ScopeId, Arc<HashSet<ListingId>>>,
}

impl OpenNowCache {
    #[must_use]
    pub fn new(config: &OpenNowConfig) -> Self {
        Self {
            scopes: TtlCache::new(config.ttl(), config.max_scopes),
        }
    }

    /// The open set for `scope`, computing it at `now` on a miss.
    ///
    /// A hit can lag the wall clock by up to the TTL. Callers that need
    /// the exact current set bypass the cache with [`compute_open_set`].
    pub fn open_set_at(
        &self,
        scope: &str,
        indexes: &HashMap<ListingId, FacetIndex>,
        now: DateTime<Utc>,
    ) -> Arc<HashSet<ListingId>> {
        let key: ScopeId = scope.to_string();
        if let Some(set) = self.scopes.get(&key) {
            return set;
        }

        let set = Arc::new(compute_open_set(indexes, now));
        debug!(
            target: "opennow",
            scope = %scope,
            open = set.len(),
            listings = indexes.len(),
            "computed open set"
        );
        self.scopes.insert(key, Arc::clone(&set));
        set
    }

    /// The open set for `scope` as of the current wall clock.
    pub fn open_set(
        &self,
        scope: &str,
        indexes: &HashMap<ListingId, FacetIndex>,
    ) -> Arc<HashSet<ListingId>> {
        self.open_set_at(scope, indexes, Utc::now())
    }

    /// Drop every cached scope.
    pub fn clear(&self) {
        self.scopes.clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.scopes.stats()
    }
}
