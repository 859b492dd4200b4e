//! Hours normalization.
//!
//! The upstream feed delivers weekly open periods as `{day, "HHMM" start,
//! "HHMM" end, is_overnight}`. Normalization turns them into per-day
//! minute intervals: overnight periods split at midnight into the
//! following day, `"2400"` is accepted as an end-of-day close, and any
//! malformed entry is skipped on its own without discarding the rest of
//! the schedule.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use crate::listing::RawOpenPeriod;

use super::{MINUTES_PER_DAY, OpenInterval, WeeklyHours};

/// Normalize raw open periods into a weekly schedule.
///
/// Invalid entries (day out of range, unparseable times, zero-length
/// same-day spans) are dropped individually; an entirely invalid input
/// yields an empty schedule, which the open-now predicate reports as
/// indeterminate rather than open.
#[must_use]
pub fn parse_weekly_hours(periods: &[RawOpenPeriod]) -> WeeklyHours {
    let mut days: [Vec<OpenInterval>; 7] = Default::default();

    for period in periods {
        let day = period.day as usize;
        if day >= 7 {
            debug!(target: "index", day = period.day, "skipping period with invalid day");
            continue;
        }
        let (Some(start), Some(end)) = (
            parse_hhmm(&period.start, false),
            parse_hhmm(&period.end, true),
        ) else {
            debug!(
                target: "index",
                start = %period.start,
                end = %period.end,
                "skipping period with unparseable time"
            );
            continue;
        };

        // A close before the open means the period runs past midnight,
        // whether or not the feed flagged it. An overnight close equal to
        // the open ("0000"-"0000") is the feed's 24-hour notation.
        if period.is_overnight || end < start {
            days[day].push(OpenInterval::new(start, MINUTES_PER_DAY));
            if end > 0 {
                days[(day + 1) % 7].push(OpenInterval::new(0, end));
            }
        } else if end > start {
            days[day].push(OpenInterval::new(start, end));
        } else {
            debug!(
                target: "index",
                start = %period.start,
                end = %period.end,
                "skipping zero-length period"
            );
        }
    }

    WeeklyHours::from_days(days)
}

/// Parse a `"HHMM"` time into minutes since midnight.
///
/// `allow_end_of_day` admits `"2400"`, the feed's token for a close at
/// midnight of the same day.
fn parse_hhmm(text: &str, allow_end_of_day: bool) -> Option<u16> {
    let bytes = text.as_bytes();
    if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let hours = u16::from((bytes[0] - b'0') * 10 + (bytes[1] - b'0'));
    let minutes = u16::from((bytes[2] - b'0') * 10 + (bytes[3] - b'0'));
    if hours == 24 && minutes == 0 && allow_end_of_day {
        return Some(MINUTES_PER_DAY);
    }
    if hours <= 23 && minutes <= 59 {
        return Some(hours * 60 + minutes);
    }
    None
}

/// Memoized hours parsing.
///
/// Chains share one schedule across dozens of locations, so parses are
/// cached by a content hash of the raw periods. Lock contention skips the
/// cache rather than waiting; parsing again is cheaper than blocking.
pub struct HoursMemo {
    cache: Mutex<LruCache<u64, WeeklyHours>>,
}

impl HoursMemo {
    /// Create a memo holding up to `capacity` distinct schedules.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Parse `periods`, reusing a previous result for an identical schedule.
    #[must_use]
    pub fn parse(&self, periods: &[RawOpenPeriod]) -> WeeklyHours {
        if periods.is_empty() {
            return WeeklyHours::empty();
        }
        let key = schedule_hash(periods);
        if let Some(mut cache) = self.cache.try_lock() {
            if let Some(hours) = cache.get(&key) {
                return hours.clone();
            }
        }
        let hours = parse_weekly_hours(periods);
        if let Some(mut cache) = self.cache.try_lock() {
            cache.put(key, hours.clone());
        }
        hours
    }

    /// Number of memoized schedules.
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn schedule_hash(periods: &[RawOpenPeriod]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for period in periods {
        period.day.hash(&mut hasher);
        period.start.hash(&mut hasher);
        period.end.hash(&mut hasher);
        period.is_overnight.hash(&mut hasher);
    }
    hasher.finish()
}
