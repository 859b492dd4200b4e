//! Cumulative bucket flags for numeric facets.
//!
//! Rating, review-count, and distance buckets are threshold families: a
//! listing that clears a stricter threshold clears every looser one too.
//! Bucketization therefore sets a run of flags, never a single one, and the
//! aggregator can count each bucket independently without re-deriving the
//! implication chain.

use serde::{Deserialize, Serialize};

use super::{DistanceBucket, RatingBucket, ReviewCountBucket};

/// Which rating thresholds a listing clears.
///
/// Invariant (enforced by [`bucketize_rating`], preserved by serde round
/// trips of builder output): `four_half_plus → four_plus → three_half_plus`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct RatingBuckets {
    pub three_half_plus: bool,
    pub four_plus: bool,
    pub four_half_plus: bool,
}

impl RatingBuckets {
    /// No threshold cleared (unrated listing).
    #[must_use]
    pub const fn none() -> Self {
        Self {
            three_half_plus: false,
            four_plus: false,
            four_half_plus: false,
        }
    }

    /// Whether the given bucket's flag is set.
    #[must_use]
    pub const fn satisfies(&self, bucket: RatingBucket) -> bool {
        match bucket {
            RatingBucket::ThreeHalfPlus => self.three_half_plus,
            RatingBucket::FourPlus => self.four_plus,
            RatingBucket::FourHalfPlus => self.four_half_plus,
        }
    }
}

/// Which review-count thresholds a listing clears.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct ReviewCountBuckets {
    pub hundred_plus: bool,
    pub five_hundred_plus: bool,
    pub thousand_plus: bool,
}

impl ReviewCountBuckets {
    /// No threshold cleared.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            hundred_plus: false,
            five_hundred_plus: false,
            thousand_plus: false,
        }
    }

    /// Whether the given bucket's flag is set.
    #[must_use]
    pub const fn satisfies(&self, bucket: ReviewCountBucket) -> bool {
        match bucket {
            ReviewCountBucket::HundredPlus => self.hundred_plus,
            ReviewCountBucket::FiveHundredPlus => self.five_hundred_plus,
            ReviewCountBucket::ThousandPlus => self.thousand_plus,
        }
    }
}

/// Which distance rings a nearby place falls inside. Cumulative in the
/// other direction: inside the quarter-mile ring means inside every ring.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct DistanceBuckets {
    pub quarter_mile: bool,
    pub half_mile: bool,
    pub one_mile: bool,
}

impl DistanceBuckets {
    /// No ring reached (nothing of that category within a mile).
    #[must_use]
    pub const fn none() -> Self {
        Self {
            quarter_mile: false,
            half_mile: false,
            one_mile: false,
        }
    }

    /// Whether the given bucket's flag is set.
    #[must_use]
    pub const fn satisfies(&self, bucket: DistanceBucket) -> bool {
        match bucket {
            DistanceBucket::QuarterMile => self.quarter_mile,
            DistanceBucket::HalfMile => self.half_mile,
            DistanceBucket::OneMile => self.one_mile,
        }
    }
}

/// Bucketize a star rating. `None`, NaN, and out-of-range values clear
/// nothing.
#[must_use]
pub fn bucketize_rating(rating: Option<f64>) -> RatingBuckets {
    let Some(r) = rating else {
        return RatingBuckets::none();
    };
    if !r.is_finite() || !(0.0..=5.0).contains(&r) {
        return RatingBuckets::none();
    }
    RatingBuckets {
        three_half_plus: r >= RatingBucket::ThreeHalfPlus.threshold(),
        four_plus: r >= RatingBucket::FourPlus.threshold(),
        four_half_plus: r >= RatingBucket::FourHalfPlus.threshold(),
    }
}

/// Bucketize a review count. `None` clears nothing.
#[must_use]
pub fn bucketize_review_count(count: Option<u64>) -> ReviewCountBuckets {
    let Some(n) = count else {
        return ReviewCountBuckets::none();
    };
    ReviewCountBuckets {
        hundred_plus: n >= ReviewCountBucket::HundredPlus.threshold(),
        five_hundred_plus: n >= ReviewCountBucket::FiveHundredPlus.threshold(),
        thousand_plus: n >= ReviewCountBucket::ThousandPlus.threshold(),
    }
}

/// Bucketize the distance (miles) to the closest place of a category.
/// Non-finite or negative distances clear nothing.
#[must_use]
pub fn bucketize_distance_miles(miles: f64) -> DistanceBuckets {
    if !miles.is_finite() || miles < 0.0 {
        return DistanceBuckets::none();
    }
    DistanceBuckets {
        quarter_mile: miles <= DistanceBucket::QuarterMile.threshold_miles(),
        half_mile: miles <= DistanceBucket::HalfMile.threshold_miles(),
        one_mile: miles <= DistanceBucket::OneMile.threshold_miles(),
    }
}
