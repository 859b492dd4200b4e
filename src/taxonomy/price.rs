//! Price-string classification.
//!
//! Listing price data arrives as free text: symbol strings ("$$"), prose
//! ("cheap eats", "upscale dining"), ranges ("$15-25"), or bare amounts
//! ("$22 per person"). Classification applies rules in a fixed priority
//! order and degrades to [`PriceBucket::Unknown`] instead of erroring.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::PriceThresholds;

use super::PriceBucket;

/// Characters treated as currency symbols for the symbols-only rule.
const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

/// Descriptive words checked in bucket order. Budget words are checked
/// first so "inexpensive" never trips the "expensive" pattern.
static BUDGET_WORDS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    vec!["cheap", "budget", "inexpensive", "affordable", "bargain", "value"]
});

static MODERATE_WORDS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    vec!["moderate", "mid-range", "midrange", "mid range", "reasonable"]
});

static UPSCALE_WORDS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    vec![
        "upscale",
        "expensive",
        "fine dining",
        "high-end",
        "high end",
        "premium",
        "pricey",
        "luxur",
    ]
});

/// "$15-25", "15 – 25", "$15 to $25"; the two captures are the bounds.
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$?\s*(\d+(?:\.\d+)?)\s*(?:-|–|—|~|to)\s*\$?\s*(\d+(?:\.\d+)?)")
        .expect("valid regex")
});

/// A lone dollar amount anywhere in the text.
static SINGLE_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?\s*(\d+(?:\.\d+)?)").expect("valid regex"));

/// Classify a raw price string into a bucket.
///
/// Priority order:
/// 1. symbols-only strings bucket by symbol count;
/// 2. descriptive words bucket directly;
/// 3. a numeric range buckets by its upper bound;
/// 4. a single numeric value buckets by that value;
/// 5. anything else is [`PriceBucket::Unknown`].
#[must_use]
pub fn parse_price_to_bucket(text: &str, thresholds: &PriceThresholds) -> PriceBucket {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return PriceBucket::Unknown;
    }

    if trimmed.chars().all(|c| CURRENCY_SYMBOLS.contains(&c)) {
        return match trimmed.chars().count() {
            1 => PriceBucket::Budget,
            2 => PriceBucket::Moderate,
            _ => PriceBucket::Upscale,
        };
    }

    let lowered = trimmed.to_lowercase();
    if BUDGET_WORDS.iter().any(|w| lowered.contains(w)) {
        return PriceBucket::Budget;
    }
    if MODERATE_WORDS.iter().any(|w| lowered.contains(w)) {
        return PriceBucket::Moderate;
    }
    if UPSCALE_WORDS.iter().any(|w| lowered.contains(w)) {
        return PriceBucket::Upscale;
    }

    if let Some(caps) = RANGE_RE.captures(trimmed) {
        let upper = caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok());
        if let Some(upper) = upper {
            return bucket_for_amount(upper, thresholds);
        }
    }

    if let Some(caps) = SINGLE_VALUE_RE.captures(trimmed) {
        let value = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
        if let Some(value) = value {
            return bucket_for_amount(value, thresholds);
        }
    }

    PriceBucket::Unknown
}

fn bucket_for_amount(amount: f64, thresholds: &PriceThresholds) -> PriceBucket {
    if !amount.is_finite() {
        return PriceBucket::Unknown;
    }
    if amount <= thresholds.budget_max {
        PriceBucket::Budget
    } else if amount <= thresholds.moderate_max {
        PriceBucket::Moderate
    } else {
        PriceBucket::Upscale
    }
}
