//! Standout-tag extraction from free text.
//!
//! Review excerpts and listing descriptions are matched against an ordered
//! pattern table, one pattern list per tag. A tag appears at most once no
//! matter how many of its patterns fire; distinct tags are independent.
//! The patterns are intentionally conservative: a missed tag costs one
//! filter chip, a false tag pollutes filter results.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::StandoutTagKey;

// Precompiled per-tag pattern lists, matched against NFKC-normalized
// lowercase text.
static TAG_PATTERNS: LazyLock<Vec<(StandoutTagKey, Vec<Regex>)>> = LazyLock::new(|| {
    let compile = |patterns: &[&str]| -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| Regex::new(p).expect("valid regex"))
            .collect()
    };
    vec![
        (
            StandoutTagKey::GoodValue,
            compile(&[
                r"\b(?:great|good|amazing|excellent) value\b",
                r"\bworth (?:the|every) (?:price|penny|dollar)\b",
                r"\bbang for (?:the|your) buck\b",
                r"\breasonab(?:le|ly)[- ]priced?\b",
                r"\bcan'?t beat the price\b",
            ]),
        ),
        (
            StandoutTagKey::Clean,
            compile(&[
                r"\bclean\b",
                r"\bspotless\b",
                r"\bwell[- ]kept\b",
                r"\bimmaculate\b",
            ]),
        ),
        (
            StandoutTagKey::FreshFood,
            compile(&[
                r"\bfresh\b",
                r"\bfreshly (?:made|prepared|cooked|baked)\b",
                r"\bmade to order\b",
            ]),
        ),
        (
            StandoutTagKey::FriendlyStaff,
            compile(&[
                r"\bfriendly (?:staff|service|servers?|waiters?|employees?|people)\b",
                r"\b(?:staff|servers?|waiters?|employees?) (?:was|were|are|is) (?:so )?(?:friendly|helpful|kind|welcoming)\b",
                r"\b(?:great|excellent|wonderful|attentive) (?:service|staff)\b",
                r"\bstaff (?:went|goes) (?:above|out of)\b",
            ]),
        ),
        (
            StandoutTagKey::LargeSelection,
            compile(&[
                r"\b(?:huge|large|big|great|wide|impressive|massive|endless) (?:selection|variety|spread|buffet)\b",
                r"\bso many (?:choices|options|dishes)\b",
                r"\bsomething for everyone\b",
                r"\btons of (?:food|options|choices)\b",
            ]),
        ),
        (
            StandoutTagKey::CrabLegs,
            compile(&[
                r"\bcrab legs?\b",
                r"\bsnow crab\b",
                r"\bking crab\b",
            ]),
        ),
        (
            StandoutTagKey::DessertSelection,
            compile(&[
                r"\bdesserts?\b",
                r"\bice cream\b",
                r"\bpastr(?:y|ies)\b",
                r"\bsweet (?:treats|tooth)\b",
                r"\bchocolate fountain\b",
            ]),
        ),
        (
            StandoutTagKey::QuickService,
            compile(&[
                r"\b(?:quick|fast|prompt|speedy) service\b",
                r"\bno (?:long )?(?:wait|lines?)\b",
                r"\bseated (?:right away|immediately|quickly)\b",
                r"\bfood (?:came|arrived|was) (?:out )?(?:super )?(?:fast|quickly)\b",
                r"\bin and out\b",
            ]),
        ),
    ]
});

/// Extract every standout tag whose pattern list matches the text.
///
/// Text is NFKC-normalized and lowercased before matching, so fullwidth
/// and composed forms classify the same as plain ASCII. Empty input
/// yields an empty set.
#[must_use]
pub fn extract_standout_tags(text: &str) -> BTreeSet<StandoutTagKey> {
    let mut tags = BTreeSet::new();
    if text.trim().is_empty() {
        return tags;
    }
    let normalized: String = text.nfkc().collect::<String>().to_lowercase();
    for (tag, patterns) in TAG_PATTERNS.iter() {
        if patterns.iter().any(|p| p.is_match(&normalized)) {
            tags.insert(*tag);
        }
    }
    tags
}
