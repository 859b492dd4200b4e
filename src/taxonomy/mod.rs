//! The closed vocabulary of filterable facets.
//!
//! Every facet key the directory can filter on lives here as a closed Rust
//! enum: amenities, nearby-place categories, dine options, standout tags,
//! and the price/rating/review-count/distance bucket families. Adding a
//! member means redeploying the taxonomy; there is no dynamic registration.
//!
//! Each enum exposes three views of a key:
//! - `display_name()`: the label the rendering layer puts on a filter chip,
//! - `param_token()`: the stable token used in query strings,
//! - `from_token()`: tolerant reverse of `param_token()` (unknown is `None`).
//!
//! Classification functions (bucketizers, price parsing, tag extraction) are
//! pure: no side effects, no I/O, malformed input degrades to a defined
//! default instead of erroring.

mod buckets;
mod price;
mod tags;

use serde::{Deserialize, Serialize};

pub use buckets::{
    bucketize_distance_miles, bucketize_rating, bucketize_review_count, DistanceBuckets,
    RatingBuckets, ReviewCountBuckets,
};
pub use price::parse_price_to_bucket;
pub use tags::extract_standout_tags;

/// Amenities a listing either has or does not have.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AmenityKey {
    /// Free Wi-Fi for guests.
    Wifi,
    /// Dedicated parking lot or validated parking.
    Parking,
    /// Outdoor/patio seating.
    OutdoorSeating,
    /// Wheelchair-accessible entrance and seating.
    WheelchairAccessible,
    /// Accepts credit cards.
    AcceptsCreditCards,
    /// Good for kids.
    KidFriendly,
    /// Good for groups / large parties.
    GoodForGroups,
    /// Beer, wine, or a full bar.
    ServesAlcohol,
}

impl AmenityKey {
    /// All amenity keys, in stable order.
    #[must_use]
    pub const fn all() -> &'static [AmenityKey] {
        &[
            Self::Wifi,
            Self::Parking,
            Self::OutdoorSeating,
            Self::WheelchairAccessible,
            Self::AcceptsCreditCards,
            Self::KidFriendly,
            Self::GoodForGroups,
            Self::ServesAlcohol,
        ]
    }

    /// Label shown on the filter chip.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Wifi => "Free Wi-Fi",
            Self::Parking => "Parking",
            Self::OutdoorSeating => "Outdoor Seating",
            Self::WheelchairAccessible => "Wheelchair Accessible",
            Self::AcceptsCreditCards => "Accepts Credit Cards",
            Self::KidFriendly => "Kid Friendly",
            Self::GoodForGroups => "Good for Groups",
            Self::ServesAlcohol => "Serves Alcohol",
        }
    }

    /// Stable query-string token.
    #[must_use]
    pub const fn param_token(&self) -> &'static str {
        match self {
            Self::Wifi => "wifi",
            Self::Parking => "parking",
            Self::OutdoorSeating => "outdoor",
            Self::WheelchairAccessible => "wheelchair",
            Self::AcceptsCreditCards => "cards",
            Self::KidFriendly => "kids",
            Self::GoodForGroups => "groups",
            Self::ServesAlcohol => "alcohol",
        }
    }

    /// Reverse of [`param_token`](Self::param_token). Unknown tokens yield `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|key| key.param_token() == token)
    }

    /// Match a raw attribute label from the upstream scrape
    /// ("Free Wi-Fi", "wheelchair_accessible", ...) to a key.
    ///
    /// Matching is case-insensitive and ignores punctuation; unrecognized
    /// labels yield `None` and are skipped by the index builder.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let folded: String = label
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "wifi" | "freewifi" | "wlan" => Some(Self::Wifi),
            "parking" | "parkinglot" | "validatedparking" | "streetparking" => {
                Some(Self::Parking)
            }
            "outdoorseating" | "patio" | "patioseating" => Some(Self::OutdoorSeating),
            "wheelchairaccessible" | "wheelchairaccess" | "accessible" => {
                Some(Self::WheelchairAccessible)
            }
            "acceptscreditcards" | "creditcards" | "takescreditcards" => {
                Some(Self::AcceptsCreditCards)
            }
            "goodforkids" | "kidfriendly" | "familyfriendly" => Some(Self::KidFriendly),
            "goodforgroups" | "groupfriendly" => Some(Self::GoodForGroups),
            "servesalcohol" | "fullbar" | "beerandwine" | "beerwine" => {
                Some(Self::ServesAlcohol)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for AmenityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Categories of nearby places a visitor may want to pair with a meal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum NearbyCategoryKey {
    Hotel,
    ShoppingMall,
    MovieTheater,
    Park,
    Casino,
}

impl NearbyCategoryKey {
    /// All nearby-place categories, in stable order.
    #[must_use]
    pub const fn all() -> &'static [NearbyCategoryKey] {
        &[
            Self::Hotel,
            Self::ShoppingMall,
            Self::MovieTheater,
            Self::Park,
            Self::Casino,
        ]
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Hotel => "Hotel",
            Self::ShoppingMall => "Shopping Mall",
            Self::MovieTheater => "Movie Theater",
            Self::Park => "Park",
            Self::Casino => "Casino",
        }
    }

    #[must_use]
    pub const fn param_token(&self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::ShoppingMall => "mall",
            Self::MovieTheater => "theater",
            Self::Park => "park",
            Self::Casino => "casino",
        }
    }

    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|key| key.param_token() == token)
    }

    /// Match the category string the places feed annotates nearby places
    /// with ("lodging", "shopping_mall", "cinema", ...).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "hotel" | "lodging" | "motel" => Some(Self::Hotel),
            "shopping_mall" | "mall" | "shopping mall" | "shopping center" => {
                Some(Self::ShoppingMall)
            }
            "movie_theater" | "movie theater" | "cinema" | "theater" => Some(Self::MovieTheater),
            "park" => Some(Self::Park),
            "casino" => Some(Self::Casino),
            _ => None,
        }
    }
}

impl std::fmt::Display for NearbyCategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Ways a listing serves its food.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DineOptionKey {
    DineIn,
    Takeout,
    Delivery,
    Reservations,
}

impl DineOptionKey {
    /// All dine options, in stable order.
    #[must_use]
    pub const fn all() -> &'static [DineOptionKey] {
        &[
            Self::DineIn,
            Self::Takeout,
            Self::Delivery,
            Self::Reservations,
        ]
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::DineIn => "Dine-In",
            Self::Takeout => "Takeout",
            Self::Delivery => "Delivery",
            Self::Reservations => "Reservations",
        }
    }

    #[must_use]
    pub const fn param_token(&self) -> &'static str {
        match self {
            Self::DineIn => "dine_in",
            Self::Takeout => "takeout",
            Self::Delivery => "delivery",
            Self::Reservations => "reservations",
        }
    }

    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|key| key.param_token() == token)
    }

    /// Map a transaction tag from the upstream business feed
    /// ("delivery", "pickup", "restaurant_reservation") to a key.
    #[must_use]
    pub fn from_transaction(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "delivery" => Some(Self::Delivery),
            "pickup" | "takeout" => Some(Self::Takeout),
            "restaurant_reservation" | "reservation" | "reservations" => {
                Some(Self::Reservations)
            }
            "dine_in" | "dine-in" => Some(Self::DineIn),
            _ => None,
        }
    }
}

impl std::fmt::Display for DineOptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Qualitative traits mined from review/description text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StandoutTagKey {
    GoodValue,
    Clean,
    FreshFood,
    FriendlyStaff,
    LargeSelection,
    CrabLegs,
    DessertSelection,
    QuickService,
}

impl StandoutTagKey {
    /// All standout tags, in stable order.
    #[must_use]
    pub const fn all() -> &'static [StandoutTagKey] {
        &[
            Self::GoodValue,
            Self::Clean,
            Self::FreshFood,
            Self::FriendlyStaff,
            Self::LargeSelection,
            Self::CrabLegs,
            Self::DessertSelection,
            Self::QuickService,
        ]
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::GoodValue => "Good Value",
            Self::Clean => "Clean",
            Self::FreshFood => "Fresh Food",
            Self::FriendlyStaff => "Friendly Staff",
            Self::LargeSelection => "Large Selection",
            Self::CrabLegs => "Crab Legs",
            Self::DessertSelection => "Dessert Selection",
            Self::QuickService => "Quick Service",
        }
    }

    #[must_use]
    pub const fn param_token(&self) -> &'static str {
        match self {
            Self::GoodValue => "good_value",
            Self::Clean => "clean",
            Self::FreshFood => "fresh_food",
            Self::FriendlyStaff => "friendly_staff",
            Self::LargeSelection => "large_selection",
            Self::CrabLegs => "crab_legs",
            Self::DessertSelection => "desserts",
            Self::QuickService => "quick_service",
        }
    }

    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|key| key.param_token() == token)
    }
}

impl std::fmt::Display for StandoutTagKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Price tiers. Unlike the numeric bucket families these are exclusive,
/// not cumulative: each listing lands in exactly one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum PriceBucket {
    Budget,
    Moderate,
    Upscale,
    /// Price could not be determined from the listing's raw data.
    #[default]
    Unknown,
}

impl PriceBucket {
    /// All price buckets, in stable order.
    #[must_use]
    pub const fn all() -> &'static [PriceBucket] {
        &[Self::Budget, Self::Moderate, Self::Upscale, Self::Unknown]
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Budget => "Budget ($)",
            Self::Moderate => "Moderate ($$)",
            Self::Upscale => "Upscale ($$$)",
            Self::Unknown => "Not Priced",
        }
    }

    /// Query-string token. Priced buckets serialize to their symbol string,
    /// never the internal key name.
    #[must_use]
    pub const fn param_token(&self) -> &'static str {
        match self {
            Self::Budget => "$",
            Self::Moderate => "$$",
            Self::Upscale => "$$$",
            Self::Unknown => "na",
        }
    }

    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|key| key.param_token() == token)
    }
}

impl std::fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Minimum-rating thresholds, declared loosest first so `Ord` ranks
/// stricter buckets higher.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RatingBucket {
    /// Rating ≥ 3.5.
    ThreeHalfPlus,
    /// Rating ≥ 4.0.
    FourPlus,
    /// Rating ≥ 4.5.
    FourHalfPlus,
}

impl RatingBucket {
    /// All rating buckets, loosest first.
    #[must_use]
    pub const fn all() -> &'static [RatingBucket] {
        &[Self::ThreeHalfPlus, Self::FourPlus, Self::FourHalfPlus]
    }

    /// The minimum rating this bucket demands.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        match self {
            Self::ThreeHalfPlus => 3.5,
            Self::FourPlus => 4.0,
            Self::FourHalfPlus => 4.5,
        }
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::ThreeHalfPlus => "3.5+ Stars",
            Self::FourPlus => "4.0+ Stars",
            Self::FourHalfPlus => "4.5+ Stars",
        }
    }

    #[must_use]
    pub const fn param_token(&self) -> &'static str {
        match self {
            Self::ThreeHalfPlus => "3.5",
            Self::FourPlus => "4.0",
            Self::FourHalfPlus => "4.5",
        }
    }

    /// Tolerant token parse: accepts "4" for "4.0" and so on.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "3.5" => Some(Self::ThreeHalfPlus),
            "4" | "4.0" => Some(Self::FourPlus),
            "4.5" => Some(Self::FourHalfPlus),
            _ => None,
        }
    }
}

impl std::fmt::Display for RatingBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Minimum-review-count thresholds, loosest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ReviewCountBucket {
    /// At least 100 reviews.
    HundredPlus,
    /// At least 500 reviews.
    FiveHundredPlus,
    /// At least 1000 reviews.
    ThousandPlus,
}

impl ReviewCountBucket {
    /// All review-count buckets, loosest first.
    #[must_use]
    pub const fn all() -> &'static [ReviewCountBucket] {
        &[Self::HundredPlus, Self::FiveHundredPlus, Self::ThousandPlus]
    }

    /// The minimum review count this bucket demands.
    #[must_use]
    pub const fn threshold(&self) -> u64 {
        match self {
            Self::HundredPlus => 100,
            Self::FiveHundredPlus => 500,
            Self::ThousandPlus => 1000,
        }
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::HundredPlus => "100+ Reviews",
            Self::FiveHundredPlus => "500+ Reviews",
            Self::ThousandPlus => "1000+ Reviews",
        }
    }

    #[must_use]
    pub const fn param_token(&self) -> &'static str {
        match self {
            Self::HundredPlus => "100",
            Self::FiveHundredPlus => "500",
            Self::ThousandPlus => "1000",
        }
    }

    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|key| key.param_token() == token.trim())
    }
}

impl std::fmt::Display for ReviewCountBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Maximum-distance thresholds for nearby-place facets, nearest first.
/// Smaller distance is the stricter bucket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DistanceBucket {
    /// Within a quarter mile.
    QuarterMile,
    /// Within half a mile.
    HalfMile,
    /// Within one mile.
    OneMile,
}

impl DistanceBucket {
    /// All distance buckets, nearest first.
    #[must_use]
    pub const fn all() -> &'static [DistanceBucket] {
        &[Self::QuarterMile, Self::HalfMile, Self::OneMile]
    }

    /// The maximum distance (miles) this bucket admits.
    #[must_use]
    pub const fn threshold_miles(&self) -> f64 {
        match self {
            Self::QuarterMile => 0.25,
            Self::HalfMile => 0.5,
            Self::OneMile => 1.0,
        }
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::QuarterMile => "Within 0.25 mi",
            Self::HalfMile => "Within 0.5 mi",
            Self::OneMile => "Within 1 mi",
        }
    }

    #[must_use]
    pub const fn param_token(&self) -> &'static str {
        match self {
            Self::QuarterMile => "0.25",
            Self::HalfMile => "0.5",
            Self::OneMile => "1",
        }
    }

    /// Tolerant token parse: accepts "1" and "1.0".
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "0.25" | ".25" => Some(Self::QuarterMile),
            "0.5" | ".5" => Some(Self::HalfMile),
            "1" | "1.0" => Some(Self::OneMile),
            _ => None,
        }
    }
}

impl std::fmt::Display for DistanceBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
