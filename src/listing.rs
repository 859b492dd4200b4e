//! Raw listing attributes as delivered by the data-access layer.
//!
//! Everything here is input: unvalidated strings and numbers straight from
//! the upstream business feed. The index builder is the only consumer; it
//! turns one [`RawListing`] into one [`FacetIndex`](crate::index::FacetIndex)
//! and tolerates every malformed field.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Listing identifier, opaque to the engine.
pub type ListingId = String;

/// Scope identifier (a city or neighborhood page), opaque to the engine.
pub type ScopeId = String;

/// One listing's raw attribute bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    pub id: ListingId,
    #[serde(default)]
    pub name: String,
    /// Raw price text: "$$", "$15-25", "cheap eats", anything.
    #[serde(default)]
    pub price_text: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u64>,
    /// Amenity labels as scraped ("Free Wi-Fi", "wheelchair_accessible").
    #[serde(default)]
    pub amenity_labels: Vec<String>,
    /// Transaction tags from the business feed ("delivery", "pickup",
    /// "restaurant_reservation").
    #[serde(default)]
    pub transactions: Vec<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    /// Weekly open periods; day 0 is Monday, times are "HHMM" strings.
    #[serde(default)]
    pub hours: Vec<RawOpenPeriod>,
    /// IANA timezone name ("America/Los_Angeles").
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub nearby_places: Vec<NearbyPlace>,
    #[serde(default)]
    pub review_excerpts: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RawListing {
    /// Minimal listing with an id and a name; everything else empty.
    #[must_use]
    pub fn new(id: impl Into<ListingId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a listing from its JSON representation.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    #[must_use]
    pub fn with_price_text(mut self, price: impl Into<String>) -> Self {
        self.price_text = Some(price.into());
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub fn with_review_count(mut self, count: u64) -> Self {
        self.review_count = Some(count);
        self
    }

    #[must_use]
    pub fn with_amenity_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenity_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_transactions<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transactions = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_neighborhood(mut self, neighborhood: impl Into<String>) -> Self {
        self.neighborhood = Some(neighborhood.into());
        self
    }

    #[must_use]
    pub fn with_hours(mut self, hours: Vec<RawOpenPeriod>) -> Self {
        self.hours = hours;
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = Some(tz.into());
        self
    }

    #[must_use]
    pub fn with_nearby_places(mut self, places: Vec<NearbyPlace>) -> Self {
        self.nearby_places = places;
        self
    }

    #[must_use]
    pub fn with_review_excerpts<I, S>(mut self, excerpts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.review_excerpts = excerpts.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One open period in the upstream hours format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOpenPeriod {
    /// 0 = Monday through 6 = Sunday.
    pub day: u8,
    /// "HHMM" 24-hour local time.
    pub start: String,
    /// "HHMM"; with `is_overnight` this falls on the next calendar day.
    pub end: String,
    #[serde(default)]
    pub is_overnight: bool,
}

impl RawOpenPeriod {
    #[must_use]
    pub fn new(day: u8, start: &str, end: &str) -> Self {
        Self {
            day,
            start: start.to_string(),
            end: end.to_string(),
            is_overnight: false,
        }
    }

    #[must_use]
    pub fn overnight(day: u8, start: &str, end: &str) -> Self {
        Self {
            day,
            start: start.to_string(),
            end: end.to_string(),
            is_overnight: true,
        }
    }
}

/// A nearby place with its raw category label and straight-line distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlace {
    #[serde(default)]
    pub name: String,
    /// Raw category from the places feed ("lodging", "shopping_mall").
    pub category: String,
    pub distance_miles: f64,
}

impl NearbyPlace {
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>, distance_miles: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            distance_miles,
        }
    }
}
