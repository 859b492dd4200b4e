//! Canned listings and filesystem fixtures.
//!
//! `strip_scope` is the shared scenario most suites run against: a
//! handful of restaurants on a casino strip with deliberately varied
//! price, rating, hours, and nearby-place data, so one scope exercises
//! every facet family including the degraded cases (missing price,
//! missing timezone, no hours at all).

use std::collections::HashMap;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::config::Config;
use crate::index::{FacetIndex, build_facet_index};
use crate::listing::{ListingId, NearbyPlace, RawListing, RawOpenPeriod};

/// Seven open periods covering every day with the same local times.
#[must_use]
pub fn daily_hours(start: &str, end: &str) -> Vec<RawOpenPeriod> {
    (0..7).map(|day| RawOpenPeriod::new(day, start, end)).collect()
}

/// A small, realistic scope. Ids are stable so tests assert membership
/// directly.
#[must_use]
pub fn strip_scope() -> Vec<RawListing> {
    vec![
        RawListing::new("bacchanal", "Bacchanal Buffet")
            .with_price_text("$$$")
            .with_rating(4.6)
            .with_review_count(2100)
            .with_amenity_labels([
                "Free Wi-Fi",
                "wheelchair_accessible",
                "Accepts Credit Cards",
            ])
            .with_transactions(["restaurant_reservation"])
            .with_neighborhood("The Strip")
            .with_hours(daily_hours("0900", "2200"))
            .with_timezone("America/Los_Angeles")
            .with_nearby_places(vec![
                NearbyPlace::new("Caesars Palace", "casino", 0.05),
                NearbyPlace::new("The Forum Shops", "shopping_mall", 0.1),
            ])
            .with_review_excerpts([
                "Endless crab legs and the dessert selection is unreal",
                "Spotless dining room, worth every penny",
            ]),
        RawListing::new("wok", "Golden Wok Express")
            .with_price_text("$")
            .with_rating(4.1)
            .with_review_count(640)
            .with_amenity_labels(["Free Wi-Fi", "parking"])
            .with_transactions(["pickup", "delivery"])
            .with_neighborhood("Chinatown")
            .with_hours(daily_hours("1030", "2130"))
            .with_timezone("America/Los_Angeles")
            .with_description("Quick service and great value lunch plates"),
        RawListing::new("jade", "Jade Garden")
            .with_price_text("$15-25")
            .with_rating(4.8)
            .with_review_count(310)
            .with_neighborhood("Chinatown")
            .with_hours(vec![
                RawOpenPeriod::new(4, "1700", "2300"),
                RawOpenPeriod::overnight(5, "1700", "0100"),
            ])
            .with_timezone("America/Los_Angeles")
            .with_nearby_places(vec![NearbyPlace::new("Lorenzi Park", "park", 0.3)])
            .with_review_excerpts(["Everything tastes so fresh, friendly staff too"]),
        RawListing::new("starlite", "Starlite Diner")
            .with_rating(3.2)
            .with_review_count(85)
            .with_amenity_labels(["Good for Kids"])
            .with_transactions(["pickup"])
            .with_neighborhood("Westside"),
        RawListing::new("ember", "Ember & Oak Steakhouse")
            .with_price_text("$$$")
            .with_rating(4.4)
            .with_review_count(950)
            .with_amenity_labels(["Full Bar", "Accepts Credit Cards"])
            .with_transactions(["restaurant_reservation", "dine_in"])
            .with_neighborhood("Downtown")
            .with_hours(daily_hours("1600", "2300"))
            .with_timezone("America/Los_Angeles")
            .with_nearby_places(vec![NearbyPlace::new("The Carson Hotel", "lodging", 0.2)])
            .with_review_excerpts(["Friendly staff, huge selection of cuts"]),
        RawListing::new("esquina", "La Esquina Taqueria")
            .with_price_text("$")
            .with_rating(4.9)
            .with_review_count(1500)
            .with_transactions(["pickup"])
            .with_neighborhood("Westside")
            .with_hours(daily_hours("0800", "2000"))
            .with_review_excerpts(["Fresh ingredients, fast service, good value"]),
    ]
}

/// Index a set of listings with the default config, keyed by id.
#[must_use]
pub fn index_scope(listings: &[RawListing]) -> HashMap<ListingId, FacetIndex> {
    let config = Config::default();
    listings
        .iter()
        .map(|listing| (listing.id.clone(), build_facet_index(listing, &config)))
        .collect()
}

/// Ids in listing order, the order the rendering layer hands the
/// evaluator.
#[must_use]
pub fn listing_ids(listings: &[RawListing]) -> Vec<ListingId> {
    listings.iter().map(|listing| listing.id.clone()).collect()
}

/// Isolated filesystem environment for config-loading tests.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// Write a file under the fixture root, creating parent directories.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&full_path, content).expect("write fixture file");
        full_path
    }

    /// Write a TOML config file and return its path.
    #[must_use]
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.create_file("dinescope.toml", content)
    }
}
