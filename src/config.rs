//! Engine configuration.
//!
//! Defaults work out of the box; a TOML file (explicit path or `DS_CONFIG`)
//! and `DS_*` environment variables can override individual fields. File
//! values override defaults, environment values override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DsError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub price: PriceThresholds,
    #[serde(default)]
    pub open_now: OpenNowConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
    #[serde(default)]
    pub builder: BuilderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            price: PriceThresholds::default(),
            open_now: OpenNowConfig::default(),
            aggregation: AggregationConfig::default(),
            builder: BuilderConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the TOML file at `explicit_path`
    /// (or `DS_CONFIG` if unset), then `DS_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("DS_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| DsError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| DsError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.price {
            self.price.merge(patch);
        }
        if let Some(patch) = patch.open_now {
            self.open_now.merge(patch);
        }
        if let Some(patch) = patch.aggregation {
            self.aggregation.merge(patch);
        }
        if let Some(patch) = patch.builder {
            self.builder.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_f64("DS_PRICE_BUDGET_MAX")? {
            self.price.budget_max = value;
        }
        if let Some(value) = env_f64("DS_PRICE_MODERATE_MAX")? {
            self.price.moderate_max = value;
        }

        if let Some(value) = env_u64("DS_OPEN_NOW_TTL_SECONDS")? {
            self.open_now.ttl_seconds = value;
        }
        if let Some(value) = env_usize("DS_OPEN_NOW_MAX_SCOPES")? {
            self.open_now.max_scopes = value;
        }

        if let Some(value) = env_u64("DS_AGGREGATE_TTL_SECONDS")? {
            self.aggregation.ttl_seconds = value;
        }
        if let Some(value) = env_usize("DS_AGGREGATE_MAX_SCOPES")? {
            self.aggregation.max_scopes = value;
        }

        if let Some(value) = env_usize("DS_HOURS_MEMO_CAPACITY")? {
            self.builder.hours_memo_capacity = value;
        }
        if let Some(value) = env_bool("DS_ASSUME_DINE_IN") {
            self.builder.assume_dine_in = value;
        }

        Ok(())
    }

    /// Reject internally inconsistent settings.
    pub fn validate(&self) -> Result<()> {
        if !self.price.budget_max.is_finite() || self.price.budget_max <= 0.0 {
            return Err(DsError::Config(format!(
                "price.budget_max must be a positive amount, got {}",
                self.price.budget_max
            )));
        }
        if !self.price.moderate_max.is_finite() || self.price.moderate_max < self.price.budget_max
        {
            return Err(DsError::Config(format!(
                "price.moderate_max ({}) must be at least price.budget_max ({})",
                self.price.moderate_max, self.price.budget_max
            )));
        }
        if self.open_now.max_scopes == 0 {
            return Err(DsError::Config(
                "open_now.max_scopes must be at least 1".to_string(),
            ));
        }
        if self.aggregation.max_scopes == 0 {
            return Err(DsError::Config(
                "aggregation.max_scopes must be at least 1".to_string(),
            ));
        }
        if self.builder.hours_memo_capacity == 0 {
            return Err(DsError::Config(
                "builder.hours_memo_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Cut lines for numeric price classification. Listings at or below
/// `budget_max` are budget; at or below `moderate_max` moderate; above
/// that upscale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceThresholds {
    #[serde(default = "default_budget_max")]
    pub budget_max: f64,
    #[serde(default = "default_moderate_max")]
    pub moderate_max: f64,
}

impl Default for PriceThresholds {
    fn default() -> Self {
        Self {
            budget_max: default_budget_max(),
            moderate_max: default_moderate_max(),
        }
    }
}

impl PriceThresholds {
    fn merge(&mut self, patch: PricePatch) {
        if let Some(value) = patch.budget_max {
            self.budget_max = value;
        }
        if let Some(value) = patch.moderate_max {
            self.moderate_max = value;
        }
    }
}

fn default_budget_max() -> f64 {
    15.0
}

fn default_moderate_max() -> f64 {
    30.0
}

/// Open-now snapshot cache sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenNowConfig {
    /// How long a per-scope open-set snapshot stays fresh.
    #[serde(default = "default_open_now_ttl")]
    pub ttl_seconds: u64,
    /// Bound on cached scopes; the oldest entry is dropped beyond this.
    #[serde(default = "default_open_now_scopes")]
    pub max_scopes: usize,
}

impl Default for OpenNowConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_open_now_ttl(),
            max_scopes: default_open_now_scopes(),
        }
    }
}

impl OpenNowConfig {
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    fn merge(&mut self, patch: OpenNowPatch) {
        if let Some(value) = patch.ttl_seconds {
            self.ttl_seconds = value;
        }
        if let Some(value) = patch.max_scopes {
            self.max_scopes = value;
        }
    }
}

fn default_open_now_ttl() -> u64 {
    60
}

fn default_open_now_scopes() -> usize {
    64
}

/// Aggregated-facet-count cache sizing. Coarser than open-now: counts only
/// change when a scope's listing set changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    #[serde(default = "default_aggregation_ttl")]
    pub ttl_seconds: u64,
    #[serde(default = "default_aggregation_scopes")]
    pub max_scopes: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_aggregation_ttl(),
            max_scopes: default_aggregation_scopes(),
        }
    }
}

impl AggregationConfig {
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    fn merge(&mut self, patch: AggregationPatch) {
        if let Some(value) = patch.ttl_seconds {
            self.ttl_seconds = value;
        }
        if let Some(value) = patch.max_scopes {
            self.max_scopes = value;
        }
    }
}

fn default_aggregation_ttl() -> u64 {
    300
}

fn default_aggregation_scopes() -> usize {
    128
}

/// Facet-index builder knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Identical weekly schedules are common across a chain's locations;
    /// parsed results are memoized up to this many distinct schedules.
    #[serde(default = "default_hours_memo_capacity")]
    pub hours_memo_capacity: usize,
    /// Treat listings that declare no dine options at all as offering
    /// dine-in. Restaurants without table service set this false upstream.
    #[serde(default = "default_assume_dine_in")]
    pub assume_dine_in: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            hours_memo_capacity: default_hours_memo_capacity(),
            assume_dine_in: default_assume_dine_in(),
        }
    }
}

impl BuilderConfig {
    fn merge(&mut self, patch: BuilderPatch) {
        if let Some(value) = patch.hours_memo_capacity {
            self.hours_memo_capacity = value;
        }
        if let Some(value) = patch.assume_dine_in {
            self.assume_dine_in = value;
        }
    }
}

fn default_hours_memo_capacity() -> usize {
    512
}

fn default_assume_dine_in() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub price: Option<PricePatch>,
    pub open_now: Option<OpenNowPatch>,
    pub aggregation: Option<AggregationPatch>,
    pub builder: Option<BuilderPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PricePatch {
    pub budget_max: Option<f64>,
    pub moderate_max: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OpenNowPatch {
    pub ttl_seconds: Option<u64>,
    pub max_scopes: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AggregationPatch {
    pub ttl_seconds: Option<u64>,
    pub max_scopes: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct BuilderPatch {
    pub hours_memo_capacity: Option<usize>,
    pub assume_dine_in: Option<bool>,
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|err| DsError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|err| DsError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|err| DsError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}
