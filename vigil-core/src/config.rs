//! Retrieval configuration.
//!
//! The default window and limits are product choices, not protocol; they
//! live here so callers can override them via TOML instead of editing
//! the extractor.

use serde::{Deserialize, Serialize};

/// Named defaults for [`RetrievalConfig`].
pub mod defaults {
    /// Time window applied when the query names none (days).
    pub const DEFAULT_TIME_RANGE_DAYS: u32 = 30;
    /// Sentinel window meaning "all time" (days).
    pub const MAX_TIME_RANGE_DAYS: u32 = 36_500;
    /// Result count applied when the query names none.
    pub const DEFAULT_RESULT_LIMIT: usize = 10;
    /// Lower clamp for a requested result count.
    pub const MIN_RESULT_LIMIT: usize = 5;
    /// Upper clamp for a requested result count.
    pub const MAX_RESULT_LIMIT: usize = 50;
    /// Vendor-ranking cap for ordinary queries.
    pub const VENDOR_LIMIT: usize = 10;
    /// Vendor-ranking cap when the query asks for all vendors.
    pub const EXPANDED_VENDOR_LIMIT: usize = 50;
    /// Phishing-record cap per retrieval.
    pub const PHISHING_LIMIT: usize = 10;
    /// Maximum trend points returned per aggregate.
    pub const TREND_CAP: usize = 30;
}

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Time window applied when the query names none (days).
    pub default_time_range_days: u32,
    /// Window value treated as "all time" (days).
    pub max_time_range_days: u32,
    /// Result count applied when the query names none.
    pub default_result_limit: usize,
    /// Lower clamp for a requested result count.
    pub min_result_limit: usize,
    /// Upper clamp for a requested result count.
    pub max_result_limit: usize,
    /// Vendor-ranking cap for ordinary queries.
    pub vendor_limit: usize,
    /// Vendor-ranking cap when the query asks for every vendor.
    pub expanded_vendor_limit: usize,
    /// Phishing-record cap per retrieval.
    pub phishing_limit: usize,
    /// Maximum trend points returned per aggregate.
    pub trend_cap: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_time_range_days: defaults::DEFAULT_TIME_RANGE_DAYS,
            max_time_range_days: defaults::MAX_TIME_RANGE_DAYS,
            default_result_limit: defaults::DEFAULT_RESULT_LIMIT,
            min_result_limit: defaults::MIN_RESULT_LIMIT,
            max_result_limit: defaults::MAX_RESULT_LIMIT,
            vendor_limit: defaults::VENDOR_LIMIT,
            expanded_vendor_limit: defaults::EXPANDED_VENDOR_LIMIT,
            phishing_limit: defaults::PHISHING_LIMIT,
            trend_cap: defaults::TREND_CAP,
        }
    }
}

impl RetrievalConfig {
    /// Parse a config from a TOML string, falling back to defaults for
    /// missing fields.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
