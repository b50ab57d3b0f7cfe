use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A phishing-domain report as ingested by the external collector.
/// Immutable once stored; this workspace only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhishingRecord {
    pub domain: String,
    pub url: Option<String>,
    /// Reporting feed, e.g. `openphish`.
    pub source: Option<String>,
    /// `online` or a feed-specific status.
    pub status: Option<String>,
    pub reported_date: Option<DateTime<Utc>>,
    /// Impersonated brand, when the feed identifies one.
    pub target: Option<String>,
}
