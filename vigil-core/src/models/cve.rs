use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Severity;

/// A vulnerability record as ingested by the external collector.
/// Immutable once stored; this workspace only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CveRecord {
    /// Canonical identifier, e.g. `CVE-2024-1234`.
    pub cve_id: String,
    pub description: Option<String>,
    pub severity: Option<Severity>,
    /// CVSS score, 0–10.
    pub cvss_score: Option<f64>,
    pub published_date: Option<DateTime<Utc>>,
    pub vendor: Option<String>,
    pub product: Option<String>,
}
