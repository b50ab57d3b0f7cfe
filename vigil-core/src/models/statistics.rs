use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Severity;

/// One row of the severity-distribution aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCount {
    pub severity: Severity,
    pub count: u64,
}

/// One row of the vendor ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorCount {
    pub vendor: String,
    pub count: u64,
    pub critical_count: u64,
}

/// One day of the CVE time trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: u64,
    pub critical_count: u64,
}

/// One day of the phishing time trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhishingTrendPoint {
    pub date: NaiveDate,
    pub count: u64,
}

/// Composed statistics aggregate for one time window.
///
/// Ordering invariants: `severity_distribution` is in severity-rank
/// order; `vendor_ranking` is count desc then critical_count desc;
/// both trends are most-recent-first and capped at the configured
/// trend cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatStatistics {
    pub total_cves: u64,
    pub total_phishing: u64,
    pub severity_distribution: Vec<SeverityCount>,
    pub vendor_ranking: Vec<VendorCount>,
    pub recent_trend: Vec<TrendPoint>,
    pub phishing_trend: Vec<PhishingTrendPoint>,
    /// Human label: "N days", or "all time" at the sentinel window.
    pub time_range: String,
}
