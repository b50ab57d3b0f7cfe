use crate::errors::VigilResult;
use crate::models::{
    CveRecord, PhishingRecord, PhishingTrendPoint, SeverityCount, TrendPoint, VendorCount,
};

/// Read access to the vulnerability and phishing stores, plus the derived
/// aggregates. Methods are blocking; the retrieval engine fans them out
/// on blocking tasks. Implemented by `vigil-storage::StorageEngine` and
/// by test doubles.
pub trait ThreatStore: Send + Sync {
    // --- Record search ---

    /// Search CVEs by extracted keywords.
    ///
    /// Empty keywords → most recent `limit` by publish date. A severity
    /// keyword filters by exact severity; a vendor keyword filters by
    /// case-insensitive vendor substring; only when neither is present do
    /// the remaining free-text keywords OR-match across
    /// id/description/vendor/product. Results are ordered by severity
    /// rank then publish date descending.
    fn search_cves(&self, keywords: &[String], limit: usize) -> VigilResult<Vec<CveRecord>>;

    /// Search phishing reports. `include_all` → most recent `limit`
    /// regardless of keywords; empty keywords otherwise → empty; else
    /// OR-substring across domain/url/target/source, most recent `limit`.
    fn search_phishing(
        &self,
        keywords: &[String],
        include_all: bool,
        limit: usize,
    ) -> VigilResult<Vec<PhishingRecord>>;

    // --- Aggregates ---

    /// CVE count per severity over the window, severity-rank order.
    fn severity_distribution(
        &self,
        days: u32,
        vendor: Option<&str>,
    ) -> VigilResult<Vec<SeverityCount>>;

    /// Vendors by CVE count (count desc, critical desc), excluding rows
    /// with no vendor, capped at `limit`.
    fn vendor_ranking(&self, days: u32, limit: usize) -> VigilResult<Vec<VendorCount>>;

    /// Per-day CVE counts over the window, most recent first, at most
    /// `cap` rows.
    fn time_trend(
        &self,
        days: u32,
        vendor: Option<&str>,
        cap: usize,
    ) -> VigilResult<Vec<TrendPoint>>;

    /// Phishing total plus per-day trend over the window (at most `cap`
    /// trend rows; the total is the full window count).
    fn phishing_stats(&self, days: u32, cap: usize)
        -> VigilResult<(u64, Vec<PhishingTrendPoint>)>;

    /// Total CVE count over the window, optionally vendor-filtered.
    fn count_cves(&self, days: u32, vendor: Option<&str>) -> VigilResult<u64>;

    // --- Ingestion (external collector + tests) ---

    fn insert_cve(&self, record: &CveRecord) -> VigilResult<()>;
    fn insert_phishing(&self, record: &PhishingRecord) -> VigilResult<()>;
}
