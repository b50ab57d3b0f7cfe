//! RetrievalEngine: orchestrates the full pipeline.
//!
//! query → classify + extract → branch on query type → concurrent store
//! fan-out → assemble RetrievalResult.
//!
//! Branch policy: specific questions get raw records; statistical
//! questions get aggregates; ambiguous or compound questions get both,
//! to avoid under-answering.

use std::sync::Arc;

use tracing::{debug, info};

use vigil_core::config::RetrievalConfig;
use vigil_core::models::{
    CveRecord, ExtractedQuery, PhishingRecord, QueryType, RetrievalResult, ThreatStatistics,
};
use vigil_core::traits::ThreatStore;

use crate::extract::extract_query;
use crate::stats::{gather_statistics, run_defaulting};

/// CVE drill-down size for the statistical branch's top-vendor lookup.
const TOP_VENDOR_CVE_LIMIT: usize = 5;

/// Specific-branch threshold: more hits than this and a statistics
/// summary is attached as supplementary context.
const STATS_SUPPLEMENT_THRESHOLD: usize = 5;

/// The main retrieval engine. Stateless across requests; every call
/// re-runs extraction and fans out fresh store queries.
pub struct RetrievalEngine {
    store: Arc<dyn ThreatStore>,
    config: RetrievalConfig,
}

impl RetrievalEngine {
    pub fn new(store: Arc<dyn ThreatStore>, config: RetrievalConfig) -> Self {
        Self { store, config }
    }

    /// The sole entry point: never fails. Extraction is total, every
    /// store query defaults to empty on failure, and the worst outcome
    /// is a result with `found_relevant_data == false`.
    pub async fn retrieve_relevant_data(&self, user_query: &str) -> RetrievalResult {
        let extracted = extract_query(user_query, &self.config);
        debug!(
            query_type = ?extracted.query_type,
            keywords = ?extracted.keywords,
            time_range_days = extracted.time_range_days,
            result_limit = extracted.result_limit,
            "extracted query parameters"
        );

        let vendor_limit = if extracted.all_vendors {
            self.config.expanded_vendor_limit
        } else {
            self.config.vendor_limit
        };

        let (cves, phishing, statistics) = match extracted.query_type {
            QueryType::Statistical => {
                self.retrieve_statistical(user_query, &extracted, vendor_limit)
                    .await
            }
            QueryType::Mixed => self.retrieve_mixed(&extracted, vendor_limit).await,
            QueryType::Specific => self.retrieve_specific(&extracted, vendor_limit).await,
        };

        info!(
            cves = cves.len(),
            phishing = phishing.len(),
            has_statistics = statistics.is_some(),
            "retrieval complete"
        );

        RetrievalResult::new(
            cves,
            phishing,
            statistics,
            extracted.keywords.join(", "),
            extracted.query_type,
        )
    }

    /// Statistical: the aggregate is the answer. Phishing-related
    /// queries also get the recent phishing set; ranking questions get a
    /// drill-down into the top-ranked vendor's CVEs.
    async fn retrieve_statistical(
        &self,
        user_query: &str,
        extracted: &ExtractedQuery,
        vendor_limit: usize,
    ) -> (Vec<CveRecord>, Vec<PhishingRecord>, Option<ThreatStatistics>) {
        let statistics = gather_statistics(
            &self.store,
            extracted.time_range_days,
            extracted.vendor_filter.clone(),
            vendor_limit,
            self.config.trend_cap,
            self.config.max_time_range_days,
        )
        .await;

        let phishing = if extracted.phishing_related {
            self.search_phishing(extracted.keywords.clone(), true).await
        } else {
            Vec::new()
        };

        let query_lower = user_query.to_lowercase();
        let mut cves = Vec::new();
        if query_lower.contains("ranking") || query_lower.contains("top") {
            if let Some(top_vendor) = statistics.vendor_ranking.first().map(|v| v.vendor.clone()) {
                cves = self
                    .search_cves(vec![top_vendor], TOP_VENDOR_CVE_LIMIT)
                    .await;
            }
        }

        (cves, phishing, Some(statistics))
    }

    /// Mixed: records and aggregates, all three fetches concurrent.
    async fn retrieve_mixed(
        &self,
        extracted: &ExtractedQuery,
        vendor_limit: usize,
    ) -> (Vec<CveRecord>, Vec<PhishingRecord>, Option<ThreatStatistics>) {
        let (cves, phishing, statistics) = tokio::join!(
            self.search_cves(extracted.keywords.clone(), extracted.result_limit),
            self.search_phishing(extracted.keywords.clone(), extracted.phishing_related),
            gather_statistics(
                &self.store,
                extracted.time_range_days,
                extracted.vendor_filter.clone(),
                vendor_limit,
                self.config.trend_cap,
                self.config.max_time_range_days,
            ),
        );
        (cves, phishing, Some(statistics))
    }

    /// Specific: records only — unless the hit count is large enough
    /// that a statistics summary helps frame them.
    async fn retrieve_specific(
        &self,
        extracted: &ExtractedQuery,
        vendor_limit: usize,
    ) -> (Vec<CveRecord>, Vec<PhishingRecord>, Option<ThreatStatistics>) {
        let (cves, phishing) = tokio::join!(
            self.search_cves(extracted.keywords.clone(), extracted.result_limit),
            self.search_phishing(extracted.keywords.clone(), extracted.phishing_related),
        );

        let statistics = if cves.len() > STATS_SUPPLEMENT_THRESHOLD {
            Some(
                gather_statistics(
                    &self.store,
                    extracted.time_range_days,
                    extracted.vendor_filter.clone(),
                    vendor_limit,
                    self.config.trend_cap,
                    self.config.max_time_range_days,
                )
                .await,
            )
        } else {
            None
        };

        (cves, phishing, statistics)
    }

    async fn search_cves(&self, keywords: Vec<String>, limit: usize) -> Vec<CveRecord> {
        let store = Arc::clone(&self.store);
        run_defaulting("cve_search", move || store.search_cves(&keywords, limit)).await
    }

    async fn search_phishing(
        &self,
        keywords: Vec<String>,
        include_all: bool,
    ) -> Vec<PhishingRecord> {
        let store = Arc::clone(&self.store);
        let limit = self.config.phishing_limit;
        run_defaulting("phishing_search", move || {
            store.search_phishing(&keywords, include_all, limit)
        })
        .await
    }
}
