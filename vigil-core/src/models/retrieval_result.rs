use serde::{Deserialize, Serialize};

use super::{CveRecord, PhishingRecord, QueryType, ThreatStatistics};

/// Everything one retrieval pass found. Ephemeral; handed to the
/// formatter and discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub cves: Vec<CveRecord>,
    pub phishing: Vec<PhishingRecord>,
    pub statistics: Option<ThreatStatistics>,
    /// True iff any of cves/phishing/statistics is non-empty. Derived in
    /// the constructor, never set independently.
    pub found_relevant_data: bool,
    /// Extracted keywords joined with ", "; echoed for the LLM header.
    pub search_query: String,
    pub query_type: QueryType,
}

impl RetrievalResult {
    /// Assemble a result; `found_relevant_data` is computed, not passed.
    pub fn new(
        cves: Vec<CveRecord>,
        phishing: Vec<PhishingRecord>,
        statistics: Option<ThreatStatistics>,
        search_query: String,
        query_type: QueryType,
    ) -> Self {
        let found_relevant_data =
            !cves.is_empty() || !phishing.is_empty() || statistics.is_some();
        Self {
            cves,
            phishing,
            statistics,
            found_relevant_data,
            search_query,
            query_type,
        }
    }

    /// The fail-soft fallback: nothing found, specific query type.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), None, String::new(), QueryType::Specific)
    }
}
