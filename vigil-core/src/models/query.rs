use serde::{Deserialize, Serialize};

use super::Severity;

/// Classifier output: what shape of answer the user is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// Concrete records wanted (the fail-open default).
    Specific,
    /// Aggregates wanted.
    Statistical,
    /// Both cue sets matched; return records and aggregates.
    Mixed,
}

impl QueryType {
    /// Human-readable label used in the grounding context header.
    pub fn label(self) -> &'static str {
        match self {
            QueryType::Specific => "Specific Query",
            QueryType::Statistical => "Statistical Analysis",
            QueryType::Mixed => "Mixed Query",
        }
    }
}

/// Structured interpretation of one user question. Ephemeral, rebuilt per
/// request. `time_range_days` and `result_limit` are always within their
/// clamps regardless of input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedQuery {
    pub query_type: QueryType,
    /// Normalized tokens, deduplicated in first-occurrence order. May
    /// include upper-cased CVE ids, a vendor name, a severity word, and
    /// a numeric count.
    pub keywords: Vec<String>,
    /// Days, in [1, 36500]; 36500 means "all time".
    pub time_range_days: u32,
    /// Requested record count, clamped to [5, 50].
    pub result_limit: usize,
    /// First keyword matching the fixed vendor list, if any.
    pub vendor_filter: Option<String>,
    /// First keyword matching the severity list, if any.
    pub severity_filter: Option<Severity>,
    /// Query asked for every vendor; raises the vendor-ranking cap.
    pub all_vendors: bool,
    /// Query mentions phishing/domain/fraud terms.
    pub phishing_related: bool,
}
