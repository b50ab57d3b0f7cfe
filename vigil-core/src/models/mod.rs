//! Model types: stored records, the per-request query interpretation,
//! and the retrieval output handed to the LLM layer.

mod cve;
mod phishing;
mod query;
mod retrieval_result;
mod severity;
mod statistics;

pub use cve::CveRecord;
pub use phishing::PhishingRecord;
pub use query::{ExtractedQuery, QueryType};
pub use retrieval_result::RetrievalResult;
pub use severity::Severity;
pub use statistics::{
    PhishingTrendPoint, SeverityCount, ThreatStatistics, TrendPoint, VendorCount,
};
