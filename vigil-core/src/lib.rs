//! # vigil-core
//!
//! Foundation crate for the Vigil threat-intelligence retrieval engine.
//! Defines all types, traits, errors, config, and fixed vocabularies.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;
pub mod vocab;

// Re-export the most commonly used types at the crate root.
pub use config::RetrievalConfig;
pub use errors::{VigilError, VigilResult};
pub use models::{
    CveRecord, ExtractedQuery, PhishingRecord, QueryType, RetrievalResult, Severity,
    ThreatStatistics,
};
pub use traits::ThreatStore;
