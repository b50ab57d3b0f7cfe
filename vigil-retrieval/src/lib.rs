//! # vigil-retrieval
//!
//! The retrieval engine behind the threat-intel chat assistant. Takes a
//! free-text question, classifies its intent, extracts structured query
//! parameters, fans out the right store queries, and renders the results
//! into a grounding context for the language model.
//!
//! The pipeline is fail-soft end to end: extraction is total over any
//! input, each store query defaults to empty on failure, and the worst
//! observable outcome is a "no relevant data" result — never an error
//! surfaced to the conversation.

pub mod engine;
pub mod extract;
pub mod format;
pub mod intent;
pub mod stats;

pub use engine::RetrievalEngine;
pub use format::format_context_for_llm;
