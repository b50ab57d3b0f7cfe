//! Query classification: does the question want concrete records,
//! aggregates, or both?

use vigil_core::models::QueryType;
use vigil_core::vocab::{CVE_ID_RE, SPECIFIC_CUES, STATISTICAL_CUES};

/// Classify a raw user query.
///
/// Both cue sets matching → Mixed. Only specific cues (or a literal CVE
/// id) → Specific. Only statistical cues → Statistical. Neither →
/// Specific: failing open to the detailed response mode beats answering
/// a concrete question with aggregates.
pub fn classify(query: &str) -> QueryType {
    let query_lower = query.to_lowercase();

    let has_specific = SPECIFIC_CUES.iter().any(|cue| query_lower.contains(cue))
        || CVE_ID_RE.is_match(query)
        || (query_lower.contains("cve")
            && (query_lower.contains("show")
                || query_lower.contains("list")
                || query_lower.contains("give")));

    let has_statistical = STATISTICAL_CUES.iter().any(|cue| query_lower.contains(cue));

    match (has_statistical, has_specific) {
        (true, true) => QueryType::Mixed,
        (false, true) => QueryType::Specific,
        (true, false) => QueryType::Statistical,
        (false, false) => QueryType::Specific,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_question_is_statistical() {
        assert_eq!(classify("how many critical CVEs this month"), QueryType::Statistical);
        assert_eq!(classify("severity distribution for the past year"), QueryType::Statistical);
    }

    #[test]
    fn record_question_is_specific() {
        assert_eq!(classify("show me CVE-2024-1234 details"), QueryType::Specific);
        assert_eq!(classify("describe the impact of the log4j flaw"), QueryType::Specific);
    }

    #[test]
    fn both_cue_sets_make_mixed() {
        assert_eq!(classify("how many CVEs for Microsoft, list them"), QueryType::Mixed);
    }

    #[test]
    fn literal_id_alone_is_specific() {
        assert_eq!(classify("cve_2023_9999?"), QueryType::Specific);
    }

    #[test]
    fn no_cues_fail_open_to_specific() {
        assert_eq!(classify("openssl heartbleed"), QueryType::Specific);
        assert_eq!(classify(""), QueryType::Specific);
    }
}
