//! Property tests for parameter extraction: the clamp invariants must
//! hold for arbitrary input, printable or not.

use proptest::prelude::*;

use vigil_core::config::RetrievalConfig;
use vigil_core::vocab;
use vigil_retrieval::extract::{
    extract_keywords, extract_query, extract_result_limit, extract_time_range_days,
};
use vigil_retrieval::intent::classify;

proptest! {
    #[test]
    fn time_range_always_within_clamps(query in ".*") {
        let cfg = RetrievalConfig::default();
        let days = extract_time_range_days(&query, &cfg);
        prop_assert!((1..=36_500).contains(&days));
    }

    #[test]
    fn result_limit_always_within_clamps(query in ".*") {
        let cfg = RetrievalConfig::default();
        let keywords = extract_keywords(&query);
        let limit = extract_result_limit(&keywords, &cfg);
        prop_assert!((5..=50).contains(&limit));
    }

    #[test]
    fn keywords_are_deduplicated_and_non_trivial(query in ".*") {
        let keywords = extract_keywords(&query);
        let mut seen = std::collections::HashSet::new();
        for k in &keywords {
            prop_assert!(seen.insert(k.clone()), "duplicate keyword {k}");
            prop_assert!(k.chars().count() > 1);
            prop_assert!(!vocab::is_stop_word(k));
        }
    }

    #[test]
    fn classification_is_total(query in ".*") {
        // Just must not panic; the enum result is inherently valid.
        let _ = classify(&query);
    }

    #[test]
    fn full_extraction_upholds_invariants(query in ".*") {
        let cfg = RetrievalConfig::default();
        let extracted = extract_query(&query, &cfg);
        prop_assert!((1..=36_500).contains(&extracted.time_range_days));
        prop_assert!((5..=50).contains(&extracted.result_limit));
        if let Some(vendor) = &extracted.vendor_filter {
            prop_assert!(extracted.keywords.contains(vendor));
        }
    }

    #[test]
    fn numeric_day_counts_round_trip(n in 1u32..=36_500) {
        let cfg = RetrievalConfig::default();
        let days = extract_time_range_days(&format!("past {n} days"), &cfg);
        prop_assert_eq!(days, n);
    }
}
