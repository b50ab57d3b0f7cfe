//! Parameter extraction: time window, keywords, result count, and
//! entity filters from raw query text.
//!
//! Every function here is total over any string input — malformed or
//! empty queries fall back to configured defaults, never to an error.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use vigil_core::config::RetrievalConfig;
use vigil_core::models::{ExtractedQuery, Severity};
use vigil_core::vocab::{
    self, ALL_VENDOR_PHRASES, CVE_ID_RE, PHISHING_TERMS, SEVERITY_WORDS, VENDORS,
};

use crate::intent::classify;

/// A time-range pattern: either a captured number times a unit, or a
/// fixed named range.
enum TimePattern {
    Multiplier(u64),
    Fixed(u32),
}

/// Ordered by priority: explicit numeric ranges win over named ranges,
/// which win over the bare "recent"/"lately" hints.
static TIME_PATTERNS: LazyLock<Vec<(Regex, TimePattern)>> = LazyLock::new(|| {
    let pat = |re: &str| Regex::new(re).expect("valid time-range regex");
    vec![
        (pat(r"(?i)(\d+)\s*days?"), TimePattern::Multiplier(1)),
        (pat(r"(?i)(\d+)\s*weeks?"), TimePattern::Multiplier(7)),
        (pat(r"(?i)(\d+)\s*months?"), TimePattern::Multiplier(30)),
        (pat(r"(?i)(\d+)\s*years?"), TimePattern::Multiplier(365)),
        (pat(r"(?i)past\s+year|last\s+year"), TimePattern::Fixed(365)),
        (pat(r"(?i)past\s+month|last\s+month"), TimePattern::Fixed(30)),
        (pat(r"(?i)past\s+week|last\s+week"), TimePattern::Fixed(7)),
        (pat(r"(?i)this week"), TimePattern::Fixed(7)),
        (pat(r"(?i)this month"), TimePattern::Fixed(30)),
        (pat(r"(?i)this year"), TimePattern::Fixed(365)),
        (pat(r"(?i)recent"), TimePattern::Fixed(7)),
        (pat(r"(?i)lately"), TimePattern::Fixed(7)),
    ]
});

/// Words that widen the window to the full database.
const ALL_TIME_WORDS: &[&str] = &["all", "entire", "total", "database", "every"];

/// Resolve the time window in days. Always within [1, max_time_range_days].
pub fn extract_time_range_days(query: &str, config: &RetrievalConfig) -> u32 {
    let query_lower = query.to_lowercase();
    let max = config.max_time_range_days.max(1);

    if ALL_TIME_WORDS.iter().any(|w| query_lower.contains(w)) {
        return max;
    }

    for (regex, pattern) in TIME_PATTERNS.iter() {
        let Some(caps) = regex.captures(query) else {
            continue;
        };
        let days = match pattern {
            TimePattern::Fixed(days) => u64::from(*days),
            TimePattern::Multiplier(unit) => {
                let Some(n) = caps.get(1) else { continue };
                // Absurdly large counts saturate rather than falling
                // through to a weaker pattern.
                n.as_str().parse::<u64>().unwrap_or(u64::MAX).saturating_mul(*unit)
            }
        };
        return days.clamp(1, u64::from(max)) as u32;
    }

    config.default_time_range_days.clamp(1, max)
}

/// Tokenize the query into normalized keywords: lower-case, punctuation
/// stripped, stop words and one-character tokens dropped. Literal CVE
/// ids (upper-cased), recognized vendor names, and severity words found
/// anywhere in the raw query are re-injected even when the token pass
/// dropped them. Deduplicated in first-occurrence order.
pub fn extract_keywords(query: &str) -> Vec<String> {
    let query_lower = query.to_lowercase();

    let stripped: String = query_lower
        .chars()
        .map(|c| {
            if "?!.,;:'\"()[]{}<>".contains(c) {
                ' '
            } else {
                c
            }
        })
        .collect();

    let mut keywords: Vec<String> = stripped
        .split_whitespace()
        .filter(|token| token.chars().count() > 1 && !vocab::is_stop_word(token))
        .map(String::from)
        .collect();

    for m in CVE_ID_RE.find_iter(query) {
        keywords.push(m.as_str().to_uppercase());
    }

    for vendor in VENDORS {
        if query_lower.contains(vendor) && !keywords.iter().any(|k| k == vendor) {
            keywords.push((*vendor).to_string());
        }
    }

    for severity in SEVERITY_WORDS {
        if query_lower.contains(severity) && !keywords.iter().any(|k| k == severity) {
            keywords.push((*severity).to_string());
        }
    }

    let mut seen = HashSet::new();
    keywords.retain(|k| seen.insert(k.clone()));
    keywords
}

/// Requested record count: the first keyword that parses as an integer,
/// clamped to [min_result_limit, max_result_limit].
pub fn extract_result_limit(keywords: &[String], config: &RetrievalConfig) -> usize {
    let min = config.min_result_limit.min(config.max_result_limit);
    let max = config.max_result_limit.max(min);
    keywords
        .iter()
        .find_map(|k| k.parse::<i64>().ok())
        .map(|n| n.clamp(min as i64, max as i64) as usize)
        .unwrap_or(config.default_result_limit)
        .clamp(min, max)
}

/// First keyword naming a known vendor.
pub fn extract_vendor_filter(keywords: &[String]) -> Option<String> {
    keywords
        .iter()
        .find(|k| vocab::is_vendor(&k.to_lowercase()))
        .cloned()
}

/// First keyword naming a severity level.
pub fn extract_severity_filter(keywords: &[String]) -> Option<Severity> {
    keywords
        .iter()
        .find(|k| vocab::is_severity_word(&k.to_lowercase()))
        .map(|k| Severity::parse(k))
}

/// Whether the query asks for every vendor (raises the ranking cap).
pub fn wants_all_vendors(query: &str) -> bool {
    let query_lower = query.to_lowercase();
    ALL_VENDOR_PHRASES.iter().any(|p| query_lower.contains(p))
}

/// Whether the query touches the phishing data set.
pub fn is_phishing_related(query: &str) -> bool {
    let query_lower = query.to_lowercase();
    PHISHING_TERMS.iter().any(|t| query_lower.contains(t))
}

/// Run the full extraction pipeline over one user question.
pub fn extract_query(query: &str, config: &RetrievalConfig) -> ExtractedQuery {
    let keywords = extract_keywords(query);
    ExtractedQuery {
        query_type: classify(query),
        time_range_days: extract_time_range_days(query, config),
        result_limit: extract_result_limit(&keywords, config),
        vendor_filter: extract_vendor_filter(&keywords),
        severity_filter: extract_severity_filter(&keywords),
        all_vendors: wants_all_vendors(query),
        phishing_related: is_phishing_related(query),
        keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::models::QueryType;

    fn cfg() -> RetrievalConfig {
        RetrievalConfig::default()
    }

    #[test]
    fn named_and_numeric_ranges() {
        assert_eq!(extract_time_range_days("past 2 years", &cfg()), 730);
        assert_eq!(extract_time_range_days("last 3 weeks", &cfg()), 21);
        assert_eq!(extract_time_range_days("past month", &cfg()), 30);
        assert_eq!(extract_time_range_days("this year", &cfg()), 365);
        assert_eq!(extract_time_range_days("anything recent?", &cfg()), 7);
    }

    #[test]
    fn all_time_words_hit_the_sentinel() {
        assert_eq!(extract_time_range_days("entire database", &cfg()), 36_500);
        assert_eq!(extract_time_range_days("every vendor please", &cfg()), 36_500);
    }

    #[test]
    fn empty_query_gets_the_default_window() {
        assert_eq!(extract_time_range_days("", &cfg()), 30);
    }

    #[test]
    fn zero_and_huge_counts_stay_clamped() {
        assert_eq!(extract_time_range_days("0 days", &cfg()), 1);
        assert_eq!(
            extract_time_range_days("99999999999999999999 years", &cfg()),
            36_500
        );
    }

    #[test]
    fn cve_id_survives_stop_word_filtering() {
        let keywords = extract_keywords("tell me about CVE-2023-9999");
        assert!(keywords.iter().any(|k| k == "CVE-2023-9999"));
        assert!(!keywords.iter().any(|k| k == "tell"));
        assert!(!keywords.iter().any(|k| k == "about"));
    }

    #[test]
    fn vendor_and_severity_are_reinjected() {
        // "Microsoft's" tokenizes to "microsoft's"; the substring scan
        // still finds the vendor.
        let keywords = extract_keywords("any critical flaws in Microsoft's stack?");
        assert!(keywords.iter().any(|k| k == "microsoft"));
        assert!(keywords.iter().any(|k| k == "critical"));
    }

    #[test]
    fn stop_words_and_short_tokens_are_dropped() {
        let keywords = extract_keywords("please show me the latest data on x");
        assert!(keywords.is_empty());
    }

    #[test]
    fn keywords_deduplicate_in_first_occurrence_order() {
        let keywords = extract_keywords("openssl openssl heartbleed openssl");
        assert_eq!(keywords, vec!["openssl".to_string(), "heartbleed".to_string()]);
    }

    #[test]
    fn result_limit_clamps_and_defaults() {
        let cfg = cfg();
        assert_eq!(extract_result_limit(&["20".to_string()], &cfg), 20);
        assert_eq!(extract_result_limit(&["2".to_string()], &cfg), 5);
        assert_eq!(extract_result_limit(&["500".to_string()], &cfg), 50);
        assert_eq!(extract_result_limit(&[], &cfg), 10);
        assert_eq!(extract_result_limit(&["openssl".to_string()], &cfg), 10);
    }

    #[test]
    fn filters_come_from_keywords() {
        let q = extract_query("how many critical CVEs for apache this month", &cfg());
        assert_eq!(q.query_type, QueryType::Statistical);
        assert_eq!(q.vendor_filter.as_deref(), Some("apache"));
        assert_eq!(q.severity_filter, Some(Severity::Critical));
        assert_eq!(q.time_range_days, 30);
    }

    #[test]
    fn phishing_and_all_vendor_flags() {
        assert!(is_phishing_related("suspicious domain reports"));
        assert!(!is_phishing_related("kernel use-after-free"));
        assert!(wants_all_vendors("breakdown by each vendor"));
        assert!(!wants_all_vendors("top vendor"));
    }
}
