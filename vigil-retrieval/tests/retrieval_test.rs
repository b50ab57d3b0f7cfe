//! End-to-end retrieval tests against a seeded in-memory store:
//! branch policy, fail-soft behavior, and formatter output.

use std::sync::Arc;

use chrono::{Duration, Utc};

use vigil_core::config::RetrievalConfig;
use vigil_core::errors::{StorageError, VigilResult};
use vigil_core::models::{
    CveRecord, PhishingRecord, PhishingTrendPoint, QueryType, Severity, SeverityCount, TrendPoint,
    VendorCount,
};
use vigil_core::traits::ThreatStore;
use vigil_retrieval::format::{format_context_for_llm, NO_DATA_SENTENCE};
use vigil_retrieval::RetrievalEngine;
use vigil_storage::StorageEngine;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn cve(id: &str, severity: Severity, days_ago: i64, vendor: &str, description: &str) -> CveRecord {
    CveRecord {
        cve_id: id.to_string(),
        description: Some(description.to_string()),
        severity: Some(severity),
        cvss_score: Some(8.1),
        published_date: Some(Utc::now() - Duration::days(days_ago)),
        vendor: Some(vendor.to_string()),
        product: Some("Server".to_string()),
    }
}

fn seeded_engine() -> RetrievalEngine {
    seeded_engine_with(RetrievalConfig::default())
}

fn seeded_engine_with(config: RetrievalConfig) -> RetrievalEngine {
    init_tracing();
    let store = StorageEngine::open_in_memory().expect("in-memory storage");
    let records = [
        cve("CVE-2024-1001", Severity::Critical, 1, "Microsoft", "RCE in Exchange"),
        cve("CVE-2024-1002", Severity::High, 2, "Microsoft", "Privilege escalation in AD"),
        cve("CVE-2024-1003", Severity::High, 3, "Microsoft", "SMB relay weakness"),
        cve("CVE-2024-1004", Severity::Medium, 4, "Apple", "Sandbox escape in WebKit"),
        cve("CVE-2024-1005", Severity::Low, 5, "Google", "XSS in Chrome devtools"),
        cve("CVE-2024-1006", Severity::High, 6, "Apache", "Path traversal in httpd"),
        cve("CVE-2024-1007", Severity::Critical, 7, "Apache", "RCE in httpd modules"),
        cve("CVE-2024-1008", Severity::High, 8, "Cisco", "Buffer overflow in IOS XE"),
        cve("CVE-2024-1009", Severity::High, 9, "Oracle", "SQL injection in WebLogic"),
        cve("CVE-2024-1010", Severity::High, 10, "Cisco", "Auth bypass in ASA"),
        cve("CVE-2024-1011", Severity::High, 11, "Oracle", "Deserialization in Fusion"),
    ];
    for r in &records {
        store.insert_cve(r).expect("insert cve");
    }
    for (domain, target, days_ago) in [
        ("login-micros0ft.com", "Microsoft", 1),
        ("faceb00k-verify.net", "Facebook", 2),
    ] {
        store
            .insert_phishing(&PhishingRecord {
                domain: domain.to_string(),
                url: Some(format!("https://{domain}/login")),
                source: Some("openphish".to_string()),
                status: Some("online".to_string()),
                reported_date: Some(Utc::now() - Duration::days(days_ago)),
                target: Some(target.to_string()),
            })
            .expect("insert phishing");
    }
    RetrievalEngine::new(Arc::new(store), config)
}

#[tokio::test]
async fn unmatched_specific_query_yields_no_data_sentence() {
    let engine = seeded_engine();
    let result = engine.retrieve_relevant_data("zzzznonexistentterm").await;
    assert_eq!(result.query_type, QueryType::Specific);
    assert!(!result.found_relevant_data);
    assert!(result.cves.is_empty());
    assert!(result.phishing.is_empty());
    assert!(result.statistics.is_none());
    assert_eq!(format_context_for_llm(&result), NO_DATA_SENTENCE);
}

#[tokio::test]
async fn statistical_query_returns_aggregates_not_records() {
    let engine = seeded_engine();
    let result = engine
        .retrieve_relevant_data("how many CVEs were published this month?")
        .await;
    assert_eq!(result.query_type, QueryType::Statistical);
    let stats = result.statistics.as_ref().expect("statistics present");
    assert_eq!(stats.total_cves, 11);
    assert_eq!(stats.time_range, "30 days");
    assert!(result.cves.is_empty());
    assert!(result.phishing.is_empty());
    assert!(result.found_relevant_data);

    let sum: u64 = stats.severity_distribution.iter().map(|s| s.count).sum();
    assert_eq!(sum, stats.total_cves);
}

#[tokio::test]
async fn ranking_query_drills_into_top_vendor() {
    let engine = seeded_engine();
    let result = engine
        .retrieve_relevant_data("vendor ranking for this month")
        .await;
    assert_eq!(result.query_type, QueryType::Statistical);
    let stats = result.statistics.as_ref().unwrap();
    assert_eq!(stats.vendor_ranking[0].vendor, "Microsoft");
    assert!(stats
        .vendor_ranking
        .windows(2)
        .all(|w| w[0].count > w[1].count
            || (w[0].count == w[1].count && w[0].critical_count >= w[1].critical_count)));
    // Drill-down: top vendor's CVEs attached, capped at 5.
    assert!(!result.cves.is_empty());
    assert!(result.cves.len() <= 5);
    assert!(result
        .cves
        .iter()
        .all(|c| c.vendor.as_deref() == Some("Microsoft")));
}

#[tokio::test]
async fn phishing_statistical_query_attaches_recent_reports() {
    let engine = seeded_engine();
    let result = engine
        .retrieve_relevant_data("how many phishing domains were reported this week?")
        .await;
    assert_eq!(result.query_type, QueryType::Statistical);
    assert_eq!(result.phishing.len(), 2);
    let stats = result.statistics.as_ref().unwrap();
    assert_eq!(stats.total_phishing, 2);
    assert_eq!(stats.time_range, "7 days");
}

#[tokio::test]
async fn mixed_query_populates_all_three() {
    let engine = seeded_engine();
    let result = engine
        .retrieve_relevant_data("how many CVEs for Microsoft, list them")
        .await;
    assert_eq!(result.query_type, QueryType::Mixed);
    assert!(result.statistics.is_some());
    assert!(!result.cves.is_empty());
    assert!(result
        .cves
        .iter()
        .all(|c| c.vendor.as_deref() == Some("Microsoft")));
    // "microsoft" keyword also matches the impersonated-brand column.
    assert_eq!(result.phishing.len(), 1);
    assert_eq!(result.phishing[0].domain, "login-micros0ft.com");
}

#[tokio::test]
async fn specific_query_with_many_hits_gains_statistics_supplement() {
    let engine = seeded_engine();
    // Six+ severity-filtered hits force the supplementary summary.
    let result = engine
        .retrieve_relevant_data("show me high severity vulnerabilities")
        .await;
    assert_eq!(result.query_type, QueryType::Specific);
    assert!(result.cves.len() > 5);
    assert!(result.statistics.is_some());
}

#[tokio::test]
async fn specific_query_with_few_hits_skips_statistics() {
    let engine = seeded_engine();
    let result = engine
        .retrieve_relevant_data("show me CVE-2024-1004 details")
        .await;
    assert_eq!(result.query_type, QueryType::Specific);
    assert_eq!(result.cves.len(), 1);
    assert_eq!(result.cves[0].cve_id, "CVE-2024-1004");
    assert!(result.statistics.is_none());
}

#[tokio::test]
async fn configured_caps_reach_the_store_queries() {
    let engine = seeded_engine_with(RetrievalConfig {
        phishing_limit: 1,
        trend_cap: 1,
        ..RetrievalConfig::default()
    });
    let result = engine
        .retrieve_relevant_data("how many phishing domains were reported this week?")
        .await;
    assert_eq!(result.phishing.len(), 1);
    let stats = result.statistics.as_ref().unwrap();
    assert_eq!(stats.recent_trend.len(), 1);
    assert_eq!(stats.phishing_trend.len(), 1);
    // The trend cap truncates per-day rows; window totals are untouched.
    assert_eq!(stats.total_phishing, 2);
}

#[tokio::test]
async fn all_time_window_is_labelled() {
    let engine = seeded_engine();
    let result = engine
        .retrieve_relevant_data("severity distribution across the entire database")
        .await;
    let stats = result.statistics.as_ref().unwrap();
    assert_eq!(stats.time_range, "all time");
}

#[tokio::test]
async fn retrieval_is_idempotent_over_unchanged_data() {
    let engine = seeded_engine();
    let query = "how many CVEs for Microsoft, list them";
    let first = engine.retrieve_relevant_data(query).await;
    let second = engine.retrieve_relevant_data(query).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn keywords_echo_into_the_search_query_field() {
    let engine = seeded_engine();
    let result = engine
        .retrieve_relevant_data("tell me about CVE-2024-1001")
        .await;
    assert!(result.search_query.contains("CVE-2024-1001"));
    assert!(!result.search_query.contains("tell"));
}

// ---------------------------------------------------------------------------
// Fail-soft behavior
// ---------------------------------------------------------------------------

/// Store double where every query fails.
struct FailingStore;

fn boom<T>() -> VigilResult<T> {
    Err(StorageError::Sqlite {
        message: "connection lost".to_string(),
    }
    .into())
}

impl ThreatStore for FailingStore {
    fn search_cves(&self, _: &[String], _: usize) -> VigilResult<Vec<CveRecord>> {
        boom()
    }
    fn search_phishing(
        &self,
        _: &[String],
        _: bool,
        _: usize,
    ) -> VigilResult<Vec<PhishingRecord>> {
        boom()
    }
    fn severity_distribution(
        &self,
        _: u32,
        _: Option<&str>,
    ) -> VigilResult<Vec<SeverityCount>> {
        boom()
    }
    fn vendor_ranking(&self, _: u32, _: usize) -> VigilResult<Vec<VendorCount>> {
        boom()
    }
    fn time_trend(&self, _: u32, _: Option<&str>, _: usize) -> VigilResult<Vec<TrendPoint>> {
        boom()
    }
    fn phishing_stats(&self, _: u32, _: usize) -> VigilResult<(u64, Vec<PhishingTrendPoint>)> {
        boom()
    }
    fn count_cves(&self, _: u32, _: Option<&str>) -> VigilResult<u64> {
        boom()
    }
    fn insert_cve(&self, _: &CveRecord) -> VigilResult<()> {
        boom()
    }
    fn insert_phishing(&self, _: &PhishingRecord) -> VigilResult<()> {
        boom()
    }
}

#[tokio::test]
async fn broken_store_never_surfaces_an_error() {
    init_tracing();
    let engine = RetrievalEngine::new(Arc::new(FailingStore), RetrievalConfig::default());

    let specific = engine.retrieve_relevant_data("show me openssl flaws").await;
    assert!(!specific.found_relevant_data);
    assert_eq!(format_context_for_llm(&specific), NO_DATA_SENTENCE);

    // Statistical queries still produce a (zeroed) aggregate: an honest
    // "0 in this window" answer rather than a failure.
    let statistical = engine.retrieve_relevant_data("how many CVEs this week").await;
    let stats = statistical.statistics.as_ref().unwrap();
    assert_eq!(stats.total_cves, 0);
    assert!(stats.severity_distribution.is_empty());
    assert!(stats.vendor_ranking.is_empty());
}
