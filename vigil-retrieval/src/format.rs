//! Rendering a RetrievalResult into the grounding context handed to the
//! language model.
//!
//! Pure and total: every derived field prints a literal "N/A" when
//! absent, so the downstream prompt always sees a stable field set.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, Utc};

use vigil_core::models::{RetrievalResult, ThreatStatistics};

/// The fixed no-data sentence. Not an error: an honest empty answer.
pub const NO_DATA_SENTENCE: &str =
    "Database retrieval result: No relevant threat intelligence data found.";

const NOT_AVAILABLE: &str = "N/A";

/// Format the full grounding context.
pub fn format_context_for_llm(result: &RetrievalResult) -> String {
    if !result.found_relevant_data {
        return NO_DATA_SENTENCE.to_string();
    }

    let mut out = String::from("## Database Retrieval Results\n\n");
    let _ = writeln!(out, "**Query Type**: {}", result.query_type.label());
    let _ = writeln!(out, "**Search Keywords**: {}\n", result.search_query);

    if let Some(stats) = &result.statistics {
        format_statistics(&mut out, stats);
    }

    if !result.cves.is_empty() {
        let query_lower = result.search_query.to_lowercase();
        let wants_id_list = query_lower.contains("cve id")
            || query_lower.contains("cve ids")
            || query_lower.contains("list")
            || query_lower.contains("what are");

        if wants_id_list {
            out.push_str("### 🎯 CVE IDs Found\n\n");
            for (i, cve) in result.cves.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{}. **{}** - {} (CVSS: {})",
                    i + 1,
                    cve.cve_id,
                    cve.severity
                        .map(|s| s.as_str().to_string())
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                    format_score(cve.cvss_score),
                );
            }
            out.push('\n');
        }

        out.push_str("### 🔍 CVE Vulnerability Details\n\n");
        for (i, cve) in result.cves.iter().enumerate() {
            let _ = writeln!(out, "#### {}. {}\n", i + 1, cve.cve_id);
            let _ = writeln!(
                out,
                "- **Severity**: {}",
                cve.severity
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string())
            );
            let _ = writeln!(out, "- **CVSS Score**: {}", format_score(cve.cvss_score));
            let _ = writeln!(out, "- **Affected Vendor**: {}", or_na(cve.vendor.as_deref()));
            let _ = writeln!(out, "- **Affected Product**: {}", or_na(cve.product.as_deref()));
            let _ = writeln!(
                out,
                "- **Published Date**: {}",
                format_detail_date(cve.published_date.as_ref())
            );
            let _ = writeln!(
                out,
                "- **Description**: {}\n",
                or_na(cve.description.as_deref())
            );
        }
    }

    if !result.phishing.is_empty() {
        out.push_str("### 🎣 Phishing Domain Information\n\n");
        for (i, phish) in result.phishing.iter().enumerate() {
            let _ = writeln!(out, "**{}. {}**", i + 1, phish.domain);
            let _ = writeln!(out, "- **URL**: {}", or_na(phish.url.as_deref()));
            let _ = writeln!(out, "- **Status**: {}", or_na(phish.status.as_deref()));
            let _ = writeln!(out, "- **Source**: {}", or_na(phish.source.as_deref()));
            let _ = writeln!(out, "- **Target Brand**: {}", or_na(phish.target.as_deref()));
            let _ = writeln!(
                out,
                "- **Reported Date**: {}\n",
                format_detail_date(phish.reported_date.as_ref())
            );
        }
    }

    out
}

/// Trend sections show at most this many days.
const TREND_DISPLAY_DAYS: usize = 7;

fn format_statistics(out: &mut String, stats: &ThreatStatistics) {
    out.push_str("### 📊 Statistical Analysis\n\n");
    let _ = writeln!(out, "**Time Range**: {}", stats.time_range);
    let _ = writeln!(out, "**Total CVEs**: {}", stats.total_cves);
    let _ = writeln!(out, "**Total Phishing Domains**: {}\n", stats.total_phishing);

    if !stats.severity_distribution.is_empty() {
        out.push_str("#### Severity Distribution\n\n");
        for item in &stats.severity_distribution {
            let percentage = if stats.total_cves > 0 {
                item.count as f64 / stats.total_cves as f64 * 100.0
            } else {
                0.0
            };
            let _ = writeln!(
                out,
                "- **{}**: {} ({percentage:.1}%)",
                item.severity, item.count
            );
        }
        out.push('\n');
    }

    if !stats.vendor_ranking.is_empty() {
        let top_label = if stats.vendor_ranking.len() > 10 {
            format!("(Top {})", stats.vendor_ranking.len())
        } else {
            "(Top 10)".to_string()
        };
        let _ = writeln!(out, "#### Affected Vendor Ranking {top_label}\n");
        for (i, item) in stats.vendor_ranking.iter().enumerate() {
            let _ = write!(out, "{}. **{}**: {} CVEs", i + 1, item.vendor, item.count);
            if item.critical_count > 0 {
                let _ = write!(out, " ({} critical)", item.critical_count);
            }
            out.push('\n');
        }
        out.push('\n');
    }

    if !stats.recent_trend.is_empty() {
        out.push_str("#### CVE Trend (Daily Statistics)\n\n");
        for item in stats.recent_trend.iter().take(TREND_DISPLAY_DAYS) {
            let _ = write!(
                out,
                "- **{}**: {} vulnerabilities",
                format_trend_date(&item.date),
                item.count
            );
            if item.critical_count > 0 {
                let _ = write!(out, " ({} critical)", item.critical_count);
            }
            out.push('\n');
        }
        out.push('\n');
    }

    if !stats.phishing_trend.is_empty() {
        out.push_str("#### Phishing Trend (Daily Statistics)\n\n");
        for item in stats.phishing_trend.iter().take(TREND_DISPLAY_DAYS) {
            let _ = writeln!(
                out,
                "- **{}**: {} phishing domains",
                format_trend_date(&item.date),
                item.count
            );
        }
        out.push('\n');
    }
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{s}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// "Jan 5" style, for trend rows.
fn format_trend_date(date: &NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// "1/5/2024" style, for record detail rows.
fn format_detail_date(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(d) => d.format("%-m/%-d/%Y").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
