//! Keyword search over the `cves` table.

use rusqlite::{params_from_iter, Connection, Row};
use tracing::debug;

use vigil_core::errors::VigilResult;
use vigil_core::models::{CveRecord, Severity};
use vigil_core::vocab;

use super::{like_pattern, parse_ts};
use crate::to_storage_err;

const CVE_COLUMNS: &str = "cve_id, description, severity, cvss_score, published_date, vendor, product";

/// Severity-rank sort clause shared by every CVE query.
const SEVERITY_RANK_ORDER: &str = "CASE severity
        WHEN 'CRITICAL' THEN 1
        WHEN 'HIGH' THEN 2
        WHEN 'MEDIUM' THEN 3
        WHEN 'LOW' THEN 4
        ELSE 5
    END";

/// Search CVE records by extracted keywords.
///
/// Filter precedence is a documented product policy: a severity keyword
/// filters by exact severity, a vendor keyword by vendor substring, and
/// only when neither is present do the remaining free-text keywords
/// OR-match across id/description/vendor/product. Numeric tokens are
/// result counts, never search terms.
pub fn search_cves(
    conn: &Connection,
    keywords: &[String],
    limit: usize,
) -> VigilResult<Vec<CveRecord>> {
    if keywords.is_empty() {
        return recent_cves(conn, limit);
    }

    let requested_severity = keywords
        .iter()
        .find(|k| vocab::is_severity_word(&k.to_lowercase()));
    let requested_vendor = keywords.iter().find(|k| vocab::is_vendor(&k.to_lowercase()));
    let search_keywords: Vec<&String> = keywords
        .iter()
        .filter(|k| {
            !vocab::is_severity_word(&k.to_lowercase())
                && !vocab::is_vendor(&k.to_lowercase())
                && k.parse::<i64>().is_err()
        })
        .collect();

    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<String> = Vec::new();

    if let Some(severity) = requested_severity {
        clauses.push(format!("severity = ?{}", params.len() + 1));
        params.push(severity.to_uppercase());
    }

    if let Some(vendor) = requested_vendor {
        clauses.push(format!("LOWER(vendor) LIKE ?{}", params.len() + 1));
        params.push(like_pattern(vendor));
    }

    if !search_keywords.is_empty() && requested_severity.is_none() && requested_vendor.is_none() {
        let mut or_terms = Vec::with_capacity(search_keywords.len());
        for keyword in &search_keywords {
            let idx = params.len() + 1;
            or_terms.push(format!(
                "(LOWER(cve_id) LIKE ?{idx} OR LOWER(description) LIKE ?{idx} \
                 OR LOWER(vendor) LIKE ?{idx} OR LOWER(product) LIKE ?{idx})"
            ));
            params.push(like_pattern(keyword));
        }
        clauses.push(format!("({})", or_terms.join(" OR ")));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };

    let sql = format!(
        "SELECT {CVE_COLUMNS} FROM cves
         {where_clause}
         ORDER BY {SEVERITY_RANK_ORDER}, published_date DESC
         LIMIT {limit}"
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), parse_cve_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let results = collect_cves(rows)?;
    debug!(
        keywords = keywords.len(),
        severity = requested_severity.is_some(),
        vendor = requested_vendor.is_some(),
        results = results.len(),
        "cve search"
    );
    Ok(results)
}

/// Most recent CVEs by publish date, used when no keywords survived
/// extraction.
fn recent_cves(conn: &Connection, limit: usize) -> VigilResult<Vec<CveRecord>> {
    let sql = format!(
        "SELECT {CVE_COLUMNS} FROM cves
         ORDER BY published_date DESC
         LIMIT {limit}"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], parse_cve_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect_cves(rows)
}

pub(crate) fn parse_cve_row(row: &Row<'_>) -> rusqlite::Result<CveRecord> {
    let severity: Option<String> = row.get(2)?;
    let published: Option<String> = row.get(4)?;
    Ok(CveRecord {
        cve_id: row.get(0)?,
        description: row.get(1)?,
        severity: severity.map(|s| Severity::parse(&s)),
        cvss_score: row.get(3)?,
        published_date: published.as_deref().and_then(parse_ts),
        vendor: row.get(5)?,
        product: row.get(6)?,
    })
}

fn collect_cves<I>(rows: I) -> VigilResult<Vec<CveRecord>>
where
    I: Iterator<Item = rusqlite::Result<CveRecord>>,
{
    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(results)
}
