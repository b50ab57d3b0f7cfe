//! Keyword search over the `phishing_domains` table.

use rusqlite::{params_from_iter, Connection, Row};

use vigil_core::errors::VigilResult;
use vigil_core::models::PhishingRecord;

use super::{like_pattern, parse_ts};
use crate::to_storage_err;

const PHISHING_COLUMNS: &str = "domain, url, source, status, reported_date, target";

/// Search phishing reports, capped at `limit`.
///
/// `include_all` returns the most recent reports regardless of keywords
/// (used when the query is phishing-related but has no matching terms).
/// Without it, empty keywords yield an empty result rather than noise.
pub fn search_phishing(
    conn: &Connection,
    keywords: &[String],
    include_all: bool,
    limit: usize,
) -> VigilResult<Vec<PhishingRecord>> {
    if include_all {
        let sql = format!(
            "SELECT {PHISHING_COLUMNS} FROM phishing_domains
             ORDER BY reported_date DESC
             LIMIT {limit}"
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map([], parse_phishing_row)
            .map_err(|e| to_storage_err(e.to_string()))?;
        return collect_phishing(rows);
    }

    if keywords.is_empty() {
        return Ok(Vec::new());
    }

    let mut or_terms = Vec::with_capacity(keywords.len());
    let mut params = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let idx = params.len() + 1;
        or_terms.push(format!(
            "(LOWER(domain) LIKE ?{idx} OR LOWER(url) LIKE ?{idx} \
             OR LOWER(target) LIKE ?{idx} OR LOWER(source) LIKE ?{idx})"
        ));
        params.push(like_pattern(keyword));
    }

    let sql = format!(
        "SELECT {PHISHING_COLUMNS} FROM phishing_domains
         WHERE {}
         ORDER BY reported_date DESC
         LIMIT {limit}",
        or_terms.join(" OR ")
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), parse_phishing_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect_phishing(rows)
}

pub(crate) fn parse_phishing_row(row: &Row<'_>) -> rusqlite::Result<PhishingRecord> {
    let reported: Option<String> = row.get(4)?;
    Ok(PhishingRecord {
        domain: row.get(0)?,
        url: row.get(1)?,
        source: row.get(2)?,
        status: row.get(3)?,
        reported_date: reported.as_deref().and_then(parse_ts),
        target: row.get(5)?,
    })
}

fn collect_phishing<I>(rows: I) -> VigilResult<Vec<PhishingRecord>>
where
    I: Iterator<Item = rusqlite::Result<PhishingRecord>>,
{
    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(results)
}
