//! Derived aggregates: severity distribution, vendor ranking, time
//! trends, and window counts.

use rusqlite::{params_from_iter, Connection};

use vigil_core::errors::VigilResult;
use vigil_core::models::{PhishingTrendPoint, Severity, SeverityCount, TrendPoint, VendorCount};

use super::{like_pattern, parse_date, window_cutoff};
use crate::to_storage_err;

/// CVE count per severity over the window, in severity-rank order.
/// NULL severity rows are counted as UNKNOWN.
pub fn severity_distribution(
    conn: &Connection,
    days: u32,
    vendor: Option<&str>,
) -> VigilResult<Vec<SeverityCount>> {
    let mut params = vec![window_cutoff(days)];
    let mut sql = String::from(
        "SELECT COALESCE(severity, 'UNKNOWN') AS severity, COUNT(*) AS count
         FROM cves
         WHERE published_date >= ?1",
    );
    if let Some(vendor) = vendor {
        sql.push_str(" AND LOWER(vendor) LIKE ?2");
        params.push(like_pattern(vendor));
    }
    sql.push_str(
        " GROUP BY severity
          ORDER BY CASE severity
              WHEN 'CRITICAL' THEN 1
              WHEN 'HIGH' THEN 2
              WHEN 'MEDIUM' THEN 3
              WHEN 'LOW' THEN 4
              ELSE 5
          END",
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            let severity: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok(SeverityCount {
                severity: Severity::parse(&severity),
                count: count.max(0) as u64,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(results)
}

/// Vendors by CVE count over the window: count desc, critical-count desc,
/// rows with no vendor excluded, capped at `limit`.
pub fn vendor_ranking(conn: &Connection, days: u32, limit: usize) -> VigilResult<Vec<VendorCount>> {
    let sql = format!(
        "SELECT vendor,
                COUNT(*) AS count,
                SUM(CASE WHEN severity = 'CRITICAL' THEN 1 ELSE 0 END) AS critical_count
         FROM cves
         WHERE published_date >= ?1
           AND vendor IS NOT NULL
           AND vendor != ''
         GROUP BY vendor
         ORDER BY count DESC, critical_count DESC
         LIMIT {limit}"
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([window_cutoff(days)], |row| {
            let count: i64 = row.get(1)?;
            let critical: i64 = row.get(2)?;
            Ok(VendorCount {
                vendor: row.get(0)?,
                count: count.max(0) as u64,
                critical_count: critical.max(0) as u64,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(results)
}

/// Per-day CVE counts over the window, most recent day first, at most
/// `cap` rows.
pub fn time_trend(
    conn: &Connection,
    days: u32,
    vendor: Option<&str>,
    cap: usize,
) -> VigilResult<Vec<TrendPoint>> {
    let mut params = vec![window_cutoff(days)];
    let mut sql = String::from(
        "SELECT DATE(published_date) AS date,
                COUNT(*) AS count,
                SUM(CASE WHEN severity = 'CRITICAL' THEN 1 ELSE 0 END) AS critical_count
         FROM cves
         WHERE published_date >= ?1",
    );
    if let Some(vendor) = vendor {
        sql.push_str(" AND LOWER(vendor) LIKE ?2");
        params.push(like_pattern(vendor));
    }
    sql.push_str(&format!(
        " GROUP BY DATE(published_date) ORDER BY date DESC LIMIT {cap}"
    ));

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            let date: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            let critical: i64 = row.get(2)?;
            Ok((date, count, critical))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let (date, count, critical) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if let Some(date) = parse_date(&date) {
            results.push(TrendPoint {
                date,
                count: count.max(0) as u64,
                critical_count: critical.max(0) as u64,
            });
        }
    }
    Ok(results)
}

/// Phishing total and per-day trend over the window. The trend is
/// capped at `cap` rows; the total is not.
pub fn phishing_stats(
    conn: &Connection,
    days: u32,
    cap: usize,
) -> VigilResult<(u64, Vec<PhishingTrendPoint>)> {
    let cutoff = window_cutoff(days);

    let total: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM phishing_domains WHERE reported_date >= ?1",
            [&cutoff],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let sql = format!(
        "SELECT DATE(reported_date) AS date, COUNT(*) AS count
         FROM phishing_domains
         WHERE reported_date >= ?1
         GROUP BY DATE(reported_date)
         ORDER BY date DESC
         LIMIT {cap}"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([&cutoff], |row| {
            let date: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((date, count))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut trend = Vec::new();
    for row in rows {
        let (date, count) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if let Some(date) = parse_date(&date) {
            trend.push(PhishingTrendPoint {
                date,
                count: count.max(0) as u64,
            });
        }
    }
    Ok((total.max(0) as u64, trend))
}

/// Total CVE count over the window, optionally vendor-filtered.
pub fn count_cves(conn: &Connection, days: u32, vendor: Option<&str>) -> VigilResult<u64> {
    let mut params = vec![window_cutoff(days)];
    let mut sql = String::from("SELECT COUNT(*) FROM cves WHERE published_date >= ?1");
    if let Some(vendor) = vendor {
        sql.push_str(" AND LOWER(vendor) LIKE ?2");
        params.push(like_pattern(vendor));
    }

    let total: i64 = conn
        .query_row(&sql, params_from_iter(params.iter()), |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(total.max(0) as u64)
}
