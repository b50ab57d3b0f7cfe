//! Parameterized read queries over the threat schema.
//!
//! Timestamps are stored as `YYYY-MM-DD HH:MM:SS` UTC text so SQLite's
//! `DATE()` and lexicographic comparison both work on them. Time windows
//! are resolved to a cutoff timestamp in Rust and bound as a parameter.

pub mod aggregates;
pub mod cve_search;
pub mod phishing_search;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// Stored timestamp format.
const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp in the stored format.
pub fn format_ts(dt: &DateTime<Utc>) -> String {
    dt.format(TS_FORMAT).to_string()
}

/// Parse a stored timestamp. Malformed values read back as None.
pub fn parse_ts(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, TS_FORMAT)
        .ok()
        .map(|ndt| ndt.and_utc())
}

/// Parse a `DATE()` result.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Cutoff timestamp for an N-day window ending now.
pub fn window_cutoff(days: u32) -> String {
    format_ts(&(Utc::now() - Duration::days(i64::from(days))))
}

/// Case-insensitive substring pattern for a `LOWER(col) LIKE ?` clause.
pub fn like_pattern(term: &str) -> String {
    format!("%{}%", term.to_lowercase())
}
