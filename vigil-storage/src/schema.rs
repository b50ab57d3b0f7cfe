//! Table DDL for the threat schema.
//!
//! The external collector owns ingestion; this is the schema the query
//! layer expects. Idempotent, applied on engine open.

use rusqlite::Connection;

use vigil_core::errors::{StorageError, VigilResult};

/// Create the `cves` and `phishing_domains` tables and their indexes.
pub fn apply_schema(conn: &Connection) -> VigilResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS cves (
            cve_id          TEXT PRIMARY KEY,
            description     TEXT,
            severity        TEXT,
            cvss_score      REAL,
            published_date  TEXT,
            vendor          TEXT,
            product         TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_cves_published ON cves(published_date);
        CREATE INDEX IF NOT EXISTS idx_cves_severity ON cves(severity);
        CREATE INDEX IF NOT EXISTS idx_cves_vendor ON cves(vendor);

        CREATE TABLE IF NOT EXISTS phishing_domains (
            domain          TEXT NOT NULL,
            url             TEXT,
            source          TEXT,
            status          TEXT,
            reported_date   TEXT,
            target          TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_phishing_reported ON phishing_domains(reported_date);
        ",
    )
    .map_err(|e| StorageError::SchemaFailed {
        reason: e.to_string(),
    })?;
    Ok(())
}
