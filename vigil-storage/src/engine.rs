//! StorageEngine — owns the writer and read pool, applies the schema on
//! open, implements ThreatStore.

use std::path::Path;

use rusqlite::params;

use vigil_core::errors::VigilResult;
use vigil_core::models::{
    CveRecord, PhishingRecord, PhishingTrendPoint, SeverityCount, TrendPoint, VendorCount,
};
use vigil_core::traits::ThreatStore;

use crate::pool::{ReadPool, WriteConnection};
use crate::queries::{self, format_ts};
use crate::schema;
use crate::to_storage_err;

/// Read connections opened for a file-backed engine.
const READ_POOL_SIZE: usize = 4;

/// The main storage engine. Owns the write connection and (for
/// file-backed databases) the read pool, and provides the full
/// ThreatStore interface.
pub struct StorageEngine {
    writer: WriteConnection,
    /// Absent for in-memory engines: separate in-memory connections are
    /// isolated databases, so reads go through the writer instead.
    readers: Option<ReadPool>,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> VigilResult<Self> {
        let engine = Self {
            writer: WriteConnection::open(path)?,
            readers: Some(ReadPool::open(path, READ_POOL_SIZE)?),
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing). All reads route
    /// through the writer.
    pub fn open_in_memory() -> VigilResult<Self> {
        let engine = Self {
            writer: WriteConnection::open_in_memory()?,
            readers: None,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> VigilResult<()> {
        self.writer.with_conn_sync(schema::apply_schema)
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> VigilResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> VigilResult<T>,
    {
        match &self.readers {
            Some(pool) => pool.with_conn(f),
            None => self.writer.with_conn_sync(f),
        }
    }
}

impl ThreatStore for StorageEngine {
    fn search_cves(&self, keywords: &[String], limit: usize) -> VigilResult<Vec<CveRecord>> {
        self.with_reader(|conn| queries::cve_search::search_cves(conn, keywords, limit))
    }

    fn search_phishing(
        &self,
        keywords: &[String],
        include_all: bool,
        limit: usize,
    ) -> VigilResult<Vec<PhishingRecord>> {
        self.with_reader(|conn| {
            queries::phishing_search::search_phishing(conn, keywords, include_all, limit)
        })
    }

    fn severity_distribution(
        &self,
        days: u32,
        vendor: Option<&str>,
    ) -> VigilResult<Vec<SeverityCount>> {
        self.with_reader(|conn| queries::aggregates::severity_distribution(conn, days, vendor))
    }

    fn vendor_ranking(&self, days: u32, limit: usize) -> VigilResult<Vec<VendorCount>> {
        self.with_reader(|conn| queries::aggregates::vendor_ranking(conn, days, limit))
    }

    fn time_trend(
        &self,
        days: u32,
        vendor: Option<&str>,
        cap: usize,
    ) -> VigilResult<Vec<TrendPoint>> {
        self.with_reader(|conn| queries::aggregates::time_trend(conn, days, vendor, cap))
    }

    fn phishing_stats(
        &self,
        days: u32,
        cap: usize,
    ) -> VigilResult<(u64, Vec<PhishingTrendPoint>)> {
        self.with_reader(|conn| queries::aggregates::phishing_stats(conn, days, cap))
    }

    fn count_cves(&self, days: u32, vendor: Option<&str>) -> VigilResult<u64> {
        self.with_reader(|conn| queries::aggregates::count_cves(conn, days, vendor))
    }

    fn insert_cve(&self, record: &CveRecord) -> VigilResult<()> {
        self.writer.with_conn_sync(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO cves
                 (cve_id, description, severity, cvss_score, published_date, vendor, product)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.cve_id,
                    record.description,
                    record.severity.map(|s| s.as_str()),
                    record.cvss_score,
                    record.published_date.as_ref().map(format_ts),
                    record.vendor,
                    record.product,
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }

    fn insert_phishing(&self, record: &PhishingRecord) -> VigilResult<()> {
        self.writer.with_conn_sync(|conn| {
            conn.execute(
                "INSERT INTO phishing_domains
                 (domain, url, source, status, reported_date, target)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.domain,
                    record.url,
                    record.source,
                    record.status,
                    record.reported_date.as_ref().map(format_ts),
                    record.target,
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }
}
