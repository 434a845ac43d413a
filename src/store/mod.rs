//! SQLite change-record storage.
//!
//! One table holds the per-page change records the crawl pipeline produces:
//! - changed_pages: crawl date, change kind, page url, diff payload
//!
//! The resolver and fetcher take a `Store` handle explicitly so tests can
//! substitute an in-memory database for the real one.

pub mod fetch;
pub mod resolve;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Classification of a page between two successive crawls.
///
/// The wire literals (`ADD`/`DEL`/`CHANGE`) are what the ingestion pipeline
/// writes into the `change` column and what the import format uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ChangeKind {
    #[serde(rename = "ADD")]
    Added,
    #[serde(rename = "DEL")]
    Deleted,
    #[serde(rename = "CHANGE")]
    Modified,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "ADD",
            ChangeKind::Deleted => "DEL",
            ChangeKind::Modified => "CHANGE",
        }
    }

    /// Human label used in digest headings.
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Added => "new",
            ChangeKind::Deleted => "removed",
            ChangeKind::Modified => "modified",
        }
    }
}

/// One page's change data for a given crawl, as returned by queries.
/// The diff payload is opaque here and passed through to rendering verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageChange {
    pub page: String,
    pub diff: String,
}

/// One record of the import file format: a page's change in a given crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub crawl: NaiveDate,
    pub change: ChangeKind,
    pub page: String,
    #[serde(default)]
    pub diff: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("query failed: {0}")]
    Sql(#[from] rusqlite::Error),

    /// The total-row count came back outside the representable range.
    /// Treated as a hard failure rather than silently read as zero.
    #[error("store returned invalid total row count: {0}")]
    BadRowCount(i64),

    #[error("could not determine data directory")]
    NoDataDir,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Get the database path (~/.local/share/sitewatch/crawl.db or platform equivalent)
pub fn default_db_path() -> Result<PathBuf, StoreError> {
    let data_dir = directories::ProjectDirs::from("", "", "sitewatch")
        .ok_or(StoreError::NoDataDir)?
        .data_dir()
        .to_path_buf();

    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join("crawl.db"))
}

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS changed_pages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            crawl TEXT NOT NULL,
            change TEXT NOT NULL,
            page TEXT NOT NULL,
            diff TEXT NOT NULL DEFAULT ''
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_changed_pages_crawl ON changed_pages(crawl, change)",
        [],
    )?;

    Ok(())
}

/// Database handle. Open once per command, reuse across all operations.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    pub fn open_default() -> Result<Self, StoreError> {
        Store::open(&default_db_path()?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    /// Load a batch of change records in one transaction.
    pub fn insert_changes(&mut self, records: &[ChangeRecord]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;

        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO changed_pages (crawl, change, page, diff)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;

            for record in records {
                stmt.execute(params![
                    record.crawl,
                    record.change.as_str(),
                    record.page,
                    record.diff
                ])?;
            }
        }

        tx.commit()?;
        Ok(records.len())
    }

    /// Distinct crawl dates, newest first, optionally filtered to dates at or
    /// before `upto`. Dates are stored as ISO-8601 text, so the lexicographic
    /// ordering the index gives us is chronological.
    pub fn distinct_crawl_dates(
        &self,
        upto: Option<NaiveDate>,
        limit: Option<u32>,
    ) -> Result<Vec<NaiveDate>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT crawl FROM changed_pages
             WHERE ?1 IS NULL OR crawl <= ?1
             ORDER BY crawl DESC
             LIMIT ?2",
        )?;

        // LIMIT -1 disables the cap in sqlite
        let limit = limit.map_or(-1i64, i64::from);

        let dates = stmt
            .query_map(params![upto, limit], |row| row.get(0))?
            .collect::<Result<Vec<NaiveDate>, _>>()?;

        Ok(dates)
    }

    /// Unbounded count of matching change records for one crawl and kind.
    pub fn count_changes(&self, crawl: NaiveDate, kind: ChangeKind) -> Result<u64, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM changed_pages WHERE crawl = ?1 AND change = ?2",
            params![crawl, kind.as_str()],
            |row| row.get(0),
        )?;

        u64::try_from(count).map_err(|_| StoreError::BadRowCount(count))
    }

    /// Matching page changes ordered by page url ascending, so digests list
    /// pages in the same order on every run. `max_results` bounds the rows
    /// returned; the caller compares it against `count_changes` separately.
    pub fn page_changes(
        &self,
        crawl: NaiveDate,
        kind: ChangeKind,
        max_results: Option<usize>,
    ) -> Result<Vec<PageChange>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT page, diff FROM changed_pages
             WHERE crawl = ?1 AND change = ?2
             ORDER BY page
             LIMIT ?3",
        )?;

        let limit = max_results.map_or(-1i64, |m| i64::try_from(m).unwrap_or(i64::MAX));

        let pages = stmt
            .query_map(params![crawl, kind.as_str(), limit], |row| {
                Ok(PageChange {
                    page: row.get(0)?,
                    diff: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pages)
    }
}
