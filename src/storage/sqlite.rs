use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, Row, Statement};
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{FrictionRecord, PainCategory};

const INSERT_SQL: &str = r#"
    INSERT OR IGNORE INTO friction_points
        (id, competitor, title, link, score, view_count, is_answered, pain_category, timestamp)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

const SELECT_COLUMNS: &str =
    "id, competitor, title, link, score, view_count, is_answered, pain_category, timestamp";

/// Append-only store of friction points keyed by the upstream question id.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (creating if needed) the database at `path`, including its parent directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::StorageUnavailable(format!(
                        "cannot create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
                tracing::info!("Created storage directory: {}", parent.display());
            }
        }

        let conn = Connection::open(path).map_err(|e| {
            Error::StorageUnavailable(format!("cannot open {}: {}", path.display(), e))
        })?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Opens an existing database read-only. Never creates or migrates anything;
    /// a file without a usable `friction_points` table is `StorageUnavailable`.
    pub fn open_existing<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::StoreNotFound(path.to_path_buf()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            Error::StorageUnavailable(format!("cannot open {}: {}", path.display(), e))
        })?;

        conn.prepare(&format!(
            "SELECT {} FROM friction_points LIMIT 0",
            SELECT_COLUMNS
        ))
        .map_err(|e| {
            Error::StorageUnavailable(format!(
                "{} is not a friction store: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    pub fn initialize(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS friction_points (
                    id TEXT PRIMARY KEY,
                    competitor TEXT NOT NULL,
                    title TEXT NOT NULL,
                    link TEXT NOT NULL,
                    score INTEGER NOT NULL,
                    view_count INTEGER NOT NULL,
                    is_answered BOOLEAN NOT NULL,
                    pain_category TEXT NOT NULL,
                    timestamp TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                );

                CREATE INDEX IF NOT EXISTS idx_friction_points_competitor
                    ON friction_points(competitor);
                "#,
            )
            .map_err(|e| Error::StorageUnavailable(format!("schema setup failed: {}", e)))?;

        Ok(())
    }

    /// Inserts `record` unless its id is already stored. Returns whether a row was added.
    pub fn upsert_if_absent(&self, record: &FrictionRecord) -> Result<bool> {
        let mut stmt = self.conn.prepare_cached(INSERT_SQL)?;
        Ok(execute_insert(&mut stmt, record)? > 0)
    }

    /// Inserts a batch atomically; a failure leaves none of the batch committed.
    pub fn insert_batch(&self, records: &[FrictionRecord]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare_cached(INSERT_SQL)?;
            for record in records {
                if execute_insert(&mut stmt, record)? > 0 {
                    inserted += 1;
                } else {
                    tracing::debug!("Skipping known friction point {}", record.id);
                }
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// All records in insertion order, optionally restricted to one competitor.
    pub fn query_all(&self, competitor: Option<&str>) -> Result<Vec<FrictionRecord>> {
        let records = match competitor {
            Some(competitor) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {} FROM friction_points WHERE competitor = ?1 ORDER BY rowid",
                    SELECT_COLUMNS
                ))?;
                let rows = stmt.query_map(params![competitor], row_to_record)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {} FROM friction_points ORDER BY rowid",
                    SELECT_COLUMNS
                ))?;
                let rows = stmt.query_map([], row_to_record)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };

        Ok(records)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM friction_points", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn competitors(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT competitor FROM friction_points ORDER BY competitor")?;
        let competitors = stmt.query_map([], |row| row.get(0))?;
        competitors
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }
}

fn execute_insert(stmt: &mut Statement<'_>, record: &FrictionRecord) -> Result<usize> {
    let inserted = stmt.execute(params![
        record.id,
        record.competitor,
        record.title,
        record.link,
        record.score,
        record.view_count,
        record.is_answered,
        record.pain_category.as_str(),
        record.timestamp.to_rfc3339(),
    ])?;
    Ok(inserted)
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<FrictionRecord> {
    let category_str: String = row.get(7)?;
    let pain_category = category_str.parse::<PainCategory>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, e.into())
    })?;

    let timestamp_str: String = row.get(8)?;
    let timestamp = parse_timestamp(&timestamp_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(FrictionRecord {
        id: row.get(0)?,
        competitor: row.get(1)?,
        title: row.get(2)?,
        link: row.get(3)?,
        score: row.get(4)?,
        view_count: row.get(5)?,
        is_answered: row.get(6)?,
        pain_category,
        timestamp,
    })
}

/// RFC3339 as written by this crate, or SQLite's `CURRENT_TIMESTAMP` form (UTC).
fn parse_timestamp(value: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.and_utc())
        })
}
