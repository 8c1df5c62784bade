//! Wikiflat Storage Layer
//!
//! Implements the RecordSink trait on SQLite.
//!
//! # Architecture
//!
//! - One `wikidata` table, one row per accepted entity, keyed by display title
//! - Exact-match index on the entity identifier
//! - Property search through SQLite's JSON1 functions over the stored document
//!
//! # Examples
//!
//! ```no_run
//! use wikiflat_store::SqliteStore;
//!
//! let store = SqliteStore::open("wikidata.db").unwrap();
//! println!("{} records", store.count().unwrap());
//! ```

#![warn(missing_docs)]

pub mod document;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;
use wikiflat_domain::{IdentifierResolver, NormalizedValue, OutputRecord, RecordSink};

pub use document::{document_to_properties, properties_to_document};

const SELECT_COLUMNS: &str = "SELECT wikipedia_id, title, wikidata_id, description, properties FROM wikidata";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(rusqlite::Error),

    /// A record with this display title is already stored
    #[error("Duplicate record for title: {0}")]
    Duplicate(String),

    /// Property document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e)
    }
}

/// SQLite-based implementation of RecordSink
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
    in_batch: bool,
}

impl SqliteStore {
    /// Open (or create) a store at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    /// Existing rows are kept.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn, in_batch: false };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a store and drop any existing rows
    pub fn recreate<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("DROP TABLE IF EXISTS wikidata;")?;
        let mut store = Self { conn, in_batch: false };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Insert one record; a second record with the same title is rejected
    pub fn insert(&mut self, record: &OutputRecord) -> Result<(), StoreError> {
        let document = serde_json::to_string(&properties_to_document(&record.properties))?;

        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO wikidata (wikipedia_id, title, wikidata_id, description, properties)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;

        stmt.execute(params![
            &record.title,
            &record.label,
            &record.entity_id,
            &record.description,
            &document,
        ])
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref err, _)
                if err.code == ErrorCode::ConstraintViolation
                    && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                StoreError::Duplicate(record.title.clone())
            }
            other => StoreError::Database(other),
        })?;

        Ok(())
    }

    /// Get a record by display title
    pub fn get(&self, title: &str) -> Result<Option<OutputRecord>, StoreError> {
        let sql = format!("{} WHERE wikipedia_id = ?1", SELECT_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, params![title], Self::raw_row)
            .optional()?;
        row.map(Self::to_record).transpose()
    }

    /// Find records by entity identifier
    pub fn find_by_wikidata_id(&self, id: &str) -> Result<Vec<OutputRecord>, StoreError> {
        let sql = format!("{} WHERE wikidata_id = ?1 ORDER BY wikipedia_id", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![id], Self::raw_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(Self::to_record).collect()
    }

    /// Find records whose property `name` equals `value` or contains it
    ///
    /// Text and numeric values are supported; coordinates are not searchable.
    pub fn find_by_property(
        &self,
        name: &str,
        value: &NormalizedValue,
    ) -> Result<Vec<OutputRecord>, StoreError> {
        let needle: Box<dyn rusqlite::ToSql> = match value {
            NormalizedValue::Text(s) => Box::new(s.clone()),
            NormalizedValue::Number(n) => Box::new(*n),
            NormalizedValue::Coordinate(_) => {
                return Err(StoreError::InvalidData(
                    "Coordinates cannot be used as a search value".to_string(),
                ))
            }
        };

        let sql = format!(
            "{} WHERE EXISTS (
                SELECT 1 FROM json_each(wikidata.properties) p,
                     json_each(CASE p.type WHEN 'array' THEN p.value ELSE json_array(p.value) END) e
                WHERE p.key = ?1 AND e.value = ?2
             ) ORDER BY wikipedia_id",
            SELECT_COLUMNS
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![name, needle], Self::raw_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(Self::to_record).collect()
    }

    /// Number of stored records
    pub fn count(&self) -> Result<u64, StoreError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM wikidata", [], |row| row.get(0))?;
        Ok(n as u64)
    }

    /// Register every stored record with a resolver
    ///
    /// Lets an import continue on top of existing rows: stored identifiers
    /// resolve and stored titles count as already emitted. Returns the
    /// number of rows read.
    pub fn seed_resolver(&self, resolver: &mut IdentifierResolver) -> Result<usize, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT wikipedia_id, title, wikidata_id FROM wikidata ORDER BY rowid")?;
        let mut rows = stmt.query([])?;

        let mut seen = 0;
        while let Some(row) = rows.next()? {
            let title: String = row.get(0)?;
            let label: Option<String> = row.get(1)?;
            let id: Option<String> = row.get(2)?;

            resolver.claim_title(title);
            if let (Some(id), Some(label)) = (id, label) {
                resolver.register(id, label);
            }
            seen += 1;
        }
        Ok(seen)
    }

    fn raw_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
        Ok(RawRow {
            title: row.get(0)?,
            label: row.get(1)?,
            entity_id: row.get(2)?,
            description: row.get(3)?,
            properties: row.get(4)?,
        })
    }

    fn to_record(raw: RawRow) -> Result<OutputRecord, StoreError> {
        let document: serde_json::Value = serde_json::from_str(&raw.properties)?;
        Ok(OutputRecord {
            title: raw.title,
            label: raw.label.unwrap_or_default(),
            entity_id: raw.entity_id.unwrap_or_default(),
            description: raw.description,
            properties: document_to_properties(&document),
        })
    }
}

struct RawRow {
    title: String,
    label: Option<String>,
    entity_id: Option<String>,
    description: Option<String>,
    properties: String,
}

impl RecordSink for SqliteStore {
    type Error = StoreError;

    fn write(&mut self, record: &OutputRecord) -> Result<(), Self::Error> {
        self.insert(record)
    }

    fn begin_batch(&mut self) -> Result<(), Self::Error> {
        if !self.in_batch {
            self.conn.execute_batch("BEGIN")?;
            self.in_batch = true;
        }
        Ok(())
    }

    fn commit_batch(&mut self) -> Result<(), Self::Error> {
        if self.in_batch {
            self.conn.execute_batch("COMMIT")?;
            self.in_batch = false;
        }
        Ok(())
    }
}
