//! Plan record reads and writes.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_RECORD_SQL: &str =
    "SELECT payload, updated_at FROM plan_records WHERE context = ?1";
const UPSERT_RECORD_SQL: &str = "INSERT INTO plan_records (context, payload, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(context) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at";
const SELECT_CONTEXTS_SQL: &str = "SELECT context FROM plan_records ORDER BY context";

/// A raw plan record as stored for one context.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    /// JSON payload, see [`PlanRecord`](crate::models::PlanRecord)
    pub payload: String,
    /// When the record was last written (UTC)
    pub updated_at: Timestamp,
}

impl super::Database {
    /// Reads the record of a context, if one was ever written.
    pub fn get_record(&self, context: &str) -> Result<Option<StoredRecord>> {
        self.connection
            .query_row(SELECT_RECORD_SQL, params![context], |row| {
                Ok(StoredRecord {
                    payload: row.get(0)?,
                    updated_at: row.get::<_, String>(1)?.parse::<Timestamp>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
                    })?,
                })
            })
            .optional()
            .db_context("Failed to read plan record")
    }

    /// Writes (or replaces) the record of a context.
    pub fn put_record(&self, context: &str, payload: &str, updated_at: Timestamp) -> Result<()> {
        self.connection
            .execute(
                UPSERT_RECORD_SQL,
                params![context, payload, updated_at.to_string()],
            )
            .db_context("Failed to write plan record")?;
        Ok(())
    }

    /// Lists every context that has a stored record.
    pub fn list_contexts(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CONTEXTS_SQL)
            .db_context("Failed to prepare context query")?;
        let contexts = stmt
            .query_map([], |row| row.get(0))
            .db_context("Failed to query contexts")?
            .collect::<std::result::Result<Vec<String>, _>>()
            .db_context("Failed to read contexts")?;
        Ok(contexts)
    }
}
