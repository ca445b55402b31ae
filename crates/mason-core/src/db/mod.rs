//! Database operations and SQLite management for plan records.
//!
//! This module provides the low-level storage used by
//! [`SqlitePlanStore`](crate::store::SqlitePlanStore). Each managed context
//! owns a single row holding its plan as a JSON record.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod record_queries;

pub use record_queries::StoredRecord;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
