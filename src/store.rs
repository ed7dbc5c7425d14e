//! Store handle for the library database.
//!
//! One [`LibraryStore`] owns the single connection for the process. Every
//! operation goes through it; multi-statement writes run inside one
//! rusqlite transaction, so a dropped transaction rolls back cleanly.

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::Result;
use crate::schema::library_schema;

/// Store configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub db_path: String,
}

impl StoreConfig {
    /// Create a new store config for the given database path
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

/// Handle to the library database
pub struct LibraryStore {
    pub(crate) conn: Connection,
}

impl LibraryStore {
    /// Open the database file and ensure the schema exists
    pub fn open(config: &StoreConfig) -> Result<Self> {
        info!("opening library store at {}", config.db_path);
        let conn = Connection::open(&config.db_path)?;
        Self::with_connection(conn)
    }

    /// Open an ephemeral in-memory store
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let schema = library_schema();
        schema.create_all(&conn)?;
        debug!("schema ready ({} tables)", schema.tables.len());
        Ok(Self { conn })
    }

    /// Number of books in the catalog
    pub fn book_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Number of active loans
    pub fn loan_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM borrowed", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_in_memory_creates_empty_tables() {
        let store = LibraryStore::open_in_memory().unwrap();
        assert_eq!(store.book_count().unwrap(), 0);
        assert_eq!(store.loan_count().unwrap(), 0);
    }
}
