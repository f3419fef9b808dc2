//! Database connection management.
//!
//! Wraps a single rusqlite Connection in a Mutex for thread-safe access.
//! Configures WAL mode and recommended PRAGMAs on initialization.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::info;

use fintrack_core::error::FintrackError;

use crate::migrations;

/// Thread-safe SQLite database wrapper.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a database at the given path.
    ///
    /// Configures WAL mode, synchronous=NORMAL, foreign keys, and runs
    /// all pending migrations.
    pub fn new(path: &Path) -> Result<Self, FintrackError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| FintrackError::Storage(format!("Failed to open database: {}", e)))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )
        .map_err(|e| FintrackError::Storage(format!("Failed to set pragmas: {}", e)))?;

        info!("Database opened at {}", path.display());

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.with_conn(migrations::run_migrations)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, FintrackError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| FintrackError::Storage(format!("Failed to open in-memory db: {}", e)))?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| FintrackError::Storage(format!("Failed to set pragmas: {}", e)))?;

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.with_conn(migrations::run_migrations)?;
        Ok(db)
    }

    /// Execute a closure with a reference to the underlying connection.
    ///
    /// The mutex is held for the duration of the closure and released on
    /// return, whether the closure succeeds or fails.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, FintrackError>
    where
        F: FnOnce(&Connection) -> Result<T, FintrackError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| FintrackError::Storage(format!("Database lock poisoned: {}", e)))?;
        f(&conn)
    }

    /// Execute a closure with mutable access, for writers that need a
    /// rusqlite transaction.
    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T, FintrackError>
    where
        F: FnOnce(&mut Connection) -> Result<T, FintrackError>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| FintrackError::Storage(format!("Database lock poisoned: {}", e)))?;
        f(&mut conn)
    }
}

impl Database {
    /// Run a trivial query to confirm the connection is usable.
    pub fn ping(&self) -> Result<(), FintrackError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .map(|_| ())
                .map_err(|e| FintrackError::Storage(format!("Ping failed: {}", e)))
        })
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}
