//! SQLite-backed record store for profiles, tasks and work logs.
//!
//! The database lives at `{data_dir}/staffdesk.db`. WAL mode keeps dashboard
//! reads fast while updates commit; schema changes go through the numbered
//! migrations in `crate::migrations`. Rows are never hard-deleted for
//! profiles — offboarding sets the `archived` flag.

use std::path::PathBuf;

use rusqlite::Connection;

pub mod profiles;
pub mod tasks;
pub mod types;
pub mod worklogs;

pub use types::*;

pub struct StaffDb {
    conn: Connection,
}

impl StaffDb {
    /// Borrow the underlying connection for ad-hoc queries.
    pub fn conn_ref(&self) -> &Connection {
        &self.conn
    }

    /// Open (or create) the database under the given data directory and
    /// apply the schema.
    pub fn open(data_dir: &std::path::Path) -> Result<Self, DbError> {
        Self::open_at(data_dir.join("staffdesk.db"))
    }

    /// Open a database at an explicit path. Useful for testing.
    pub fn open_at(path: PathBuf) -> Result<Self, DbError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(DbError::CreateDir)?;
            }
        }

        let conn = Connection::open(&path)?;

        // WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        crate::migrations::run_migrations(&conn).map_err(DbError::Migration)?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        Ok(Self { conn })
    }

    /// In-memory database for tests.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        crate::migrations::run_migrations(&conn).map_err(DbError::Migration)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Execute a closure within a SQLite transaction.
    /// Commits on Ok, rolls back on Err.
    pub fn with_transaction<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Self) -> Result<T, DbError>,
    {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        match f(self) {
            Ok(val) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(val)
            }
            Err(e) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }
}
