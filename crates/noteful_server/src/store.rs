//! Async handle over the shared SQLite connection.
//!
//! # Responsibility
//! - Own the single store connection and hand it to request handlers.
//! - Run blocking SQLite work on the blocking thread pool.
//!
//! # Invariants
//! - Handlers never hold the connection across an `.await`.
//! - Writes are serialized by the connection mutex.

use crate::config::DatabaseLocation;
use noteful_core::db::{open_db, open_db_in_memory, DbResult};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

/// Failure to reach the connection, independent of the SQL being run.
#[derive(Debug)]
pub enum StoreError {
    /// A previous holder panicked while holding the connection.
    Poisoned,
    /// The blocking task was cancelled or panicked.
    Join(tokio::task::JoinError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poisoned => write!(f, "store connection lock is poisoned"),
            Self::Join(err) => write!(f, "store task failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Poisoned => None,
            Self::Join(err) => Some(err),
        }
    }
}

/// Cloneable store handle injected into every handler.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens and migrates the configured database.
    pub fn open(location: &DatabaseLocation) -> DbResult<Self> {
        let conn = match location {
            DatabaseLocation::File(path) => open_db(path)?,
            DatabaseLocation::InMemory => open_db_in_memory()?,
        };
        Ok(Self::new(conn))
    }

    /// Runs `task` against the connection without blocking the executor.
    pub async fn call<F, T>(&self, task: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> T + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            Ok(task(&*guard))
        })
        .await
        .map_err(StoreError::Join)?
    }
}
