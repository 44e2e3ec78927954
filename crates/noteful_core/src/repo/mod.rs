//! Persistence gateway over `noteful_folders` and `noteful_notes`.
//!
//! # Responsibility
//! - Translate typed list/get/insert/update/delete calls into SQL.
//! - Keep SQLite query details out of the service layer.
//!
//! # Invariants
//! - Store failures propagate unchanged as `RepoError::Db`.
//! - `update_*` and `delete_*` report affected row counts (0 or 1) instead of
//!   turning a missing row into an error.
//! - No retries, no batching, no transaction spans more than one call.

use crate::db::DbError;
use chrono::{DateTime, SecondsFormat, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod folder_repo;
pub mod note_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for folder/note persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite failure, passed through as-is.
    Db(DbError),
    /// Persisted row cannot be converted to the domain model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Formats a timestamp the way the `modified` column stores it.
pub(crate) fn timestamp_to_db(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn parse_timestamp(value: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| RepoError::InvalidData(format!("invalid timestamp `{value}`")))
}
