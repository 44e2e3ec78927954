//! Ordered schema migrations for the Noteful tables.
//!
//! Each step is a `(version, sql)` pair. Versions increase by one and the
//! highest applied version is stored in `PRAGMA user_version`, so reopening
//! an up-to-date database is a no-op.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

const STEPS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Highest schema version this build can produce.
pub fn latest_version() -> u32 {
    STEPS.iter().map(|&(version, _)| version).max().unwrap_or(0)
}

/// Brings `conn` up to [`latest_version`] inside one transaction.
///
/// A database written by a newer build is refused instead of being touched.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let latest = latest_version();
    if from > latest {
        return Err(DbError::SchemaTooNew {
            found: from,
            supported: latest,
        });
    }

    let pending: Vec<_> = STEPS.iter().filter(|&&(version, _)| version > from).collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for &&(version, sql) in &pending {
        debug!("event=db_migrate_step module=db version={version}");
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={latest}");
    Ok(())
}

fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
