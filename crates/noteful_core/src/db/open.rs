//! Opening a ready-to-use Noteful store.
//!
//! A connection leaves this module only after `foreign_keys=ON` is set, the
//! schema is migrated, and the folder/note columns are verified. With foreign
//! keys on, `noteful_notes.folder_id` is enforced and folder deletes cascade.

use super::migrations::apply_migrations;
use super::schema::verify_schema;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) the database file at `path`.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    timed_open("file", || Ok(Connection::open(path)?))
}

/// Opens a private in-memory database. Each call starts empty.
pub fn open_db_in_memory() -> DbResult<Connection> {
    timed_open("memory", || Ok(Connection::open_in_memory()?))
}

fn timed_open(mode: &str, connect: impl FnOnce() -> DbResult<Connection>) -> DbResult<Connection> {
    let started = Instant::now();
    let opened = connect().and_then(|mut conn| {
        prepare(&mut conn)?;
        Ok(conn)
    });
    let elapsed_ms = started.elapsed().as_millis();

    match &opened {
        Ok(_) => info!("event=db_open module=db status=ok mode={mode} duration_ms={elapsed_ms}"),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={elapsed_ms} error={err}"
        ),
    }
    opened
}

fn prepare(conn: &mut Connection) -> DbResult<()> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    verify_schema(conn)
}
