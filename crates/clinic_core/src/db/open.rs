//! Connection bootstrap for the clinic database.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure the busy timeout that serializes concurrent callers.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - Every failure is logged once, with an error code derived from its stage.

use super::migrations::apply_migrations;
use super::{DbError, DbResult, DbStage};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a clinic database file and applies all pending migrations.
///
/// # Side effects
/// - Creates the file when it does not exist yet. The parent directory must exist.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory clinic database and applies all pending migrations.
///
/// Every call yields an independent, empty database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let result = open()
        .map_err(DbError::during(DbStage::Open))
        .and_then(|mut conn| {
            bootstrap_connection(&mut conn)?;
            Ok(conn)
        });

    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=db_open module=db status=ok mode={mode} duration_ms={duration_ms}"),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={duration_ms} error_code={} error={err}",
            error_code(err)
        ),
    }
    result
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(DbError::during(DbStage::Configure))?;
    apply_migrations(conn)
}

fn error_code(err: &DbError) -> &'static str {
    match err.stage() {
        Some(DbStage::Open) => "db_open_failed",
        Some(DbStage::Configure) => "db_configure_failed",
        Some(DbStage::ReadVersion | DbStage::Migrate(_)) => "db_migrate_failed",
        Some(DbStage::Records(_)) => "db_records_failed",
        None => "db_schema_too_new",
    }
}
