//! Clinic database lifecycle: opening, migrating and failing.
//!
//! # Responsibility
//! - Open and configure the SQLite connection backing every record store.
//! - Apply schema migrations in deterministic order.
//! - Tag every SQLite failure with the storage step it interrupted, down to
//!   the entity kind whose records were being read or written.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Record stores must not be attached before migrations succeed.
//! - A raw `rusqlite::Error` never leaves this crate without a `DbStage`.

use crate::model::record::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage step that was running when SQLite reported a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbStage {
    /// Opening the database file or in-memory database.
    Open,
    /// Applying connection settings such as the busy timeout.
    Configure,
    /// Reading the schema version recorded in the file.
    ReadVersion,
    /// Applying the migration that brings the schema to this version.
    Migrate(u32),
    /// Reading or writing the record table of one entity kind.
    Records(EntityKind),
}

impl Display for DbStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => f.write_str("open the clinic database"),
            Self::Configure => f.write_str("configure the clinic database connection"),
            Self::ReadVersion => f.write_str("read the clinic schema version"),
            Self::Migrate(version) => write!(f, "migrate the clinic schema to version {version}"),
            Self::Records(kind) => write!(f, "access {kind} records"),
        }
    }
}

#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected an operation during `stage`.
    Sqlite {
        stage: DbStage,
        source: rusqlite::Error,
    },
    /// The file was migrated by a newer clinic build than this one.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Returns a mapper that tags a SQLite failure with `stage`.
    pub(crate) fn during(stage: DbStage) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Sqlite { stage, source }
    }

    /// Storage step the failure belongs to, if it came from SQLite.
    pub fn stage(&self) -> Option<DbStage> {
        match self {
            Self::Sqlite { stage, .. } => Some(*stage),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite { stage, source } => write!(f, "failed to {stage}: {source}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "clinic records were saved with schema version {db_version}, \
                 this build reads up to version {latest_supported}; update the app to open them"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}
