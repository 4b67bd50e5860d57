//! Ordered record stores.
//!
//! # Responsibility
//! - Provide a key-sorted map from record id to serialized record body.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `values()` yields bodies in ascending key order.
//! - `insert` overwrites an existing key; callers decide whether that is allowed.
//! - A store only ever touches the table of its own entity kind.

use crate::db::migrations::{current_version, latest_version};
use crate::db::{DbError, DbStage};
use crate::model::record::EntityKind;
use crate::repo::error::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Key-sorted persistent map holding one entity kind's records.
pub trait RecordStore {
    fn insert(&self, key: &str, body: &str) -> RepoResult<()>;
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    /// Removes the key and returns the body it held.
    fn remove(&self, key: &str) -> RepoResult<Option<String>>;
    fn values(&self) -> RepoResult<Vec<String>>;

    fn contains_key(&self, key: &str) -> RepoResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn insert(&self, key: &str, body: &str) -> RepoResult<()> {
        (**self).insert(key, body)
    }

    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get(key)
    }

    fn remove(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).remove(key)
    }

    fn values(&self) -> RepoResult<Vec<String>> {
        (**self).values()
    }
}

/// SQLite-backed store over one `WITHOUT ROWID` table.
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
    kind: EntityKind,
}

impl<'conn> SqliteRecordStore<'conn> {
    /// Attaches to the table of `kind` after checking the connection is migrated.
    pub fn try_new(conn: &'conn Connection, kind: EntityKind) -> RepoResult<Self> {
        ensure_connection_ready(conn, kind)?;
        Ok(Self::attach(conn, kind))
    }

    /// Attaches without readiness checks. Callers must have verified the schema.
    pub(crate) fn attach(conn: &'conn Connection, kind: EntityKind) -> Self {
        Self { conn, kind }
    }

    /// Runs `op` against this kind's table, tagging SQLite failures with the kind.
    fn with_table<R>(
        &self,
        op: impl FnOnce(&Connection, &'static str) -> rusqlite::Result<R>,
    ) -> RepoResult<R> {
        op(self.conn, self.kind.table())
            .map_err(DbError::during(DbStage::Records(self.kind)))
            .map_err(RepoError::from)
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn insert(&self, key: &str, body: &str) -> RepoResult<()> {
        self.with_table(|conn, table| {
            conn.execute(
                &format!(
                    "INSERT INTO {table} (id, record) VALUES (?1, ?2)
                     ON CONFLICT(id) DO UPDATE SET record = excluded.record;"
                ),
                params![key, body],
            )
        })?;
        Ok(())
    }

    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        self.with_table(|conn, table| {
            conn.query_row(
                &format!("SELECT record FROM {table} WHERE id = ?1;"),
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
        })
    }

    fn remove(&self, key: &str) -> RepoResult<Option<String>> {
        self.with_table(|conn, table| {
            conn.query_row(
                &format!("DELETE FROM {table} WHERE id = ?1 RETURNING record;"),
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
        })
    }

    fn values(&self) -> RepoResult<Vec<String>> {
        self.with_table(|conn, table| {
            let mut stmt = conn.prepare(&format!("SELECT record FROM {table} ORDER BY id ASC;"))?;
            let bodies = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(bodies)
        })
    }
}

/// In-process `BTreeMap` store for isolated tests.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl RecordStore for MemoryRecordStore {
    fn insert(&self, key: &str, body: &str) -> RepoResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), body.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn remove(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.borrow_mut().remove(key))
    }

    fn values(&self) -> RepoResult<Vec<String>> {
        Ok(self.entries.borrow().values().cloned().collect())
    }
}

fn ensure_connection_ready(conn: &Connection, kind: EntityKind) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table = kind.table();
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )
        .map_err(DbError::during(DbStage::Records(kind)))?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable(table));
    }

    Ok(())
}
