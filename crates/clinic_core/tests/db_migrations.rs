use clinic_core::db::migrations::latest_version;
use clinic_core::db::{open_db, open_db_in_memory, DbError, DbStage};
use clinic_core::{EntityKind, RepoError, SqliteRecordStore};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for kind in EntityKind::ALL {
        assert_table_exists(&conn, kind.table());
    }
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clinic.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "patients");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_database_in_missing_directory_reports_open_stage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("clinic.db");

    let err = open_db(&path).unwrap_err();
    assert_eq!(err.stage(), Some(DbStage::Open));
    assert!(err.to_string().starts_with("failed to open the clinic database: "));
}

#[test]
fn newer_schema_error_surfaces_through_record_errors() {
    let err = RepoError::from(DbError::UnsupportedSchemaVersion {
        db_version: 999,
        latest_supported: latest_version(),
    });
    assert!(err
        .to_string()
        .starts_with("clinic records were saved with schema version 999"));
}

#[test]
fn record_store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteRecordStore::try_new(&conn, EntityKind::Patient) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn record_store_rejects_connection_without_entity_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteRecordStore::try_new(&conn, EntityKind::Appointment);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("appointments"))
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
