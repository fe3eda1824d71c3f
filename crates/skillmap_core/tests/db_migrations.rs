use rusqlite::Connection;
use skillmap_core::db::migrations::latest_version;
use skillmap_core::db::{open_db, open_db_in_memory, open_db_read_only, DbError};
use skillmap_core::{SourceError, SqliteDirectorySource};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in [
        "specialties",
        "technologies",
        "employees",
        "employee_technologies",
        "improvement_categories",
        "employee_improvement_areas",
    ] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("directory.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "employees");
}

#[test]
fn version_one_database_is_upgraded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v1.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE specialties (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
         PRAGMA user_version = 1;",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "employee_improvement_areas");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

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

    let err = SqliteDirectorySource::try_new(&path).unwrap_err();
    assert!(matches!(
        err,
        SourceError::Db(DbError::UnsupportedSchemaVersion { .. })
    ));
}

#[test]
fn read_only_open_requires_migrated_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE scratch (id INTEGER);").unwrap();
    drop(conn);

    let err = open_db_read_only(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::SchemaNotReady {
            db_version: 0,
            ..
        }
    ));

    drop(open_db(&path).unwrap());
    let conn = open_db_read_only(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
}

#[test]
fn read_only_connection_rejects_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("directory.sqlite3");
    drop(open_db(&path).unwrap());

    let conn = open_db_read_only(&path).unwrap();
    assert!(conn
        .execute("INSERT INTO specialties (name) VALUES ('Frontend');", [])
        .is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "expected table `{table_name}` to exist");
}
