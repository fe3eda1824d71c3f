#![allow(dead_code)]

use rusqlite::{params, Connection, ToSql};
use skillmap_core::db::open_db;
use std::path::PathBuf;
use tempfile::TempDir;

/// Migrated directory database in a temp dir; removed on drop.
pub struct TestDb {
    pub dir: TempDir,
    pub path: PathBuf,
    pub conn: Connection,
}

pub fn new_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("directory.sqlite3");
    let conn = open_db(&path).unwrap();
    TestDb { dir, path, conn }
}

pub fn insert_specialty(conn: &Connection, name: &str) -> i64 {
    conn.execute("INSERT INTO specialties (name) VALUES (?1);", params![name])
        .unwrap();
    conn.last_insert_rowid()
}

pub fn insert_technology(
    conn: &Connection,
    name: &str,
    specialty_id: Option<i64>,
    deleted: bool,
) -> i64 {
    conn.execute(
        "INSERT INTO technologies (name, specialty_id, is_deleted) VALUES (?1, ?2, ?3);",
        params![name, specialty_id, i64::from(deleted)],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn insert_employee(
    conn: &Connection,
    name: &str,
    title: Option<&str>,
    manager_id: Option<i64>,
) -> i64 {
    conn.execute(
        "INSERT INTO employees (name, title, manager_id) VALUES (?1, ?2, ?3);",
        params![name, title, manager_id],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn insert_skill(
    conn: &Connection,
    employee_id: i64,
    technology_id: i64,
    skill_level: &dyn ToSql,
    years: &dyn ToSql,
) {
    conn.execute(
        "INSERT INTO employee_technologies
            (employee_id, technology_id, skill_level, years_of_experience)
         VALUES (?1, ?2, ?3, ?4);",
        params![employee_id, technology_id, skill_level, years],
    )
    .unwrap();
}

pub fn insert_improvement_area(
    conn: &Connection,
    employee_id: i64,
    category: &str,
    description: &str,
    points: f64,
) {
    conn.execute(
        "INSERT OR IGNORE INTO improvement_categories (name) VALUES (?1);",
        params![category],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO employee_improvement_areas (employee_id, category_id, description, points)
         SELECT ?1, id, ?3, ?4 FROM improvement_categories WHERE name = ?2;",
        params![employee_id, category, description, points],
    )
    .unwrap();
}

/// Ids of the rows written by [`seed_sample`].
pub struct SampleIds {
    pub alice: i64,
    pub bob: i64,
    pub carol: i64,
    pub react: i64,
    pub go: i64,
    pub perl: i64,
}

/// Alice (React) manages Bob (Go) and Carol (React, Perl); Perl is tombstoned.
pub fn seed_sample(conn: &Connection) -> SampleIds {
    let frontend = insert_specialty(conn, "Frontend");
    let backend = insert_specialty(conn, "Backend");

    let react = insert_technology(conn, "React", Some(frontend), false);
    let go = insert_technology(conn, "Go", Some(backend), false);
    let perl = insert_technology(conn, "Perl", Some(backend), true);

    let alice = insert_employee(conn, "Alice", Some("Frontend Lead"), None);
    let bob = insert_employee(conn, "Bob", Some("Backend Engineer"), Some(alice));
    let carol = insert_employee(conn, "Carol", None, Some(alice));

    insert_skill(conn, alice, react, &9, &6.0);
    insert_skill(conn, bob, go, &7, &3.5);
    insert_skill(conn, carol, react, &5, &Option::<f64>::None);
    insert_skill(conn, carol, perl, &4, &10.0);

    SampleIds {
        alice,
        bob,
        carol,
        react,
        go,
        perl,
    }
}
