//! Directory schema migrations.
//!
//! # Responsibility
//! - Keep the ordered list of schema steps for the directory database.
//! - Bring a connection from its stored version up to `latest_version()`.
//!
//! # Invariants
//! - Step versions start at 1 and increase by exactly one.
//! - Each step commits together with its `PRAGMA user_version` bump, so an
//!   interrupted upgrade resumes from the last finished step.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "directory",
        sql: include_str!("0001_directory.sql"),
    },
    SchemaStep {
        version: 2,
        name: "improvement_areas",
        sql: include_str!("0002_improvement_areas.sql"),
    },
];

/// Schema version a fully migrated directory database reports.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Steps newer than `current`, in apply order.
fn pending(current: u32) -> impl Iterator<Item = &'static SchemaStep> {
    SCHEMA_STEPS.iter().filter(move |step| step.version > current)
}

/// Upgrades the directory schema to `latest_version()`.
///
/// # Errors
/// - Returns `UnsupportedSchemaVersion` when the database is newer than
///   this build.
/// - Returns `Sqlite` when a step fails; earlier steps stay committed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let stored = current_user_version(conn)?;
    let latest = latest_version();
    if stored > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: stored,
            latest_supported: latest,
        });
    }

    for step in pending(stored) {
        let started_at = Instant::now();
        let tx = conn.transaction()?;
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        tx.commit()?;
        info!(
            "event=db_migrate module=db status=ok step={} version={} duration_ms={}",
            step.name,
            step.version,
            started_at.elapsed().as_millis()
        );
    }
    Ok(())
}

/// Schema version stored in the database header.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}
