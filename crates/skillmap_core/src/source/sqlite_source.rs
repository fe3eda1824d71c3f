//! SQLite-backed directory source.
//!
//! # Responsibility
//! - Answer the directory queries from the migrated SQLite schema.
//! - Decode loosely typed skill columns without failing the whole fetch.
//!
//! # Invariants
//! - Every fetch opens its own read-only connection, so fetches can run on
//!   separate threads at the same time.
//! - Collection and skill order are stable: employees by name then id,
//!   skills by insertion id.

use crate::db::{open_db, open_db_read_only};
use crate::model::employee::{EmployeeDetailRecord, EmployeeId, EmployeeRecord, ImprovementArea};
use crate::model::skill::SkillRecord;
use crate::model::technology::CatalogEntry;
use crate::source::{DirectorySource, SourceError, SourceResult};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const SKILL_SELECT_SQL: &str = "SELECT
    et.employee_id AS employee_id,
    t.name AS technology_name,
    s.name AS specialty_name,
    et.skill_level AS skill_level,
    et.years_of_experience AS years_of_experience
FROM employee_technologies et
JOIN technologies t ON t.id = et.technology_id
LEFT JOIN specialties s ON s.id = t.specialty_id";

/// Directory source reading a SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteDirectorySource {
    db_path: PathBuf,
}

impl SqliteDirectorySource {
    /// Opens (and migrates, if needed) the database at `path`.
    pub fn try_new(path: impl Into<PathBuf>) -> SourceResult<Self> {
        let db_path = path.into();
        open_db(&db_path)?;
        Ok(Self { db_path })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> SourceResult<Connection> {
        Ok(open_db_read_only(&self.db_path)?)
    }
}

impl DirectorySource for SqliteDirectorySource {
    fn fetch_employee_collection(
        &self,
        manager: Option<EmployeeId>,
    ) -> SourceResult<Vec<EmployeeRecord>> {
        let conn = self.connect()?;

        let mut skills_by_employee: HashMap<EmployeeId, Vec<SkillRecord>> = HashMap::new();
        {
            let mut stmt = conn.prepare(&format!(
                "{SKILL_SELECT_SQL}
                 WHERE (?1 IS NULL
                    OR et.employee_id IN (SELECT id FROM employees WHERE manager_id = ?1))
                 ORDER BY et.employee_id ASC, et.id ASC;"
            ))?;
            let mut rows = stmt.query(params![manager])?;
            while let Some(row) = rows.next()? {
                let employee_id: EmployeeId = row.get("employee_id")?;
                let record = parse_skill_row(row, employee_id)?;
                skills_by_employee
                    .entry(employee_id)
                    .or_default()
                    .push(record);
            }
        }

        let mut stmt = conn.prepare(
            "SELECT id, name, title
             FROM employees
             WHERE (?1 IS NULL OR manager_id = ?1)
             ORDER BY name COLLATE NOCASE ASC, id ASC;",
        )?;
        let mut rows = stmt.query(params![manager])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            let id: EmployeeId = row.get("id")?;
            employees.push(EmployeeRecord {
                id,
                name: row.get("name")?,
                title: row.get("title")?,
                skills: skills_by_employee.remove(&id).unwrap_or_default(),
            });
        }

        debug!(
            "event=source_fetch module=source status=ok query=employee_collection rows={} manager_filter={}",
            employees.len(),
            manager.is_some()
        );
        Ok(employees)
    }

    fn fetch_employee_detail(&self, id: EmployeeId) -> SourceResult<Option<EmployeeDetailRecord>> {
        let conn = self.connect()?;

        let header = conn
            .query_row(
                "SELECT name, title FROM employees WHERE id = ?1;",
                params![id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?)),
            )
            .optional()?;
        let Some((name, title)) = header else {
            debug!(
                "event=source_fetch module=source status=not_found query=employee_detail employee_id={id}"
            );
            return Ok(None);
        };

        let mut skills = Vec::new();
        {
            let mut stmt = conn.prepare(&format!(
                "{SKILL_SELECT_SQL}
                 WHERE et.employee_id = ?1
                 ORDER BY et.id ASC;"
            ))?;
            let mut rows = stmt.query(params![id])?;
            while let Some(row) = rows.next()? {
                skills.push(parse_skill_row(row, id)?);
            }
        }

        let mut improvement_areas = Vec::new();
        {
            let mut stmt = conn.prepare(
                "SELECT
                    c.name AS category,
                    ia.description AS description,
                    ia.points AS points
                 FROM employee_improvement_areas ia
                 JOIN improvement_categories c ON c.id = ia.category_id
                 WHERE ia.employee_id = ?1
                 ORDER BY ia.id ASC;",
            )?;
            let mut rows = stmt.query(params![id])?;
            while let Some(row) = rows.next()? {
                improvement_areas.push(ImprovementArea {
                    category: row.get("category")?,
                    description: row.get("description")?,
                    points: decode_number(row.get("points")?).unwrap_or(0.0),
                });
            }
        }

        debug!(
            "event=source_fetch module=source status=ok query=employee_detail employee_id={} skills={} improvement_areas={}",
            id,
            skills.len(),
            improvement_areas.len()
        );
        Ok(Some(EmployeeDetailRecord {
            id,
            name,
            title,
            skills,
            improvement_areas,
        }))
    }

    fn fetch_technology_catalog(&self) -> SourceResult<Vec<CatalogEntry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT
                t.id AS id,
                t.name AS name,
                s.name AS specialty_name,
                t.is_deleted AS is_deleted
             FROM technologies t
             LEFT JOIN specialties s ON s.id = t.specialty_id
             ORDER BY t.id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_catalog_row(row)?);
        }

        debug!(
            "event=source_fetch module=source status=ok query=technology_catalog rows={}",
            entries.len()
        );
        Ok(entries)
    }
}

fn parse_skill_row(row: &Row<'_>, employee_id: EmployeeId) -> SourceResult<SkillRecord> {
    let level: Value = row.get("skill_level")?;
    let proficiency = match level {
        Value::Integer(value) => value,
        Value::Real(value) if value.is_finite() => value.round() as i64,
        Value::Text(ref text) => text.trim().parse::<i64>().map_err(|_| {
            SourceError::InvalidData(format!(
                "invalid skill_level `{text}` for employee {employee_id}"
            ))
        })?,
        other => {
            return Err(SourceError::InvalidData(format!(
                "invalid skill_level {other:?} for employee {employee_id}"
            )));
        }
    };

    Ok(SkillRecord {
        technology_name: row.get("technology_name")?,
        specialty_name: row.get("specialty_name")?,
        proficiency,
        years_of_experience: decode_number(row.get("years_of_experience")?),
    })
}

fn parse_catalog_row(row: &Row<'_>) -> SourceResult<CatalogEntry> {
    let id = row.get("id")?;
    let deleted = match row.get::<_, i64>("is_deleted")? {
        0 => false,
        1 => true,
        other => {
            return Err(SourceError::InvalidData(format!(
                "invalid is_deleted value `{other}` in technologies.is_deleted"
            )));
        }
    };

    Ok(CatalogEntry {
        id,
        name: row.get("name")?,
        specialty: row.get("specialty_name")?,
        deleted,
    })
}

/// Decodes a loosely typed numeric column; unparsable values become `NaN`
/// so the boundary check can report them.
fn decode_number(value: Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Integer(value) => Some(value as f64),
        Value::Real(value) => Some(value),
        Value::Text(text) => Some(text.trim().parse().unwrap_or(f64::NAN)),
        Value::Blob(_) => Some(f64::NAN),
    }
}
