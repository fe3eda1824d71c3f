//! JSON snapshot directory source.
//!
//! # Responsibility
//! - Serve the directory queries from a JSON document.
//! - Re-read file-backed snapshots on every fetch.
//!
//! # Invariants
//! - Snapshot field names are `snake_case` and mirror the raw record shapes.
//! - Entry order in the document is collection and catalog order.

use crate::model::employee::{EmployeeDetailRecord, EmployeeId, EmployeeRecord, ImprovementArea};
use crate::model::skill::SkillRecord;
use crate::model::technology::CatalogEntry;
use crate::source::{DirectorySource, SourceError, SourceResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Whole-directory JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    #[serde(default)]
    pub technologies: Vec<CatalogEntry>,
    #[serde(default)]
    pub employees: Vec<SnapshotEmployee>,
}

/// Employee entry of a snapshot document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEmployee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub manager_id: Option<EmployeeId>,
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
    #[serde(default)]
    pub improvement_areas: Vec<ImprovementArea>,
}

#[derive(Debug, Clone)]
enum SnapshotOrigin {
    File(PathBuf),
    Memory(DirectorySnapshot),
}

/// Directory source over a JSON snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotDirectorySource {
    origin: SnapshotOrigin,
}

impl SnapshotDirectorySource {
    /// Serves a snapshot file, re-reading it on every fetch.
    ///
    /// # Errors
    /// - Returns an error when the file cannot be read or decoded now, so
    ///   misconfiguration surfaces before the first view opens.
    pub fn open(path: impl Into<PathBuf>) -> SourceResult<Self> {
        let path = path.into();
        read_snapshot(&path)?;
        Ok(Self {
            origin: SnapshotOrigin::File(path),
        })
    }

    pub fn from_snapshot(snapshot: DirectorySnapshot) -> Self {
        Self {
            origin: SnapshotOrigin::Memory(snapshot),
        }
    }

    pub fn from_json_str(json: &str) -> SourceResult<Self> {
        Ok(Self::from_snapshot(serde_json::from_str(json)?))
    }

    fn with_snapshot<T>(&self, f: impl FnOnce(&DirectorySnapshot) -> T) -> SourceResult<T> {
        match &self.origin {
            SnapshotOrigin::File(path) => Ok(f(&read_snapshot(path)?)),
            SnapshotOrigin::Memory(snapshot) => Ok(f(snapshot)),
        }
    }
}

impl DirectorySource for SnapshotDirectorySource {
    fn fetch_employee_collection(
        &self,
        manager: Option<EmployeeId>,
    ) -> SourceResult<Vec<EmployeeRecord>> {
        self.with_snapshot(|snapshot| {
            snapshot
                .employees
                .iter()
                .filter(|employee| manager.is_none() || employee.manager_id == manager)
                .map(|employee| EmployeeRecord {
                    id: employee.id,
                    name: employee.name.clone(),
                    title: employee.title.clone(),
                    skills: employee.skills.clone(),
                })
                .collect()
        })
    }

    fn fetch_employee_detail(&self, id: EmployeeId) -> SourceResult<Option<EmployeeDetailRecord>> {
        self.with_snapshot(|snapshot| {
            snapshot
                .employees
                .iter()
                .find(|employee| employee.id == id)
                .map(|employee| EmployeeDetailRecord {
                    id: employee.id,
                    name: employee.name.clone(),
                    title: employee.title.clone(),
                    skills: employee.skills.clone(),
                    improvement_areas: employee.improvement_areas.clone(),
                })
        })
    }

    fn fetch_technology_catalog(&self) -> SourceResult<Vec<CatalogEntry>> {
        self.with_snapshot(|snapshot| snapshot.technologies.clone())
    }
}

fn read_snapshot(path: &Path) -> SourceResult<DirectorySnapshot> {
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::SnapshotDirectorySource;
    use crate::source::{DirectorySource, SourceError};

    const SNAPSHOT: &str = r#"{
        "technologies": [
            { "id": 1, "name": "React", "specialty": "Frontend" },
            { "id": 2, "name": "Perl", "specialty": "Backend", "deleted": true }
        ],
        "employees": [
            { "id": 1, "name": "Alice", "skills": [
                { "technology_name": "react", "specialty_name": "Frontend", "proficiency": 7 }
            ] },
            { "id": 2, "name": "Bob", "manager_id": 1 }
        ]
    }"#;

    #[test]
    fn manager_filter_selects_direct_reports() {
        let source = SnapshotDirectorySource::from_json_str(SNAPSHOT).unwrap();
        let all = source.fetch_employee_collection(None).unwrap();
        let reports = source.fetch_employee_collection(Some(1)).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].name, "Bob");
    }

    #[test]
    fn catalog_keeps_tombstones_for_the_core_to_filter() {
        let source = SnapshotDirectorySource::from_json_str(SNAPSHOT).unwrap();
        let entries = source.fetch_technology_catalog().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].deleted);
    }

    #[test]
    fn unknown_employee_is_none() {
        let source = SnapshotDirectorySource::from_json_str(SNAPSHOT).unwrap();
        assert!(source.fetch_employee_detail(99).unwrap().is_none());
        assert_eq!(
            source.fetch_employee_detail(1).unwrap().unwrap().skills.len(),
            1
        );
    }

    #[test]
    fn malformed_json_is_a_snapshot_error() {
        let err = SnapshotDirectorySource::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SourceError::Snapshot(_)));
    }
}
