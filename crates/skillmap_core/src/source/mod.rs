//! Directory data-source contracts and implementations.
//!
//! # Responsibility
//! - Define the three logical queries the core consumes.
//! - Keep transport details (SQLite, JSON snapshot) behind one trait.
//! - Check raw records at the edge before they reach core algorithms.
//!
//! # Invariants
//! - Sources return raw shapes; they never normalize or aggregate.
//! - A missing employee is `Ok(None)`, never an error.

use crate::db::DbError;
use crate::model::employee::{EmployeeDetailRecord, EmployeeId, EmployeeRecord};
use crate::model::technology::CatalogEntry;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod boundary;
pub mod snapshot;
pub mod sqlite_source;

pub type SourceResult<T> = Result<T, SourceError>;

/// Failure to obtain data from a directory source.
#[derive(Debug)]
pub enum SourceError {
    Db(DbError),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Snapshot(serde_json::Error),
    InvalidData(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Snapshot(err) => write!(f, "invalid directory snapshot: {err}"),
            Self::InvalidData(message) => write!(f, "invalid directory data: {message}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Snapshot(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for SourceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SourceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Snapshot(value)
    }
}

/// Read-only access to the directory's backing data.
pub trait DirectorySource {
    /// Lists employees; `manager` restricts the list to direct reports.
    fn fetch_employee_collection(
        &self,
        manager: Option<EmployeeId>,
    ) -> SourceResult<Vec<EmployeeRecord>>;

    /// Loads one employee, `Ok(None)` when the id is unknown.
    fn fetch_employee_detail(&self, id: EmployeeId) -> SourceResult<Option<EmployeeDetailRecord>>;

    /// Lists catalog entries in catalog order, including tombstoned ones.
    fn fetch_technology_catalog(&self) -> SourceResult<Vec<CatalogEntry>>;
}

impl<S: DirectorySource + ?Sized> DirectorySource for Box<S> {
    fn fetch_employee_collection(
        &self,
        manager: Option<EmployeeId>,
    ) -> SourceResult<Vec<EmployeeRecord>> {
        (**self).fetch_employee_collection(manager)
    }

    fn fetch_employee_detail(&self, id: EmployeeId) -> SourceResult<Option<EmployeeDetailRecord>> {
        (**self).fetch_employee_detail(id)
    }

    fn fetch_technology_catalog(&self) -> SourceResult<Vec<CatalogEntry>> {
        (**self).fetch_technology_catalog()
    }
}
