//! Technology catalog entries.
//!
//! # Invariants
//! - `TechnologyId` is the identity of a technology.
//! - Matching against skill records is done by name, never by id.

use crate::model::skill::Specialty;
use serde::{Deserialize, Serialize};

/// Stable identifier of a catalog technology.
pub type TechnologyId = i64;

/// Catalog row as delivered by a directory source.
///
/// Tombstoned rows (`deleted == true`) are still delivered so that the
/// filtering rule lives in one place, see [`crate::Catalog::from_entries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: TechnologyId,
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

/// One live technology of the canonical catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Technology {
    pub id: TechnologyId,
    /// Display name, kept verbatim from the source.
    pub name: String,
    pub specialty: Specialty,
}

impl Technology {
    pub fn from_entry(entry: CatalogEntry) -> Self {
        Self {
            id: entry.id,
            specialty: Specialty::from_raw(entry.specialty.as_deref()),
            name: entry.name,
        }
    }
}
