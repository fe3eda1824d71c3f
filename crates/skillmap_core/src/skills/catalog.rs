//! Canonical technology catalog.
//!
//! # Invariants
//! - Tombstoned entries never enter the catalog.
//! - At most one technology per case-insensitive name; the first entry in
//!   source order wins.
//! - Catalog order is source order and defines chart axis order.

use crate::model::technology::{CatalogEntry, Technology};
use crate::skills::matching::match_key;
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashSet;

/// Ordered, deduplicated list of live technologies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    technologies: Vec<Technology>,
}

impl Catalog {
    /// Builds the catalog from raw source entries.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut seen = HashSet::new();
        let mut technologies = Vec::new();
        let mut deleted = 0_usize;
        let mut duplicates = 0_usize;

        for entry in entries {
            if entry.deleted {
                deleted += 1;
                continue;
            }
            if !seen.insert(match_key(&entry.name)) {
                duplicates += 1;
                continue;
            }
            technologies.push(Technology::from_entry(entry));
        }

        if duplicates > 0 {
            warn!(
                "event=catalog_build module=skills status=deduplicated duplicates={} kept={}",
                duplicates,
                technologies.len()
            );
        }
        debug!(
            "event=catalog_build module=skills status=ok kept={} deleted={}",
            technologies.len(),
            deleted
        );

        Self { technologies }
    }

    pub fn len(&self) -> usize {
        self.technologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty()
    }

    pub fn technologies(&self) -> &[Technology] {
        &self.technologies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Technology> {
        self.technologies.iter()
    }

    /// Catalog index of the technology called `name`, compared case-insensitively.
    pub fn position(&self, name: &str) -> Option<usize> {
        let key = match_key(name);
        self.technologies
            .iter()
            .position(|technology| match_key(&technology.name) == key)
    }

    /// Display names in catalog order.
    pub fn labels(&self) -> Vec<String> {
        self.technologies
            .iter()
            .map(|technology| technology.name.clone())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Technology;
    type IntoIter = std::slice::Iter<'a, Technology>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
