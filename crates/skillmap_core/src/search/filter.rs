//! In-memory employee filter.
//!
//! # Responsibility
//! - Evaluate the free-text + selected-skill predicate over a collection.
//! - Own the tag selection toggle semantics used by callers.
//!
//! # Invariants
//! - Output preserves collection order.
//! - Text match: lower-cased query, untrimmed, is a substring of name or
//!   title; only the empty query matches everything.
//! - Skill match: no tags selected, or any skill key is selected.
//! - Toggling the same tag twice restores the previous selection.

use crate::model::employee::{EmployeeProfile, EmployeeSummary};
use crate::model::skill::NormalizedSkill;
use crate::skills::matching::match_key;
use log::debug;
use std::collections::BTreeSet;

/// Anything the directory filter can evaluate.
pub trait DirectoryEntry {
    fn display_name(&self) -> &str;
    fn title(&self) -> &str;
    fn skills(&self) -> &[NormalizedSkill];
}

impl DirectoryEntry for EmployeeSummary {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn skills(&self) -> &[NormalizedSkill] {
        &self.skills
    }
}

impl DirectoryEntry for EmployeeProfile {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn skills(&self) -> &[NormalizedSkill] {
        &self.skills
    }
}

/// Selected skill tags in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillTagSelection {
    tags: Vec<String>,
}

impl SkillTagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `tag`, or deselects it when already selected.
    ///
    /// Returns whether the tag is selected afterwards. Blank tags are
    /// ignored and report `false`.
    pub fn toggle(&mut self, tag: &str) -> bool {
        let key = match_key(tag);
        if key.is_empty() {
            return false;
        }
        match self.tags.iter().position(|selected| *selected == key) {
            Some(index) => {
                self.tags.remove(index);
                false
            }
            None => {
                self.tags.push(key);
                true
            }
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        let key = match_key(tag);
        self.tags.iter().any(|selected| *selected == key)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillTagSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for tag in iter {
            if !selection.contains(tag.as_ref()) {
                selection.toggle(tag.as_ref());
            }
        }
        selection
    }
}

/// Caller-side filter state: query text plus tag selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    query: String,
    selection: SkillTagSelection,
}

impl EmployeeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.selection.toggle(tag)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selection(&self) -> &SkillTagSelection {
        &self.selection
    }

    pub fn apply<'a, E: DirectoryEntry>(&self, all: &'a [E]) -> Vec<&'a E> {
        filter_employees(all, &self.query, &self.selection)
    }
}

/// Returns the entries matching both `query` and `selected`, in order.
pub fn filter_employees<'a, E: DirectoryEntry>(
    all: &'a [E],
    query: &str,
    selected: &SkillTagSelection,
) -> Vec<&'a E> {
    let needle = query.to_lowercase();
    let matched: Vec<&E> = all
        .iter()
        .filter(|entry| matches_text(*entry, &needle) && matches_skills(*entry, selected))
        .collect();

    debug!(
        "event=employee_filter module=search status=ok total={} matched={} query_chars={} tags={}",
        all.len(),
        matched.len(),
        needle.chars().count(),
        selected.len()
    );
    matched
}

/// Sorted, deduplicated skill keys present in `all`.
pub fn available_skill_tags<E: DirectoryEntry>(all: &[E]) -> Vec<String> {
    all.iter()
        .flat_map(|entry| entry.skills())
        .map(|skill| skill.technology_key.clone())
        .filter(|key| !key.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn matches_text<E: DirectoryEntry>(entry: &E, needle: &str) -> bool {
    needle.is_empty()
        || entry.display_name().to_lowercase().contains(needle)
        || entry.title().to_lowercase().contains(needle)
}

fn matches_skills<E: DirectoryEntry>(entry: &E, selected: &SkillTagSelection) -> bool {
    selected.is_empty()
        || entry
            .skills()
            .iter()
            .any(|skill| selected.tags.iter().any(|tag| *tag == skill.technology_key))
}
