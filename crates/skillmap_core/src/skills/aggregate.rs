//! Specialty aggregator.
//!
//! # Responsibility
//! - Group normalized skills by specialty in a single pass.
//! - Derive per-specialty statistics (average, max, total years).
//!
//! # Invariants
//! - Group order is first-occurrence order of specialties in the input.
//! - Groups are keyed by the folded specialty key; the label shown is the
//!   one of the first skill seen for that key.
//! - A group is never created empty.

use crate::model::skill::{NormalizedSkill, Proficiency, Specialty};
use crate::skills::palette::{palette_for, SpecialtyPalette};
use serde::Serialize;
use std::collections::HashMap;

/// Skills of one specialty with derived statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialtyGroup {
    pub specialty: Specialty,
    /// Member skills in input order.
    pub skills: Vec<NormalizedSkill>,
    /// Mean proficiency; `None` only for an empty group.
    pub average: Option<f64>,
    pub max_proficiency: Option<Proficiency>,
    pub total_years: f64,
}

impl SpecialtyGroup {
    fn from_skills(specialty: Specialty, skills: Vec<NormalizedSkill>) -> Self {
        let total: u32 = skills
            .iter()
            .map(|skill| u32::from(skill.proficiency.value()))
            .sum();
        let average = (!skills.is_empty()).then(|| f64::from(total) / skills.len() as f64);

        Self {
            max_proficiency: skills.iter().map(|skill| skill.proficiency).max(),
            total_years: skills.iter().map(|skill| skill.years_of_experience).sum(),
            average,
            specialty,
            skills,
        }
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn palette(&self) -> &'static SpecialtyPalette {
        palette_for(self.specialty.key())
    }
}

/// Specialty groups in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SpecialtyGroups {
    groups: Vec<SpecialtyGroup>,
}

impl SpecialtyGroups {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// An empty mapping means "no data", not an error.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpecialtyGroup> {
        self.groups.iter()
    }

    /// Looks up a group by specialty name, compared case-insensitively.
    pub fn get(&self, specialty: &str) -> Option<&SpecialtyGroup> {
        let key = Specialty::from_raw(Some(specialty));
        self.groups
            .iter()
            .find(|group| group.specialty.key() == key.key())
    }

    /// Groups ordered alphabetically by label for display.
    pub fn sorted_by_name(&self) -> Vec<&SpecialtyGroup> {
        let mut sorted: Vec<&SpecialtyGroup> = self.groups.iter().collect();
        sorted.sort_by(|left, right| {
            left.specialty
                .key()
                .cmp(right.specialty.key())
                .then_with(|| left.specialty.label().cmp(right.specialty.label()))
        });
        sorted
    }

    pub fn into_vec(self) -> Vec<SpecialtyGroup> {
        self.groups
    }
}

impl<'a> IntoIterator for &'a SpecialtyGroups {
    type Item = &'a SpecialtyGroup;
    type IntoIter = std::slice::Iter<'a, SpecialtyGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Groups skills by specialty and computes each group's statistics.
pub fn aggregate_by_specialty(skills: &[NormalizedSkill]) -> SpecialtyGroups {
    let mut index_by_key: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<(Specialty, Vec<NormalizedSkill>)> = Vec::new();

    for skill in skills {
        match index_by_key.get(skill.specialty.key()) {
            Some(&index) => buckets[index].1.push(skill.clone()),
            None => {
                index_by_key.insert(skill.specialty.key(), buckets.len());
                buckets.push((skill.specialty.clone(), vec![skill.clone()]));
            }
        }
    }

    SpecialtyGroups {
        groups: buckets
            .into_iter()
            .map(|(specialty, members)| SpecialtyGroup::from_skills(specialty, members))
            .collect(),
    }
}
