//! Catalog-aligned dataset builder.
//!
//! # Responsibility
//! - Project named skill collections onto the ordered catalog.
//! - Derive per-point presence, radius and color with the same rule as the
//!   values, so chart points and values never disagree.
//!
//! # Invariants
//! - `labels.len() == catalog.len()`.
//! - Every vector of every series has exactly `labels.len()` entries and
//!   index `i` always refers to `catalog[i]`.
//! - Absent skills are zero-filled; duplicates within one series resolve to
//!   the first occurrence.

use crate::model::skill::NormalizedSkill;
use crate::skills::aggregate::{SpecialtyGroup, SpecialtyGroups};
use crate::skills::catalog::Catalog;
use crate::skills::matching::match_key;
use crate::skills::palette::{SpecialtyPalette, ABSENT_POINT_COLOR, COMBINED_PALETTE};
use serde::Serialize;
use std::collections::HashMap;

/// Series name of the all-skills series.
pub const COMBINED_SERIES_NAME: &str = "Skill Proficiency";
pub const PRESENT_POINT_RADIUS: u8 = 4;
pub const ABSENT_POINT_RADIUS: u8 = 0;

/// One named skill collection to project onto the catalog.
#[derive(Debug, Clone)]
pub struct SeriesInput<'a> {
    pub name: String,
    pub skills: &'a [NormalizedSkill],
    pub palette: &'static SpecialtyPalette,
}

impl<'a> SeriesInput<'a> {
    pub fn new(
        name: impl Into<String>,
        skills: &'a [NormalizedSkill],
        palette: &'static SpecialtyPalette,
    ) -> Self {
        Self {
            name: name.into(),
            skills,
            palette,
        }
    }

    /// All skills of a person as a single series.
    pub fn combined(skills: &'a [NormalizedSkill]) -> Self {
        Self::new(COMBINED_SERIES_NAME, skills, &COMBINED_PALETTE)
    }

    /// One specialty group as a series colored by its specialty.
    pub fn for_group(group: &'a SpecialtyGroup) -> Self {
        Self::new(group.specialty.label(), &group.skills, group.palette())
    }
}

/// One catalog-aligned series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSeries {
    pub name: String,
    pub values: Vec<u8>,
    pub present: Vec<bool>,
    pub point_radius: Vec<u8>,
    pub point_color: Vec<&'static str>,
    pub border_color: &'static str,
    pub fill_color: &'static str,
}

impl DatasetSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Labels in catalog order plus parallel numeric series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogAlignedDataset {
    pub labels: Vec<String>,
    pub series: Vec<DatasetSeries>,
}

impl CatalogAlignedDataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn series(&self, name: &str) -> Option<&DatasetSeries> {
        self.series.iter().find(|series| series.name == name)
    }

    /// Returns whether every series vector matches the label count.
    pub fn is_aligned(&self) -> bool {
        let expected = self.labels.len();
        self.series.iter().all(|series| {
            series.values.len() == expected
                && series.present.len() == expected
                && series.point_radius.len() == expected
                && series.point_color.len() == expected
        })
    }
}

/// Projects every input series onto `catalog`.
///
/// Runs in `O(catalog + skills)` per series: each series is first indexed
/// by match key, then the catalog is walked once.
pub fn build_catalog_aligned_dataset(
    catalog: &Catalog,
    inputs: &[SeriesInput<'_>],
) -> CatalogAlignedDataset {
    let catalog_keys: Vec<String> = catalog
        .iter()
        .map(|technology| match_key(&technology.name))
        .collect();

    let series = inputs
        .iter()
        .map(|input| project_series(&catalog_keys, input))
        .collect();

    CatalogAlignedDataset {
        labels: catalog.labels(),
        series,
    }
}

/// Dataset with the single combined series.
pub fn combined_dataset(catalog: &Catalog, skills: &[NormalizedSkill]) -> CatalogAlignedDataset {
    build_catalog_aligned_dataset(catalog, &[SeriesInput::combined(skills)])
}

/// Dataset with one series per specialty group, alphabetically ordered.
pub fn specialty_dataset(catalog: &Catalog, groups: &SpecialtyGroups) -> CatalogAlignedDataset {
    let inputs: Vec<SeriesInput<'_>> = groups
        .sorted_by_name()
        .into_iter()
        .map(SeriesInput::for_group)
        .collect();
    build_catalog_aligned_dataset(catalog, &inputs)
}

fn project_series(catalog_keys: &[String], input: &SeriesInput<'_>) -> DatasetSeries {
    let mut proficiency_by_key: HashMap<&str, u8> = HashMap::with_capacity(input.skills.len());
    for skill in input.skills {
        proficiency_by_key
            .entry(skill.technology_key.as_str())
            .or_insert(skill.proficiency.value());
    }

    let mut series = DatasetSeries {
        name: input.name.clone(),
        values: Vec::with_capacity(catalog_keys.len()),
        present: Vec::with_capacity(catalog_keys.len()),
        point_radius: Vec::with_capacity(catalog_keys.len()),
        point_color: Vec::with_capacity(catalog_keys.len()),
        border_color: input.palette.border,
        fill_color: input.palette.fill,
    };

    for key in catalog_keys {
        let found = proficiency_by_key.get(key.as_str()).copied();
        series.values.push(found.unwrap_or(0));
        series.present.push(found.is_some());
        series.point_radius.push(if found.is_some() {
            PRESENT_POINT_RADIUS
        } else {
            ABSENT_POINT_RADIUS
        });
        series.point_color.push(if found.is_some() {
            input.palette.border
        } else {
            ABSENT_POINT_COLOR
        });
    }

    series
}

#[cfg(test)]
mod tests {
    use super::{build_catalog_aligned_dataset, combined_dataset, SeriesInput};
    use crate::model::skill::SkillRecord;
    use crate::model::technology::CatalogEntry;
    use crate::skills::catalog::Catalog;
    use crate::skills::normalize::normalize_skills;
    use crate::skills::palette::{ABSENT_POINT_COLOR, COMBINED_PALETTE};

    fn catalog(names: &[&str]) -> Catalog {
        Catalog::from_entries(names.iter().enumerate().map(|(index, name)| CatalogEntry {
            id: index as i64 + 1,
            name: name.to_string(),
            specialty: None,
            deleted: false,
        }))
    }

    #[test]
    fn first_occurrence_wins_for_duplicate_skills() {
        let skills = normalize_skills(&[SkillRecord::new("go", 3), SkillRecord::new("GO", 9)]);
        let dataset = combined_dataset(&catalog(&["Go"]), &skills);
        assert_eq!(dataset.series[0].values, vec![3]);
    }

    #[test]
    fn point_styles_follow_presence() {
        let skills = normalize_skills(&[SkillRecord::new("Rust", 5)]);
        let dataset = combined_dataset(&catalog(&["Go", "Rust"]), &skills);
        let series = &dataset.series[0];

        assert_eq!(series.present, vec![false, true]);
        assert_eq!(series.point_radius, vec![0, 4]);
        assert_eq!(
            series.point_color,
            vec![ABSENT_POINT_COLOR, COMBINED_PALETTE.border]
        );
        assert!(dataset.is_aligned());
    }

    #[test]
    fn present_skill_with_zero_proficiency_is_still_present() {
        let skills = normalize_skills(&[SkillRecord::new("Rust", 0)]);
        let dataset = combined_dataset(&catalog(&["Rust"]), &skills);
        assert_eq!(dataset.series[0].values, vec![0]);
        assert_eq!(dataset.series[0].present, vec![true]);
    }

    #[test]
    fn no_inputs_yields_labels_only() {
        let dataset = build_catalog_aligned_dataset(&catalog(&["Go", "Rust"]), &[]);
        assert_eq!(dataset.labels, vec!["Go", "Rust"]);
        assert!(dataset.series.is_empty());
        assert!(dataset.is_aligned());
    }

    #[test]
    fn skills_outside_catalog_are_ignored() {
        let skills = normalize_skills(&[SkillRecord::new("COBOL", 9)]);
        let input = SeriesInput::combined(&skills);
        let dataset = build_catalog_aligned_dataset(&catalog(&["Go"]), &[input]);
        assert_eq!(dataset.series[0].values, vec![0]);
    }
}
