//! Employee record shapes and their canonical projections.
//!
//! # Responsibility
//! - Define the raw collection/detail records returned by directory sources.
//! - Project raw records into `EmployeeSummary` (directory list) and
//!   `EmployeeProfile` (detail view).
//!
//! # Invariants
//! - Projections always run skills through the normalizer.
//! - A missing or blank title is displayed as `"Employee"`.

use crate::model::skill::{NormalizedSkill, SkillRecord};
use crate::skills::normalize::normalize_skills;
use serde::{Deserialize, Serialize};

/// Stable identifier of an employee.
pub type EmployeeId = i64;

/// Title shown when the source has none.
pub const DEFAULT_TITLE: &str = "Employee";

/// Directory-list row as delivered by a directory source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
}

/// Detail payload for one employee as delivered by a directory source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDetailRecord {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
    #[serde(default)]
    pub improvement_areas: Vec<ImprovementArea>,
}

/// Descriptive area an employee should improve in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementArea {
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Non-negative once past the source boundary.
    #[serde(default)]
    pub points: f64,
}

/// Employee as shown in the searchable directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub name: String,
    pub title: String,
    pub skills: Vec<NormalizedSkill>,
}

impl EmployeeSummary {
    pub fn from_record(record: EmployeeRecord) -> Self {
        Self {
            id: record.id,
            title: display_title(record.title.as_deref()),
            skills: normalize_skills(&record.skills),
            name: record.name,
        }
    }
}

/// Employee as shown in the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeProfile {
    pub id: EmployeeId,
    pub name: String,
    pub title: String,
    pub skills: Vec<NormalizedSkill>,
    pub improvement_areas: Vec<ImprovementArea>,
}

impl EmployeeProfile {
    pub fn from_record(record: EmployeeDetailRecord) -> Self {
        Self {
            id: record.id,
            title: display_title(record.title.as_deref()),
            skills: normalize_skills(&record.skills),
            name: record.name,
            improvement_areas: record.improvement_areas,
        }
    }

    /// Avatar fallback text: the first character of every name part.
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

fn display_title(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string()
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{EmployeeDetailRecord, EmployeeProfile, EmployeeRecord, EmployeeSummary};
    use crate::model::skill::SkillRecord;

    #[test]
    fn summary_defaults_blank_title() {
        let summary = EmployeeSummary::from_record(EmployeeRecord {
            id: 7,
            name: "Dana Scully".to_string(),
            title: Some("  ".to_string()),
            skills: vec![SkillRecord::new("React", 5)],
        });
        assert_eq!(summary.title, "Employee");
        assert_eq!(summary.skills.len(), 1);
        assert_eq!(summary.skills[0].technology_key, "react");
    }

    #[test]
    fn profile_initials_use_each_name_part() {
        let profile = EmployeeProfile::from_record(EmployeeDetailRecord {
            id: 1,
            name: "alice  mae Johnson".to_string(),
            title: None,
            skills: Vec::new(),
            improvement_areas: Vec::new(),
        });
        assert_eq!(profile.initials(), "AMJ");
        assert_eq!(profile.title, "Employee");
    }
}
