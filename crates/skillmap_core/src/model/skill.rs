//! Skill record shapes.
//!
//! # Responsibility
//! - Define the raw `SkillRecord` accepted from directory sources.
//! - Define the canonical `NormalizedSkill` used by every core algorithm.
//!
//! # Invariants
//! - `Specialty::label` is never empty; absent input maps to `"Other"`.
//! - `Proficiency` always holds a value in `0..=10`.
//! - `NormalizedSkill::technology_key` is derived with
//!   [`crate::skills::matching::match_key`] and is the only value used
//!   for catalog matching.

use crate::skills::matching::match_key;
use serde::{Deserialize, Deserializer, Serialize};

/// Bucket assigned to skills whose source has no specialty.
pub const OTHER_SPECIALTY: &str = "Other";

/// Raw skill record as delivered by a directory source.
///
/// Nothing about this shape is trusted: specialty casing varies, the
/// specialty may be missing, proficiency may be out of range and years may
/// be non-numeric. See `source::boundary` for the edge checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub technology_name: String,
    #[serde(default)]
    pub specialty_name: Option<String>,
    /// Expected to be in `0..=10`.
    pub proficiency: i64,
    /// Non-numeric input decodes to `Some(NaN)` so the boundary check can
    /// report it instead of failing the whole payload.
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub years_of_experience: Option<f64>,
}

impl SkillRecord {
    pub fn new(technology_name: impl Into<String>, proficiency: i64) -> Self {
        Self {
            technology_name: technology_name.into(),
            specialty_name: None,
            proficiency,
            years_of_experience: None,
        }
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty_name = Some(specialty.into());
        self
    }

    pub fn with_years(mut self, years: f64) -> Self {
        self.years_of_experience = Some(years);
        self
    }
}

fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::Number(number)) => Some(number.as_f64().unwrap_or(f64::NAN)),
        Some(serde_json::Value::String(text)) => Some(text.trim().parse().unwrap_or(f64::NAN)),
        Some(_) => Some(f64::NAN),
    })
}

/// Skill proficiency on the closed `0..=10` scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Proficiency(u8);

impl Proficiency {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(10);

    /// Returns `None` when `value` is outside `0..=10`.
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX.0).then_some(Self(value))
    }

    /// Converts any integer into range by saturating at the bounds.
    pub fn saturating_from(raw: i64) -> Self {
        Self(raw.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0)) as u8)
    }

    pub fn is_in_range(raw: i64) -> bool {
        (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&raw)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Specialty of a skill or technology.
///
/// `label` keeps the source's casing for display; `key` is the lower-case
/// fold used for grouping, color lookup and tag comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Specialty {
    label: String,
    key: String,
}

impl Specialty {
    /// Builds a specialty from optional source text.
    ///
    /// Missing, empty and whitespace-only input all map to `"Other"`.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(label) => Self {
                key: label.to_lowercase(),
                label: label.to_string(),
            },
            None => Self::other(),
        }
    }

    pub fn other() -> Self {
        Self {
            label: OTHER_SPECIALTY.to_string(),
            key: OTHER_SPECIALTY.to_lowercase(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_other(&self) -> bool {
        self.key == OTHER_SPECIALTY.to_lowercase()
    }
}

/// Canonical skill shape consumed by aggregation, datasets and filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSkill {
    /// Display name, verbatim from the source.
    pub technology_name: String,
    /// Case-insensitive comparison key of `technology_name`.
    pub technology_key: String,
    pub specialty: Specialty,
    pub proficiency: Proficiency,
    /// Always finite and `>= 0`.
    pub years_of_experience: f64,
}

impl NormalizedSkill {
    /// Returns whether this skill refers to the technology called `name`.
    pub fn refers_to(&self, name: &str) -> bool {
        self.technology_key == match_key(name)
    }
}
