//! Skill normalizer.
//!
//! # Invariants
//! - Pure and total: every well-typed record yields one `NormalizedSkill`.
//! - Range violations are reported by `source::boundary`, not here; the
//!   typed conversion below only saturates to keep `Proficiency` valid.

use crate::model::skill::{NormalizedSkill, Proficiency, SkillRecord, Specialty};
use crate::skills::matching::match_key;

/// Converts one raw record into the canonical skill shape.
pub fn normalize_skill(record: &SkillRecord) -> NormalizedSkill {
    NormalizedSkill {
        technology_name: record.technology_name.clone(),
        technology_key: match_key(&record.technology_name),
        specialty: Specialty::from_raw(record.specialty_name.as_deref()),
        proficiency: Proficiency::saturating_from(record.proficiency),
        years_of_experience: record
            .years_of_experience
            .filter(|years| years.is_finite() && *years >= 0.0)
            .unwrap_or(0.0),
    }
}

/// Normalizes a sequence of raw records, preserving order.
pub fn normalize_skills(records: &[SkillRecord]) -> Vec<NormalizedSkill> {
    records.iter().map(normalize_skill).collect()
}
