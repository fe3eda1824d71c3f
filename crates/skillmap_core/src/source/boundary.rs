//! Edge checks for raw source records.
//!
//! # Responsibility
//! - Clamp out-of-range proficiency into `0..=10`.
//! - Replace negative or non-numeric years and points with `0`.
//! - Log every correction as a data-quality warning.
//!
//! # Invariants
//! - Checks never drop a record; they only correct fields.
//! - Log lines carry ids and counts, never names or free text.

use crate::model::employee::{EmployeeDetailRecord, EmployeeId, EmployeeRecord, ImprovementArea};
use crate::model::skill::{Proficiency, SkillRecord};
use log::warn;

/// Checks every skill of a collection row.
pub fn check_employee_record(mut record: EmployeeRecord) -> EmployeeRecord {
    let corrected = check_skill_records(record.id, &mut record.skills);
    report(record.id, "collection", corrected);
    record
}

/// Checks every skill and improvement area of a detail payload.
pub fn check_employee_detail(mut record: EmployeeDetailRecord) -> EmployeeDetailRecord {
    let mut corrected = check_skill_records(record.id, &mut record.skills);
    corrected += record
        .improvement_areas
        .iter_mut()
        .map(check_improvement_area)
        .filter(|changed| *changed)
        .count();
    report(record.id, "detail", corrected);
    record
}

/// Corrects one skill record in place; returns whether anything changed.
pub fn check_skill_record(record: &mut SkillRecord) -> bool {
    let mut corrected = false;

    if !Proficiency::is_in_range(record.proficiency) {
        record.proficiency = i64::from(Proficiency::saturating_from(record.proficiency).value());
        corrected = true;
    }

    if let Some(years) = record.years_of_experience {
        if !years.is_finite() || years < 0.0 {
            record.years_of_experience = Some(0.0);
            corrected = true;
        }
    }

    corrected
}

fn check_improvement_area(area: &mut ImprovementArea) -> bool {
    if area.points.is_finite() && area.points >= 0.0 {
        return false;
    }
    area.points = 0.0;
    true
}

fn check_skill_records(employee_id: EmployeeId, records: &mut [SkillRecord]) -> usize {
    let mut corrected = 0;
    for (index, record) in records.iter_mut().enumerate() {
        let raw_proficiency = record.proficiency;
        if check_skill_record(record) {
            corrected += 1;
            warn!(
                "event=skill_record_corrected module=source status=corrected employee_id={} index={} raw_proficiency={} proficiency={}",
                employee_id, index, raw_proficiency, record.proficiency
            );
        }
    }
    corrected
}

fn report(employee_id: EmployeeId, payload: &str, corrected: usize) {
    if corrected > 0 {
        warn!(
            "event=record_check module=source status=corrected payload={} employee_id={} corrected={}",
            payload, employee_id, corrected
        );
    }
}
