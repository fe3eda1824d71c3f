use skillmap_core::skills::palette::{palette_for, OTHER_PALETTE};
use skillmap_core::{aggregate_by_specialty, normalize_skills, Proficiency, SkillRecord};

#[test]
fn averages_per_specialty_with_other_bucket() {
    let skills = normalize_skills(&[
        SkillRecord::new("React", 6).with_specialty("Frontend"),
        SkillRecord::new("Vue", 8).with_specialty("Frontend"),
        SkillRecord::new("Bash", 3),
    ]);
    let groups = aggregate_by_specialty(&skills);

    assert_eq!(groups.len(), 2);
    let frontend = groups.get("Frontend").unwrap();
    assert_eq!(frontend.len(), 2);
    assert_eq!(frontend.average, Some(7.0));
    assert_eq!(frontend.max_proficiency, Proficiency::new(8));

    let other = groups.get("Other").unwrap();
    assert_eq!(other.average, Some(3.0));
    assert!(other.specialty.is_other());
    assert_eq!(other.palette(), &OTHER_PALETTE);
}

#[test]
fn empty_skills_give_empty_groups() {
    let groups = aggregate_by_specialty(&[]);
    assert!(groups.is_empty());
    assert!(groups.sorted_by_name().is_empty());
}

#[test]
fn specialty_casing_variants_share_one_group() {
    let skills = normalize_skills(&[
        SkillRecord::new("Go", 8).with_specialty("Backend"),
        SkillRecord::new("Rust", 6).with_specialty("backend"),
        SkillRecord::new("Java", 4).with_specialty(" BACKEND "),
    ]);
    let groups = aggregate_by_specialty(&skills);

    assert_eq!(groups.len(), 1);
    let backend = groups.get("backend").unwrap();
    assert_eq!(backend.specialty.label(), "Backend");
    assert_eq!(backend.average, Some(6.0));
    assert_eq!(backend.palette(), palette_for("backend"));
}

#[test]
fn blank_specialty_counts_as_other() {
    let skills = normalize_skills(&[
        SkillRecord::new("Excel", 5).with_specialty("   "),
        SkillRecord::new("Word", 7),
    ]);
    let groups = aggregate_by_specialty(&skills);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups.get("other").unwrap().average, Some(6.0));
}

#[test]
fn group_members_keep_input_order_and_sum_years() {
    let skills = normalize_skills(&[
        SkillRecord::new("Vue", 5)
            .with_specialty("Frontend")
            .with_years(2.5),
        SkillRecord::new("Go", 8).with_specialty("Backend"),
        SkillRecord::new("React", 9)
            .with_specialty("Frontend")
            .with_years(4.0),
    ]);
    let groups = aggregate_by_specialty(&skills);

    let order: Vec<&str> = groups
        .iter()
        .map(|group| group.specialty.label())
        .collect();
    assert_eq!(order, vec!["Frontend", "Backend"]);

    let sorted: Vec<&str> = groups
        .sorted_by_name()
        .into_iter()
        .map(|group| group.specialty.label())
        .collect();
    assert_eq!(sorted, vec!["Backend", "Frontend"]);

    let frontend = groups.get("Frontend").unwrap();
    let members: Vec<&str> = frontend
        .skills
        .iter()
        .map(|skill| skill.technology_name.as_str())
        .collect();
    assert_eq!(members, vec!["Vue", "React"]);
    assert_eq!(frontend.total_years, 6.5);
    assert_eq!(groups.get("Backend").unwrap().total_years, 0.0);
}

#[test]
fn out_of_range_proficiency_saturates_before_averaging() {
    let skills = normalize_skills(&[
        SkillRecord::new("Go", 14).with_specialty("Backend"),
        SkillRecord::new("Rust", -2).with_specialty("Backend"),
    ]);
    let groups = aggregate_by_specialty(&skills);
    let backend = groups.get("Backend").unwrap();

    assert_eq!(backend.average, Some(5.0));
    assert_eq!(backend.max_proficiency, Some(Proficiency::MAX));
}
