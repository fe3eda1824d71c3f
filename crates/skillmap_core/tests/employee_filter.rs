use skillmap_core::{
    available_skill_tags, filter_employees, EmployeeFilter, EmployeeRecord, EmployeeSummary,
    SkillRecord, SkillTagSelection,
};

fn employee(id: i64, name: &str, title: Option<&str>, skills: &[(&str, i64)]) -> EmployeeSummary {
    EmployeeSummary::from_record(EmployeeRecord {
        id,
        name: name.to_string(),
        title: title.map(str::to_string),
        skills: skills
            .iter()
            .map(|(technology, level)| SkillRecord::new(*technology, *level))
            .collect(),
    })
}

fn alice_and_bob() -> Vec<EmployeeSummary> {
    vec![
        employee(1, "Alice Johnson", Some("Senior Frontend Developer"), &[("React", 9)]),
        employee(2, "Bob Smith", Some("Backend Engineer"), &[("Go", 7)]),
    ]
}

fn names<'a>(matched: &[&'a EmployeeSummary]) -> Vec<&'a str> {
    matched.iter().map(|employee| employee.name.as_str()).collect()
}

#[test]
fn query_matches_name_case_insensitively() {
    let all = alice_and_bob();
    let matched = filter_employees(&all, "bob", &SkillTagSelection::new());
    assert_eq!(names(&matched), vec!["Bob Smith"]);

    let matched = filter_employees(&all, "ALICE J", &SkillTagSelection::new());
    assert_eq!(names(&matched), vec!["Alice Johnson"]);
}

#[test]
fn query_matches_title() {
    let all = alice_and_bob();
    let matched = filter_employees(&all, "engineer", &SkillTagSelection::new());
    assert_eq!(names(&matched), vec!["Bob Smith"]);
}

#[test]
fn missing_title_matches_default_title() {
    let all = vec![employee(3, "Carol", None, &[])];
    let matched = filter_employees(&all, "employee", &SkillTagSelection::new());
    assert_eq!(names(&matched), vec!["Carol"]);
}

#[test]
fn selected_tag_keeps_only_employees_with_that_skill() {
    let all = alice_and_bob();
    let selected: SkillTagSelection = ["react"].into_iter().collect();
    let matched = filter_employees(&all, "", &selected);
    assert_eq!(names(&matched), vec!["Alice Johnson"]);
}

#[test]
fn any_selected_tag_is_enough() {
    let all = alice_and_bob();
    let selected: SkillTagSelection = ["React", "GO"].into_iter().collect();
    let matched = filter_employees(&all, "", &selected);
    assert_eq!(names(&matched), vec!["Alice Johnson", "Bob Smith"]);
}

#[test]
fn query_and_tags_must_both_match() {
    let all = alice_and_bob();
    let selected: SkillTagSelection = ["react"].into_iter().collect();
    assert!(filter_employees(&all, "bob", &selected).is_empty());
}

#[test]
fn empty_query_and_tags_return_everything_in_order() {
    let all = vec![
        employee(5, "Zed", None, &[]),
        employee(1, "Alice", None, &[("React", 9)]),
        employee(3, "Mia", None, &[("Go", 2)]),
    ];
    let matched = filter_employees(&all, "", &SkillTagSelection::new());
    assert_eq!(names(&matched), vec!["Zed", "Alice", "Mia"]);
}

#[test]
fn whitespace_query_is_matched_literally() {
    let all = alice_and_bob();
    let none = SkillTagSelection::new();

    assert!(filter_employees(&all, "   ", &none).is_empty());
    assert!(filter_employees(&all, "smith ", &none).is_empty());
    assert!(filter_employees(&all, " bob", &none).is_empty());
    assert_eq!(names(&filter_employees(&all, " smith", &none)), vec!["Bob Smith"]);
}

#[test]
fn toggling_a_tag_twice_restores_the_selection() {
    let mut selection = SkillTagSelection::new();
    assert!(selection.toggle("Go"));
    let before = selection.clone();

    assert!(selection.toggle("React"));
    assert!(!selection.toggle("react"));
    assert_eq!(selection, before);
    assert!(!selection.toggle("   "));
    assert_eq!(selection.len(), 1);
}

#[test]
fn filter_state_applies_query_and_tags() {
    let all = alice_and_bob();
    let mut filter = EmployeeFilter::new().with_query("ali");
    assert_eq!(names(&filter.apply(&all)), vec!["Alice Johnson"]);

    filter.set_query("");
    filter.toggle_tag("go");
    assert!(filter.selection().contains("Go"));
    assert_eq!(names(&filter.apply(&all)), vec!["Bob Smith"]);

    filter.toggle_tag("GO");
    assert_eq!(filter.apply(&all).len(), 2);
}

#[test]
fn available_tags_are_sorted_and_deduplicated() {
    let all = vec![
        employee(1, "Alice", None, &[("React", 9), ("TypeScript", 8)]),
        employee(2, "Bob", None, &[("react", 4), ("Go", 7)]),
    ];
    assert_eq!(available_skill_tags(&all), vec!["go", "react", "typescript"]);
}
