use marksheet::model::StudentRecord;
use marksheet::roster::reconcile;

fn rec(name: &str, standard: &str, marks: &[i64]) -> StudentRecord {
    StudentRecord {
        name: name.to_string(),
        standard: standard.to_string(),
        marks: marks.iter().map(|m| Some(*m)).collect(),
    }
}

#[test]
fn distinct_names_pass_through_in_order() {
    let raw = vec![
        rec("Asha", "7", &[1, 2, 3, 4, 5, 6]),
        rec("Ravi", "8", &[6, 5, 4, 3, 2, 1]),
        rec("Meena", "7", &[9, 9, 9, 9, 9, 9]),
    ];
    let roster = reconcile(raw.clone());
    assert_eq!(roster.entries(), raw.as_slice());
}

#[test]
fn duplicate_name_keeps_first_standard_and_last_marks() {
    let raw = vec![
        rec("A", "std1", &[1, 2, 1, 2, 1, 2]),
        rec("B", "std2", &[3, 4, 3, 4, 3, 4]),
        StudentRecord {
            name: "A".to_string(),
            standard: "std9".to_string(),
            marks: vec![Some(5), Some(6), Some(5), Some(6), Some(5), Some(6)],
        },
    ];
    let roster = reconcile(raw);

    assert_eq!(roster.len(), 2);
    // A keeps its first-insertion position and first standard, but the
    // later occurrence's marks.
    let a = &roster.entries()[0];
    assert_eq!(a.name, "A");
    assert_eq!(a.standard, "std1");
    assert_eq!(
        a.marks,
        vec![Some(5), Some(6), Some(5), Some(6), Some(5), Some(6)]
    );
    assert_eq!(roster.entries()[1].name, "B");
}

#[test]
fn reconcile_is_deterministic_for_a_given_sequence() {
    let raw = vec![
        rec("X", "1", &[1, 1, 1, 1, 1, 1]),
        rec("Y", "2", &[2, 2, 2, 2, 2, 2]),
        rec("X", "1", &[3, 3, 3, 3, 3, 3]),
        rec("Z", "3", &[4, 4, 4, 4, 4, 4]),
        rec("Y", "2", &[5, 5, 5, 5, 5, 5]),
    ];
    let first = reconcile(raw.clone());
    let second = reconcile(raw);
    assert_eq!(first, second);
    assert_eq!(
        first.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["X", "Y", "Z"]
    );
}

#[test]
fn lookup_by_name_finds_the_merged_entry() {
    let raw = vec![
        rec("Asha", "7", &[1, 2, 3, 4, 5, 6]),
        rec("Asha", "7", &[10, 20, 30, 40, 50, 60]),
    ];
    let roster = reconcile(raw);
    assert_eq!(roster.len(), 1);
    let asha = roster.get("Asha").expect("present");
    assert_eq!(asha.total(), Some(210));
    assert!(roster.get("Ravi").is_none());
}
