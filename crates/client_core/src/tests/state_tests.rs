use super::*;
use shared::domain::{Patient, PatientId};

fn patient(id: i64, name: &str) -> Patient {
    Patient {
        id: PatientId(id),
        name: name.to_string(),
        age: "40".to_string(),
        gender: "F".to_string(),
        address: "1 Main St".to_string(),
    }
}

#[test]
fn set_all_replaces_the_previous_list() {
    let state = vec![patient(1, "Alice")];
    let next = reduce(
        state,
        PatientAction::SetAll(vec![patient(2, "Bob"), patient(3, "Carol")]),
    );
    assert_eq!(next, vec![patient(2, "Bob"), patient(3, "Carol")]);
}

#[test]
fn add_appends_and_preserves_existing_order() {
    let state = vec![patient(1, "Alice"), patient(2, "Bob")];
    let next = reduce(state, PatientAction::Add(patient(3, "Carol")));
    assert_eq!(next.len(), 3);
    assert_eq!(next[0], patient(1, "Alice"));
    assert_eq!(next[1], patient(2, "Bob"));
    assert_eq!(next[2], patient(3, "Carol"));
}

#[test]
fn edit_replaces_the_matching_element_in_place() {
    let state = vec![patient(1, "Alice"), patient(2, "Bob")];
    let mut renamed = patient(2, "Robert");
    renamed.age = "41".to_string();
    let next = reduce(state, PatientAction::Edit(renamed.clone()));
    assert_eq!(next, vec![patient(1, "Alice"), renamed]);
}

#[test]
fn edit_with_unknown_id_leaves_the_list_unchanged() {
    let state = vec![patient(1, "Alice"), patient(2, "Bob")];
    let next = reduce(state.clone(), PatientAction::Edit(patient(9, "Mallory")));
    assert_eq!(next, state);
}

#[test]
fn edit_replaces_every_occurrence_of_a_duplicated_id() {
    // Duplicates only arise from a buggy server, but the replacement is
    // still keyed by id equality across the whole list.
    let state = vec![patient(1, "Alice"), patient(1, "Alicia"), patient(2, "Bob")];
    let next = reduce(state, PatientAction::Edit(patient(1, "Alex")));
    assert_eq!(
        next,
        vec![patient(1, "Alex"), patient(1, "Alex"), patient(2, "Bob")]
    );
}

#[test]
fn delete_removes_only_the_matching_patient() {
    let state = vec![patient(1, "Alice"), patient(2, "Bob"), patient(3, "Carol")];
    let next = reduce(state, PatientAction::Delete(PatientId(2)));
    assert_eq!(next, vec![patient(1, "Alice"), patient(3, "Carol")]);
    assert!(next.iter().all(|p| p.id != PatientId(2)));
}

#[test]
fn delete_of_an_absent_id_is_a_noop() {
    let state = vec![patient(1, "Alice")];
    let next = reduce(state.clone(), PatientAction::Delete(PatientId(9)));
    assert_eq!(next, state);
}

#[test]
fn empty_search_term_yields_the_full_list() {
    let patients = vec![patient(1, "Alice"), patient(2, "Bob")];
    let filtered = filter_by_name(&patients, "");
    assert_eq!(filtered.len(), patients.len());
}

#[test]
fn filter_matches_substrings_case_insensitively() {
    let patients = vec![
        patient(1, "Alice Smith"),
        patient(2, "Bob"),
        patient(3, "alison"),
    ];
    let filtered = filter_by_name(&patients, "ALI");
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered[0].name, "Alice Smith");
    assert_eq!(filtered[1].name, "alison");
}

#[test]
fn filter_result_is_a_subset_of_the_input() {
    let patients = vec![patient(1, "Alice"), patient(2, "Bob")];
    let filtered = filter_by_name(&patients, "zzz");
    assert!(filtered.is_empty());
    // Filtering never mutates the underlying list.
    assert_eq!(patients.len(), 2);
}
