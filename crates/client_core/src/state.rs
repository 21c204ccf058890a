//! Pure state transitions for the client's patient list.

use shared::domain::{Patient, PatientId};

/// Actions applied to the patient list. Each mirrors one store mutation;
/// `Edit` and `Delete` are keyed strictly by id equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientAction {
    SetAll(Vec<Patient>),
    Add(Patient),
    Edit(Patient),
    Delete(PatientId),
}

/// Produces the next patient list from the current one and an action.
/// No side effects. `Edit` with an id not present in the list leaves it
/// unchanged (no insert-on-miss); `Delete` of an absent id is a no-op.
pub fn reduce(state: Vec<Patient>, action: PatientAction) -> Vec<Patient> {
    match action {
        PatientAction::SetAll(patients) => patients,
        PatientAction::Add(patient) => {
            let mut next = state;
            next.push(patient);
            next
        }
        PatientAction::Edit(patient) => state
            .into_iter()
            .map(|existing| {
                if existing.id == patient.id {
                    patient.clone()
                } else {
                    existing
                }
            })
            .collect(),
        PatientAction::Delete(id) => state.into_iter().filter(|p| p.id != id).collect(),
    }
}

/// Case-insensitive substring match of `term` against each patient's name.
/// An empty term yields the whole list. Evaluated against the full
/// in-memory list on every render; the underlying list is never mutated.
pub fn filter_by_name<'a>(patients: &'a [Patient], term: &str) -> Vec<&'a Patient> {
    if term.is_empty() {
        return patients.iter().collect();
    }
    let needle = term.to_lowercase();
    patients
        .iter()
        .filter(|patient| patient.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
