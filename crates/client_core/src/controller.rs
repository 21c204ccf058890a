//! Form/edit controller: owns the client's patient list, the form draft,
//! and the create/edit mode, and mediates every mutation of them.

use shared::{
    domain::{Patient, PatientId},
    protocol::NewPatient,
};

use crate::state::{reduce, PatientAction};
use crate::store::{StoreRequest, StoreUpdate};

/// Which submission the form currently targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Editing(PatientId),
}

/// The explicit state container for the patient view. The list is mutable
/// only through [`PatientController::apply`], which routes every change
/// through the reducer; network effects are expressed as [`StoreRequest`]
/// values for the caller to execute. Failed calls produce no update, so
/// the draft and mode survive for a retry.
#[derive(Debug, Default)]
pub struct PatientController {
    patients: Vec<Patient>,
    draft: NewPatient,
    mode: FormMode,
    pending_delete: Option<PatientId>,
}

impl PatientController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn draft(&self) -> &NewPatient {
        &self.draft
    }

    /// The form's text fields edit the draft in place.
    pub fn draft_mut(&mut self) -> &mut NewPatient {
        &mut self.draft
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// The id armed for deletion, if a confirmation is outstanding.
    pub fn pending_delete(&self) -> Option<PatientId> {
        self.pending_delete
    }

    /// The startup fetch of the full list.
    pub fn load_all(&self) -> StoreRequest {
        StoreRequest::LoadAll
    }

    /// Turns the draft into a create or update request depending on the
    /// current mode. An incomplete draft (any empty field) produces no
    /// request and is left intact.
    pub fn submit(&self) -> Option<StoreRequest> {
        if !self.draft.is_complete() {
            return None;
        }
        Some(match self.mode {
            FormMode::Create => StoreRequest::Create(self.draft.clone()),
            FormMode::Editing(id) => StoreRequest::Update(id, self.draft.clone()),
        })
    }

    /// Copies the patient's fields into the draft and enters edit mode.
    /// Does not contact the store.
    pub fn begin_edit(&mut self, patient: &Patient) {
        self.draft = NewPatient::from(patient);
        self.mode = FormMode::Editing(patient.id);
    }

    pub fn cancel_edit(&mut self) {
        self.mode = FormMode::Create;
        self.draft.clear();
    }

    /// Arms the destructive-action gate; nothing is sent until the user
    /// confirms.
    pub fn request_delete(&mut self, id: PatientId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Disarms the gate and yields the delete request. The list itself is
    /// only touched once the store reports success; there is no optimistic
    /// removal.
    pub fn confirm_delete(&mut self) -> Option<StoreRequest> {
        self.pending_delete.take().map(StoreRequest::Delete)
    }

    /// Applies a successful store response. Created and updated records
    /// come back from the server carrying the authoritative id; the last
    /// response applied wins, with no conflict detection between
    /// interleaved calls.
    pub fn apply(&mut self, update: StoreUpdate) {
        match update {
            StoreUpdate::Loaded(patients) => self.dispatch(PatientAction::SetAll(patients)),
            StoreUpdate::Created(patient) => {
                self.dispatch(PatientAction::Add(patient));
                self.draft.clear();
            }
            StoreUpdate::Updated(patient) => {
                self.dispatch(PatientAction::Edit(patient));
                self.mode = FormMode::Create;
                self.draft.clear();
            }
            StoreUpdate::Deleted(id) => self.dispatch(PatientAction::Delete(id)),
        }
    }

    fn dispatch(&mut self, action: PatientAction) {
        self.patients = reduce(std::mem::take(&mut self.patients), action);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
