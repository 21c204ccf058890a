use serde::{Deserialize, Serialize};

use crate::domain::Patient;

/// Wire body for `POST /patients` and `PUT /patients/{id}`. Also serves as
/// the in-progress form draft; all four fields are free text, `age`
/// included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub address: String,
}

impl NewPatient {
    /// A draft is submittable once every field is non-empty. Presence only;
    /// whitespace is not trimmed.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty()
            && !self.age.is_empty()
            && !self.gender.is_empty()
            && !self.address.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl From<&Patient> for NewPatient {
    fn from(patient: &Patient) -> Self {
        Self {
            name: patient.name.clone(),
            age: patient.age.clone(),
            gender: patient.gender.clone(),
            address: patient.address.clone(),
        }
    }
}
