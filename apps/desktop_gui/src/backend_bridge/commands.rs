//! Backend commands queued from UI to backend worker.

use client_core::StoreRequest;
use shared::{domain::PatientId, protocol::NewPatient};

pub enum BackendCommand {
    Connect { server_url: String },
    LoadPatients,
    CreatePatient { draft: NewPatient },
    UpdatePatient { id: PatientId, draft: NewPatient },
    DeletePatient { id: PatientId },
}

impl From<StoreRequest> for BackendCommand {
    fn from(request: StoreRequest) -> Self {
        match request {
            StoreRequest::LoadAll => BackendCommand::LoadPatients,
            StoreRequest::Create(draft) => BackendCommand::CreatePatient { draft },
            StoreRequest::Update(id, draft) => BackendCommand::UpdatePatient { id, draft },
            StoreRequest::Delete(id) => BackendCommand::DeletePatient { id },
        }
    }
}
