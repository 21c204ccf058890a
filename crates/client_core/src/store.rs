//! The remote patient store contract and its REST client.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{Patient, PatientId},
    protocol::NewPatient,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOperation::List => "list",
            StoreOperation::Create => "create",
            StoreOperation::Update => "update",
            StoreOperation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// The single failure kind for remote calls. Transport errors and
/// non-success HTTP statuses both collapse into it; callers only ever
/// report it and leave client state untouched.
#[derive(Debug, Clone, Error)]
#[error("remote {operation} call failed: {message}")]
pub struct RemoteCallFailed {
    pub operation: StoreOperation,
    pub message: String,
}

impl RemoteCallFailed {
    pub fn new(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// CRUD surface of the remote patient store. The REST backend is the only
/// production implementation; tests substitute in-memory stores.
#[async_trait]
pub trait PatientStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Patient>, RemoteCallFailed>;
    async fn create(&self, draft: &NewPatient) -> Result<Patient, RemoteCallFailed>;
    async fn update(&self, id: PatientId, draft: &NewPatient)
        -> Result<Patient, RemoteCallFailed>;
    async fn delete(&self, id: PatientId) -> Result<(), RemoteCallFailed>;
}

/// A store call requested by the controller, executed by the backend
/// worker. Requests are independent; nothing here cancels or sequences
/// in-flight calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    LoadAll,
    Create(NewPatient),
    Update(PatientId, NewPatient),
    Delete(PatientId),
}

impl StoreRequest {
    pub fn operation(&self) -> StoreOperation {
        match self {
            StoreRequest::LoadAll => StoreOperation::List,
            StoreRequest::Create(_) => StoreOperation::Create,
            StoreRequest::Update(..) => StoreOperation::Update,
            StoreRequest::Delete(_) => StoreOperation::Delete,
        }
    }
}

/// A successful store response, fed back into the controller. Failures
/// never become updates; they are reported and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUpdate {
    Loaded(Vec<Patient>),
    Created(Patient),
    Updated(Patient),
    Deleted(PatientId),
}

/// Runs one request against the store and pairs the result with the update
/// the controller should dispatch. `Delete` carries no response body, so
/// the deleted id is echoed from the request.
pub async fn execute(
    store: &dyn PatientStore,
    request: StoreRequest,
) -> Result<StoreUpdate, RemoteCallFailed> {
    tracing::debug!(operation = %request.operation(), "executing store request");
    match request {
        StoreRequest::LoadAll => Ok(StoreUpdate::Loaded(store.list().await?)),
        StoreRequest::Create(draft) => Ok(StoreUpdate::Created(store.create(&draft).await?)),
        StoreRequest::Update(id, draft) => {
            Ok(StoreUpdate::Updated(store.update(id, &draft).await?))
        }
        StoreRequest::Delete(id) => {
            store.delete(id).await?;
            Ok(StoreUpdate::Deleted(id))
        }
    }
}

/// REST client for the patient store:
/// `GET/POST /patients`, `PUT/DELETE /patients/{id}`.
pub struct RestPatientStore {
    http: Client,
    base_url: String,
}

impl RestPatientStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn list_impl(&self) -> Result<Vec<Patient>, reqwest::Error> {
        self.http
            .get(format!("{}/patients", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn create_impl(&self, draft: &NewPatient) -> Result<Patient, reqwest::Error> {
        self.http
            .post(format!("{}/patients", self.base_url))
            .json(draft)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn update_impl(
        &self,
        id: PatientId,
        draft: &NewPatient,
    ) -> Result<Patient, reqwest::Error> {
        self.http
            .put(format!("{}/patients/{}", self.base_url, id.0))
            .json(draft)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn delete_impl(&self, id: PatientId) -> Result<(), reqwest::Error> {
        // Success signal only; the response body is not used.
        self.http
            .delete(format!("{}/patients/{}", self.base_url, id.0))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl PatientStore for RestPatientStore {
    async fn list(&self) -> Result<Vec<Patient>, RemoteCallFailed> {
        self.list_impl()
            .await
            .map_err(|err| RemoteCallFailed::new(StoreOperation::List, err.to_string()))
    }

    async fn create(&self, draft: &NewPatient) -> Result<Patient, RemoteCallFailed> {
        self.create_impl(draft)
            .await
            .map_err(|err| RemoteCallFailed::new(StoreOperation::Create, err.to_string()))
    }

    async fn update(
        &self,
        id: PatientId,
        draft: &NewPatient,
    ) -> Result<Patient, RemoteCallFailed> {
        self.update_impl(id, draft)
            .await
            .map_err(|err| RemoteCallFailed::new(StoreOperation::Update, err.to_string()))
    }

    async fn delete(&self, id: PatientId) -> Result<(), RemoteCallFailed> {
        self.delete_impl(id)
            .await
            .map_err(|err| RemoteCallFailed::new(StoreOperation::Delete, err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
