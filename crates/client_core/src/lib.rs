//! Client-side core for the patient management desktop app: the patient
//! list reducer, the name filter, the form/edit controller, and the REST
//! client for the remote patient store.

pub mod controller;
pub mod state;
pub mod store;

pub use controller::{FormMode, PatientController};
pub use state::{filter_by_name, reduce, PatientAction};
pub use store::{
    execute, PatientStore, RemoteCallFailed, RestPatientStore, StoreOperation, StoreRequest,
    StoreUpdate,
};
