//! Command orchestration helpers from UI actions to backend command queue.

use client_core::StoreRequest;
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::Connect { .. } => "connect",
        BackendCommand::LoadPatients => "load_patients",
        BackendCommand::CreatePatient { .. } => "create_patient",
        BackendCommand::UpdatePatient { .. } => "update_patient",
        BackendCommand::DeletePatient { .. } => "delete_patient",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}

pub fn dispatch_store_request(
    cmd_tx: &Sender<BackendCommand>,
    request: StoreRequest,
    status: &mut String,
) {
    dispatch_backend_command(cmd_tx, BackendCommand::from(request), status);
}
