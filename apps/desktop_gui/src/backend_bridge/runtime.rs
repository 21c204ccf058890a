//! Backend worker: owns the tokio runtime and the REST patient store, and
//! turns queued commands into UI events.

use std::thread;

use client_core::{execute, RestPatientStore, StoreRequest};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{describe_store_failure, UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || run_worker(cmd_rx, ui_tx));
}

fn run_worker(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: failed to build runtime: {err}"),
            )));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    runtime.block_on(async move {
        let mut store: Option<RestPatientStore> = None;
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        while let Ok(cmd) = cmd_rx.recv() {
            let request = match cmd {
                BackendCommand::Connect { server_url } => {
                    tracing::info!(%server_url, "binding remote patient store");
                    store = Some(RestPatientStore::new(server_url));
                    let _ = ui_tx.try_send(UiEvent::Connected);
                    continue;
                }
                BackendCommand::LoadPatients => StoreRequest::LoadAll,
                BackendCommand::CreatePatient { draft } => StoreRequest::Create(draft),
                BackendCommand::UpdatePatient { id, draft } => StoreRequest::Update(id, draft),
                BackendCommand::DeletePatient { id } => StoreRequest::Delete(id),
            };

            let Some(store) = store.as_ref() else {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::General,
                    "no remote patient store bound; sign in first",
                )));
                continue;
            };

            let context = UiErrorContext::from(request.operation());
            match execute(store, request).await {
                Ok(update) => {
                    let _ = ui_tx.try_send(UiEvent::Store(update));
                }
                Err(err) => {
                    tracing::error!("{err}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        context,
                        describe_store_failure(&err),
                    )));
                }
            }
        }
    });
}
