//! UI/backend events and error modeling for the desktop controller layer.

use client_core::{RemoteCallFailed, StoreOperation, StoreUpdate};

pub enum UiEvent {
    /// The worker bound a remote patient store for the entered server URL.
    Connected,
    Info(String),
    /// A successful store response, ready to dispatch into the controller.
    Store(StoreUpdate),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadPatients,
    CreatePatient,
    UpdatePatient,
    DeletePatient,
    General,
}

impl From<StoreOperation> for UiErrorContext {
    fn from(operation: StoreOperation) -> Self {
        match operation {
            StoreOperation::List => UiErrorContext::LoadPatients,
            StoreOperation::Create => UiErrorContext::CreatePatient,
            StoreOperation::Update => UiErrorContext::UpdatePatient,
            StoreOperation::Delete => UiErrorContext::DeletePatient,
        }
    }
}

/// Friendlier wording for the most common failure shapes; anything
/// unrecognized passes through verbatim.
pub fn describe_store_failure(err: &RemoteCallFailed) -> String {
    let lower = err.message.to_ascii_lowercase();
    if lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
        || lower.contains("error sending request")
    {
        format!(
            "Patient store unreachable during {}; check the server URL and retry.",
            err.operation
        )
    } else {
        err.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
