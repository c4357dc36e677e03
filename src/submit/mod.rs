//! Submission flow: client abstraction and the submit state machine

mod client;
mod traits;

pub use client::HttpSubmitClient;
pub use traits::SubmitClient;
#[cfg(test)]
pub use traits::MockSubmitClient;

use thiserror::Error;

/// Why a submission attempt failed
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not reach the application service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("application service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected response from the application service")]
    MalformedResponse,
}

/// State of the submit control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitState {
    /// Ready; the submit control carries its original label
    #[default]
    Idle,
    /// Request in flight; the control is disabled, no second submission
    /// can start
    Submitting,
    /// Accepted; the form is replaced by the confirmation view
    Confirmed,
    /// Rejected or unreachable; the control is re-enabled and the message
    /// shown next to it
    Failed(String),
}

impl SubmitState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitState::Submitting)
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, SubmitState::Confirmed)
    }

    /// Label for the submit control in this state
    pub fn submit_label(&self) -> &'static str {
        match self {
            SubmitState::Submitting => "Submitting...",
            _ => "Submit application",
        }
    }

    /// Error message to surface near the submit control, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmitState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
