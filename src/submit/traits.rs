//! Trait abstraction for the submit client to enable mocking in tests

use super::SubmitError;
use crate::form::FormPayload;
use async_trait::async_trait;

/// Sends a completed application to the remote endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitClient: Send + Sync {
    /// Post the serialized payload; Ok only on a confirmed `{ok: true}`
    async fn submit_application(&self, payload: FormPayload) -> Result<(), SubmitError>;
}
