//! HTTP submit client
//!
//! Posts the application payload to the relay server's `/api/apply`
//! endpoint and requires a 2xx response carrying `{"ok": true}`.

use super::{SubmitClient, SubmitError};
use crate::form::FormPayload;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ApplyResponse {
    #[serde(default)]
    ok: bool,
}

/// reqwest-backed implementation of [`SubmitClient`]
#[derive(Debug, Clone)]
pub struct HttpSubmitClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSubmitClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/apply", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SubmitClient for HttpSubmitClient {
    async fn submit_application(&self, payload: FormPayload) -> Result<(), SubmitError> {
        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status));
        }

        let body: ApplyResponse = response
            .json()
            .await
            .map_err(|_| SubmitError::MalformedResponse)?;
        if !body.ok {
            return Err(SubmitError::MalformedResponse);
        }
        Ok(())
    }
}
