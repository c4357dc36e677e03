//! HTTP side of the application: submission relay and static assets
//!
//! One axum router: `POST /api/apply` parses the payload and forwards it
//! through the mail relay; every other GET is resolved against the document
//! root. Per-request failures are reported as responses, never panics.

pub mod mail;
pub mod static_files;

use crate::config::AppConfig;
use anyhow::Result;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use mail::{MailError, MailRelay};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Oversized bodies are rejected before any parsing happens
const MAX_BODY_BYTES: usize = 2_000_000;

#[derive(Debug, Error)]
enum ApplyError {
    #[error("invalid JSON body: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Mail(#[from] MailError),
}

/// Shared server state
pub struct ServerState {
    relay: Option<MailRelay>,
    document_root: PathBuf,
}

impl ServerState {
    pub fn new(relay: Option<MailRelay>, document_root: PathBuf) -> Self {
        Self {
            relay,
            document_root,
        }
    }
}

/// Build the application router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/apply", post(apply))
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// Bind and serve until shutdown
pub async fn run(config: &AppConfig) -> Result<()> {
    let relay = MailRelay::from_env(config.production());
    if relay.is_none() {
        tracing::warn!("RESEND_API_KEY / FROM_EMAIL not set; submissions will fail");
    }

    let state = Arc::new(ServerState::new(relay, config.document_root()));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port())).await?;
    tracing::info!("server running on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn apply(State(state): State<Arc<ServerState>>, body: Bytes) -> Response {
    match handle_apply(&state, &body).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "ok": true }))).into_response(),
        Err(err) => {
            tracing::error!("application submission failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

async fn handle_apply(state: &ServerState, body: &[u8]) -> Result<(), ApplyError> {
    let payload: serde_json::Value = if body.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(body)?
    };
    let fields = payload.as_object().cloned().unwrap_or_default();

    let relay = state.relay.as_ref().ok_or(MailError::NotConfigured)?;
    relay.send(&fields).await?;
    Ok(())
}

async fn fallback(State(state): State<Arc<ServerState>>, method: Method, uri: Uri) -> Response {
    if method != Method::GET {
        return (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response();
    }
    static_files::serve(&state.document_root, uri.path()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_apply_without_relay_reports_error() {
        let state = ServerState::new(None, PathBuf::from("docs"));
        let err = handle_apply(&state, br#"{"brandName":"North"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplyError::Mail(MailError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_apply_rejects_malformed_json() {
        let state = ServerState::new(None, PathBuf::from("docs"));
        let err = handle_apply(&state, b"{not json").await.unwrap_err();
        assert!(matches!(err, ApplyError::Parse(_)));
    }

    #[tokio::test]
    async fn test_empty_body_is_treated_as_empty_object() {
        // Parsing succeeds; the failure is the unconfigured relay
        let state = ServerState::new(None, PathBuf::from("docs"));
        let err = handle_apply(&state, b"").await.unwrap_err();
        assert!(matches!(err, ApplyError::Mail(MailError::NotConfigured)));
    }
}
