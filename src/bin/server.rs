//! Collective application relay server
//!
//! Serves the static landing pages and relays `POST /api/apply`
//! submissions through the transactional email API.

use anyhow::Result;
use collective_apply::config::AppConfig;
use collective_apply::server;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "collective_apply=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AppConfig::load()?;
    server::run(&config).await
}
