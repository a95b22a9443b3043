mod analysis;
mod config;
mod errors;
mod extract;
mod routes;
mod source;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::criteria::CRITERIA;
use crate::config::Config;
use crate::routes::build_router;
use crate::source::HttpDocumentSource;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Force criteria compilation before serving.
    info!("Loaded {} scoring criteria", CRITERIA.len());

    let source = HttpDocumentSource::new(
        Duration::from_secs(config.fetch_timeout_secs),
        config.max_upload_bytes,
    )?;
    info!(
        "Document source initialized (timeout: {}s, limit: {})",
        config.fetch_timeout_secs,
        config.max_upload_label()
    );

    let state = AppState {
        config: config.clone(),
        source: Arc::new(source),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
