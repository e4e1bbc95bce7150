//! Web server exposing the analysis pipeline.
//!
//! One analysis endpoint accepting JSON or multipart bodies, a health
//! check, and JSON errors for everything else. Panics inside a request are
//! converted to a generic 500 and never take the process down.

mod error;
mod handlers;
mod rate_limit;
mod routes;
mod upload;

pub use error::{ApiError, INTERNAL_ERROR_MESSAGE};
pub use rate_limit::{RequestRateTracker, MAX_TRACKED_CLIENTS};
pub use routes::{create_router, MAX_BODY_BYTES};

use std::net::SocketAddr;
use std::sync::Arc;

use crate::analysis::AnalysisService;
use crate::config::Settings;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub analysis: AnalysisService,
    pub rate_limiter: Arc<RequestRateTracker>,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self::with_service(
            settings.build_service()?,
            settings.rate_limit_per_minute,
        ))
    }

    /// State around an already-built pipeline.
    pub fn with_service(analysis: AnalysisService, rate_limit_per_minute: u32) -> Self {
        Self {
            analysis,
            rate_limiter: Arc::new(RequestRateTracker::new(rate_limit_per_minute)),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
