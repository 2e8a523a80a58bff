//! Health-check HTTP server.
//!
//! The companion server exposes exactly one route:
//!
//! ```text
//! GET /api/health  →  200 {"ok": true, "service": "brevityb", "time": "2025-01-01T00:00:00.000Z"}
//! ```
//!
//! Requests are traced through `tower_http::trace::TraceLayer` and CORS is
//! open, matching a browser front end served from another origin.

use crate::config::ServerConfig;
use crate::error::BrevityError;
use axum::{routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "brevityb";

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    /// Current time, RFC 3339 / ISO 8601 in UTC with millisecond precision.
    pub time: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME.to_string(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Router with the health route and its middleware.
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind to `config` and serve until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(config: &ServerConfig, shutdown: F) -> Result<(), BrevityError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| BrevityError::ServerFailed {
            addr: addr.to_string(),
            source,
        })?;

    info!("API listening on http://{}", addr);

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|source| BrevityError::ServerFailed {
            addr: addr.to_string(),
            source,
        })?;

    info!("Server shutdown complete");
    Ok(())
}

/// Bind to `config` and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: &ServerConfig) -> Result<(), BrevityError> {
    serve_with_shutdown(config, shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
