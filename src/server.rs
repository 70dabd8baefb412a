//! HTTP surface: `GET /` status and `POST /stakeholder-venn` → PNG.
//!
//! Every render failure (bad JSON, missing category, rasterization error) is
//! reported as 500 with `{"error": "<message>"}`; no partial image is sent.

use anyhow::Result;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::RenderError;
use crate::ir::parse_request;
use crate::render::render_categories;

pub const VENN_ENDPOINT: &str = "/stakeholder-venn";

/// Response body for `GET /`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub endpoint: &'static str,
    pub method: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

async fn handle_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Servicio activo",
        endpoint: VENN_ENDPOINT,
        method: "POST",
    })
}

async fn handle_venn(State(state): State<ServerState>, body: Bytes) -> Result<Response, RenderError> {
    let config = state.config.clone();
    let rendered = tokio::task::spawn_blocking(move || {
        let categories = parse_request(&body)?;
        render_categories(&categories, &config)
    })
    .await
    .map_err(|err| RenderError::Worker(err.to_string()))
    .and_then(|result| result);

    match rendered {
        Ok(png) => {
            tracing::debug!(bytes = png.len(), "rendered stakeholder diagram");
            Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, "stakeholder diagram render failed");
            Err(err)
        }
    }
}

/// Build the service router.
pub fn router(config: Config) -> Router {
    let state = ServerState {
        config: Arc::new(config),
    };
    Router::new()
        .route("/", get(handle_status))
        .route(VENN_ENDPOINT, post(handle_venn))
        // Category lists are unbounded; only the first names reach the image.
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// Run the HTTP server on `config.server.bind`.
/// Graceful shutdown on Ctrl+C (SIGINT) and SIGTERM (Unix).
pub async fn run_http(config: Config) -> Result<()> {
    let bind_addr = config.server.bind.clone();
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        "stakeholder-venn listening on {} (dpi={}, Ctrl+C/SIGTERM to stop)",
        bind_addr,
        config.render.dpi
    );
    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("stakeholder-venn stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let ctrl_c = tokio::signal::ctrl_c();
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler unavailable; waiting for Ctrl+C");
                let _ = ctrl_c.await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
