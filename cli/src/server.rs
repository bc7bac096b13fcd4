// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Research HTTP server
//!
//! Exposes the single research operation:
//!
//! - `POST /api/research` with `{"query": "..."}` returns `{"result": "..."}`.
//!   Fallback messages are ordinary results, so every well-formed request is a 200.
//! - `GET /health` returns `{"status": "ok"}` plus uptime.

use anyhow::{Context, Result};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use scholar_core::ResearchPipeline;

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<ResearchPipeline>,
    start_time: Instant,
}

impl AppState {
    pub fn new(pipeline: Arc<ResearchPipeline>) -> Self {
        Self {
            pipeline,
            start_time: Instant::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub result: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/research", post(research_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub async fn serve(addr: &str, pipeline: Arc<ResearchPipeline>) -> Result<()> {
    let app = router(AppState::new(pipeline));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Research API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Research API shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    }))
}

// A client disconnect drops this future, which cancels the in-flight stage
async fn research_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResearchRequest>,
) -> Json<ResearchResponse> {
    let result = state.pipeline.answer(&request.query).await;
    Json(ResearchResponse { result })
}
