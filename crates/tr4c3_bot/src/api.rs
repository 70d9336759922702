//! HTTP API for manual triggers, health and metrics.

use crate::Orchestrator;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tr4c3_error::{ServerError, ServerErrorKind};
use tracing::{error, info};

const BANNER: &str = "TR4C3 bot is running.

Endpoints:
  POST /tweet    publish a freshly generated post
  GET  /init     publish the initial post
  GET  /health   liveness check
  GET  /metrics  counters snapshot
";

/// API state shared by every handler.
#[derive(Clone)]
pub struct ApiState {
    orchestrator: Arc<Orchestrator>,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// Creates the trigger API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/tweet", post(trigger_post))
        .route("/init", get(initial_post))
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

/// Bind `addr` and serve the router until `shutdown` resolves.
pub async fn serve<F>(addr: &str, state: ApiState, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            addr: addr.to_string(),
            message: e.to_string(),
        })
    })?;

    info!(addr = %addr, "Trigger server listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))
}

/// Usage banner.
async fn banner() -> &'static str {
    BANNER
}

/// Publish on demand.
async fn trigger_post(State(state): State<ApiState>) -> impl IntoResponse {
    match state.orchestrator.publish().await {
        Ok(tweet) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "tweet": tweet.text(),
                "id": tweet.id()
            })),
        ),
        Err(e) => {
            error!(error = %e, "Manual post failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "error": e.to_string()})),
            )
        }
    }
}

/// Publish the first post after deployment.
async fn initial_post(State(state): State<ApiState>) -> impl IntoResponse {
    match state.orchestrator.publish().await {
        Ok(tweet) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Initial tweet posted",
                "tweet": tweet.text(),
                "id": tweet.id()
            })),
        ),
        Err(e) => {
            error!(error = %e, "Initial post failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "error": e.to_string()})),
            )
        }
    }
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Get current metrics snapshot.
async fn get_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.orchestrator.metrics().snapshot();
    (StatusCode::OK, Json(snapshot))
}
