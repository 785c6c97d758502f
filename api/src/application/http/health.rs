use axum::{Json, Router, extract::State, routing::get};
use menuscan_core::domain::menu_analysis::ports::MenuAnalysisService;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::application::http::server::app_state::AppState;

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    /// Whether an upstream API key is configured. Without one, text analysis
    /// runs on the local parser and image analysis is unavailable.
    pub upstream_configured: bool,
}

#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    summary = "Liveness check",
    responses((status = 200, body = String))
)]
pub async fn health_live() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    summary = "Readiness check",
    responses((status = 200, body = ReadinessResponse))
)]
pub async fn health_ready(State(state): State<AppState>) -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        status: "ok".to_string(),
        upstream_configured: state.service.upstream_configured(),
    })
}

#[derive(OpenApi)]
#[openapi(paths(health_live, health_ready))]
pub struct HealthApiDoc;

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{}/health/live", root_path), get(health_live))
        .route(&format!("{}/health/ready", root_path), get(health_ready))
}
