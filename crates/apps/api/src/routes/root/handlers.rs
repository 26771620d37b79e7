use crate::api_state::ApiContext;
use crate::root::interfaces::HealthResponse;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common_types::ModelInfo;
use serde_json::json;
use tracing::{debug, instrument};

/// Reports whether each model can currently be used.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    responses(
        (status = 200, description = "API is up; per-model readiness is reported in the body", body = HealthResponse),
    )
)]
#[instrument(skip(context))]
pub async fn health_check(State(context): State<ApiContext>) -> Json<HealthResponse> {
    let models_loaded = context.analyzer.models().status().await;
    debug!("Model status: {models_loaded:?}");
    Json(HealthResponse {
        status: "healthy".to_string(),
        models_loaded,
    })
}

/// Configured models and where they are served from.
#[utoipa::path(
    get,
    path = "/api/models",
    tag = "System",
    responses(
        (status = 200, description = "Configured models", body = ModelInfo),
    )
)]
pub async fn model_info(State(context): State<ApiContext>) -> Json<ModelInfo> {
    Json(context.analyzer.models().info())
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}
