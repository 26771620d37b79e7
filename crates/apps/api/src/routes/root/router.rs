use crate::api_state::ApiContext;
use crate::root::handlers::{health_check, model_info};
use axum::{Router, routing::get};

pub fn root_public_router() -> Router<ApiContext> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/models", get(model_info))
}
