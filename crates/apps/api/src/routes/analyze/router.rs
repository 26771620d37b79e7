use crate::analyze::handlers::analyze_image;
use crate::api_state::ApiContext;
use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::post};

pub fn analyze_router(max_upload_bytes: usize) -> Router<ApiContext> {
    Router::new()
        .route("/api/analyze", post(analyze_image))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
