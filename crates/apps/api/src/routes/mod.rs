pub mod analyze;
mod api_doc;
pub mod root;

use crate::analyze::router::analyze_router;
use crate::api_state::ApiContext;
use crate::root::handlers::not_found;
use crate::root::router::root_public_router;
use crate::routes::api_doc::ApiDoc;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    let max_upload_bytes = api_state.settings.api.max_upload_bytes;
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(root_public_router())
        .merge(analyze_router(max_upload_bytes))
        .fallback(not_found)
        .with_state(api_state)
}
