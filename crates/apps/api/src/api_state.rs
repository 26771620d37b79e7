use app_state::{ApiSettings, AppSettings};
use axum::extract::FromRef;
use ml_analysis::VisualAnalyzer;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiContext {
    pub settings: AppSettings,
    pub analyzer: Arc<VisualAnalyzer>,
}

impl ApiContext {
    #[must_use]
    pub fn new(settings: AppSettings, analyzer: VisualAnalyzer) -> Self {
        Self {
            settings,
            analyzer: Arc::new(analyzer),
        }
    }
}

impl FromRef<ApiContext> for Arc<VisualAnalyzer> {
    fn from_ref(state: &ApiContext) -> Self {
        Arc::clone(&state.analyzer)
    }
}

impl FromRef<ApiContext> for ApiSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.api.clone()
    }
}
