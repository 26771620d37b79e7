use crate::api_state::ApiContext;
use crate::create_router;
use app_state::AppSettings;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use http::{HeaderValue, Method, header};
use ml_analysis::{AnalysisModels, VisualAnalyzer};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Builds the CORS layer from the configured origins, skipping invalid ones.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
}

pub async fn serve(settings: AppSettings) -> Result<()> {
    info!("🚀 Initializing server...");
    info!("📥 Loading models...");
    let models = AnalysisModels::from_settings(&settings.analyzer);
    let analyzer = VisualAnalyzer::new(models, settings.analyzer.inference_max_size);
    let api_state = ApiContext::new(settings.clone(), analyzer);

    let app = create_router(api_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&settings.api.allowed_origins))
        .layer(CompressionLayer::new());

    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port)
        .parse()
        .map_err(|e| eyre!("Invalid address: {}", e))?;
    let listener = TcpListener::bind(addr).await?;

    info!("🐸 Server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
