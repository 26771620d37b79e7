use crate::routes::{analyze, root};
use common_types::{ModelInfo, ModelStatus};
use ml_analysis::AnalysisReport;
use utoipa::OpenApi;
use visual_sentiment::{SentimentComponent, SentimentLabel, SentimentResult, SubScore};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::health_check,
        root::handlers::model_info,
        analyze::handlers::analyze_image,
    ),
    components(
        schemas(
            root::interfaces::HealthResponse,
            analyze::interfaces::AnalyzeUpload,
            ModelStatus,
            ModelInfo,
            AnalysisReport,
            SentimentResult,
            SentimentLabel,
            SentimentComponent,
            SubScore,
        ),
    ),
    tags(
        (name = "Analysis", description = "Image classification, captioning, faces, quality and visual sentiment"),
        (name = "System", description = "Health check and model information"),
    )
)]
pub struct ApiDoc;
