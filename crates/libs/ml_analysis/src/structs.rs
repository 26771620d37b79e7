use common_types::{Analysis, Classification, FaceDetection, QualityMetrics};
use serde::Serialize;
use utoipa::ToSchema;
use visual_sentiment::SentimentResult;

pub(crate) const DESCRIPTION_FALLBACK: &str = "Could not generate description";

/// Everything the analyzer learned about one image. Collaborator failures are
/// reported inline as `{"error": "..."}` instead of failing the request.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalysisReport {
    #[schema(value_type = Object)]
    pub classification: Analysis<Classification>,
    pub description: String,
    #[schema(value_type = Object)]
    pub faces: Analysis<FaceDetection>,
    #[schema(value_type = Object)]
    pub quality: Analysis<QualityMetrics>,
    pub sentiment: SentimentResult,
}
