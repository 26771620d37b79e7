use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Output of an external collaborator: either its value or the reason it failed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Analysis<T> {
    Ready(T),
    Failed { error: String },
}

impl<T> Analysis<T> {
    pub fn failed(error: impl ToString) -> Self {
        Self::Failed {
            error: error.to_string(),
        }
    }

    #[must_use]
    pub const fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl<T, E: ToString> From<Result<T, E>> for Analysis<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::failed(e),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
pub struct Prediction {
    #[serde(rename = "class")]
    pub label: String,
    pub confidence: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
pub struct Classification {
    /// Top predicted class.
    #[serde(rename = "class")]
    pub label: String,
    pub confidence: f64,
    pub top_predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Raw detector score, higher is more certain.
    pub score: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
pub struct FaceDetection {
    pub count: usize,
    pub faces: Vec<FaceBox>,
}

impl From<Vec<FaceBox>> for FaceDetection {
    fn from(faces: Vec<FaceBox>) -> Self {
        Self {
            count: faces.len(),
            faces,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
pub struct QualityMetrics {
    /// Variance of the Laplacian.
    pub sharpness: f64,
    pub brightness: f64,
    pub contrast: f64,
    /// Mean absolute difference to a blurred copy.
    pub noise_level: f64,
    /// 0 to 100.
    pub quality_score: f64,
    pub resolution: String,
    pub aspect_ratio: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, ToSchema)]
pub struct ModelStatus {
    pub classification: bool,
    pub caption: bool,
    pub face_detection: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, ToSchema)]
pub struct ModelInfo {
    pub classification_model: String,
    pub caption_model: String,
    pub llm_base_url: String,
    pub face_model_path: Option<String>,
    pub face_model_available: bool,
}
