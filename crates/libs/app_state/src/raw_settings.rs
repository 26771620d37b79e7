use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub analyzer: RawAnalyzerSettings,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
    /// Upper bound on the request body, uploads included.
    pub max_upload_bytes: usize,
    /// Lowercase file extensions accepted by the analyze endpoint.
    pub allowed_extensions: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawAnalyzerSettings {
    pub llm: LlmSettings,
    pub faces: RawFaceSettings,
    /// Longest edge in pixels of the image handed to the models.
    pub inference_max_size: u32,
}

/// OpenAI-compatible vision endpoint used for classification and captioning.
#[derive(Debug, Deserialize, Clone)]
pub struct LlmSettings {
    pub base_url: String,
    pub classification_model: String,
    pub caption_model: String,
    pub temperature: f32,
    /// How many ranked predictions to keep from the classifier.
    pub top_predictions: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawFaceSettings {
    /// SeetaFace frontal detection model. Empty disables face detection.
    pub model_path: String,
    pub min_face_size: u32,
    pub score_threshold: f64,
    pub pyramid_scale_factor: f32,
    pub slide_window_step: u32,
}
