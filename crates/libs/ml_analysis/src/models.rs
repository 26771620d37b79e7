use crate::{Captioner, Classifier, FaceDetector, LlmCaptioner, LlmClassifier};
use app_state::AnalyzerSettings;
use common_types::{ModelInfo, ModelStatus};
use language_model::LlamaClient;
use std::sync::Arc;
use tracing::info;

/// The loaded collaborators, built once at startup and shared by all requests.
#[derive(Clone)]
pub struct AnalysisModels {
    pub classifier: Arc<dyn Classifier>,
    pub captioner: Arc<dyn Captioner>,
    pub faces: FaceDetector,
    info: ModelInfo,
}

impl AnalysisModels {
    #[must_use]
    pub fn new(
        classifier: Arc<dyn Classifier>,
        captioner: Arc<dyn Captioner>,
        faces: FaceDetector,
        info: ModelInfo,
    ) -> Self {
        Self {
            classifier,
            captioner,
            faces,
            info,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &AnalyzerSettings) -> Self {
        let llm = &settings.llm;
        let client = |model: &str| {
            LlamaClient::with_base_url(&llm.base_url)
                .model(model.to_string())
                .temperature(llm.temperature)
                .build()
        };
        let classifier = LlmClassifier::new(client(&llm.classification_model), llm.top_predictions);
        let captioner = LlmCaptioner::new(client(&llm.caption_model));
        let faces = FaceDetector::new(settings.faces.clone());

        let info = ModelInfo {
            classification_model: llm.classification_model.clone(),
            caption_model: llm.caption_model.clone(),
            llm_base_url: llm.base_url.clone(),
            face_model_path: settings
                .faces
                .model_path
                .as_ref()
                .map(|p| p.display().to_string()),
            face_model_available: faces.is_ready(),
        };
        info!(
            "Models configured: classification '{}', caption '{}' at {}",
            info.classification_model, info.caption_model, info.llm_base_url
        );
        if !info.face_model_available {
            info!("Face detection model not found, face detection will report an error");
        }

        Self::new(Arc::new(classifier), Arc::new(captioner), faces, info)
    }

    /// Probes each collaborator.
    pub async fn status(&self) -> ModelStatus {
        let (classification, caption) =
            tokio::join!(self.classifier.is_ready(), self.captioner.is_ready());
        ModelStatus {
            classification,
            caption,
            face_detection: self.faces.is_ready(),
        }
    }

    #[must_use]
    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            face_model_available: self.faces.is_ready(),
            ..self.info.clone()
        }
    }
}
