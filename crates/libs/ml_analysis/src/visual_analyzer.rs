use crate::image_loading::{decode_image, inference_jpeg};
use crate::quality_data::get_quality_metrics;
use crate::structs::DESCRIPTION_FALLBACK;
use crate::{AnalysisModels, AnalysisReport, AnalyzeError};
use common_types::{Analysis, FaceDetection, QualityMetrics};
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tracing::{info, instrument, warn};
use visual_sentiment::{PixelBuffer, ScoreOutcome, fuse, score_brightness, score_color, score_semantics};

/// Results of the work that only needs the decoded pixels.
struct LocalAnalysis {
    color: ScoreOutcome,
    brightness: ScoreOutcome,
    quality: Analysis<QualityMetrics>,
    faces: Analysis<FaceDetection>,
}

/// Runs every collaborator on an uploaded image and fuses the sentiment.
#[derive(Clone)]
pub struct VisualAnalyzer {
    models: AnalysisModels,
    inference_max_size: u32,
}

impl VisualAnalyzer {
    #[must_use]
    pub const fn new(models: AnalysisModels, inference_max_size: u32) -> Self {
        Self {
            models,
            inference_max_size,
        }
    }

    #[must_use]
    pub const fn models(&self) -> &AnalysisModels {
        &self.models
    }

    /// Analyzes an encoded image.
    ///
    /// # Errors
    ///
    /// Only when the bytes cannot be decoded or an internal task fails. A failing
    /// collaborator is reported inside the returned report.
    #[instrument(skip_all, fields(bytes = bytes.len()))]
    pub async fn analyze(&self, bytes: Vec<u8>) -> Result<AnalysisReport, AnalyzeError> {
        let image = Arc::new(spawn_blocking(move || decode_image(&bytes)).await??);
        info!("Analyzing {}x{} image", image.width(), image.height());

        let max_size = self.inference_max_size;
        let jpeg_source = Arc::clone(&image);
        let jpeg = spawn_blocking(move || inference_jpeg(&jpeg_source, max_size)).await??;

        let local_source = Arc::clone(&image);
        let faces = self.models.faces.clone();
        let local = spawn_blocking(move || {
            let pixels = PixelBuffer::from(local_source.as_ref());
            let gray = local_source.to_luma8();
            LocalAnalysis {
                color: score_color(&pixels),
                brightness: score_brightness(&pixels),
                quality: get_quality_metrics(&local_source).into(),
                faces: faces.detect(&gray).into(),
            }
        });

        let (classification, caption, local) = tokio::join!(
            self.models.classifier.classify(&jpeg),
            self.models.captioner.caption(&jpeg),
            local,
        );
        let local = local?;

        let classification: Analysis<_> = classification
            .inspect_err(|e| warn!("Classification failed: {e:#}"))
            .into();
        let caption = caption
            .inspect_err(|e| warn!("Caption generation failed: {e:#}"))
            .ok();
        if let Analysis::Failed { error } = &local.faces {
            warn!("Face detection failed: {error}");
        }
        if let Analysis::Failed { error } = &local.quality {
            warn!("Quality measurement failed: {error}");
        }

        let semantic = score_semantics(
            classification.as_ready().map(|c| c.label.as_str()),
            caption.as_deref(),
        );
        let sentiment = fuse(local.color, local.brightness, semantic);

        Ok(AnalysisReport {
            classification,
            description: caption.unwrap_or_else(|| DESCRIPTION_FALLBACK.to_string()),
            faces: local.faces,
            quality: local.quality,
            sentiment,
        })
    }
}
