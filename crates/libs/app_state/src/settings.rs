use crate::{ApiSettings, LlmSettings, LoggingSettings, RawSettings};
use std::path::{Path, PathBuf, absolute};

/// Smallest face size the SeetaFace detector accepts.
const MIN_DETECTABLE_FACE: u32 = 20;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub analyzer: AnalyzerSettings,
}

#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub llm: LlmSettings,
    pub faces: FaceSettings,
    pub inference_max_size: u32,
}

#[derive(Debug, Clone)]
pub struct FaceSettings {
    pub model_path: Option<PathBuf>,
    pub min_face_size: u32,
    pub score_threshold: f64,
    pub pyramid_scale_factor: f32,
    pub slide_window_step: u32,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        let raw_faces = raw.analyzer.faces;
        let model_path = if raw_faces.model_path.trim().is_empty() {
            None
        } else {
            let path = Path::new(&raw_faces.model_path);
            Some(absolute(path).unwrap_or_else(|_| path.to_path_buf()))
        };
        let faces = FaceSettings {
            model_path,
            min_face_size: raw_faces.min_face_size.max(MIN_DETECTABLE_FACE),
            score_threshold: raw_faces.score_threshold,
            pyramid_scale_factor: raw_faces.pyramid_scale_factor,
            slide_window_step: raw_faces.slide_window_step.max(1),
        };

        Self {
            api: raw.api,
            logging: raw.logging,
            analyzer: AnalyzerSettings {
                llm: raw.analyzer.llm,
                faces,
                inference_max_size: raw.analyzer.inference_max_size.max(1),
            },
        }
    }
}

impl ApiSettings {
    #[must_use]
    pub fn is_allowed_file(&self, filename: &str) -> bool {
        let Some((_, extension)) = filename.rsplit_once('.') else {
            return false;
        };
        let extension = extension.to_lowercase();
        self.allowed_extensions.iter().any(|e| *e == extension)
    }
}

impl FaceSettings {
    #[must_use]
    pub fn model_available(&self) -> bool {
        self.model_path.as_ref().is_some_and(|p| p.is_file())
    }
}
