use app_state::FaceSettings;
use color_eyre::eyre::{Result, eyre};
use common_types::{FaceBox, FaceDetection};
use image::GrayImage;
use rustface::ImageData;
use std::io::Cursor;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// SeetaFace frontal face detector. A detector instance is not shareable
/// between threads, so one is built for every call from model bytes that are
/// read from disk once and shared by all clones.
#[derive(Debug, Clone)]
pub struct FaceDetector {
    settings: FaceSettings,
    model_bytes: Arc<OnceLock<Arc<[u8]>>>,
}

impl FaceDetector {
    #[must_use]
    pub fn new(settings: FaceSettings) -> Self {
        Self {
            settings,
            model_bytes: Arc::new(OnceLock::new()),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.model_bytes.get().is_some() || self.settings.model_available()
    }

    #[must_use]
    pub const fn settings(&self) -> &FaceSettings {
        &self.settings
    }

    fn model_bytes(&self) -> Result<Arc<[u8]>> {
        if let Some(bytes) = self.model_bytes.get() {
            return Ok(Arc::clone(bytes));
        }
        let Some(model_path) = self.settings.model_path.as_ref().filter(|p| p.is_file()) else {
            return Err(eyre!("Face detection model not available"));
        };
        let bytes: Arc<[u8]> = std::fs::read(model_path)?.into();
        info!("Loaded face model from {}", model_path.display());
        Ok(Arc::clone(self.model_bytes.get_or_init(|| bytes)))
    }

    /// Blocking; run it off the async runtime.
    pub fn detect(&self, gray: &GrayImage) -> Result<FaceDetection> {
        if !self.is_ready() {
            return Err(eyre!("Face detection model not available"));
        }

        let (width, height) = gray.dimensions();
        if width.min(height) < self.settings.min_face_size {
            debug!("Image {width}x{height} is smaller than the minimum face size");
            return Ok(FaceDetection::from(Vec::new()));
        }

        let bytes = self.model_bytes()?;
        let model = rustface::model::read_model(Cursor::new(&bytes[..]))
            .map_err(|e| eyre!("Failed to load face model: {e}"))?;
        let mut detector = rustface::create_detector_with_model(model);
        detector.set_min_face_size(self.settings.min_face_size);
        detector.set_score_thresh(self.settings.score_threshold);
        detector.set_pyramid_scale_factor(self.settings.pyramid_scale_factor);
        detector.set_slide_window_step(
            self.settings.slide_window_step,
            self.settings.slide_window_step,
        );

        let image = ImageData::new(gray.as_raw(), width, height);
        let faces: Vec<FaceBox> = detector
            .detect(&image)
            .into_iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBox {
                    x: bbox.x(),
                    y: bbox.y(),
                    width: bbox.width(),
                    height: bbox.height(),
                    score: face.score(),
                }
            })
            .collect();
        debug!("Detected {} faces", faces.len());
        Ok(FaceDetection::from(faces))
    }
}
