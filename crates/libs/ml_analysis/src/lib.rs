#![deny(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

mod caption;
mod classify;
mod error;
mod face_detection;
mod image_loading;
mod models;
mod quality_data;
mod structs;
mod visual_analyzer;

pub use caption::{Captioner, LlmCaptioner};
pub use classify::{Classifier, LlmClassifier};
pub use error::AnalyzeError;
pub use face_detection::FaceDetector;
pub use image_loading::{decode_image, inference_jpeg};
pub use models::AnalysisModels;
pub use quality_data::get_quality_metrics;
pub use structs::AnalysisReport;
pub use visual_analyzer::VisualAnalyzer;
