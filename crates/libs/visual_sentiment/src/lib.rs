#![deny(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

mod brightness;
mod color;
mod error;
mod fusion;
mod pixels;
mod semantic;
mod structs;

pub use brightness::score_brightness;
pub use color::score_color;
pub use error::SentimentError;
pub use fusion::{
    fuse, FusionWeights, SentimentComponent, SentimentDetails, SentimentLabel, SentimentResult,
    FUSION_WEIGHTS,
};
pub use pixels::PixelBuffer;
pub use semantic::score_semantics;
pub use structs::{round_to, ScoreOutcome, SubScore};
