use thiserror::Error;

/// Reasons a sub-scorer falls back to its neutral default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SentimentError {
    /// An upstream collaborator (classifier, captioner) produced nothing.
    #[error("{0} not available")]
    InputUnavailable(&'static str),

    /// Pixel data cannot be processed: empty, or a raw buffer of the wrong length.
    #[error("malformed pixel data: {0}")]
    MalformedPixels(String),
}
