use color_eyre::eyre;
use thiserror::Error;

/// Failures that abort an analysis request. Collaborator failures are not
/// listed here: they are reported inside the `AnalysisReport`.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("image contains no pixels")]
    EmptyImage,

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

impl From<tokio::task::JoinError> for AnalyzeError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(eyre::Report::new(err))
    }
}
