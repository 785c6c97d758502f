use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("Menu text is empty")]
    EmptyText,

    #[error("Invalid image type")]
    InvalidImageType,

    #[error("Image data is empty")]
    EmptyImage,

    #[error("Upstream API key is not set")]
    MissingCredential,

    #[error("Image analysis failed; upstream error: {0}")]
    ImageAnalysisFailed(String),
}
