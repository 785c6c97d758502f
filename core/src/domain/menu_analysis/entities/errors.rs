use thiserror::Error;

/// Soft failure of a single model gateway attempt.
///
/// The `Display` text is the diagnostic surfaced once an image cascade is
/// exhausted. Callers fall back on any of these; none is fatal on its own.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("upstream API key is not set")]
    MissingCredential,

    #[error("timeout after {0}s")]
    Timeout(f64),

    #[error("{0}")]
    Transport(String),

    #[error("upstream {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("{0}")]
    Upstream(String),

    #[error("response missing content")]
    MissingContent,

    #[error("response missing JSON")]
    MissingJson,

    #[error("response could not be parsed")]
    Unparsable,

    #[error("model did not receive image data; check the configured image model")]
    MissingImage,
}
