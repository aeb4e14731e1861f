use thiserror::Error;

/// Result type used by the output encoder layer.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while serializing a transcript.
///
/// Kept separate from `anyhow` so the encoders stay usable from downstream
/// libraries without forcing `anyhow` into their public APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// Encoder misuse, such as writing a segment after `close`.
    #[error("{0}")]
    Encoder(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn encoder(message: impl Into<String>) -> Self {
        Self::Encoder(message.into())
    }
}
