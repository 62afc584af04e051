use thiserror::Error;

/// Top-level error type for the CardLens pipeline.
#[derive(Debug, Error)]
pub enum CardError {
    /// The model's response could not be parsed as a JSON object after
    /// fence stripping. The original text is retained for diagnostics.
    #[error("malformed JSON in model response: {detail}")]
    MalformedJson {
        detail: String,
        original_text: String,
    },

    #[error("transport error ({collaborator}): {message}")]
    Transport {
        collaborator: String,
        message: String,
    },

    #[error("OCR produced no usable text: {0}")]
    OcrFailed(String),

    #[error("failed to write {path}: {message}")]
    FileWrite { path: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
