use thiserror::Error;

use crate::formats::SubtitleFormat;

/// The payload could not be decoded into a segment list.
///
/// `salvage` holds the sanitized payload verbatim so it can be handed back to
/// the operator instead of being dropped.
#[derive(Debug, Error)]
#[error("payload is not a decodable segment list: {reason}")]
pub struct DecodeFailure {
    pub salvage: String,
    pub reason: DecodeReason,
}

#[derive(Debug, Error)]
pub enum DecodeReason {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected shape: {0}")]
    Shape(String),
}

/// A writer refused output while rendering one format.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("failed rendering {format} document")]
pub struct EncodeError {
    pub format: SubtitleFormat,
    #[source]
    pub source: std::fmt::Error,
}

impl EncodeError {
    pub(crate) fn tagged(format: SubtitleFormat) -> impl FnOnce(std::fmt::Error) -> Self {
        move |source| Self { format, source }
    }
}
