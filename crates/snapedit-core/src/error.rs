//! Session-level error type.
//!
//! Each layer has its own `thiserror` enum; [`EditError`] folds them into the
//! six kinds a caller of the editing session has to distinguish.

use thiserror::Error;

use crate::config::ConfigError;
use crate::decode::{DecodeError, SourceError};
use crate::encode::{EncodeError, UnknownExportFormat};
use crate::filters::UnknownPreset;
use crate::transform::TransformError;
use crate::upload::UploadError;

#[derive(Debug, Error)]
pub enum EditError {
    /// The bytes could not be decoded as an image.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The input could not be turned into image bytes at all.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// A crop or resize fell outside the image.
    #[error("{0}")]
    OutOfBounds(String),

    #[error("No image is loaded")]
    SessionNotInitialized,

    /// Input or parameters failed validation; one message per problem.
    #[error("{}", .0.join(" "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl EditError {
    /// Stable name of the error kind, used as the JavaScript error name.
    pub fn kind(&self) -> &'static str {
        match self {
            EditError::Decode(_) => "DecodeError",
            EditError::UnsupportedInput(_) => "UnsupportedInputError",
            EditError::OutOfBounds(_) => "OutOfBoundsError",
            EditError::SessionNotInitialized => "SessionNotInitializedError",
            EditError::Validation(_) => "ValidationError",
            EditError::Encode(_) => "EncodeError",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        EditError::Validation(vec![message.into()])
    }
}

impl From<SourceError> for EditError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unsupported(reason) => EditError::UnsupportedInput(reason),
            SourceError::Decode(err) => EditError::Decode(err),
        }
    }
}

impl From<TransformError> for EditError {
    fn from(err: TransformError) -> Self {
        EditError::OutOfBounds(err.to_string())
    }
}

impl From<UnknownPreset> for EditError {
    fn from(err: UnknownPreset) -> Self {
        EditError::validation(err.to_string())
    }
}

impl From<UnknownExportFormat> for EditError {
    fn from(err: UnknownExportFormat) -> Self {
        EditError::validation(err.to_string())
    }
}

impl From<UploadError> for EditError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Decode(err) => EditError::Decode(err),
            UploadError::Encode(err) => EditError::Encode(err),
        }
    }
}

impl From<ConfigError> for EditError {
    fn from(err: ConfigError) -> Self {
        EditError::Validation(err.problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(
            EditError::Decode(DecodeError::InvalidFormat).kind(),
            "DecodeError"
        );
        assert_eq!(
            EditError::UnsupportedInput("x".into()).kind(),
            "UnsupportedInputError"
        );
        assert_eq!(EditError::OutOfBounds("x".into()).kind(), "OutOfBoundsError");
        assert_eq!(
            EditError::SessionNotInitialized.kind(),
            "SessionNotInitializedError"
        );
        assert_eq!(EditError::validation("x").kind(), "ValidationError");
        assert_eq!(
            EditError::Encode(EncodeError::EncodingFailed("x".into())).kind(),
            "EncodeError"
        );
    }

    #[test]
    fn test_source_error_mapping() {
        let unsupported: EditError = SourceError::Unsupported("http".into()).into();
        assert!(matches!(unsupported, EditError::UnsupportedInput(_)));

        let decode: EditError = SourceError::Decode(DecodeError::InvalidFormat).into();
        assert!(matches!(decode, EditError::Decode(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_transform_error_keeps_message() {
        let err: EditError = TransformError::InvalidDimensions {
            width: 0,
            height: 5,
        }
        .into();
        assert_eq!(err.kind(), "OutOfBoundsError");
        assert!(err.to_string().contains("0x5"));
    }

    #[test]
    fn test_validation_message_joins_problems() {
        let err = EditError::Validation(vec!["First.".into(), "Second.".into()]);
        assert_eq!(err.to_string(), "First. Second.");
    }
}
