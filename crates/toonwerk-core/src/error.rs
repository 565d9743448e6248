// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Toonwerk.

use thiserror::Error;

/// Top-level error type for all Toonwerk operations.
#[derive(Debug, Error)]
pub enum ToonwerkError {
    // -- Cartoonizer errors --
    #[error("invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("shape mismatch in {stage}: expected {expected}, got {actual}")]
    ShapeMismatch {
        stage: &'static str,
        expected: String,
        actual: String,
    },

    #[error("image has zero width or height")]
    EmptyImage,

    // -- Decode / encode boundary --
    #[error("image decoding failed: {0}")]
    Decode(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    // -- Upload intake --
    #[error("no file part in upload")]
    MissingUpload,

    #[error("no selected file")]
    EmptyFileName,

    #[error("upload rejected: {0}")]
    UploadRejected(String),

    // -- Storage / persistence --
    #[error("storage error: {0}")]
    Storage(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Server / configuration --
    #[error("web server error: {0}")]
    Server(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ToonwerkError {
    /// Whether this error was raised by the cartoonizer pipeline itself, as
    /// opposed to one of the collaborators around it.
    pub fn is_pipeline_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameters(_) | Self::ShapeMismatch { .. } | Self::EmptyImage
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ToonwerkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_message_names_stage() {
        let err = ToonwerkError::ShapeMismatch {
            stage: "recombine",
            expected: "4x3".into(),
            actual: "4x2".into(),
        };
        assert_eq!(
            err.to_string(),
            "shape mismatch in recombine: expected 4x3, got 4x2"
        );
    }

    #[test]
    fn pipeline_errors_are_classified() {
        assert!(ToonwerkError::InvalidParameters("even".into()).is_pipeline_error());
        assert!(ToonwerkError::EmptyImage.is_pipeline_error());
        assert!(!ToonwerkError::MissingUpload.is_pipeline_error());
        assert!(!ToonwerkError::Decode("bad header".into()).is_pipeline_error());
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ToonwerkError = io.into();
        assert!(matches!(err, ToonwerkError::Io(_)));
    }
}
