// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for people uploading photos.
//
// Internal detail (stage names, parameter values, paths) never reaches the
// message; it stays in the logs.

use crate::error::ToonwerkError;

/// The message shown whenever the cartoonizer itself reports a failure.
pub const PROCESSING_FAILED: &str = "Image processing failed. Please try again.";

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something on our side hiccupped; trying again may work.
    Transient,
    /// The user must do something (pick a file, pick a different file).
    ActionRequired,
    /// Retrying the same request will fail the same way.
    Permanent,
}

/// A human-readable error with a plain English message and a suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Whether retrying the same request could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `ToonwerkError` into something safe to show to the uploader.
pub fn humanize_error(err: &ToonwerkError) -> HumanError {
    match err {
        // -- Cartoonizer --
        ToonwerkError::InvalidParameters(_)
        | ToonwerkError::ShapeMismatch { .. }
        | ToonwerkError::EmptyImage => HumanError {
            message: PROCESSING_FAILED.into(),
            suggestion: "Try a different photo. If this keeps happening, the filter settings may need attention.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        // -- Decode / encode --
        ToonwerkError::Decode(_) => HumanError {
            message: "We couldn't read this image.".into(),
            suggestion: "The file may be damaged or not a picture. Try saving it as a JPEG or PNG first.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ToonwerkError::Encode(_) => HumanError {
            message: PROCESSING_FAILED.into(),
            suggestion: "Please try again in a moment.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Upload intake --
        ToonwerkError::MissingUpload => HumanError {
            message: "No file part".into(),
            suggestion: "Choose a photo with the file picker, then press Upload Image.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ToonwerkError::EmptyFileName => HumanError {
            message: "No selected file".into(),
            suggestion: "Choose a photo with the file picker, then press Upload Image.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ToonwerkError::UploadRejected(_) => HumanError {
            message: "This upload can't be accepted.".into(),
            suggestion: "Try a smaller photo with a simple file name.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Storage / server --
        ToonwerkError::Storage(_)
        | ToonwerkError::Io(_)
        | ToonwerkError::Serialization(_)
        | ToonwerkError::Server(_) => HumanError {
            message: "Something went wrong while saving your picture.".into(),
            suggestion: "Please try again in a moment.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ToonwerkError::Config(_) => HumanError {
            message: "The server isn't set up correctly.".into(),
            suggestion: "Please let the site owner know.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}
