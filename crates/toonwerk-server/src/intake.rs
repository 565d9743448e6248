// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload intake: pulls the `image` file and optional `mode` field out of a
// multipart form.

use axum::body::Bytes;
use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use toonwerk_core::error::{Result, ToonwerkError};
use toonwerk_core::types::PipelineMode;
use tracing::debug;

/// Name of the form field carrying the photo.
pub const IMAGE_FIELD: &str = "image";

/// Name of the optional form field selecting the pipeline mode.
pub const MODE_FIELD: &str = "mode";

/// A photo received from the upload form.
#[derive(Debug, Clone)]
pub struct Upload {
    /// File name as sent by the client. Never empty.
    pub file_name: String,
    pub bytes: Bytes,
    /// Mode requested by the form, if any.
    pub mode: Option<PipelineMode>,
}

/// Read the upload form.
///
/// Fails with [`ToonwerkError::MissingUpload`] when there is no `image` field
/// and [`ToonwerkError::EmptyFileName`] when the field carries no file name.
/// Only the first `image` field is used; unknown fields are skipped.
pub async fn read_upload(mut multipart: Multipart) -> Result<Upload> {
    let mut image: Option<(String, Bytes)> = None;
    let mut mode = None;

    while let Some(field) = multipart.next_field().await.map_err(rejected)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(IMAGE_FIELD) if image.is_none() => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(rejected)?;
                debug!(file_name = %file_name, bytes = bytes.len(), "Image field received");
                image = Some((file_name, bytes));
            }
            Some(MODE_FIELD) => {
                let text = field.text().await.map_err(rejected)?;
                mode = parse_mode(&text)?;
            }
            other => debug!(field = ?other, "Skipping form field"),
        }
    }

    let (file_name, bytes) = image.ok_or(ToonwerkError::MissingUpload)?;
    if file_name.is_empty() {
        return Err(ToonwerkError::EmptyFileName);
    }
    Ok(Upload {
        file_name,
        bytes,
        mode,
    })
}

/// Parse the `mode` field. Blank means "use the configured mode".
pub fn parse_mode(text: &str) -> Result<Option<PipelineMode>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse()
        .map(Some)
        .map_err(|_| ToonwerkError::UploadRejected(format!("unknown mode '{text}'")))
}

fn rejected(err: MultipartError) -> ToonwerkError {
    ToonwerkError::UploadRejected(err.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_mode_defers_to_config() {
        assert_eq!(parse_mode("").unwrap(), None);
        assert_eq!(parse_mode("  ").unwrap(), None);
    }

    #[test]
    fn mode_keywords_parse() {
        assert_eq!(
            parse_mode("smoothed").unwrap(),
            Some(PipelineMode::SmoothedColorWithSharpen)
        );
        assert_eq!(
            parse_mode(" edge_mask\n").unwrap(),
            Some(PipelineMode::EdgeMaskOnOriginal)
        );
    }

    #[test]
    fn unknown_mode_is_rejected_as_upload_error() {
        let err = parse_mode("sepia").unwrap_err();
        assert!(matches!(err, ToonwerkError::UploadRejected(msg) if msg.contains("sepia")));
    }
}
