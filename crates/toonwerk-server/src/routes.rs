// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP routes: the upload page, the upload endpoint and stored-file serving.
//
// The cartoonizer is CPU-bound, so each upload runs on a blocking worker via
// `spawn_blocking`. Independent requests proceed in parallel; nothing is
// shared between them except the read-only config and the upload directory.

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use toonwerk_core::AppConfig;
use toonwerk_core::error::{Result, ToonwerkError};
use toonwerk_core::human_errors::{Severity, humanize_error};
use toonwerk_core::types::FilterParameters;
use toonwerk_image::{cartoonize, codec};
use tracing::{debug, error, info, instrument, warn};

use crate::intake::{self, Upload};
use crate::page::INDEX_HTML;
use crate::storage::{self, UploadStore};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// State shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    store: UploadStore,
}

impl AppState {
    pub fn new(config: AppConfig, store: UploadStore) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &UploadStore {
        &self.store
    }

    /// Filter parameters for a request. A mode picked on the form replaces
    /// the configured preset; otherwise the configured parameters are used
    /// as-is.
    fn filter_for(&self, upload: &Upload) -> FilterParameters {
        let configured = self.config.filter;
        match upload.mode {
            Some(mode) if mode != configured.mode => {
                let preset = FilterParameters::for_mode(mode);
                debug!(
                    configured_mode = %configured.mode,
                    configured_threshold_block = configured.threshold_block,
                    configured_threshold_offset = configured.threshold_offset,
                    configured_blur_kernel = configured.blur_kernel,
                    mode = %mode,
                    threshold_block = preset.threshold_block,
                    threshold_offset = preset.threshold_offset,
                    blur_kernel = preset.blur_kernel,
                    "Form mode replaces configured filter with its preset"
                );
                preset
            }
            _ => configured,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/static/uploads/:name", get(stored_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Successful upload body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartoonResponse {
    /// URL of the stored cartoon PNG.
    pub cartoon_image: String,
}

/// Error body: `{"error": "...", "suggestion": "...", "retriable": bool}` with
/// a status picked from the error kind.
#[derive(Debug)]
pub struct ApiError(pub ToonwerkError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ToonwerkError::MissingUpload
            | ToonwerkError::EmptyFileName
            | ToonwerkError::UploadRejected(_) => StatusCode::BAD_REQUEST,
            ToonwerkError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ToonwerkError> for ApiError {
    fn from(err: ToonwerkError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let human = humanize_error(&self.0);
        match human.severity {
            Severity::ActionRequired => {
                warn!(error = %self.0, status = status.as_u16(), "Upload refused")
            }
            Severity::Transient | Severity::Permanent => {
                error!(error = %self.0, status = status.as_u16(), "Upload failed")
            }
        }
        let body = serde_json::json!({
            "error": human.message,
            "suggestion": human.suggestion,
            "retriable": human.retriable,
        });
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `POST /upload`: decode, cartoonize, store, return the result URL.
///
/// The uploaded original is only held in memory; its client file name is
/// logged and never touches the disk.
#[instrument(skip_all)]
async fn upload(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Json<CartoonResponse>, ApiError> {
    let multipart = multipart.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Request is not a multipart form");
        ToonwerkError::MissingUpload
    })?;
    let upload = intake::read_upload(multipart).await?;
    let params = state.filter_for(&upload);
    info!(
        file_name = %upload.file_name,
        bytes = upload.bytes.len(),
        mode = %params.mode,
        "Upload received"
    );

    let store = state.store.clone();
    let name = tokio::task::spawn_blocking(move || process_upload(&store, &upload, &params))
        .await
        .map_err(|err| ToonwerkError::Server(format!("cartoon worker failed: {err}")))??;

    let url = storage::public_url(&name);
    info!(url = %url, "Cartoon ready");
    Ok(Json(CartoonResponse { cartoon_image: url }))
}

/// The blocking part of an upload. Returns the stored result's file name.
fn process_upload(store: &UploadStore, upload: &Upload, params: &FilterParameters) -> Result<String> {
    let bitmap = codec::decode(&upload.bytes)?;
    let cartoon = cartoonize(&bitmap, params)?;
    let png = codec::encode_png(&cartoon)?;
    store.store_result(&png)
}

/// `GET /static/uploads/{name}`: serve a stored cartoon.
async fn stored_file(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let Some(path) = state.store.resolve(&name) else {
        warn!(name = %name, "Rejected stored-file name");
        return StatusCode::NOT_FOUND.into_response();
    };
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, storage::content_type_for(&name))],
            bytes,
        )
            .into_response(),
        Err(err) => {
            debug!(name = %name, error = %err, "Stored file not readable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
