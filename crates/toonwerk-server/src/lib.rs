// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// toonwerk-server — HTTP collaborators around the cartoon pipeline.
//
// Serves the upload page, accepts multipart uploads, runs the cartoonizer on a
// blocking worker, stores the PNG result and serves it back.

pub mod cli;
pub mod intake;
pub mod page;
pub mod routes;
pub mod server;
pub mod storage;

pub use routes::{AppState, router};
pub use server::WebServer;
pub use storage::UploadStore;
