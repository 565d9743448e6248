// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result directory: where cartoon PNGs live until they are pruned.
//
// Every stored file gets a fresh UUID in its name so concurrent requests never
// overwrite each other's output. Uploaded originals are never written here.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use toonwerk_core::error::{Result, ToonwerkError};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// URL prefix stored files are served under.
pub const PUBLIC_PREFIX: &str = "/static/uploads";

const RESULT_PREFIX: &str = "cartoon_";
const RESULT_SUFFIX: &str = ".png";

/// Handle to the result directory. Cheap to clone.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_results: usize,
}

impl UploadStore {
    /// Open the store at `root`, creating the directory if needed. Results
    /// are kept without limit until [`UploadStore::with_retention`] sets one.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|err| {
            ToonwerkError::Storage(format!(
                "failed to create upload dir {}: {}",
                root.display(),
                err
            ))
        })?;
        info!(root = %root.display(), "Upload store ready");
        Ok(Self {
            root,
            max_results: usize::MAX,
        })
    }

    /// Keep at most `max_results` cartoons; older ones are deleted after each
    /// store. Zero is treated as one, so the newest result always survives.
    pub fn with_retention(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store an encoded PNG result and return its file name
    /// (`cartoon_<uuid>.png`).
    pub fn store_result(&self, png: &[u8]) -> Result<String> {
        let name = format!("{RESULT_PREFIX}{}{RESULT_SUFFIX}", Uuid::new_v4());
        let path = self.root.join(&name);
        std::fs::write(&path, png).map_err(|err| {
            ToonwerkError::Storage(format!("failed to write {}: {}", path.display(), err))
        })?;
        debug!(name = %name, bytes = png.len(), "Cartoon stored");

        if let Err(err) = self.prune(&name) {
            warn!(error = %err, "Pruning old cartoons failed");
        }
        Ok(name)
    }

    /// Map a client-supplied name to a path inside the store, or `None` if
    /// the name could escape the directory.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        is_plain_file_name(name).then(|| self.root.join(name))
    }

    /// Delete the oldest results beyond the retention cap, never `keep`.
    fn prune(&self, keep: &str) -> Result<()> {
        if self.max_results == usize::MAX {
            return Ok(());
        }

        let mut results: Vec<(SystemTime, String)> = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == keep || !is_result_name(&name) {
                continue;
            }
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            results.push((modified, name));
        }

        // `keep` itself takes one of the slots.
        let excess = (results.len() + 1).saturating_sub(self.max_results);
        if excess == 0 {
            return Ok(());
        }
        results.sort();
        for (_, name) in results.into_iter().take(excess) {
            match std::fs::remove_file(self.root.join(&name)) {
                Ok(()) => debug!(name = %name, "Pruned old cartoon"),
                // Another request may have pruned it first.
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}

/// Public URL for a stored file name.
pub fn public_url(name: &str) -> String {
    format!("{PUBLIC_PREFIX}/{name}")
}

fn is_result_name(name: &str) -> bool {
    name.starts_with(RESULT_PREFIX) && name.ends_with(RESULT_SUFFIX)
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..")
}

/// Content type for a stored file, from its extension.
pub fn content_type_for(name: &str) -> &'static str {
    if name.to_ascii_lowercase().ends_with(RESULT_SUFFIX) {
        "image/png"
    } else {
        "application/octet-stream"
    }
}
