// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Masked recombination: bitwise AND of a bitmap with a binary mask.

use toonwerk_core::error::Result;
use tracing::debug;

use crate::bitmap::{Bitmap, Mask, ensure_same_size};

/// AND every channel of `bitmap` with `mask`.
///
/// Where the mask is 0 the output pixel is black on every channel; where it
/// is 255 the original samples are kept exactly.
pub fn apply_mask(bitmap: &Bitmap, mask: &Mask) -> Result<Bitmap> {
    ensure_same_size("apply_mask", bitmap.dimensions(), mask.dimensions())?;

    let channels = bitmap.channels();
    let mask_samples = mask.as_image().as_raw();
    let out: Vec<u8> = bitmap
        .as_raw()
        .chunks_exact(channels)
        .zip(mask_samples)
        .flat_map(|(px, &m)| px.iter().map(move |&v| v & m))
        .collect();

    debug!(
        passing = mask.count_passing(),
        total = mask_samples.len(),
        "Mask applied"
    );
    bitmap.with_same_layout(out, "apply_mask")
}
