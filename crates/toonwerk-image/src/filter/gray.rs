// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Colour to grayscale conversion.

use image::GrayImage;
use tracing::debug;

use crate::bitmap::Bitmap;

/// Convert a bitmap to a single-channel luma image of the same size.
///
/// Colour uses the `image` crate's luma weights (Rec. 709, integer
/// arithmetic). A single-channel bitmap is returned as a copy.
pub fn to_grayscale(bitmap: &Bitmap) -> GrayImage {
    match bitmap {
        Bitmap::Luma(gray) => gray.clone(),
        Bitmap::Rgb(rgb) => {
            debug!(width = rgb.width(), height = rgb.height(), "Converting to grayscale");
            image::imageops::grayscale(rgb)
        }
    }
}
