// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// toonwerk-image — The cartoon filter pipeline.
//
// Provides the bitmap and mask types, the individual filter stages (grayscale,
// Gaussian blur, adaptive mean threshold, bilateral smoothing, 3x3 convolution,
// masked recombination), the two-mode cartoonizer built from them, and the
// decode/encode boundary used by callers that deal in files and bytes.

pub mod bitmap;
pub mod cartoon;
pub mod codec;
pub mod filter;

// Re-export the primary entry points so callers can use `toonwerk_image::cartoonize` etc.
pub use bitmap::{Bitmap, Mask};
pub use cartoon::{CartoonOutput, Cartoonizer, cartoonize};
