// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 3x3 kernel filtering and the fixed sharpening kernel.

use image::{Luma, Rgb};
use imageproc::filter::filter_clamped;
use imageproc::kernel::Kernel;
use toonwerk_core::error::Result;
use toonwerk_core::types::SharpenKernel;
use tracing::{debug, instrument};

use crate::bitmap::Bitmap;

/// Filter every channel of `bitmap` with a 3×3 integer kernel.
///
/// Sums saturate to 0..=255 and borders replicate the edge pixel. The kernels
/// used here are symmetric, so correlation and convolution agree.
#[instrument(skip(bitmap, kernel), fields(width = bitmap.width(), height = bitmap.height()))]
pub fn convolve3x3(bitmap: &Bitmap, kernel: &SharpenKernel) -> Result<Bitmap> {
    // Small integers are exact in f32, and the clamp back to u8 truncates
    // whole-number sums without loss.
    let weights = kernel.weights().map(|w| w as f32);
    let kernel = Kernel::new(&weights[..], 3, 3);

    let filtered = match bitmap {
        Bitmap::Luma(gray) => Bitmap::Luma(filter_clamped::<Luma<u8>, f32, u8>(gray, kernel)),
        Bitmap::Rgb(rgb) => Bitmap::Rgb(filter_clamped::<Rgb<u8>, f32, u8>(rgb, kernel)),
    };

    debug!(kernel = ?weights, "3x3 convolution complete");
    Ok(filtered)
}

/// Sharpen with [`SharpenKernel::CROSS`]: centre 5, four neighbours −1.
pub fn sharpen(bitmap: &Bitmap) -> Result<Bitmap> {
    convolve3x3(bitmap, &SharpenKernel::CROSS)
}
