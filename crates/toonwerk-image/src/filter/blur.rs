// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Gaussian blur sized by kernel width.

use image::GrayImage;
use imageproc::filter::gaussian_blur_f32;
use toonwerk_core::error::{Result, ToonwerkError};
use toonwerk_core::types::MAX_BLUR_KERNEL;
use tracing::{debug, instrument};

/// Sigma of the Gaussian that fills a `size`-wide kernel:
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
pub fn gaussian_sigma(size: u32) -> Result<f32> {
    if size == 0 || size % 2 == 0 || size > MAX_BLUR_KERNEL {
        return Err(ToonwerkError::InvalidParameters(format!(
            "Gaussian kernel size must be an odd integer in 1..={MAX_BLUR_KERNEL}, got {size}"
        )));
    }
    Ok(0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8)
}

/// Blur a grayscale image with a `kernel_size`×`kernel_size` Gaussian.
///
/// A kernel size of 1 is the identity.
#[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn gaussian_blur(gray: &GrayImage, kernel_size: u32) -> Result<GrayImage> {
    let sigma = gaussian_sigma(kernel_size)?;
    if kernel_size == 1 {
        return Ok(gray.clone());
    }

    let blurred = gaussian_blur_f32(gray, sigma);
    debug!(kernel_size, sigma, "Gaussian blur complete");
    Ok(blurred)
}
