// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cartoonizer pipeline: runs one of the two fixed filter chains over an
// in-memory bitmap. Stateless and deterministic: the same bitmap and
// parameters always produce the same bytes.

use toonwerk_core::error::{Result, ToonwerkError};
use toonwerk_core::types::{FilterParameters, PipelineMode};
use tracing::{debug, info, instrument};

use crate::bitmap::{Bitmap, Mask, ensure_same_size};
use crate::filter::{
    adaptive_mean_threshold, apply_mask, bilateral_filter, convolve3x3, gaussian_blur,
    to_grayscale,
};

/// Everything a single run produced.
#[derive(Debug, Clone)]
pub struct CartoonOutput {
    /// The final cartoon, same size and channel count as the input.
    pub image: Bitmap,
    /// The binary edge mask used for recombination.
    pub mask: Mask,
    /// The masked bitmap before sharpening. Identical to `image` in
    /// [`PipelineMode::EdgeMaskOnOriginal`].
    pub composite: Bitmap,
}

/// A validated, reusable cartoon filter.
///
/// ```ignore
/// let cartoonizer = Cartoonizer::new(FilterParameters::smoothed_color_with_sharpen())?;
/// let cartoon = cartoonizer.run(&bitmap)?;
/// ```
#[derive(Debug, Clone)]
pub struct Cartoonizer {
    params: FilterParameters,
}

impl Cartoonizer {
    /// Validate `params` up front; an invalid window or kernel size fails here
    /// before any image is touched.
    pub fn new(params: FilterParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &FilterParameters {
        &self.params
    }

    pub fn mode(&self) -> PipelineMode {
        self.params.mode
    }

    /// Cartoonize `image`, returning only the final bitmap.
    pub fn run(&self, image: &Bitmap) -> Result<Bitmap> {
        self.run_detailed(image).map(|output| output.image)
    }

    /// Cartoonize `image`, also returning the mask and pre-sharpen composite.
    #[instrument(skip_all, fields(
        mode = %self.params.mode,
        width = image.width(),
        height = image.height(),
        channels = image.channels(),
    ))]
    pub fn run_detailed(&self, image: &Bitmap) -> Result<CartoonOutput> {
        if image.is_empty() {
            return Err(ToonwerkError::EmptyImage);
        }

        info!("Running cartoon pipeline");
        let output = match self.params.mode {
            PipelineMode::EdgeMaskOnOriginal => self.edge_mask_on_original(image)?,
            PipelineMode::SmoothedColorWithSharpen => self.smoothed_color_with_sharpen(image)?,
        };

        ensure_same_size("output", image.dimensions(), output.image.dimensions())?;
        if output.image.channels() != image.channels() {
            return Err(ToonwerkError::ShapeMismatch {
                stage: "output",
                expected: format!("{} channels", image.channels()),
                actual: format!("{} channels", output.image.channels()),
            });
        }

        debug!(passing = output.mask.count_passing(), "Cartoon pipeline complete");
        Ok(output)
    }

    /// Grayscale → blur → adaptive threshold → mask the untouched original.
    fn edge_mask_on_original(&self, image: &Bitmap) -> Result<CartoonOutput> {
        let p = &self.params;

        // Step 1: Grayscale conversion.
        let gray = to_grayscale(image);

        // Step 2: Suppress sensor noise before edge detection.
        let blurred = gaussian_blur(&gray, p.blur_kernel)?;
        ensure_same_size("gaussian_blur", image.dimensions(), blurred.dimensions())?;

        // Step 3: Local-mean edge mask.
        let mask = adaptive_mean_threshold(&blurred, p.threshold_block, p.threshold_offset)?;
        ensure_same_size("adaptive_threshold", image.dimensions(), mask.dimensions())?;

        // Step 4: Black out edges on the original colours.
        let cartoon = apply_mask(image, &mask)?;

        Ok(CartoonOutput {
            composite: cartoon.clone(),
            image: cartoon,
            mask,
        })
    }

    /// Bilateral smoothing → threshold of the original's grayscale → mask the
    /// smoothed colours → sharpen.
    fn smoothed_color_with_sharpen(&self, image: &Bitmap) -> Result<CartoonOutput> {
        let p = &self.params;

        // Step 1: Flatten colour regions while keeping silhouettes.
        let smoothed = bilateral_filter(image, &p.smoothing_or_default())?;

        // Step 2: Grayscale of the original, not the smoothed image.
        let gray = to_grayscale(image);

        // Step 3: Local-mean edge mask.
        let mask = adaptive_mean_threshold(&gray, p.threshold_block, p.threshold_offset)?;
        ensure_same_size("adaptive_threshold", image.dimensions(), mask.dimensions())?;

        // Step 4: Black out edges on the smoothed colours.
        let composite = apply_mask(&smoothed, &mask)?;

        // Step 5: Accentuate the outlines.
        let cartoon = convolve3x3(&composite, &p.sharpen_or_default())?;

        Ok(CartoonOutput {
            image: cartoon,
            mask,
            composite,
        })
    }
}

/// Run the cartoon pipeline once with `params`.
pub fn cartoonize(image: &Bitmap, params: &FilterParameters) -> Result<Bitmap> {
    Cartoonizer::new(*params)?.run(image)
}
