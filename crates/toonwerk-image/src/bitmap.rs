// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bitmap and mask types shared by every filter stage.

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage};
use toonwerk_core::error::{Result, ToonwerkError};

/// An 8-bit image, either single-channel or three-channel colour.
///
/// Channel order of the colour variant is whatever the decoder produced; the
/// pipeline never depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bitmap {
    Luma(GrayImage),
    Rgb(RgbImage),
}

impl Bitmap {
    /// Convert a decoded image into one of the two supported layouts.
    ///
    /// 8-bit luma (with or without alpha) stays single-channel; everything else
    /// becomes three-channel colour with any alpha dropped.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(gray) => Self::Luma(gray),
            gray_alpha @ DynamicImage::ImageLumaA8(_) => Self::Luma(gray_alpha.into_luma8()),
            other => Self::Rgb(other.into_rgb8()),
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Self::Luma(img) => img.width(),
            Self::Rgb(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Luma(img) => img.height(),
            Self::Rgb(img) => img.height(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Samples per pixel: 1 or 3.
    pub fn channels(&self) -> usize {
        match self {
            Self::Luma(_) => 1,
            Self::Rgb(_) => 3,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Interleaved row-major samples.
    pub fn as_raw(&self) -> &[u8] {
        match self {
            Self::Luma(img) => img.as_raw(),
            Self::Rgb(img) => img.as_raw(),
        }
    }

    /// Build a bitmap with the same width, height and channel count as `self`
    /// from a freshly computed sample buffer.
    pub(crate) fn with_same_layout(&self, data: Vec<u8>, stage: &'static str) -> Result<Self> {
        let (width, height) = self.dimensions();
        let actual_len = data.len();
        let rebuilt = match self {
            Self::Luma(_) => ImageBuffer::from_raw(width, height, data).map(Self::Luma),
            Self::Rgb(_) => ImageBuffer::from_raw(width, height, data).map(Self::Rgb),
        };
        rebuilt.ok_or_else(|| ToonwerkError::ShapeMismatch {
            stage,
            expected: format!("{} samples", self.as_raw().len()),
            actual: format!("{actual_len} samples"),
        })
    }
}

/// A single-channel selection where every sample is 0 (suppress) or 255 (pass).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask(GrayImage);

impl Mask {
    pub const PASS: u8 = 255;
    pub const SUPPRESS: u8 = 0;

    /// Wrap a buffer that the caller guarantees to be binary.
    pub(crate) fn from_binary(image: GrayImage) -> Self {
        debug_assert!(image.as_raw().iter().all(|&v| v == Self::PASS || v == Self::SUPPRESS));
        Self(image)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    /// Sample at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        let Luma([value]) = *self.0.get_pixel(x, y);
        value
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.0
    }

    pub fn is_binary(&self) -> bool {
        self.0
            .as_raw()
            .iter()
            .all(|&v| v == Self::PASS || v == Self::SUPPRESS)
    }

    /// Number of samples that pass.
    pub fn count_passing(&self) -> usize {
        self.0.as_raw().iter().filter(|&&v| v == Self::PASS).count()
    }
}

/// Fail with `ShapeMismatch` unless both sizes agree.
pub(crate) fn ensure_same_size(
    stage: &'static str,
    expected: (u32, u32),
    actual: (u32, u32),
) -> Result<()> {
    if expected != actual {
        return Err(ToonwerkError::ShapeMismatch {
            stage,
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        });
    }
    Ok(())
}
