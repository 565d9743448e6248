// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Toonwerk cartoonizer.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToonwerkError};

/// Which of the two cartoon filter chains to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineMode {
    /// Grayscale → Gaussian blur → adaptive threshold → mask the original.
    #[default]
    EdgeMaskOnOriginal,
    /// Bilateral smoothing of the colour image, masked by the adaptive threshold
    /// of the original's grayscale, then sharpened.
    SmoothedColorWithSharpen,
}

impl PipelineMode {
    /// Short keyword used on the command line and in upload forms.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::EdgeMaskOnOriginal => "edge_mask",
            Self::SmoothedColorWithSharpen => "smoothed",
        }
    }
}

impl std::fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

impl std::str::FromStr for PipelineMode {
    type Err = ToonwerkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "edge_mask" | "edge_mask_on_original" => Ok(Self::EdgeMaskOnOriginal),
            "b" | "smoothed" | "smoothed_color_with_sharpen" => {
                Ok(Self::SmoothedColorWithSharpen)
            }
            other => Err(ToonwerkError::InvalidParameters(format!(
                "unknown pipeline mode {other:?} (expected \"edge_mask\" or \"smoothed\")"
            ))),
        }
    }
}

/// Largest accepted Gaussian blur kernel size.
pub const MAX_BLUR_KERNEL: u32 = 255;

/// Largest accepted bilateral window diameter (radius 255).
pub const MAX_SMOOTHING_DIAMETER: u32 = 511;

/// Edge-preserving (bilateral) smoothing strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    /// Diameter of the pixel neighbourhood. Must be a positive odd integer.
    pub diameter: u32,
    /// How different two colours may be and still be averaged together.
    pub sigma_color: f32,
    /// How far apart two pixels may be and still influence each other.
    pub sigma_space: f32,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            diameter: 9,
            sigma_color: 250.0,
            sigma_space: 250.0,
        }
    }
}

/// A 3×3 integer convolution kernel, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharpenKernel(pub [i32; 9]);

impl SharpenKernel {
    /// Centre weight 5, four-connected neighbours −1, corners 0.
    pub const CROSS: Self = Self([0, -1, 0, -1, 5, -1, 0, -1, 0]);

    /// Kernel coefficients, row-major.
    pub fn weights(&self) -> &[i32; 9] {
        &self.0
    }
}

impl Default for SharpenKernel {
    fn default() -> Self {
        Self::CROSS
    }
}

/// Immutable configuration for a single cartoonizer run.
///
/// Every run is fully determined by its parameters: nothing here is mutated by
/// the pipeline and there are no hidden defaults applied at run time other than
/// the documented fallbacks for `smoothing` and `sharpen` in
/// [`PipelineMode::SmoothedColorWithSharpen`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParameters {
    /// Which filter chain to run.
    pub mode: PipelineMode,
    /// Gaussian blur kernel size applied before thresholding (edge-mask mode).
    pub blur_kernel: u32,
    /// Adaptive threshold window size.
    pub threshold_block: u32,
    /// Constant subtracted from the local mean before comparison.
    pub threshold_offset: i32,
    /// Edge-preserving smoothing; defaults are used when absent.
    pub smoothing: Option<SmoothingParams>,
    /// Sharpening kernel; [`SharpenKernel::CROSS`] is used when absent.
    pub sharpen: Option<SharpenKernel>,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self::edge_mask_on_original()
    }
}

impl FilterParameters {
    /// The original single-mode filter: 3×3 blur, 5×5 window, offset 5.
    pub fn edge_mask_on_original() -> Self {
        Self {
            mode: PipelineMode::EdgeMaskOnOriginal,
            blur_kernel: 3,
            threshold_block: 5,
            threshold_offset: 5,
            smoothing: None,
            sharpen: None,
        }
    }

    /// Bilateral smoothing with a 9×9 window and offset 9, then sharpening.
    pub fn smoothed_color_with_sharpen() -> Self {
        Self {
            mode: PipelineMode::SmoothedColorWithSharpen,
            blur_kernel: 3,
            threshold_block: 9,
            threshold_offset: 9,
            smoothing: Some(SmoothingParams::default()),
            sharpen: Some(SharpenKernel::CROSS),
        }
    }

    /// The preset for `mode`.
    pub fn for_mode(mode: PipelineMode) -> Self {
        match mode {
            PipelineMode::EdgeMaskOnOriginal => Self::edge_mask_on_original(),
            PipelineMode::SmoothedColorWithSharpen => Self::smoothed_color_with_sharpen(),
        }
    }

    pub fn with_threshold(mut self, block: u32, offset: i32) -> Self {
        self.threshold_block = block;
        self.threshold_offset = offset;
        self
    }

    pub fn with_blur_kernel(mut self, kernel: u32) -> Self {
        self.blur_kernel = kernel;
        self
    }

    pub fn with_smoothing(mut self, smoothing: SmoothingParams) -> Self {
        self.smoothing = Some(smoothing);
        self
    }

    pub fn with_sharpen(mut self, kernel: SharpenKernel) -> Self {
        self.sharpen = Some(kernel);
        self
    }

    /// Smoothing parameters to use, falling back to the defaults.
    pub fn smoothing_or_default(&self) -> SmoothingParams {
        self.smoothing.unwrap_or_default()
    }

    /// Sharpen kernel to use, falling back to [`SharpenKernel::CROSS`].
    pub fn sharpen_or_default(&self) -> SharpenKernel {
        self.sharpen.unwrap_or_default()
    }

    /// Check every window and kernel size before any pixel is touched.
    ///
    /// The threshold window has no upper bound; the blur kernel and smoothing
    /// diameter are capped at [`MAX_BLUR_KERNEL`] and [`MAX_SMOOTHING_DIAMETER`].
    pub fn validate(&self) -> Result<()> {
        require_odd_size("blur_kernel", self.blur_kernel)?;
        require_at_most("blur_kernel", self.blur_kernel, MAX_BLUR_KERNEL)?;
        require_odd_size("threshold_block", self.threshold_block)?;

        if let Some(smoothing) = &self.smoothing {
            require_odd_size("smoothing.diameter", smoothing.diameter)?;
            require_at_most("smoothing.diameter", smoothing.diameter, MAX_SMOOTHING_DIAMETER)?;
            require_positive_sigma("smoothing.sigma_color", smoothing.sigma_color)?;
            require_positive_sigma("smoothing.sigma_space", smoothing.sigma_space)?;
        }

        Ok(())
    }
}

fn require_odd_size(name: &str, value: u32) -> Result<()> {
    if value == 0 || value % 2 == 0 {
        return Err(ToonwerkError::InvalidParameters(format!(
            "{name} must be a positive odd integer, got {value}"
        )));
    }
    Ok(())
}

fn require_at_most(name: &str, value: u32, max: u32) -> Result<()> {
    if value > max {
        return Err(ToonwerkError::InvalidParameters(format!(
            "{name} must be at most {max}, got {value}"
        )));
    }
    Ok(())
}

fn require_positive_sigma(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ToonwerkError::InvalidParameters(format!(
            "{name} must be a finite positive number, got {value}"
        )));
    }
    Ok(())
}

/// Status of the embedded web server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerStatus {
    Stopped,
    Starting,
    Running,
    Error,
}
