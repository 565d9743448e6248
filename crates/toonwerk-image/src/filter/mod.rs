// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filter stages: grayscale conversion, Gaussian blur, adaptive mean threshold,
// bilateral smoothing, 3x3 convolution, and masked recombination. Every stage
// allocates and returns a fresh buffer of the same width and height as its input.

pub mod bilateral;
pub mod blur;
pub mod convolve;
pub mod gray;
pub mod mask;
pub mod threshold;

pub use bilateral::bilateral_filter;
pub use blur::{gaussian_blur, gaussian_sigma};
pub use convolve::{convolve3x3, sharpen};
pub use gray::to_grayscale;
pub use mask::apply_mask;
pub use threshold::adaptive_mean_threshold;
