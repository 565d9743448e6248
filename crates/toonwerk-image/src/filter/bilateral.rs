// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bilateral filter: edge-preserving smoothing that flattens colour regions
// while keeping silhouettes sharp.

use imageproc::filter::bilateral::GaussianEuclideanColorDistance;
use toonwerk_core::error::{Result, ToonwerkError};
use toonwerk_core::types::{MAX_SMOOTHING_DIAMETER, SmoothingParams};
use tracing::{debug, instrument};

use crate::bitmap::Bitmap;

/// Smooth `bitmap` with a bilateral filter.
///
/// Each output sample is a weighted mean of its neighbours within
/// `diameter / 2` pixels, weighted by spatial distance (`sigma_space`) and
/// by Euclidean colour distance (`sigma_color`), so pixels across a strong
/// edge contribute almost nothing.
#[instrument(skip(bitmap), fields(width = bitmap.width(), height = bitmap.height()))]
pub fn bilateral_filter(bitmap: &Bitmap, params: &SmoothingParams) -> Result<Bitmap> {
    let radius = smoothing_radius(params)?;
    if radius == 0 {
        return Ok(bitmap.clone());
    }

    let distance = GaussianEuclideanColorDistance::new(params.sigma_color);
    let smoothed = match bitmap {
        Bitmap::Luma(gray) => Bitmap::Luma(imageproc::filter::bilateral_filter(
            gray,
            radius,
            params.sigma_space,
            distance,
        )),
        Bitmap::Rgb(rgb) => Bitmap::Rgb(imageproc::filter::bilateral_filter(
            rgb,
            radius,
            params.sigma_space,
            distance,
        )),
    };

    debug!(
        diameter = params.diameter,
        sigma_color = params.sigma_color,
        sigma_space = params.sigma_space,
        "Bilateral filter complete"
    );
    Ok(smoothed)
}

/// Window radius for `params`, checked against the supported range.
fn smoothing_radius(params: &SmoothingParams) -> Result<u8> {
    let diameter = params.diameter;
    if diameter == 0 || diameter % 2 == 0 || diameter > MAX_SMOOTHING_DIAMETER {
        return Err(ToonwerkError::InvalidParameters(format!(
            "smoothing diameter must be an odd integer in 1..={MAX_SMOOTHING_DIAMETER}, got {diameter}"
        )));
    }
    if !(params.sigma_color > 0.0 && params.sigma_space > 0.0) {
        return Err(ToonwerkError::InvalidParameters(
            "smoothing sigmas must be positive".into(),
        ));
    }
    u8::try_from(diameter / 2).map_err(|_| {
        ToonwerkError::InvalidParameters(format!("smoothing diameter {diameter} is too large"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn params(diameter: u32, sigma_color: f32, sigma_space: f32) -> SmoothingParams {
        SmoothingParams {
            diameter,
            sigma_color,
            sigma_space,
        }
    }

    fn close(a: &Bitmap, b: &Bitmap) -> bool {
        a.dimensions() == b.dimensions()
            && a.channels() == b.channels()
            && a.as_raw().iter().zip(b.as_raw()).all(|(x, y)| x.abs_diff(*y) <= 1)
    }

    #[test]
    fn uniform_image_is_unchanged() {
        let bitmap = Bitmap::Rgb(RgbImage::from_pixel(6, 4, Rgb([12, 130, 250])));
        let smoothed = bilateral_filter(&bitmap, &SmoothingParams::default()).unwrap();
        assert!(close(&smoothed, &bitmap));
    }

    #[test]
    fn diameter_one_is_identity() {
        let gray = GrayImage::from_raw(3, 2, vec![0, 50, 100, 150, 200, 250]).unwrap();
        let bitmap = Bitmap::Luma(gray);
        let smoothed = bilateral_filter(&bitmap, &params(1, 10.0, 10.0)).unwrap();
        assert_eq!(smoothed, bitmap);
    }

    #[test]
    fn strong_edge_survives_small_color_sigma() {
        // Left half black, right half white.
        let gray = GrayImage::from_fn(10, 10, |x, _| Luma([if x < 5 { 0 } else { 255 }]));
        let bitmap = Bitmap::Luma(gray);
        let smoothed = bilateral_filter(&bitmap, &params(5, 10.0, 50.0)).unwrap();
        assert!(close(&smoothed, &bitmap));
    }

    #[test]
    fn noise_is_flattened_with_large_color_sigma() {
        let mut gray = GrayImage::from_pixel(9, 9, Luma([100]));
        gray.put_pixel(4, 4, Luma([130]));
        let bitmap = Bitmap::Luma(gray);
        let smoothed = bilateral_filter(&bitmap, &params(5, 250.0, 250.0)).unwrap();
        let Bitmap::Luma(out) = smoothed else {
            panic!("channel count changed");
        };
        let centre = out.get_pixel(4, 4).0[0];
        assert!(centre < 110, "centre stayed at {centre}");
    }

    #[test]
    fn channel_count_and_size_are_preserved() {
        let rgb = RgbImage::from_fn(7, 5, |x, y| Rgb([(x * 30) as u8, (y * 40) as u8, 90]));
        let smoothed = bilateral_filter(&Bitmap::Rgb(rgb), &SmoothingParams::default()).unwrap();
        assert_eq!(smoothed.channels(), 3);
        assert_eq!(smoothed.dimensions(), (7, 5));
    }

    #[test]
    fn even_or_oversized_diameter_is_rejected() {
        let bitmap = Bitmap::Luma(GrayImage::new(3, 3));
        for diameter in [4, MAX_SMOOTHING_DIAMETER + 2, u32::MAX] {
            assert!(
                bilateral_filter(&bitmap, &params(diameter, 10.0, 10.0)).is_err(),
                "diameter {diameter}"
            );
        }
    }
}
