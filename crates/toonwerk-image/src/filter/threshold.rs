// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adaptive (local mean) thresholding: turns a grayscale image into a binary
// edge mask.

use image::GrayImage;
use toonwerk_core::error::{Result, ToonwerkError};
use tracing::{debug, instrument};

use crate::bitmap::Mask;

/// Classify every pixel against the mean of its `block_size`×`block_size`
/// neighbourhood.
///
/// A pixel passes (255) when it is strictly brighter than `local_mean - offset`
/// and is suppressed (0) otherwise. Pixels noticeably darker than their
/// surroundings (edges, outlines) are therefore suppressed, and a perfectly
/// uniform region with `offset == 0` is suppressed everywhere. A positive
/// `offset` lowers the threshold so fewer pixels are classified as edges.
///
/// Samples outside the image repeat the nearest border sample, so every window
/// covers exactly `block_size²` samples. The local mean is rounded to the
/// nearest integer before comparison.
#[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn adaptive_mean_threshold(gray: &GrayImage, block_size: u32, offset: i32) -> Result<Mask> {
    if block_size == 0 || block_size % 2 == 0 {
        return Err(ToonwerkError::InvalidParameters(format!(
            "threshold block size must be a positive odd integer, got {block_size}"
        )));
    }

    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Ok(Mask::from_binary(GrayImage::new(width, height)));
    }

    let radius = u64::from(block_size / 2);
    let integral = Integral::new(gray);
    let area = u128::from(block_size) * u128::from(block_size);

    let mut output = GrayImage::new(width, height);
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let sum = integral.replicated_window_sum(x, y, radius);
        // Rounded to nearest; always within 0..=255.
        let local_mean = ((sum + area / 2) / area) as i64;
        let value = i64::from(gray.get_pixel(x, y).0[0]);
        pixel.0[0] = if value > local_mean - i64::from(offset) {
            Mask::PASS
        } else {
            Mask::SUPPRESS
        };
    }

    let mask = Mask::from_binary(output);
    debug!(
        block_size,
        offset,
        passing = mask.count_passing(),
        "Adaptive threshold complete"
    );
    Ok(mask)
}

/// Summed-area table of an unpadded image.
///
/// `table[y * stride + x]` holds the sum of samples in [0, 0) to (x, y),
/// exclusive on both axes, so the table is one row and one column larger
/// than the image.
struct Integral<'a> {
    gray: &'a GrayImage,
    table: Vec<u64>,
    stride: usize,
}

impl<'a> Integral<'a> {
    fn new(gray: &'a GrayImage) -> Self {
        let (w, h) = (gray.width() as usize, gray.height() as usize);
        let stride = w + 1;
        let mut table = vec![0u64; stride * (h + 1)];
        let src = gray.as_raw();

        for y in 0..h {
            let mut row_sum: u64 = 0;
            for x in 0..w {
                row_sum += u64::from(src[y * w + x]);
                table[(y + 1) * stride + (x + 1)] = row_sum + table[y * stride + (x + 1)];
            }
        }

        Self {
            gray,
            table,
            stride,
        }
    }

    /// Sum over the inclusive rectangle `x0..=x1` × `y0..=y1`.
    fn rect_sum(&self, x0: u64, y0: u64, x1: u64, y1: u64) -> u128 {
        let s = self.stride;
        let (x0, y0) = (x0 as usize, y0 as usize);
        let (x1, y1) = (x1 as usize + 1, y1 as usize + 1);
        let total = self.table[y1 * s + x1] + self.table[y0 * s + x0]
            - self.table[y0 * s + x1]
            - self.table[y1 * s + x0];
        u128::from(total)
    }

    fn sample(&self, x: u64, y: u64) -> u128 {
        u128::from(self.gray.get_pixel(x as u32, y as u32).0[0])
    }

    /// Sum of the `(2r+1)`×`(2r+1)` window centred on `(cx, cy)` with samples
    /// outside the image replaced by the nearest edge sample.
    ///
    /// Out-of-range columns all map to column 0 or column `w - 1` (rows
    /// likewise), so the window is the clipped rectangle plus whole-multiple
    /// copies of edge strips and corner samples. No padded buffer is built,
    /// so the radius may exceed the image by any amount.
    fn replicated_window_sum(&self, cx: u32, cy: u32, r: u64) -> u128 {
        let (last_x, last_y) = (
            u64::from(self.gray.width()) - 1,
            u64::from(self.gray.height()) - 1,
        );
        let (cx, cy) = (u64::from(cx), u64::from(cy));

        let (x0, x1) = (cx.saturating_sub(r), (cx + r).min(last_x));
        let (y0, y1) = (cy.saturating_sub(r), (cy + r).min(last_y));
        let left = u128::from(r.saturating_sub(cx));
        let right = u128::from((cx + r).saturating_sub(last_x));
        let top = u128::from(r.saturating_sub(cy));
        let bottom = u128::from((cy + r).saturating_sub(last_y));

        self.rect_sum(x0, y0, x1, y1)
            + left * self.rect_sum(0, y0, 0, y1)
            + right * self.rect_sum(last_x, y0, last_x, y1)
            + top * self.rect_sum(x0, 0, x1, 0)
            + bottom * self.rect_sum(x0, last_y, x1, last_y)
            + top * left * self.sample(0, 0)
            + top * right * self.sample(last_x, 0)
            + bottom * left * self.sample(0, last_y)
            + bottom * right * self.sample(last_x, last_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn uniform_image_with_zero_offset_is_fully_suppressed() {
        let gray = GrayImage::from_pixel(8, 6, Luma([128]));
        let mask = adaptive_mean_threshold(&gray, 5, 0).unwrap();
        assert_eq!(mask.count_passing(), 0);
        assert!(mask.is_binary());
    }

    #[test]
    fn uniform_image_with_positive_offset_fully_passes() {
        let gray = GrayImage::from_pixel(8, 6, Luma([128]));
        let mask = adaptive_mean_threshold(&gray, 5, 5).unwrap();
        assert_eq!(mask.count_passing(), 48);
    }

    #[test]
    fn vertical_edge_on_two_by_two() {
        // Dark left column, bright right column.
        let gray = GrayImage::from_raw(2, 2, vec![0, 255, 0, 255]).unwrap();
        let mask = adaptive_mean_threshold(&gray, 3, 0).unwrap();
        // Left window mean: (0,0,255) per row -> 85; right: (0,255,255) -> 170.
        assert_eq!(mask.as_image().as_raw(), &vec![0, 255, 0, 255]);
    }

    #[test]
    fn dark_line_is_suppressed_on_bright_background() {
        let mut gray = GrayImage::from_pixel(9, 9, Luma([200]));
        for y in 0..9 {
            gray.put_pixel(4, y, Luma([20]));
        }
        let mask = adaptive_mean_threshold(&gray, 3, 5).unwrap();
        for y in 0..9 {
            assert_eq!(mask.get(4, y), Mask::SUPPRESS);
            assert_eq!(mask.get(0, y), Mask::PASS);
            assert_eq!(mask.get(8, y), Mask::PASS);
        }
    }

    #[test]
    fn threshold_adapts_to_uneven_lighting() {
        // A left-to-right brightness ramp with a small dark notch on each side.
        let mut gray = GrayImage::from_fn(20, 5, |x, _| Luma([(40 + x * 10) as u8]));
        gray.put_pixel(3, 2, Luma([40]));
        gray.put_pixel(16, 2, Luma([180]));
        let mask = adaptive_mean_threshold(&gray, 3, 5).unwrap();
        assert_eq!(mask.get(3, 2), Mask::SUPPRESS);
        assert_eq!(mask.get(16, 2), Mask::SUPPRESS);
        // No single global threshold suppresses both notches while passing these.
        assert_eq!(mask.get(1, 0), Mask::PASS);
        assert_eq!(mask.get(18, 0), Mask::PASS);
    }

    #[test]
    fn window_larger_than_image_is_supported() {
        let gray = GrayImage::from_raw(1, 1, vec![77]).unwrap();
        let mask = adaptive_mean_threshold(&gray, 31, 1).unwrap();
        assert_eq!(mask.get(0, 0), Mask::PASS);
    }

    #[test]
    fn window_sums_match_a_clamped_walk() {
        let gray = GrayImage::from_fn(7, 5, |x, y| {
            Luma([((x * 37 + y * 91 + x * y * 13) % 256) as u8])
        });
        let integral = Integral::new(&gray);
        for r in [0u64, 1, 2, 3, 5, 9] {
            for (cx, cy, _) in gray.enumerate_pixels() {
                let mut expected = 0u128;
                for dy in -(r as i64)..=r as i64 {
                    for dx in -(r as i64)..=r as i64 {
                        let sx = (cx as i64 + dx).clamp(0, 6) as u32;
                        let sy = (cy as i64 + dy).clamp(0, 4) as u32;
                        expected += u128::from(gray.get_pixel(sx, sy).0[0]);
                    }
                }
                assert_eq!(
                    integral.replicated_window_sum(cx, cy, r),
                    expected,
                    "r={r} at ({cx}, {cy})"
                );
            }
        }
    }

    #[test]
    fn largest_block_size_does_not_overflow() {
        let gray = GrayImage::from_raw(2, 1, vec![255, 0]).unwrap();
        let mask = adaptive_mean_threshold(&gray, u32::MAX, 0).unwrap();
        // Each window is one sample short of half 255 and half 0: the left
        // mean rounds to 128 and the right one to 127.
        assert_eq!(mask.as_image().as_raw(), &vec![255, 0]);

        let single = GrayImage::from_raw(1, 1, vec![255]).unwrap();
        let mask = adaptive_mean_threshold(&single, u32::MAX, i32::MAX).unwrap();
        assert_eq!(mask.get(0, 0), Mask::PASS);
    }

    #[test]
    fn empty_image_gives_empty_mask() {
        let mask = adaptive_mean_threshold(&GrayImage::new(0, 3), 3, 0).unwrap();
        assert_eq!(mask.dimensions(), (0, 3));
    }

    #[test]
    fn even_block_is_rejected() {
        let gray = GrayImage::new(4, 4);
        assert!(matches!(
            adaptive_mean_threshold(&gray, 4, 0),
            Err(ToonwerkError::InvalidParameters(_))
        ));
    }
}
