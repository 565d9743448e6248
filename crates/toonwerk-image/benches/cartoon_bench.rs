// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the toonwerk-image crate. Runs both cartoon modes
// and the bilateral stage on its own over a synthetic portrait.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgb, RgbImage};

use toonwerk_core::types::{FilterParameters, SmoothingParams};
use toonwerk_image::filter::bilateral_filter;
use toonwerk_image::{Bitmap, Cartoonizer};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A 160x120 "portrait": a warm disc with a dark outline on a cool gradient.
fn synthetic_portrait() -> Bitmap {
    let (width, height) = (160u32, 120u32);
    Bitmap::Rgb(RgbImage::from_fn(width, height, |x, y| {
        let (dx, dy) = (x as i32 - 80, y as i32 - 60);
        let d2 = dx * dx + dy * dy;
        if d2 < 40 * 40 {
            Rgb([225, 180, 150])
        } else if d2 < 43 * 43 {
            Rgb([25, 15, 15])
        } else {
            Rgb([60 + (x / 4) as u8, 100, 150 + (y / 4) as u8])
        }
    }))
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_edge_mask_mode(c: &mut Criterion) {
    let input = synthetic_portrait();
    let cartoonizer = match Cartoonizer::new(FilterParameters::edge_mask_on_original()) {
        Ok(cartoonizer) => cartoonizer,
        Err(err) => panic!("default edge-mask parameters rejected: {err}"),
    };

    c.bench_function("cartoonize edge_mask (160x120)", |b| {
        b.iter(|| black_box(cartoonizer.run(black_box(&input))));
    });
}

/// The smoothed mode is dominated by the 9-wide bilateral filter, so the
/// stage is also measured in isolation.
fn bench_smoothed_mode(c: &mut Criterion) {
    let input = synthetic_portrait();
    let cartoonizer = match Cartoonizer::new(FilterParameters::smoothed_color_with_sharpen()) {
        Ok(cartoonizer) => cartoonizer,
        Err(err) => panic!("default smoothed parameters rejected: {err}"),
    };

    c.bench_function("cartoonize smoothed (160x120)", |b| {
        b.iter(|| black_box(cartoonizer.run(black_box(&input))));
    });

    let smoothing = SmoothingParams::default();
    c.bench_function("bilateral_filter d=9 (160x120)", |b| {
        b.iter(|| black_box(bilateral_filter(black_box(&input), &smoothing)));
    });
}

criterion_group!(benches, bench_edge_mask_mode, bench_smoothed_mode);
criterion_main!(benches);
