// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cartoonizer: the fixed filter chains that turn a photo into a cartoon.

pub mod pipeline;

pub use pipeline::{CartoonOutput, Cartoonizer, cartoonize};
