// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decode/encode boundary: turns uploaded bytes into bitmaps and
// cartoon bitmaps back into PNG. Lives outside the pipeline: the cartoonizer
// only ever sees already-decoded bitmaps.

use image::ImageFormat;
use toonwerk_core::error::{Result, ToonwerkError};
use tracing::{debug, instrument};

use crate::bitmap::Bitmap;

/// Decode raw encoded bytes (JPEG, PNG, etc.) into a bitmap.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode(data: &[u8]) -> Result<Bitmap> {
    let image = image::load_from_memory(data)
        .map_err(|err| ToonwerkError::Decode(format!("failed to decode image: {}", err)))?;
    debug!(
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "Image decoded from bytes"
    );
    Ok(Bitmap::from_dynamic(image))
}

/// Encode a bitmap as PNG bytes.
pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    let written = match bitmap {
        Bitmap::Luma(img) => img.write_to(&mut cursor, ImageFormat::Png),
        Bitmap::Rgb(img) => img.write_to(&mut cursor, ImageFormat::Png),
    };
    written.map_err(|err| ToonwerkError::Encode(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn png_bytes_decode_back_to_the_same_pixels() {
        let rgb = RgbImage::from_fn(5, 4, |x, y| Rgb([x as u8 * 40, y as u8 * 60, 7]));
        let bitmap = Bitmap::Rgb(rgb);
        let bytes = encode_png(&bitmap).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(decode(&bytes).unwrap(), bitmap);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ToonwerkError::Decode(_)));
    }
}
