//! WebP encoding.
//!
//! The pure-Rust WebP encoder in `image` is lossless only. Quality above 90
//! writes the raster bit-exact; at 90 or below the RGB channels are first
//! snapped to a quality-dependent number of levels, which the lossless
//! coder then compresses far better. Alpha is never quantized.

use std::io::Cursor;

use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;
use rekey_core::Raster;

use crate::{Format, IoError, IoResult};

/// Quality above which WebP output is lossless.
pub const LOSSLESS_ABOVE: u8 = 90;

/// Encodes a raster as RGBA WebP.
pub fn encode(raster: &Raster, quality: u8) -> IoResult<Vec<u8>> {
    let (width, height) = raster.dimensions();
    let mut data = raster.to_rgba_bytes();

    let lossless = quality > LOSSLESS_ABOVE;
    if !lossless {
        quantize_rgb(&mut data, quality);
    }

    let mut buffer = Vec::new();
    WebPEncoder::new_lossless(Cursor::new(&mut buffer))
        .encode(&data, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| IoError::encode(Format::WebP, e))?;

    tracing::trace!(width, height, quality, lossless, bytes = buffer.len(), "webp::encode");
    Ok(buffer)
}

/// Number of levels per RGB channel for a quality in 0–100.
///
/// Grows quadratically from 2 at quality 0 to 256 at quality 100.
pub fn levels_for_quality(quality: u8) -> u16 {
    let q = f32::from(quality.min(100)) / 100.0;
    (2.0 + q * q * 254.0).round().clamp(2.0, 256.0) as u16
}

fn quantize_rgb(data: &mut [u8], quality: u8) {
    let levels = levels_for_quality(quality);
    if levels >= 256 {
        return;
    }
    let step = 255.0 / (f32::from(levels) - 1.0);

    for px in data.chunks_exact_mut(4) {
        for c in &mut px[..3] {
            let bucket = (f32::from(*c) / step).round();
            *c = (bucket * step).round().clamp(0.0, 255.0) as u8;
        }
    }
}
