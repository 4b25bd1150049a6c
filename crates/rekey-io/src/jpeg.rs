//! JPEG encoding.
//!
//! JPEG has no alpha channel. Every pixel is composited over opaque white
//! before encoding, regardless of any background replacement done earlier in
//! the pipeline, so fully transparent regions come out white.

use jpeg_encoder::{ColorType, Encoder};
use rekey_core::{Raster, Rgba8};

use crate::{Format, IoError, IoResult};

/// Encodes a raster as baseline RGB JPEG.
///
/// `quality` is clamped to 1–100. With `optimize` the encoder builds
/// per-image Huffman tables.
///
/// # Errors
///
/// [`IoError::EncodeError`] if either dimension exceeds 65535 or the
/// encoder fails.
pub fn encode(raster: &Raster, quality: u8, optimize: bool) -> IoResult<Vec<u8>> {
    let (width, height) = raster.dimensions();
    let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(IoError::encode(
                Format::Jpeg,
                format!("{width}x{height} exceeds the 65535 pixel JPEG limit"),
            ));
        }
    };

    let rgb = flatten_onto_white(raster);
    let quality = quality.clamp(1, 100);

    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer, quality);
    encoder.set_optimized_huffman_tables(optimize);
    encoder
        .encode(&rgb, w, h, ColorType::Rgb)
        .map_err(|e| IoError::encode(Format::Jpeg, e))?;

    tracing::trace!(width, height, quality, optimize, bytes = buffer.len(), "jpeg::encode");
    Ok(buffer)
}

fn flatten_onto_white(raster: &Raster) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(raster.len() * 3);
    for px in raster.pixels() {
        let flat = px.over(Rgba8::WHITE);
        rgb.extend_from_slice(&[flat.r, flat.g, flat.b]);
    }
    rgb
}
