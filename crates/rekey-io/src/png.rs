//! PNG encoding.
//!
//! Writes 8-bit RGBA with the alpha channel preserved. The `optimize` flag
//! trades encode time for a smaller file by selecting the high-effort
//! deflate level.

use rekey_core::Raster;

use crate::{Format, IoError, IoResult};

/// Encodes a raster as an 8-bit RGBA PNG.
pub fn encode(raster: &Raster, optimize: bool) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let (width, height) = raster.dimensions();

    let mut encoder = png::Encoder::new(&mut buffer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(if optimize {
        png::Compression::High
    } else {
        png::Compression::default()
    });
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::encode(Format::Png, e))?;
    writer
        .write_image_data(&raster.to_rgba_bytes())
        .map_err(|e| IoError::encode(Format::Png, e))?;
    writer.finish().map_err(|e| IoError::encode(Format::Png, e))?;

    tracing::trace!(width, height, optimize, bytes = buffer.len(), "png::encode");
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rekey_core::Rgba8;

    #[test]
    fn test_signature_and_roundtrip() {
        let raster = Raster::from_fn(16, 8, |x, y| {
            Rgba8::new((x * 16) as u8, (y * 32) as u8, 64, (x * 8 + y) as u8)
        })
        .unwrap();

        for optimize in [false, true] {
            let bytes = encode(&raster, optimize).unwrap();
            assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

            let decoded = crate::read_from_memory(&bytes).unwrap();
            assert_eq!(decoded, raster);
        }
    }
}
