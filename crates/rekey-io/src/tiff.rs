//! TIFF encoding (RGBA8, default encoder settings).

use std::io::Cursor;

use rekey_core::Raster;
use tiff::encoder::{colortype, TiffEncoder};

use crate::{Format, IoError, IoResult};

/// Encodes a raster as an uncompressed 8-bit RGBA TIFF.
pub fn encode(raster: &Raster) -> IoResult<Vec<u8>> {
    let (width, height) = raster.dimensions();
    let mut cursor = Cursor::new(Vec::new());

    {
        let mut encoder =
            TiffEncoder::new(&mut cursor).map_err(|e| IoError::encode(Format::Tiff, e))?;
        encoder
            .write_image::<colortype::RGBA8>(width, height, &raster.to_rgba_bytes())
            .map_err(|e| IoError::encode(Format::Tiff, e))?;
    }

    let buffer = cursor.into_inner();
    tracing::trace!(width, height, bytes = buffer.len(), "tiff::encode");
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rekey_core::Rgba8;

    #[test]
    fn test_roundtrip_keeps_alpha() {
        let raster = Raster::from_fn(5, 3, |x, y| Rgba8::new(x as u8, y as u8, 7, (x * 50) as u8))
            .unwrap();
        let bytes = encode(&raster).unwrap();
        assert!(bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*"));
        assert_eq!(crate::read_from_memory(&bytes).unwrap(), raster);
    }
}
