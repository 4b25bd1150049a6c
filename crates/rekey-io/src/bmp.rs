//! BMP encoding.
//!
//! Output is an 8-bit paletted BMP with at most [`PALETTE_SIZE`] colors.
//! Alpha is dropped: the RGB channels of every pixel are quantized as-is,
//! without compositing, so the file is fully opaque.

use image::codecs::bmp::BmpEncoder;
use image::ExtendedColorType;
use rekey_core::Raster;

use crate::quantize::quantize;
use crate::{Format, IoError, IoResult};

/// Maximum palette entries in a written BMP.
pub const PALETTE_SIZE: usize = 16;

/// Encodes a raster as a paletted BMP.
pub fn encode(raster: &Raster) -> IoResult<Vec<u8>> {
    let (width, height) = raster.dimensions();
    let indexed = quantize(raster, PALETTE_SIZE);
    let palette: Vec<[u8; 3]> = indexed.palette.iter().map(|c| c.to_array()).collect();

    let mut buffer = Vec::new();
    BmpEncoder::new(&mut buffer)
        .encode_with_palette(&indexed.indices, width, height, ExtendedColorType::L8, Some(palette.as_slice()))
        .map_err(|e| IoError::encode(Format::Bmp, e))?;

    tracing::trace!(width, height, colors = palette.len(), bytes = buffer.len(), "bmp::encode");
    Ok(buffer)
}
