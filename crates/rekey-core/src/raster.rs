//! Owned RGBA8 raster buffer.
//!
//! [`Raster`] is the single image type flowing through the pipeline. It owns
//! a row-major `Vec<Rgba8>` and guarantees `pixels.len() == width * height`
//! with both dimensions non-zero.
//!
//! # Example
//!
//! ```rust
//! use rekey_core::{Raster, Rgba8};
//!
//! let mut raster = Raster::filled(4, 3, Rgba8::WHITE).unwrap();
//! raster.set_pixel(1, 2, Rgba8::RED);
//! assert_eq!(raster.pixel(1, 2), Rgba8::RED);
//! assert_eq!(raster.row(2)[1], Rgba8::RED);
//! assert_eq!(raster.to_rgba_bytes().len(), 4 * 3 * 4);
//! ```

use crate::{Error, Result, Rgba8};

/// Width×height grid of straight-alpha [`Rgba8`] pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl Raster {
    /// Creates a fully transparent raster.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Rgba8::TRANSPARENT)
    }

    /// Creates a raster with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Rgba8) -> Result<Self> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![pixel; len],
        })
    }

    /// Wraps an existing row-major pixel vector.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba8>) -> Result<Self> {
        let len = pixel_count(width, height)?;
        if pixels.len() != len {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", len, pixels.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a raster from interleaved `RGBA` bytes.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let len = pixel_count(width, height)?;
        if bytes.len() != len * 4 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", len * 4, bytes.len()),
            ));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| Rgba8::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba8) -> Result<Self> {
        let len = pixel_count(width, height)?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Returns the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total pixel count.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always `false`: a raster has at least one pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Mutable row-major pixel slice.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[self.index(x, y)]
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba8) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let idx = self.index(x, y);
        self.pixels[idx] = pixel;
    }

    /// Fills every pixel.
    pub fn fill(&mut self, pixel: Rgba8) {
        self.pixels.fill(pixel);
    }

    /// Row `y` as a slice.
    #[inline]
    pub fn row(&self, y: u32) -> &[Rgba8] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// Row `y` as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [Rgba8] {
        let start = self.index(0, y);
        let w = self.width as usize;
        &mut self.pixels[start..start + w]
    }

    /// Interleaved `RGBA` bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_array()).collect()
    }

    /// `true` if any pixel is not fully opaque.
    pub fn has_transparency(&self) -> bool {
        self.pixels.iter().any(|px| px.a != 255)
    }
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Validates dimensions and returns `width * height`.
fn pixel_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be > 0",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4).map(|_| n))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(Raster::new(0, 10).unwrap_err().is_dimensions_error());
        assert!(Raster::new(10, 0).unwrap_err().is_dimensions_error());
    }

    #[test]
    fn test_from_rgba_bytes() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        let r = Raster::from_rgba_bytes(2, 1, &bytes).unwrap();
        assert_eq!(r.pixel(0, 0), Rgba8::new(1, 2, 3, 4));
        assert_eq!(r.pixel(1, 0), Rgba8::new(5, 6, 7, 8));
        assert_eq!(r.to_rgba_bytes(), bytes);
    }

    #[test]
    fn test_buffer_length_mismatch() {
        assert!(Raster::from_rgba_bytes(2, 2, &[0; 12]).is_err());
        assert!(Raster::from_pixels(2, 2, vec![Rgba8::WHITE; 3]).is_err());
    }

    #[test]
    fn test_from_fn_row_major() {
        let r = Raster::from_fn(3, 2, |x, y| Rgba8::new(x as u8, y as u8, 0, 255)).unwrap();
        assert_eq!(r.pixels()[4], Rgba8::new(1, 1, 0, 255));
        assert_eq!(r.row(1)[2], Rgba8::new(2, 1, 0, 255));
    }

    #[test]
    fn test_transparency_detection() {
        let mut r = Raster::filled(2, 2, Rgba8::BLACK).unwrap();
        assert!(!r.has_transparency());
        r.set_pixel(1, 1, Rgba8::TRANSPARENT);
        assert!(r.has_transparency());
    }
}
