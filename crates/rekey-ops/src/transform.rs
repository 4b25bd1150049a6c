//! Geometric transformations: crop and preview thumbnails.

use rekey_core::{Error, Raster, Rect, Result};

use crate::resize::{fit_dimensions, resize};

/// Bounding box of the preview thumbnail.
pub const PREVIEW_SIZE: u32 = 300;

/// Crops a raster to the region between the given edges.
///
/// `left`/`top` are inclusive, `right`/`bottom` exclusive. The output is
/// `(right - left)`×`(bottom - top)` and its pixel (0,0) is the input pixel
/// (`left`, `top`).
///
/// # Errors
///
/// [`Error::InvalidCropRegion`] unless `left < right <= width` and
/// `top < bottom <= height`. The region is never clamped.
///
/// # Example
///
/// ```rust
/// use rekey_core::{Raster, Rgba8};
/// use rekey_ops::transform::crop;
///
/// let src = Raster::filled(100, 80, Rgba8::WHITE).unwrap();
/// let out = crop(&src, 10, 10, 60, 40).unwrap();
/// assert_eq!(out.dimensions(), (50, 30));
/// ```
pub fn crop(src: &Raster, left: u32, top: u32, right: u32, bottom: u32) -> Result<Raster> {
    let invalid = || Error::invalid_crop_region((left, top, right, bottom), src.dimensions());

    let region = Rect::from_edges(left, top, right, bottom).ok_or_else(invalid)?;
    if !region.fits_within(src.width(), src.height()) {
        return Err(invalid());
    }

    tracing::trace!(left, top, right, bottom, "crop");

    let (x0, x1) = (region.x as usize, region.right() as usize);
    let mut pixels = Vec::with_capacity(region.area() as usize);
    for y in region.y..region.bottom() {
        pixels.extend_from_slice(&src.row(y)[x0..x1]);
    }
    Raster::from_pixels(region.width, region.height, pixels)
}

/// Downscales to fit inside `max_w`×`max_h`, preserving aspect ratio.
///
/// Never enlarges: a raster that already fits is returned unchanged.
pub fn thumbnail(src: &Raster, max_w: u32, max_h: u32) -> Result<Raster> {
    if src.width() <= max_w && src.height() <= max_h {
        return Ok(src.clone());
    }
    let (w, h) = fit_dimensions(src.width(), src.height(), max_w, max_h);
    resize(src, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rekey_core::Rgba8;

    fn coords() -> Raster {
        Raster::from_fn(100, 80, |x, y| Rgba8::new(x as u8, y as u8, 0, 255)).unwrap()
    }

    #[test]
    fn test_crop_dims_and_origin() {
        let src = coords();
        let out = crop(&src, 10, 10, 60, 40).unwrap();
        assert_eq!(out.dimensions(), (50, 30));
        assert_eq!(out.pixel(0, 0), src.pixel(10, 10));
        assert_eq!(out.pixel(49, 29), src.pixel(59, 39));
    }

    #[test]
    fn test_crop_full_frame() {
        let src = coords();
        assert_eq!(crop(&src, 0, 0, 100, 80).unwrap(), src);
    }

    #[test]
    fn test_crop_rejects_bad_regions() {
        let src = coords();
        for (l, t, r, b) in [(60, 10, 10, 40), (10, 10, 10, 40), (0, 0, 101, 80), (0, 40, 50, 81)] {
            let err = crop(&src, l, t, r, b).unwrap_err();
            assert!(err.is_crop_error(), "({l},{t},{r},{b})");
        }
    }

    #[test]
    fn test_thumbnail_shrinks_only() {
        let big = Raster::filled(1200, 600, Rgba8::BLACK).unwrap();
        assert_eq!(thumbnail(&big, PREVIEW_SIZE, PREVIEW_SIZE).unwrap().dimensions(), (300, 150));

        let small = Raster::filled(120, 40, Rgba8::BLACK).unwrap();
        assert_eq!(thumbnail(&small, PREVIEW_SIZE, PREVIEW_SIZE).unwrap().dimensions(), (120, 40));
    }
}
