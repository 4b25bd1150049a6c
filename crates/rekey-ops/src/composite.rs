//! Background replacement by straight-alpha Porter-Duff over.
//!
//! # Example
//!
//! ```rust
//! use rekey_core::{Raster, Rgba8};
//! use rekey_ops::composite::replace_background;
//!
//! let mut fg = Raster::filled(2, 2, Rgba8::TRANSPARENT).unwrap();
//! fg.set_pixel(0, 0, Rgba8::RED);
//!
//! let out = replace_background(&fg, Rgba8::WHITE);
//! assert_eq!(out.pixel(0, 0), Rgba8::RED);
//! assert_eq!(out.pixel(1, 1), Rgba8::WHITE);
//! ```

use rekey_core::{Raster, Rgba8};

use crate::parallel::zip_pixels;

/// Composites `fg` over a raster of the same size filled with `color`.
pub fn replace_background(fg: &Raster, color: Rgba8) -> Raster {
    let mut out = fg.clone();
    out.fill(color);
    zip_pixels(fg.pixels(), out.pixels_mut(), Rgba8::over);
    out
}
