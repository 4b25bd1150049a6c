//! Raster annotations.

use rekey_core::{Raster, Rgba8};

/// Outline color drawn by [`draw_border`].
pub const BORDER_COLOR: Rgba8 = Rgba8::RED;

/// Draws a 1-pixel [`BORDER_COLOR`] outline from (0,0) to
/// (width-1, height-1). Idempotent.
pub fn draw_border(raster: &mut Raster) {
    let (w, h) = raster.dimensions();

    raster.row_mut(0).fill(BORDER_COLOR);
    raster.row_mut(h - 1).fill(BORDER_COLOR);
    for y in 1..h.saturating_sub(1) {
        raster.set_pixel(0, y, BORDER_COLOR);
        raster.set_pixel(w - 1, y, BORDER_COLOR);
    }
}
