//! Alpha limiting.

use rekey_core::Raster;

use crate::parallel::map_pixels;

/// Clamps the alpha of every visible pixel to at most `max_alpha`.
///
/// Fully transparent pixels and all color channels are left untouched, so
/// for every pixel `a' = if a == 0 { 0 } else { min(a, max_alpha) }`.
pub fn limit_alpha(raster: &mut Raster, max_alpha: u8) {
    if max_alpha == u8::MAX {
        return;
    }
    tracing::trace!(max_alpha, "limit_alpha");
    map_pixels(raster.pixels_mut(), |px| {
        if px.a > max_alpha {
            px.with_alpha(max_alpha)
        } else {
            px
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rekey_core::Rgba8;

    #[test]
    fn test_limiter_law() {
        let mut r = Raster::from_fn(16, 16, |x, y| Rgba8::new(x as u8, y as u8, 3, (x * 16 + y) as u8))
            .unwrap();
        let before = r.clone();
        limit_alpha(&mut r, 128);

        for (a, b) in before.pixels().iter().zip(r.pixels()) {
            let expected = if a.a == 0 { 0 } else { a.a.min(128) };
            assert_eq!(b.a, expected);
            assert_eq!(a.rgb(), b.rgb());
        }
    }

    #[test]
    fn test_zero_limit_keeps_transparent_color() {
        let mut r = Raster::filled(2, 2, Rgba8::new(9, 8, 7, 0)).unwrap();
        limit_alpha(&mut r, 0);
        assert_eq!(r.pixel(1, 1), Rgba8::new(9, 8, 7, 0));
    }
}
