//! Per-pixel map helper.
//!
//! With the `parallel` feature the pass runs on the rayon pool, otherwise on
//! the calling thread. Output is identical either way.

use rekey_core::Rgba8;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Replaces every pixel with `f(pixel)`.
#[cfg(feature = "parallel")]
pub fn map_pixels<F>(pixels: &mut [Rgba8], f: F)
where
    F: Fn(Rgba8) -> Rgba8 + Sync + Send,
{
    pixels.par_iter_mut().for_each(|px| *px = f(*px));
}

/// Replaces every pixel with `f(pixel)`.
#[cfg(not(feature = "parallel"))]
pub fn map_pixels<F>(pixels: &mut [Rgba8], f: F)
where
    F: Fn(Rgba8) -> Rgba8 + Sync + Send,
{
    pixels.iter_mut().for_each(|px| *px = f(*px));
}

/// Writes `f(fg, bg)` into `bg` for each pixel pair.
#[cfg(feature = "parallel")]
pub fn zip_pixels<F>(fg: &[Rgba8], bg: &mut [Rgba8], f: F)
where
    F: Fn(Rgba8, Rgba8) -> Rgba8 + Sync + Send,
{
    bg.par_iter_mut()
        .zip(fg.par_iter())
        .for_each(|(b, &a)| *b = f(a, *b));
}

/// Writes `f(fg, bg)` into `bg` for each pixel pair.
#[cfg(not(feature = "parallel"))]
pub fn zip_pixels<F>(fg: &[Rgba8], bg: &mut [Rgba8], f: F)
where
    F: Fn(Rgba8, Rgba8) -> Rgba8 + Sync + Send,
{
    bg.iter_mut().zip(fg).for_each(|(b, &a)| *b = f(a, *b));
}
