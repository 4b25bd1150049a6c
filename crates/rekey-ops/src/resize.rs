//! Raster resize and resampling.
//!
//! Two-pass separable Lanczos-3 resampling (horizontal then vertical). Pixels
//! are converted to premultiplied alpha before filtering and back afterwards,
//! so color from fully transparent pixels never bleeds into visible ones.
//! When shrinking, the kernel is stretched by the scale factor so every
//! source pixel contributes.
//!
//! # Example
//!
//! ```rust
//! use rekey_core::{Raster, Rgba8};
//! use rekey_ops::resize::resize;
//!
//! let src = Raster::filled(100, 100, Rgba8::RED).unwrap();
//! let half = resize(&src, 50, 50).unwrap();
//! assert_eq!(half.dimensions(), (50, 50));
//! assert_eq!(half.pixel(25, 25), Rgba8::RED);
//! ```

use rekey_core::{Error, Raster, Result, Rgba8};

/// Lanczos window radius, in source pixels at 1:1 scale.
const LANCZOS_RADIUS: f32 = 3.0;

/// Windowed sinc, `sinc(x) * sinc(x / 3)` on `|x| < 3`.
#[inline]
fn lanczos3(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-6 {
        return 1.0;
    }
    if ax >= LANCZOS_RADIUS {
        return 0.0;
    }
    let px = std::f32::consts::PI * ax;
    let px_r = px / LANCZOS_RADIUS;
    (px.sin() * px_r.sin()) / (px * px_r)
}

/// Premultiplied RGBA in 0..1.
type Premul = [f32; 4];

/// Resizes a raster to exactly `width`×`height` with Lanczos-3.
///
/// # Errors
///
/// [`Error::InvalidDimensions`] if either target dimension is zero.
pub fn resize(src: &Raster, width: u32, height: u32) -> Result<Raster> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "resize target must be non-zero",
        ));
    }

    tracing::trace!(from_w = src.width(), from_h = src.height(), width, height, "resize");

    if src.dimensions() == (width, height) {
        return Ok(src.clone());
    }

    let (src_w, src_h) = (src.width() as usize, src.height() as usize);
    let premul: Vec<Premul> = src.pixels().iter().map(|&p| premultiply(p)).collect();

    let temp = resize_horizontal(&premul, src_w, src_h, width as usize);
    let out = resize_vertical(&temp, width as usize, src_h, height as usize);

    Raster::from_pixels(width, height, out.into_iter().map(unpremultiply).collect())
}

fn premultiply(p: Rgba8) -> Premul {
    let a = f32::from(p.a) / 255.0;
    [
        f32::from(p.r) / 255.0 * a,
        f32::from(p.g) / 255.0 * a,
        f32::from(p.b) / 255.0 * a,
        a,
    ]
}

fn unpremultiply(p: Premul) -> Rgba8 {
    let a = p[3].clamp(0.0, 1.0);
    let a8 = (a * 255.0).round() as u8;
    if a8 == 0 {
        return Rgba8::TRANSPARENT;
    }
    let channel = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba8::new(channel(p[0]), channel(p[1]), channel(p[2]), a8)
}

/// Source taps and weights for one destination coordinate.
fn taps(dst: usize, scale: f32, src_len: usize) -> (usize, Vec<f32>) {
    let stretch = scale.max(1.0);
    let support = LANCZOS_RADIUS * stretch;
    let center = (dst as f32 + 0.5) * scale - 0.5;
    let first = ((center - support).floor() as isize).max(0) as usize;
    let last = ((center + support).ceil().max(0.0) as usize).min(src_len - 1);

    let mut weights: Vec<f32> = (first..=last)
        .map(|s| lanczos3((s as f32 - center) / stretch))
        .collect();

    let sum: f32 = weights.iter().sum();
    if sum.abs() > f32::EPSILON {
        weights.iter_mut().for_each(|w| *w /= sum);
    } else {
        // Degenerate window: take the closest source sample.
        let nearest = (center.round().max(0.0) as usize).clamp(first, last);
        weights.iter_mut().for_each(|w| *w = 0.0);
        weights[nearest - first] = 1.0;
    }
    (first, weights)
}

fn resize_horizontal(
    src: &[Premul],
    src_w: usize,
    src_h: usize,
    dst_w: usize,
) -> Vec<Premul> {
    let scale = src_w as f32 / dst_w as f32;
    let columns: Vec<_> = (0..dst_w).map(|x| taps(x, scale, src_w)).collect();

    let mut dst = vec![[0.0f32; 4]; dst_w * src_h];
    for y in 0..src_h {
        let row = &src[y * src_w..(y + 1) * src_w];
        for (x, (first, weights)) in columns.iter().enumerate() {
            let mut sum = [0.0f32; 4];
            for (i, w) in weights.iter().enumerate() {
                let p = row[first + i];
                for c in 0..4 {
                    sum[c] += p[c] * w;
                }
            }
            dst[y * dst_w + x] = sum;
        }
    }
    dst
}

fn resize_vertical(
    src: &[Premul],
    width: usize,
    src_h: usize,
    dst_h: usize,
) -> Vec<Premul> {
    let scale = src_h as f32 / dst_h as f32;

    let mut dst = vec![[0.0f32; 4]; width * dst_h];
    for y in 0..dst_h {
        let (first, weights) = taps(y, scale, src_h);
        for x in 0..width {
            let mut sum = [0.0f32; 4];
            for (i, w) in weights.iter().enumerate() {
                let p = src[(first + i) * width + x];
                for c in 0..4 {
                    sum[c] += p[c] * w;
                }
            }
            dst[y * width + x] = sum;
        }
    }
    dst
}

/// Calculates the aspect-preserving dimensions that fit inside a box.
///
/// # Example
///
/// ```rust
/// use rekey_ops::resize::fit_dimensions;
///
/// // Fit 1920x1080 into 640x480 box
/// let (w, h) = fit_dimensions(1920, 1080, 640, 480);
/// assert_eq!((w, h), (640, 360));
/// ```
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let scale_w = max_w as f64 / src_w.max(1) as f64;
    let scale_h = max_h as f64 / src_h.max(1) as f64;
    let scale = scale_w.min(scale_h);

    let new_w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let new_h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h.max(1));

    (new_w, new_h)
}
