//! Median-cut palette reduction.
//!
//! Used by the BMP encoder to reduce a raster to a small fixed palette.
//! Alpha is ignored; only the RGB channels take part.
//!
//! # Algorithm
//!
//! 1. Build a histogram of distinct colors.
//! 2. If there are no more distinct colors than the target, use them as-is.
//! 3. Otherwise start from one box holding every color and repeatedly split
//!    the box with the widest channel range at its population-weighted
//!    median, until the target count is reached or no box can be split.
//! 4. Each box contributes the population-weighted mean of its colors.
//!
//! Pixels are then mapped to the nearest palette entry by squared RGB
//! distance.

use std::collections::HashMap;

use rekey_core::{Raster, Rgb8};

/// Result of quantizing a raster: palette plus one index per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indexed {
    /// Palette entries, at most the requested count.
    pub palette: Vec<Rgb8>,
    /// Row-major palette indices, one per pixel.
    pub indices: Vec<u8>,
}

/// Reduces `raster` to at most `max_colors` RGB colors (1..=256).
pub fn quantize(raster: &Raster, max_colors: usize) -> Indexed {
    let max_colors = max_colors.clamp(1, 256);

    let mut histogram: HashMap<Rgb8, u32> = HashMap::new();
    for px in raster.pixels() {
        *histogram.entry(px.rgb()).or_insert(0) += 1;
    }
    let mut colors: Vec<(Rgb8, u32)> = histogram.into_iter().collect();
    colors.sort_unstable_by_key(|(c, _)| c.to_array());

    let palette = if colors.len() <= max_colors {
        colors.iter().map(|(c, _)| *c).collect()
    } else {
        median_cut(colors, max_colors)
    };

    let mut lookup: HashMap<Rgb8, u8> = HashMap::new();
    let indices = raster
        .pixels()
        .iter()
        .map(|px| {
            let rgb = px.rgb();
            *lookup.entry(rgb).or_insert_with(|| nearest(&palette, rgb))
        })
        .collect();

    tracing::trace!(colors = palette.len(), max_colors, "quantize");
    Indexed { palette, indices }
}

fn median_cut(colors: Vec<(Rgb8, u32)>, max_colors: usize) -> Vec<Rgb8> {
    let mut boxes = vec![colors];

    while boxes.len() < max_colors {
        let pick = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.len() > 1)
            .map(|(i, b)| (i, widest_channel(b)))
            .max_by_key(|&(_, (_, range))| range);
        let Some((index, (channel, _))) = pick else {
            break;
        };

        let mut bx = boxes.swap_remove(index);
        bx.sort_unstable_by_key(|(c, _)| c.to_array()[channel]);

        let total: u64 = bx.iter().map(|(_, n)| u64::from(*n)).sum();
        let mut acc = 0u64;
        let mut split = 1;
        for (i, (_, n)) in bx.iter().enumerate() {
            acc += u64::from(*n);
            if acc * 2 >= total {
                split = i + 1;
                break;
            }
        }
        let split = split.clamp(1, bx.len() - 1);

        let upper = bx.split_off(split);
        boxes.push(bx);
        boxes.push(upper);
    }

    boxes.iter().map(|b| weighted_mean(b)).collect()
}

/// Channel index with the widest value range, and that range.
fn widest_channel(colors: &[(Rgb8, u32)]) -> (usize, u8) {
    let mut lo = [u8::MAX; 3];
    let mut hi = [u8::MIN; 3];
    for (c, _) in colors {
        for (ch, v) in c.to_array().into_iter().enumerate() {
            lo[ch] = lo[ch].min(v);
            hi[ch] = hi[ch].max(v);
        }
    }
    (0..3)
        .map(|ch| (ch, hi[ch] - lo[ch]))
        .max_by_key(|&(_, range)| range)
        .unwrap_or((0, 0))
}

fn weighted_mean(colors: &[(Rgb8, u32)]) -> Rgb8 {
    let mut sum = [0u64; 3];
    let mut total = 0u64;
    for (c, n) in colors {
        let n = u64::from(*n);
        for (s, v) in sum.iter_mut().zip(c.to_array()) {
            *s += u64::from(v) * n;
        }
        total += n;
    }
    let total = total.max(1);
    let avg = |s: u64| ((s + total / 2) / total) as u8;
    Rgb8::new(avg(sum[0]), avg(sum[1]), avg(sum[2]))
}

fn nearest(palette: &[Rgb8], color: Rgb8) -> u8 {
    let dist = |p: &Rgb8| {
        let dr = i32::from(p.r) - i32::from(color.r);
        let dg = i32::from(p.g) - i32::from(color.g);
        let db = i32::from(p.b) - i32::from(color.b);
        dr * dr + dg * dg + db * db
    };
    palette
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| dist(p))
        .map_or(0, |(i, _)| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rekey_core::Rgba8;

    #[test]
    fn test_few_colors_kept_exactly() {
        let raster = Raster::from_fn(4, 4, |x, _| {
            if x < 2 { Rgba8::RED } else { Rgba8::new(0, 0, 255, 10) }
        })
        .unwrap();
        let q = quantize(&raster, 16);
        assert_eq!(q.palette.len(), 2);
        assert!(q.palette.contains(&Rgb8::new(255, 0, 0)));
        assert!(q.palette.contains(&Rgb8::new(0, 0, 255)));
        assert_eq!(q.indices.len(), 16);
    }

    #[test]
    fn test_many_colors_reduced() {
        let raster =
            Raster::from_fn(64, 64, |x, y| Rgba8::new((x * 4) as u8, (y * 4) as u8, 128, 255))
                .unwrap();
        let q = quantize(&raster, 16);
        assert!(q.palette.len() <= 16);
        assert!(q.palette.len() >= 8);
        assert!(q.indices.iter().all(|&i| (i as usize) < q.palette.len()));
    }

    #[test]
    fn test_extremes_stay_close() {
        let raster = Raster::from_fn(32, 32, |x, y| {
            let v = ((x + y) * 4).min(255) as u8;
            Rgba8::new(v, v, v, 255)
        })
        .unwrap();
        let q = quantize(&raster, 16);
        let black = q.palette[q.indices[0] as usize];
        assert!(black.r < 20, "{black}");
    }
}
