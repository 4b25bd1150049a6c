//! Chroma-key background classification.
//!
//! Each pixel is judged on its own color; there is no neighborhood analysis,
//! so background-colored pixels inside the foreground are keyed out too.
//! Keyed pixels become fully transparent black. With inversion enabled the
//! kept pixels have their RGB channels inverted.
//!
//! # Modes
//!
//! | Mode   | Keyed when                                   | Invert special case          |
//! |--------|----------------------------------------------|------------------------------|
//! | Custom | RGB distance to key color `< tolerance/100`  | none                         |
//! | Black  | every channel `<= tolerance`                 | all channels `> 240` → black |
//! | White  | every channel `>= 255 - tolerance`           | all channels `< 15` → white  |
//!
//! The distance for Custom is Euclidean over channels normalized to 0..1,
//! so it ranges from 0 to √3.
//!
//! A pixel that is already fully transparent is emitted as (0,0,0,0) in
//! every mode, which makes classification idempotent.

use rekey_core::{BackgroundMode, ProcessOptions, Raster, Rgb8, Rgba8};

use crate::parallel::map_pixels;

/// Channel level above which an inverted Black-mode pixel snaps to black.
pub const NEAR_WHITE: u8 = 240;
/// Channel level below which an inverted White-mode pixel snaps to white.
pub const NEAR_BLACK: u8 = 15;

/// Per-pixel background classifier built from [`ProcessOptions`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Keyer {
    /// Key pixels within `threshold` normalized distance of `key`.
    Custom {
        /// Key color.
        key: Rgb8,
        /// Distance threshold, exclusive.
        threshold: f64,
        /// Invert kept pixels.
        invert: bool,
    },
    /// Key pixels with every channel at or below `threshold`.
    Black {
        /// Channel threshold, inclusive.
        threshold: u8,
        /// Invert kept pixels.
        invert: bool,
    },
    /// Key pixels with every channel at or above `threshold`.
    White {
        /// Channel threshold, inclusive.
        threshold: u8,
        /// Invert kept pixels.
        invert: bool,
    },
}

impl Keyer {
    /// Builds the keyer for `options`; `None` when the mode is
    /// [`BackgroundMode::None`].
    pub fn from_options(options: &ProcessOptions) -> Option<Self> {
        let invert = options.invert_colors;
        match options.background_mode {
            BackgroundMode::None => None,
            BackgroundMode::Custom => Some(Self::Custom {
                key: options.custom_color,
                threshold: options.custom_threshold(),
                invert,
            }),
            BackgroundMode::Black => options
                .channel_threshold()
                .map(|threshold| Self::Black { threshold, invert }),
            BackgroundMode::White => options
                .channel_threshold()
                .map(|threshold| Self::White { threshold, invert }),
        }
    }

    /// Classifies one pixel.
    #[inline]
    pub fn apply(&self, px: Rgba8) -> Rgba8 {
        if px.is_transparent() {
            return Rgba8::TRANSPARENT;
        }

        match *self {
            Self::Custom { key, threshold, invert } => {
                if distance(px.rgb(), key) < threshold {
                    Rgba8::TRANSPARENT
                } else if invert {
                    px.inverted()
                } else {
                    px
                }
            }
            Self::Black { threshold, invert } => {
                if all_channels(px, |c| c <= threshold) {
                    Rgba8::TRANSPARENT
                } else if !invert {
                    px
                } else if all_channels(px, |c| c > NEAR_WHITE) {
                    Rgba8::BLACK
                } else {
                    px.inverted()
                }
            }
            Self::White { threshold, invert } => {
                if all_channels(px, |c| c >= threshold) {
                    Rgba8::TRANSPARENT
                } else if !invert {
                    px
                } else if all_channels(px, |c| c < NEAR_BLACK) {
                    Rgba8::WHITE
                } else {
                    px.inverted()
                }
            }
        }
    }
}

#[inline]
fn all_channels(px: Rgba8, pred: impl Fn(u8) -> bool) -> bool {
    pred(px.r) && pred(px.g) && pred(px.b)
}

/// Euclidean distance between two colors with channels normalized to 0..1.
#[inline]
pub fn distance(a: Rgb8, b: Rgb8) -> f64 {
    let d = |x: u8, y: u8| (f64::from(x) - f64::from(y)) / 255.0;
    let (dr, dg, db) = (d(a.r, b.r), d(a.g, b.g), d(a.b, b.b));
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Runs the classifier configured by `options` over the raster in place.
///
/// Does nothing for [`BackgroundMode::None`]. Returns the number of pixels
/// that ended up fully transparent.
pub fn classify(raster: &mut Raster, options: &ProcessOptions) -> usize {
    let Some(keyer) = Keyer::from_options(options) else {
        return 0;
    };
    tracing::trace!(?keyer, "classify");

    map_pixels(raster.pixels_mut(), |px| keyer.apply(px));
    raster.pixels().iter().filter(|p| p.is_transparent()).count()
}
