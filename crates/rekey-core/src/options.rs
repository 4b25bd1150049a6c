//! Processing options record.
//!
//! [`ProcessOptions`] is the explicit, per-call configuration of the
//! pipeline. There is no process-wide state: callers build one value and
//! pass it in.
//!
//! # Tolerance units
//!
//! `tolerance` is one field with a mode-dependent unit:
//!
//! | Mode     | Range | Meaning                                             |
//! |----------|-------|-----------------------------------------------------|
//! | `Custom` | 0–100 | percent of the normalized RGB distance (`t = tol / 100`) |
//! | `Black`  | 0–255 | max channel value still keyed (`t = tol`)           |
//! | `White`  | 0–255 | distance below 255 still keyed (`t = 255 - tol`)    |
//!
//! Use [`ProcessOptions::custom_threshold`] and
//! [`ProcessOptions::channel_threshold`] instead of converting by hand.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Rgb8, Rgba8};

/// Which color is treated as background by the keyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BackgroundMode {
    /// Keyer disabled.
    #[default]
    None,
    /// Near-black pixels become transparent.
    Black,
    /// Near-white pixels become transparent.
    White,
    /// Pixels close to `custom_color` become transparent.
    Custom,
}

impl BackgroundMode {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Black => "black",
            Self::White => "white",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for BackgroundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackgroundMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "black" => Ok(Self::Black),
            "white" => Ok(Self::White),
            "custom" | "color" => Ok(Self::Custom),
            other => Err(format!(
                "unknown background mode '{other}' (expected none, black, white, custom)"
            )),
        }
    }
}

/// Options for one pipeline run.
///
/// The default value disables every optional stage; only the border
/// annotation runs.
///
/// Crop edges are `left`/`top` inclusive and `right`/`bottom` exclusive.
/// When `crop` is set they must satisfy `left < right`, `top < bottom` and
/// lie within the raster reaching the crop stage (after resize); anything
/// else fails the run with `InvalidCropRegion`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProcessOptions {
    /// Resize to `width`×`height` first.
    pub resize: bool,
    /// Target width for resize.
    pub width: u32,
    /// Target height for resize.
    pub height: u32,

    /// Crop after resizing.
    pub crop: bool,
    /// Crop left edge (inclusive).
    pub crop_left: u32,
    /// Crop top edge (inclusive).
    pub crop_top: u32,
    /// Crop right edge (exclusive).
    pub crop_right: u32,
    /// Crop bottom edge (exclusive).
    pub crop_bottom: u32,

    /// Keyer mode.
    pub background_mode: BackgroundMode,
    /// Key color for [`BackgroundMode::Custom`].
    pub custom_color: Rgb8,
    /// Key tolerance; unit depends on `background_mode` (see module docs).
    pub tolerance: u8,
    /// Invert colors of pixels the keyer keeps.
    pub invert_colors: bool,

    /// Clamp alpha of visible pixels to `alpha_value`.
    pub adjust_alpha: bool,
    /// Maximum alpha when `adjust_alpha` is set.
    pub alpha_value: u8,

    /// Composite the result over `replacement_color`.
    pub replace_background: bool,
    /// Background color for replacement.
    pub replacement_color: Rgba8,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            resize: false,
            width: 0,
            height: 0,
            crop: false,
            crop_left: 0,
            crop_top: 0,
            crop_right: 0,
            crop_bottom: 0,
            background_mode: BackgroundMode::None,
            custom_color: Rgb8::WHITE,
            tolerance: 10,
            invert_colors: false,
            adjust_alpha: false,
            alpha_value: 255,
            replace_background: false,
            replacement_color: Rgba8::WHITE,
        }
    }
}

impl ProcessOptions {
    /// Enables resize to `width`×`height`.
    pub fn with_resize(mut self, width: u32, height: u32) -> Self {
        self.resize = true;
        self.width = width;
        self.height = height;
        self
    }

    /// Enables crop with the given edges.
    pub fn with_crop(mut self, left: u32, top: u32, right: u32, bottom: u32) -> Self {
        self.crop = true;
        self.crop_left = left;
        self.crop_top = top;
        self.crop_right = right;
        self.crop_bottom = bottom;
        self
    }

    /// Sets the keyer mode and tolerance.
    pub fn with_background(mut self, mode: BackgroundMode, tolerance: u8) -> Self {
        self.background_mode = mode;
        self.tolerance = tolerance;
        self
    }

    /// Selects [`BackgroundMode::Custom`] keyed on `color`.
    pub fn with_custom_color(mut self, color: Rgb8, tolerance: u8) -> Self {
        self.background_mode = BackgroundMode::Custom;
        self.custom_color = color;
        self.tolerance = tolerance;
        self
    }

    /// Sets color inversion of kept pixels.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert_colors = invert;
        self
    }

    /// Enables the alpha limiter.
    pub fn with_alpha_limit(mut self, alpha: u8) -> Self {
        self.adjust_alpha = true;
        self.alpha_value = alpha;
        self
    }

    /// Enables background replacement.
    pub fn with_replacement(mut self, color: Rgba8) -> Self {
        self.replace_background = true;
        self.replacement_color = color;
        self
    }

    /// Crop edges as `(left, top, right, bottom)`.
    #[inline]
    pub fn crop_edges(&self) -> (u32, u32, u32, u32) {
        (self.crop_left, self.crop_top, self.crop_right, self.crop_bottom)
    }

    /// Distance threshold for [`BackgroundMode::Custom`]: `tolerance / 100`.
    #[inline]
    pub fn custom_threshold(&self) -> f64 {
        f64::from(self.tolerance) / 100.0
    }

    /// Per-channel threshold for [`BackgroundMode::Black`] (`tolerance`) and
    /// [`BackgroundMode::White`] (`255 - tolerance`). `None` for other modes.
    #[inline]
    pub fn channel_threshold(&self) -> Option<u8> {
        match self.background_mode {
            BackgroundMode::Black => Some(self.tolerance),
            BackgroundMode::White => Some(255 - self.tolerance),
            BackgroundMode::None | BackgroundMode::Custom => None,
        }
    }

    /// `true` when the alpha limiter would change anything.
    #[inline]
    pub fn limits_alpha(&self) -> bool {
        self.adjust_alpha && self.alpha_value < 255
    }
}
