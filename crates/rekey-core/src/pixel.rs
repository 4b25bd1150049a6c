//! 8-bit pixel types.
//!
//! - [`Rgba8`] - straight (non-premultiplied) RGBA pixel, the unit of every
//!   [`crate::Raster`]
//! - [`Rgb8`] - opaque color, used for key colors
//!
//! # Memory Layout
//!
//! Both types are `#[repr(C)]` so a `&[Rgba8]` has the same layout as the
//! interleaved `RGBA` byte stream codecs produce.
//!
//! # Example
//!
//! ```
//! use rekey_core::Rgba8;
//!
//! let px = Rgba8::new(10, 20, 30, 255);
//! assert_eq!(px.inverted(), Rgba8::new(245, 235, 225, 255));
//!
//! let half_red = Rgba8::new(255, 0, 0, 128);
//! let out = half_red.over(Rgba8::WHITE);
//! assert_eq!(out.a, 255);
//! assert_eq!(out.r, 255);
//! assert_eq!(out.g, 127);
//! ```

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA pixel with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Rgba8 {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (0 = fully transparent)
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black, the value keyed-out pixels become.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);

    /// Creates a pixel from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a pixel from an `[r, g, b, a]` array.
    #[inline]
    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }

    /// Returns the channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Color part of the pixel.
    #[inline]
    pub const fn rgb(self) -> Rgb8 {
        Rgb8::new(self.r, self.g, self.b)
    }

    /// `true` when alpha is zero.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Inverts the color channels, keeping alpha.
    #[inline]
    pub const fn inverted(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b, self.a)
    }

    /// Returns the pixel with alpha replaced.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Composites `self` over `bg` (Porter-Duff over, straight alpha).
    ///
    /// ```text
    /// out_a = fa + ba * (1 - fa)
    /// out_c = (fc * fa + bc * ba * (1 - fa)) / out_a
    /// ```
    ///
    /// For an opaque background this is `fc * fa + bc * (1 - fa)`.
    #[inline]
    pub fn over(self, bg: Self) -> Self {
        match self.a {
            255 => return self,
            0 => return bg,
            _ => {}
        }

        let fa = f32::from(self.a) / 255.0;
        let ba = f32::from(bg.a) / 255.0;
        let bg_weight = ba * (1.0 - fa);
        let out_a = fa + bg_weight;
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }

        let blend = |fc: u8, bc: u8| -> u8 {
            let v = (f32::from(fc) * fa + f32::from(bc) * bg_weight) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };

        Self::new(
            blend(self.r, bg.r),
            blend(self.g, bg.g),
            blend(self.b, bg.b),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        )
    }

    /// Parses `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
    /// Six digits give an opaque pixel.
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let digits = s.trim().trim_start_matches('#');
        match digits.len() {
            6 => Ok(Rgb8::from_hex(digits)?.with_alpha(255)),
            8 => {
                let bytes = parse_hex_bytes::<4>(digits, s)?;
                Ok(Self::from_array(bytes))
            }
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(v: [u8; 4]) -> Self {
        Self::from_array(v)
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(px: Rgba8) -> Self {
        px.to_array()
    }
}

impl FromStr for Rgba8 {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Rgb8 {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb8 {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the channels as `[r, g, b]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns an [`Rgba8`] with the given alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Rgba8 {
        Rgba8::new(self.r, self.g, self.b, a)
    }

    /// Parses `RRGGBB`, with or without a leading `#`.
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(ParseColorError(s.to_string()));
        }
        let [r, g, b] = parse_hex_bytes::<3>(digits, s)?;
        Ok(Self::new(r, g, b))
    }
}

impl FromStr for Rgb8 {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A color string that is not `RRGGBB` / `RRGGBBAA` hex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}': expected RRGGBB or RRGGBBAA hex")]
pub struct ParseColorError(pub String);

fn parse_hex_bytes<const N: usize>(digits: &str, original: &str) -> Result<[u8; N], ParseColorError> {
    let mut out = [0u8; N];
    for (i, byte) in out.iter_mut().enumerate() {
        let pair = digits
            .get(i * 2..i * 2 + 2)
            .ok_or_else(|| ParseColorError(original.to_string()))?;
        *byte = u8::from_str_radix(pair, 16).map_err(|_| ParseColorError(original.to_string()))?;
    }
    Ok(out)
}
