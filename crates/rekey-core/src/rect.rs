//! Rectangle type for raster regions.
//!
//! # Coordinate System
//!
//! All coordinates use the standard image convention:
//! - Origin (0, 0) is at the **top-left** corner
//! - X increases to the right
//! - Y increases downward
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │  Region  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use rekey_core::Rect;
//!
//! // Crop box given as edges: left, top, right (exclusive), bottom (exclusive)
//! let rect = Rect::from_edges(10, 20, 110, 70).unwrap();
//! assert_eq!((rect.width, rect.height), (100, 50));
//! assert!(rect.fits_within(200, 100));
//! assert!(!rect.fits_within(100, 100));
//! ```

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// # Invariants
///
/// A rectangle with zero width or height is empty; [`Rect::from_edges`]
/// never produces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from its edges, `right` and `bottom` exclusive.
    ///
    /// Returns `None` unless `left < right` and `top < bottom`.
    ///
    /// ```rust
    /// use rekey_core::Rect;
    ///
    /// assert!(Rect::from_edges(5, 5, 5, 10).is_none());
    /// assert_eq!(Rect::from_edges(1, 2, 4, 6), Some(Rect::new(1, 2, 3, 4)));
    /// ```
    #[inline]
    pub const fn from_edges(left: u32, top: u32, right: u32, bottom: u32) -> Option<Self> {
        if left >= right || top >= bottom {
            return None;
        }
        Some(Self::new(left, top, right - left, bottom - top))
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// `true` when width or height is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `true` if the rectangle lies entirely inside a `width`×`height` image.
    #[inline]
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        !self.is_empty() && self.right() <= width && self.bottom() <= height
    }
}
