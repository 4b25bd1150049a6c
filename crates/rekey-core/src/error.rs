//! Error types for rekey-core operations.
//!
//! Covers the two caller errors a raster operation can detect up front:
//! impossible dimensions and crop rectangles that do not fit the source.
//!
//! # Usage
//!
//! ```rust
//! use rekey_core::{Error, Result};
//!
//! fn check(width: u32, height: u32) -> Result<()> {
//!     if width == 0 || height == 0 {
//!         return Err(Error::invalid_dimensions(width, height, "must be > 0"));
//!     }
//!     Ok(())
//! }
//! assert!(check(0, 10).is_err());
//! ```
//!
//! # Used By
//!
//! - [`crate::raster::Raster`] - construction checks
//! - `rekey-ops` - resize and crop validation
//! - `rekey-io` - decoded buffer conversion

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by raster construction and geometric validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Width or height is zero, or a buffer does not hold exactly
    /// `width * height` pixels.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// Crop rectangle is empty, inverted or exceeds the source bounds.
    #[error(
        "invalid crop region ({left}, {top})-({right}, {bottom}) for image {width}x{height}"
    )]
    InvalidCropRegion {
        /// Left edge (inclusive)
        left: u32,
        /// Top edge (inclusive)
        top: u32,
        /// Right edge (exclusive)
        right: u32,
        /// Bottom edge (exclusive)
        bottom: u32,
        /// Source width
        width: u32,
        /// Source height
        height: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidCropRegion`] error.
    #[inline]
    pub fn invalid_crop_region(
        (left, top, right, bottom): (u32, u32, u32, u32),
        (width, height): (u32, u32),
    ) -> Self {
        Self::InvalidCropRegion {
            left,
            top,
            right,
            bottom,
            width,
            height,
        }
    }

    /// Returns `true` for dimension errors.
    #[inline]
    pub fn is_dimensions_error(&self) -> bool {
        matches!(self, Self::InvalidDimensions { .. })
    }

    /// Returns `true` for crop region errors.
    #[inline]
    pub fn is_crop_error(&self) -> bool {
        matches!(self, Self::InvalidCropRegion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let err = Error::invalid_dimensions(0, 50, "width must be > 0");
        let msg = err.to_string();
        assert!(msg.contains("0x50"));
        assert!(msg.contains("width must be > 0"));
        assert!(err.is_dimensions_error());
        assert!(!err.is_crop_error());
    }

    #[test]
    fn test_invalid_crop_message() {
        let err = Error::invalid_crop_region((10, 10, 5, 20), (64, 32));
        let msg = err.to_string();
        assert!(msg.contains("(10, 10)-(5, 20)"));
        assert!(msg.contains("64x32"));
        assert!(err.is_crop_error());
    }
}
