//! # rekey-core
//!
//! Core types for the rekey image pipeline.
//!
//! This crate provides the foundational types every other rekey crate
//! builds on:
//!
//! - [`Raster`] - Exclusively owned width×height grid of [`Rgba8`] pixels
//! - [`Rgba8`], [`Rgb8`] - 8-bit pixel types with channel accessors
//! - [`Rect`] - Region type used for cropping
//! - [`ProcessOptions`], [`BackgroundMode`] - The processing-options record
//! - [`Error`] - Raster construction and region errors
//!
//! ## Crate Structure
//!
//! ```text
//! rekey-core (this crate)
//!    ^
//!    |
//!    +-- rekey-io (decode, format encoders, atomic save)
//!    |      ^
//!    |      +-- rekey-ops (resize, crop, key, alpha, composite, pipeline)
//!    |             ^
//!    |             +-- rekey-cli
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Derive `Serialize`/`Deserialize` for pixels and options

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod options;
pub mod pixel;
pub mod raster;
pub mod rect;

pub use error::{Error, Result};
pub use options::{BackgroundMode, ProcessOptions};
pub use pixel::{Rgb8, Rgba8};
pub use raster::Raster;
pub use rect::Rect;

/// Prelude module for convenient imports.
///
/// ```
/// use rekey_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::options::{BackgroundMode, ProcessOptions};
    pub use crate::pixel::{Rgb8, Rgba8};
    pub use crate::raster::Raster;
    pub use crate::rect::Rect;
}
