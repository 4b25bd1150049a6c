//! # rekey-ops
//!
//! Raster operations and the processing pipeline.
//!
//! # Modules
//!
//! - [`resize`] - Separable Lanczos-3 resampling
//! - [`transform`] - Crop and preview thumbnails
//! - [`drawing`] - Border annotation
//! - [`key`] - Chroma-key background classification
//! - [`alpha`] - Alpha limiting
//! - [`composite`] - Background replacement
//! - [`pipeline`] - Fixed-order stage runner and `process_file`
//!
//! # Example
//!
//! ```rust,ignore
//! use enough::Unstoppable;
//! use rekey_core::{BackgroundMode, ProcessOptions};
//! use rekey_io::{Format, SaveOptions};
//! use rekey_ops::process_file;
//!
//! let process = ProcessOptions::default().with_background(BackgroundMode::White, 12);
//! let save = SaveOptions::new(Format::WebP, "out/logo");
//! let written = process_file("logo.png", &process, &save, &Unstoppable)?;
//! ```
//!
//! # Features
//!
//! - `parallel` - Run per-pixel passes on the rayon thread pool

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cancel;
mod error;
mod parallel;

pub mod alpha;
pub mod composite;
pub mod drawing;
pub mod key;
pub mod pipeline;
pub mod resize;
pub mod transform;

pub use cancel::CancelFlag;
pub use error::{OpsError, OpsResult, Stage};
pub use pipeline::{preview, process_file, Pipeline};

pub use enough::{Stop, Unstoppable};
