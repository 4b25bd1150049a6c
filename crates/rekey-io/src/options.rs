//! Save options record.

use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Format;

/// How and where to write a processed raster.
///
/// The extension of `output_path` is ignored; the written file always ends
/// in the extension of `format` (see [`output_path_for`]).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaveOptions {
    /// Target format.
    pub format: Format,
    /// Quality 0–100 (JPEG, WebP).
    pub quality: u8,
    /// Spend more effort for a smaller file (JPEG Huffman tables, PNG
    /// compression level).
    pub optimize: bool,
    /// Accepted for parity with the options schema; the RGBA raster carries
    /// no metadata, so there is nothing to copy.
    pub preserve_metadata: bool,
    /// Destination path; its extension is replaced.
    pub output_path: PathBuf,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            format: Format::Png,
            quality: 95,
            optimize: true,
            preserve_metadata: false,
            output_path: PathBuf::new(),
        }
    }
}

impl SaveOptions {
    /// Options for writing `format` to `path` with default quality.
    pub fn new(format: Format, path: impl Into<PathBuf>) -> Self {
        Self {
            format,
            output_path: path.into(),
            ..Self::default()
        }
    }

    /// Sets the quality (clamped to 100).
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.min(100);
        self
    }

    /// Sets the optimize flag.
    pub fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Final on-disk path with the extension forced to `format`.
    pub fn resolved_path(&self) -> PathBuf {
        output_path_for(&self.output_path, self.format)
    }
}

/// Replaces the extension of `path` with the canonical one for `format`.
///
/// ```rust
/// use std::path::PathBuf;
/// use rekey_io::{output_path_for, Format};
///
/// assert_eq!(output_path_for("out/shot.png", Format::Jpeg), PathBuf::from("out/shot.jpg"));
/// assert_eq!(output_path_for("shot", Format::Bmp), PathBuf::from("shot.bmp"));
/// ```
pub fn output_path_for<P: AsRef<Path>>(path: P, format: Format) -> PathBuf {
    path.as_ref().with_extension(format.extension())
}
