//! Output format selection.
//!
//! [`Format`] is a closed set; each variant owns its encoder module and its
//! save semantics. Adding a format means adding a variant and one match arm
//! in [`Format::encode`].

use std::fmt;
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rekey_core::Raster;

use crate::{IoResult, SaveOptions};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum Format {
    /// PNG, lossless with alpha.
    #[default]
    Png,
    /// JPEG, lossy, no alpha (flattened onto white).
    Jpeg,
    /// WebP, lossless above quality 90, quantized below.
    WebP,
    /// TIFF, RGBA8.
    Tiff,
    /// BMP, 16-color palette, no alpha.
    Bmp,
}

impl Format {
    /// All formats, in display order.
    pub const ALL: [Format; 5] = [Self::Png, Self::Jpeg, Self::WebP, Self::Tiff, Self::Bmp];

    /// Parses a format name (case-insensitive).
    ///
    /// Returns `None` for unknown names; see [`Format::parse_or_png`].
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            "tif" | "tiff" => Some(Self::Tiff),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Parses a format name, falling back to PNG for anything unknown.
    ///
    /// ```rust
    /// use rekey_io::Format;
    ///
    /// assert_eq!(Format::parse_or_png("JPEG"), Format::Jpeg);
    /// assert_eq!(Format::parse_or_png("exr"), Format::Png);
    /// ```
    pub fn parse_or_png(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::debug!(name, "unknown format, falling back to PNG");
            Self::Png
        })
    }

    /// Format implied by a path's extension.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::parse)
    }

    /// Canonical file extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
            Self::Tiff => "tiff",
            Self::Bmp => "bmp",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::WebP => "WebP",
            Self::Tiff => "TIFF",
            Self::Bmp => "BMP",
        }
    }

    /// Encodes `raster` to this format in memory.
    pub fn encode(self, raster: &Raster, options: &SaveOptions) -> IoResult<Vec<u8>> {
        match self {
            Self::Png => crate::png::encode(raster, options.optimize),
            Self::Jpeg => crate::jpeg::encode(raster, options.quality, options.optimize),
            Self::WebP => crate::webp::encode(raster, options.quality),
            Self::Tiff => crate::tiff::encode(raster),
            Self::Bmp => crate::bmp::encode(raster),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Format {
    fn from(name: String) -> Self {
        Self::parse_or_png(&name)
    }
}

impl From<Format> for String {
    fn from(format: Format) -> Self {
        format.extension().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Format::parse("jpg"), Some(Format::Jpeg));
        assert_eq!(Format::parse("JPEG"), Some(Format::Jpeg));
        assert_eq!(Format::parse(".tif"), Some(Format::Tiff));
        assert_eq!(Format::parse("WebP"), Some(Format::WebP));
        assert_eq!(Format::parse("gif"), None);
    }

    #[test]
    fn test_unknown_falls_back_to_png() {
        assert_eq!(Format::parse_or_png("heic"), Format::Png);
        assert_eq!(Format::parse_or_png(""), Format::Png);
        assert_eq!(Format::from(String::from("bmp")), Format::Bmp);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("a/b/photo.JPG"), Some(Format::Jpeg));
        assert_eq!(Format::from_extension("noext"), None);
    }

    #[test]
    fn test_extension_roundtrip() {
        for f in Format::ALL {
            assert_eq!(Format::parse(f.extension()), Some(f));
        }
    }
}
