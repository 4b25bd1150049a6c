//! # rekey-io
//!
//! Image decoding and format-specific encoding for the rekey pipeline.
//!
//! Decoding accepts anything the `image` crate understands (PNG, JPEG, WebP,
//! TIFF, BMP, GIF) and always yields an RGBA8 [`Raster`]. Encoding is a
//! closed dispatch over [`Format`]:
//!
//! | Format | Alpha   | Notes                                             |
//! |--------|---------|---------------------------------------------------|
//! | PNG    | kept    | `optimize` selects high-effort deflate            |
//! | JPEG   | dropped | flattened onto opaque white, `quality` 1–100      |
//! | WebP   | kept    | lossless above quality 90, level-quantized below  |
//! | TIFF   | kept    | RGBA8                                             |
//! | BMP    | dropped | median-cut to 16 colors, 8-bit paletted           |
//!
//! # Example
//!
//! ```rust,ignore
//! use rekey_io::{read, save, Format, SaveOptions};
//!
//! let raster = read("input.png")?;
//! let written = save(&raster, &SaveOptions::new(Format::Jpeg, "out/result.png"))?;
//! assert_eq!(written.extension().unwrap(), "jpg");
//! ```
//!
//! # Used By
//!
//! - `rekey-ops` - `process_file` decodes, runs the pipeline, then saves
//! - `rekey-cli` - `info` command

#![warn(missing_docs)]

pub mod bmp;
pub mod error;
pub mod format;
pub mod jpeg;
pub mod options;
pub mod png;
pub mod quantize;
pub mod tiff;
pub mod webp;

pub use error::{IoError, IoResult};
pub use format::Format;
pub use options::{output_path_for, SaveOptions};

use std::io::Write;
use std::path::{Path, PathBuf};

use rekey_core::Raster;

/// Reads an image file into an RGBA8 raster.
///
/// The format is sniffed from the file contents, falling back to the
/// extension.
///
/// # Errors
///
/// - [`IoError::Io`] if the file cannot be opened
/// - [`IoError::DecodeError`] if the contents cannot be decoded
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    let image = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let raster = dynamic_to_raster(image)?;
    tracing::debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        "read"
    );
    Ok(raster)
}

/// Decodes an in-memory encoded image into an RGBA8 raster.
pub fn read_from_memory(bytes: &[u8]) -> IoResult<Raster> {
    let image =
        image::load_from_memory(bytes).map_err(|e| IoError::DecodeError(e.to_string()))?;
    dynamic_to_raster(image)
}

fn dynamic_to_raster(image: image::DynamicImage) -> IoResult<Raster> {
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Raster::from_rgba_bytes(width, height, rgba.as_raw())?)
}

/// Encodes `raster` in memory according to `options.format`.
pub fn encode(raster: &Raster, options: &SaveOptions) -> IoResult<Vec<u8>> {
    options.format.encode(raster, options)
}

/// Encodes `raster` and writes it to `options.output_path` with the
/// extension replaced by the format's canonical one.
///
/// The file is encoded fully in memory first, then written to a temporary
/// file in the destination directory and renamed over the target. On any
/// failure nothing is left at the target path.
///
/// Returns the path actually written.
///
/// # Errors
///
/// - [`IoError::EncodeError`] if the codec rejects the raster
/// - [`IoError::Io`] if the temp file cannot be created, written or renamed
pub fn save(raster: &Raster, options: &SaveOptions) -> IoResult<PathBuf> {
    let path = options.resolved_path();
    let bytes = encode(raster, options)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(&path).map_err(|e| IoError::Io(e.error))?;

    tracing::debug!(
        path = %path.display(),
        format = %options.format,
        quality = options.quality,
        bytes = bytes.len(),
        "saved"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rekey_core::Rgba8;

    fn sample() -> Raster {
        Raster::from_fn(8, 6, |x, y| Rgba8::new(x as u8 * 30, y as u8 * 40, 90, 200)).unwrap()
    }

    #[test]
    fn test_save_forces_extension() {
        let dir = tempfile::tempdir().unwrap();
        let opts = SaveOptions::new(Format::Tiff, dir.path().join("out.png"));

        let written = save(&sample(), &opts).unwrap();
        assert_eq!(written, dir.path().join("out.tiff"));
        assert!(written.exists());
        assert!(!dir.path().join("out.png").exists());
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let opts = SaveOptions::new(Format::Png, dir.path().join("a.png"));
        save(&sample(), &opts).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_save_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let opts = SaveOptions::new(Format::Png, dir.path().join("missing/a.png"));
        let err = save(&sample(), &opts).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
        assert!(!dir.path().join("missing/a.png").exists());
    }

    #[test]
    fn test_save_encode_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let wide = Raster::filled(70_000, 1, Rgba8::RED).unwrap();
        let opts = SaveOptions::new(Format::Jpeg, dir.path().join("wide"));

        let err = save(&wide, &opts).unwrap_err();
        assert!(matches!(err, IoError::EncodeError { format: Format::Jpeg, .. }), "{err}");
        assert!(!opts.resolved_path().exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_read_roundtrip_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let raster = sample();
        let path = save(&raster, &SaveOptions::new(Format::Png, dir.path().join("r"))).unwrap();
        assert_eq!(read(&path).unwrap(), raster);
    }

    #[test]
    fn test_decode_garbage() {
        let err = read_from_memory(b"definitely not an image").unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
