//! Image info command.
//!
//! Prints dimensions, file size and transparency coverage for each input.

use crate::InfoArgs;
use anyhow::{Context, Result};
use rekey_core::Raster;
use rekey_io::Format;
use std::fs;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for (i, path) in args.input.iter().enumerate() {
        if i > 0 {
            println!();
        }

        let file_size = fs::metadata(path)
            .with_context(|| format!("Failed to stat: {}", path.display()))?
            .len();
        let raster = super::load_image(path)?;
        let stats = AlphaStats::of(&raster);

        println!("{}", path.display());
        println!("  Resolution:  {}x{}", raster.width(), raster.height());
        println!("  Pixels:      {}", raster.len());
        println!("  File size:   {}", super::format_size(file_size));
        println!(
            "  Transparent: {} ({:.1}%)",
            stats.transparent,
            stats.percent(stats.transparent)
        );

        if verbose {
            let format = Format::from_extension(path)
                .map(Format::name)
                .unwrap_or("unknown");
            println!("  Extension:   {}", format);
            println!(
                "  Partial:     {} ({:.1}%)",
                stats.partial,
                stats.percent(stats.partial)
            );
            println!("  Opaque:      {}", stats.opaque);
        }
    }
    Ok(())
}

/// Pixel counts by alpha class.
#[derive(Debug, Default, PartialEq, Eq)]
struct AlphaStats {
    transparent: usize,
    partial: usize,
    opaque: usize,
}

impl AlphaStats {
    fn of(raster: &Raster) -> Self {
        raster.pixels().iter().fold(Self::default(), |mut s, p| {
            match p.a {
                0 => s.transparent += 1,
                255 => s.opaque += 1,
                _ => s.partial += 1,
            }
            s
        })
    }

    fn percent(&self, n: usize) -> f64 {
        let total = self.transparent + self.partial + self.opaque;
        if total == 0 { 0.0 } else { n as f64 * 100.0 / total as f64 }
    }
}
