//! Process command: run the pipeline on one image and save it.

use crate::preset::Preset;
use crate::ProcessArgs;
use anyhow::{Context, Result};
use rekey_core::BackgroundMode;
use rekey_io::{Format, SaveOptions};
use rekey_ops::{Pipeline, Unstoppable};
use tracing::{debug, info};

/// Runs the process command.
///
/// A cancelled run is not an error and exits quietly.
pub fn run(args: ProcessArgs, verbose: bool) -> Result<()> {
    let base = match &args.preset {
        Some(path) => Preset::load(path)?,
        None => Preset::default(),
    };
    let preset = apply_overrides(base, &args);
    debug!(process = ?preset.process, save = ?preset.save, "effective options");

    if let Some(path) = &args.save_preset {
        preset.store(path)?;
        info!(path = %path.display(), "preset saved");
    }

    let Preset { process, save } = preset;
    let input = super::load_image(&args.input)?;
    let output = match Pipeline::new(process).run(input, &Unstoppable) {
        Ok(raster) => raster,
        Err(e) if e.is_cancelled() => {
            debug!(error = %e, "run cancelled");
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to process: {}", args.input.display()));
        }
    };
    let written = rekey_io::save(&output, &save)
        .with_context(|| format!("Failed to save: {}", save.resolved_path().display()))?;

    // Built from the processed raster, not the encoded file.
    if let Some(path) = &args.preview {
        let thumb = rekey_ops::preview(&output).context("Failed to build preview")?;
        let preview_path = rekey_io::save(&thumb, &SaveOptions::new(Format::Png, path))
            .with_context(|| format!("Failed to save preview: {}", path.display()))?;
        info!(path = %preview_path.display(), width = thumb.width(), height = thumb.height(), "preview saved");
    }

    if verbose {
        let size = std::fs::metadata(&written).map(|m| m.len()).unwrap_or(0);
        println!(
            "{} -> {} ({}, {})",
            args.input.display(),
            written.display(),
            save.format,
            super::format_size(size)
        );
    } else {
        println!("{}", written.display());
    }
    Ok(())
}

/// Layers command-line options over a preset.
fn apply_overrides(mut preset: Preset, args: &ProcessArgs) -> Preset {
    let p = &mut preset.process;
    let s = &mut preset.save;

    if let Some((w, h)) = args.resize {
        *p = p.clone().with_resize(w, h);
    }
    if let Some((l, t, r, b)) = args.crop {
        *p = p.clone().with_crop(l, t, r, b);
    }
    if let Some(mode) = args.background {
        p.background_mode = mode;
    }
    if let Some(color) = args.key_color {
        p.custom_color = color;
        if args.background.is_none() {
            p.background_mode = BackgroundMode::Custom;
        }
    }
    if let Some(tolerance) = args.tolerance {
        p.tolerance = tolerance;
    }
    if args.invert {
        p.invert_colors = true;
    }
    if let Some(alpha) = args.alpha {
        *p = p.clone().with_alpha_limit(alpha);
    }
    if let Some(color) = args.replace_background {
        *p = p.clone().with_replacement(color);
    }

    if let Some(name) = &args.format {
        s.format = Format::parse_or_png(name);
    }
    if let Some(quality) = args.quality {
        s.quality = quality;
    }
    if args.no_optimize {
        s.optimize = false;
    }
    if args.preserve_metadata {
        s.preserve_metadata = true;
    }
    s.output_path = args.output.clone();

    preset
}
