//! Pipeline orchestration.
//!
//! Stages always run in the same order:
//!
//! ```text
//! resize -> crop -> border -> classify -> alpha limit -> composite
//! ```
//!
//! Disabled stages are skipped; the border is always drawn. The stop token
//! is polled before every stage, and the first failing stage aborts the run
//! with an error naming it. Nothing is logged-and-continued.
//!
//! # Example
//!
//! ```rust
//! use enough::Unstoppable;
//! use rekey_core::{BackgroundMode, ProcessOptions, Raster, Rgba8};
//! use rekey_ops::Pipeline;
//!
//! let options = ProcessOptions::default()
//!     .with_resize(50, 50)
//!     .with_background(BackgroundMode::White, 10);
//! let src = Raster::filled(100, 100, Rgba8::WHITE).unwrap();
//!
//! let out = Pipeline::new(options).run(src, &Unstoppable).unwrap();
//! assert_eq!(out.dimensions(), (50, 50));
//! assert!(out.pixel(25, 25).is_transparent());
//! ```

use std::path::{Path, PathBuf};

use enough::Stop;
use rekey_core::{ProcessOptions, Raster};
use rekey_io::SaveOptions;
use tracing::debug;

use crate::transform::{thumbnail, PREVIEW_SIZE};
use crate::{alpha, composite, drawing, key, resize, transform};
use crate::{OpsError, OpsResult, Stage};

/// Configured processing pipeline.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: ProcessOptions,
}

impl Pipeline {
    /// Creates a pipeline for `options`.
    pub fn new(options: ProcessOptions) -> Self {
        Self { options }
    }

    /// Options this pipeline runs with.
    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Runs every stage on `raster`, consuming it.
    ///
    /// # Errors
    ///
    /// - [`OpsError::Cancelled`] if `stop` fires before a stage
    /// - [`OpsError::Stage`] if resize or crop rejects its parameters
    pub fn run(&self, raster: Raster, stop: &dyn Stop) -> OpsResult<Raster> {
        let o = &self.options;
        let mut raster = raster;
        debug!(
            width = raster.width(),
            height = raster.height(),
            mode = %o.background_mode,
            "pipeline start"
        );

        checkpoint(stop, Stage::Resize)?;
        if o.resize {
            raster = resize::resize(&raster, o.width, o.height)
                .map_err(|e| OpsError::stage(Stage::Resize, e))?;
            debug!(width = o.width, height = o.height, "resized");
        }

        checkpoint(stop, Stage::Crop)?;
        if o.crop {
            let (left, top, right, bottom) = o.crop_edges();
            raster = transform::crop(&raster, left, top, right, bottom)
                .map_err(|e| OpsError::stage(Stage::Crop, e))?;
            debug!(left, top, right, bottom, "cropped");
        }

        checkpoint(stop, Stage::Border)?;
        drawing::draw_border(&mut raster);

        checkpoint(stop, Stage::Classify)?;
        let keyed = key::classify(&mut raster, o);
        debug!(mode = %o.background_mode, tolerance = o.tolerance, invert = o.invert_colors, keyed, "classified");

        checkpoint(stop, Stage::AlphaLimit)?;
        if o.limits_alpha() {
            alpha::limit_alpha(&mut raster, o.alpha_value);
            debug!(max_alpha = o.alpha_value, "alpha limited");
        }

        checkpoint(stop, Stage::Composite)?;
        if o.replace_background {
            raster = composite::replace_background(&raster, o.replacement_color);
            debug!(color = %o.replacement_color, "background replaced");
        }

        debug!(width = raster.width(), height = raster.height(), "pipeline done");
        Ok(raster)
    }
}

impl From<ProcessOptions> for Pipeline {
    fn from(options: ProcessOptions) -> Self {
        Self::new(options)
    }
}

fn checkpoint(stop: &dyn Stop, stage: Stage) -> OpsResult<()> {
    stop.check().map_err(|reason| {
        debug!(%stage, ?reason, "cancelled");
        OpsError::Cancelled { stage }
    })
}

/// Decodes `input`, runs the pipeline and saves the result.
///
/// Returns the path actually written (extension forced to the format).
/// `stop` is polled before every stage and once more before saving.
pub fn process_file<P: AsRef<Path>>(
    input: P,
    process: &ProcessOptions,
    save: &SaveOptions,
    stop: &dyn Stop,
) -> OpsResult<PathBuf> {
    let input = input.as_ref();
    let raster = rekey_io::read(input)?;
    let raster = Pipeline::new(process.clone()).run(raster, stop)?;

    checkpoint(stop, Stage::Save)?;
    let written = rekey_io::save(&raster, save)?;
    debug!(input = %input.display(), output = %written.display(), "processed");
    Ok(written)
}

/// Thumbnail of `raster` bounded by [`PREVIEW_SIZE`]², never enlarged.
pub fn preview(raster: &Raster) -> rekey_core::Result<Raster> {
    thumbnail(raster, PREVIEW_SIZE, PREVIEW_SIZE)
}
