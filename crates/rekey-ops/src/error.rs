//! Error types for pipeline operations.

use std::fmt;

use rekey_io::IoError;
use thiserror::Error;

/// One step of the processing pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Lanczos resize to the requested size.
    Resize,
    /// Crop to the requested edges.
    Crop,
    /// Red outline annotation.
    Border,
    /// Chroma-key background classification.
    Classify,
    /// Alpha clamping.
    AlphaLimit,
    /// Compositing over the replacement color.
    Composite,
    /// Encoding and writing the output file.
    Save,
}

impl Stage {
    /// Lowercase stage name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::Crop => "crop",
            Self::Border => "border",
            Self::Classify => "classify",
            Self::AlphaLimit => "alpha-limit",
            Self::Composite => "composite",
            Self::Save => "save",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for pipeline operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// A raster stage rejected its input.
    #[error("{stage} failed: {source}")]
    Stage {
        /// Stage that failed.
        stage: Stage,
        /// Underlying raster error.
        #[source]
        source: rekey_core::Error,
    },

    /// The stop token fired before `stage` began.
    #[error("cancelled before {stage}")]
    Cancelled {
        /// Stage that was about to run.
        stage: Stage,
    },

    /// Decoding or saving failed.
    #[error(transparent)]
    Io(#[from] IoError),
}

impl OpsError {
    /// Wraps a raster error with the stage it came from.
    pub fn stage(stage: Stage, source: rekey_core::Error) -> Self {
        Self::Stage { stage, source }
    }

    /// `true` for [`OpsError::Cancelled`]; callers usually exit quietly.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Stage the error is attributed to, if any.
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            Self::Stage { stage, .. } | Self::Cancelled { stage } => Some(*stage),
            Self::Io(_) => None,
        }
    }
}

/// Result type for pipeline operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_message_names_stage() {
        let err = OpsError::stage(Stage::Crop, rekey_core::Error::invalid_crop_region((5, 0, 2, 4), (8, 8)));
        let msg = err.to_string();
        assert!(msg.starts_with("crop failed"), "{msg}");
        assert_eq!(err.failed_stage(), Some(Stage::Crop));
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_cancelled() {
        let err = OpsError::Cancelled { stage: Stage::Classify };
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "cancelled before classify");
    }
}
