//! YAML presets: a saved pair of processing and save options.
//!
//! ```yaml
//! process:
//!   background_mode: white
//!   tolerance: 12
//!   replace_background: false
//! save:
//!   format: webp
//!   quality: 85
//! ```
//!
//! Missing keys take their defaults.

use anyhow::{Context, Result};
use rekey_core::ProcessOptions;
use rekey_io::SaveOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Processing and save options stored together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    /// Pipeline options.
    pub process: ProcessOptions,
    /// Encoder options; `output_path` is normally left out.
    pub save: SaveOptions,
}

impl Preset {
    /// Parses a preset document.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Invalid preset")
    }

    /// Reads a preset file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read preset: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("In preset {}", path.display()))
    }

    /// Writes the preset as YAML.
    pub fn store(&self, path: &Path) -> Result<()> {
        let text = serde_yaml::to_string(self).context("Failed to serialize preset")?;
        fs::write(path, text).with_context(|| format!("Failed to write preset: {}", path.display()))
    }
}
