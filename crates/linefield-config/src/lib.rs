//! Configuration for the linefield background.
//!
//! Settings are read from `config.toml` in the platform config directory
//! (or an explicit path). Every field has a default, so a missing file or a
//! partial file is fine.

mod error;

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use linefield_core::{DIST, LineCap, Rgb, StrokeStyle};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use error::{ConfigError, Result};

/// File name looked up inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Distance in logical pixels between neighbouring grid points.
    pub step: i32,
    /// Logical pixels covered by one terminal column.
    pub pixels_per_column: u16,
    /// Logical pixels covered by one terminal row.
    pub pixels_per_row: u16,
    /// Stroke colour as `#rrggbb`.
    pub stroke_color: Rgb,
    /// Stroke width in pixels (SVG output).
    pub stroke_width: u32,
    /// Stroke line cap (SVG output).
    pub stroke_linecap: LineCap,
    /// Fixed RNG seed. Random growth each run when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Show the status line at the bottom of the terminal.
    pub show_status: bool,
}

impl Default for Config {
    fn default() -> Self {
        let stroke = StrokeStyle::default();
        Self {
            step: DIST,
            pixels_per_column: 10,
            pixels_per_row: 20,
            stroke_color: stroke.color,
            stroke_width: stroke.width,
            stroke_linecap: stroke.cap,
            seed: None,
            show_status: true,
        }
    }
}

impl Config {
    /// Path of the default config file, if a home directory can be resolved.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "linefield").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load_default() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            None => {
                warn!("could not determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the renderer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.step <= 0 {
            return Err(ConfigError::Invalid(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if self.pixels_per_column == 0 || self.pixels_per_row == 0 {
            return Err(ConfigError::Invalid(
                "pixels_per_column and pixels_per_row must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Stroke attributes assembled from the individual fields.
    pub fn stroke(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.stroke_color,
            width: self.stroke_width,
            cap: self.stroke_linecap,
        }
    }
}
