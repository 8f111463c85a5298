// config.rs - Session settings loaded from YAML
//
// Every field has a default, so an empty document (or no file at all)
// yields a playable 64x64 board stepping every 100 ms with an R-pentomino
// in the middle.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::grid::{self, Grid, GridError};
use crate::shapes::Shape;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        #[from]
        source: serde_yml::Error,
    },

    /// Parsed, but the values don't describe a usable session.
    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}

impl From<GridError> for ConfigError {
    fn from(err: GridError) -> Self {
        Self::Invalid { reason: err.to_string() }
    }
}

/// Top-level session configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifeConfig {
    /// Board width in cells.
    pub width: usize,
    /// Board height in cells.
    pub height: usize,
    /// On-screen size of a cell, in points.
    pub cell_size: f32,
    /// Delay between generations when started normally.
    pub interval_ms: u64,
    /// Delay between generations in quick mode. Zero means every frame.
    pub quick_interval_ms: u64,
    /// Also stop when the board repeats a recent generation.
    pub halt_on_cycle: bool,
    /// Shape placed at the centre of a fresh board.
    pub initial_shape: Option<Shape>,
    /// Saved board restored at startup, applied after `initial_shape`.
    pub initial_state: Option<String>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            cell_size: 5.0,
            interval_ms: 100,
            quick_interval_ms: 0,
            halt_on_cycle: false,
            initial_shape: Some(Shape::RPentomino),
            initial_state: None,
        }
    }
}

impl LifeConfig {
    /// Load configuration from a YAML file at the given path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as null rather than an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that serde can't.
    pub fn validate(&self) -> Result<(), ConfigError> {
        grid::cell_count(self.width, self.height)?;
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::Invalid {
                reason: format!("cell_size must be a positive number, got {}", self.cell_size),
            });
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn quick_interval(&self) -> Duration {
        Duration::from_millis(self.quick_interval_ms)
    }

    /// Build the starting board: the initial shape at the centre, then the
    /// saved state on top if one is configured.
    pub fn initial_grid(&self) -> Result<Grid, ConfigError> {
        let mut grid = Grid::new(self.width, self.height)?;
        if let Some(shape) = self.initial_shape {
            grid.stamp_shape(self.width as f64 / 2.0, self.height as f64 / 2.0, shape);
        }
        if let Some(saved) = &self.initial_state {
            grid.restore(saved);
        }
        Ok(grid)
    }
}
