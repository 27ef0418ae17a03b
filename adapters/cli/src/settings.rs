//! Optional TOML settings file consumed by the command-line adapter.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Knobs accepted from the settings file. Every field is optional; omitted
/// values fall back to command-line flags and then to the engine defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Settings {
    pub(crate) columns: Option<u32>,
    pub(crate) rows: Option<u32>,
    pub(crate) cell_size: Option<f32>,
    pub(crate) initial_snake_length: Option<u32>,
    pub(crate) move_interval_seconds: Option<f32>,
    pub(crate) food_reward: Option<u32>,
    pub(crate) speedup_milestone: Option<u32>,
    pub(crate) speedup_factor: Option<f32>,
    pub(crate) min_move_interval_seconds: Option<f32>,
}

impl Settings {
    /// Loads settings from the provided path, or defaults when no path was
    /// given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_toml(&contents)
    }

    fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse settings file toml contents")
    }
}
