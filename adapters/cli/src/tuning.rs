//! TOML-backed tuning for the session driver.
//!
//! Every knob ships with the compiled default; a tuning file only needs to
//! name the sections it overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Adjustable parameters for a driven session.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Tuning {
    /// Playing field dimensions.
    pub(crate) field: FieldTuning,
    /// Wave cadence parameters.
    pub(crate) waves: WaveTuning,
}

/// Playing field dimensions in world units.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FieldTuning {
    /// Horizontal extent of the field.
    pub(crate) width: f32,
    /// Vertical extent of the field.
    pub(crate) height: f32,
}

/// Wave cadence parameters.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WaveTuning {
    /// Enemies in a wave before the wave number is added.
    pub(crate) base_enemies: u32,
    /// Milliseconds between consecutive spawns.
    pub(crate) spawn_interval_millis: u64,
    /// Seed for the director's enemy-kind rolls.
    pub(crate) seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field: FieldTuning::default(),
            waves: WaveTuning::default(),
        }
    }
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            base_enemies: 3,
            spawn_interval_millis: 2_000,
            seed: 0x51c2_a7f8_33d9_6e04,
        }
    }
}

impl Tuning {
    /// Loads a tuning file, falling back to defaults for absent sections.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse tuning file {}", path.display()))
    }
}
