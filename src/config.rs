//! Serialisable backdrop configuration.
//!
//! A [`BackdropConfig`] captures everything needed to recreate a backdrop:
//! motion model, visuals, seeding and window settings. It round-trips
//! through JSON so backdrops can be described in files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::motion::{MotionModel, Wander};
use crate::visuals::{Color, VisualConfig};

/// Ready-made looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Violet motes drifting one step per frame behind a faint layer.
    #[default]
    Classic,
    /// Frame-rate independent cyan motes with glow over a dark gradient.
    Neon,
    /// Falling particles with motion trails.
    Physics,
}

impl Preset {
    /// All presets, in display order.
    pub const ALL: [Preset; 3] = [Preset::Classic, Preset::Neon, Preset::Physics];

    /// Motion model for this preset.
    pub fn model(&self) -> MotionModel {
        match self {
            Preset::Classic => MotionModel::wander(),
            Preset::Neon => MotionModel::Wander(Wander {
                time_scaled: true,
                ..Default::default()
            }),
            Preset::Physics => MotionModel::gravity(),
        }
    }

    /// Visual settings for this preset.
    pub fn visuals(&self) -> VisualConfig {
        let mut v = VisualConfig::new();
        match self {
            Preset::Classic => {
                v.hard_clear()
                    .particle_color(Color::rgb(168, 85, 247))
                    .layer_opacity(0.3);
            }
            Preset::Neon => {
                let cyan = Color::rgb(34, 211, 238);
                v.hard_clear()
                    .gradient(Color::rgba(5, 5, 10, 0.1), Color::rgba(8, 51, 68, 0.1))
                    .particle_color(cyan)
                    .glow(8.0, cyan.with_alpha(0.4))
                    .layer_opacity(0.5);
            }
            Preset::Physics => {
                v.trails(Color::rgba(15, 23, 42, 0.1))
                    .solid_fill(Color::rgba(147, 51, 234, 0.8))
                    .fixed_radius(3.0)
                    .layer_opacity(0.8)
                    .page_color(Color::rgb(15, 23, 42));
            }
        }
        v
    }
}

fn default_title() -> String {
    "driftlight".into()
}

fn default_window_width() -> u32 {
    1280
}

fn default_window_height() -> u32 {
    720
}

/// Complete backdrop configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BackdropConfig {
    /// Window title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Initial window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Initial window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Motion model.
    #[serde(default)]
    pub model: MotionModel,
    /// Rendering options.
    #[serde(default)]
    pub visuals: VisualConfig,
    /// Overrides the model's width-dependent particle count.
    #[serde(default)]
    pub particle_count: Option<usize>,
    /// Fixed RNG seed for reproducible layouts.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl BackdropConfig {
    /// Configuration for a preset.
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            title: default_title(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            model: preset.model(),
            visuals: preset.visuals(),
            particle_count: None,
            seed: None,
        }
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }
}
