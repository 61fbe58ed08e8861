use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use polybounce_core::geometry::{clamp_vertex_count, DEFAULT_CUSTOM_VERTICES};
use polybounce_core::physics::{
    clamp_motion_speed, DEFAULT_GRAVITY_ACCELERATION, DEFAULT_GRAVITY_STRENGTH,
    MAX_GRAVITY_STRENGTH,
};
use polybounce_core::transform::{clamp_rotation_speed, clamp_scale};
use polybounce_core::{FrameRate, GravityConfig, Shape, SimSettings};
use polybounce_input::{Action, ActionMap};
use serde::{Deserialize, Serialize};

use crate::app::WindowConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown shape {0:?} (expected triangle, square, circle or custom)")]
    UnknownShape(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravitySettings {
    pub enabled: bool,
    pub strength: f32,
    pub max_strength: f32,
    pub accelerating: bool,
    pub acceleration_rate: f32,
}

impl Default for GravitySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: DEFAULT_GRAVITY_STRENGTH,
            max_strength: MAX_GRAVITY_STRENGTH,
            accelerating: false,
            acceleration_rate: DEFAULT_GRAVITY_ACCELERATION,
        }
    }
}

/// Startup configuration. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub shape: Shape,
    pub custom_vertices: u32,
    pub scale: f32,
    pub rotation_speed: f32,
    pub motion_speed: f32,
    pub gravity: GravitySettings,
    /// `None` renders on every display callback.
    pub target_fps: Option<u32>,
    pub seed: u64,
    /// Extra keys on top of the default bindings, key name -> action.
    pub key_bindings: BTreeMap<String, Action>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let sim = SimSettings::default();
        Self {
            title: "polybounce".to_string(),
            width: sim.viewport_width,
            height: sim.viewport_height,
            vsync: true,
            shape: sim.shape,
            custom_vertices: DEFAULT_CUSTOM_VERTICES,
            scale: sim.scale,
            rotation_speed: sim.rotation_speed,
            motion_speed: sim.motion_speed,
            gravity: GravitySettings::default(),
            target_fps: Some(60),
            seed: sim.seed,
            key_bindings: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Clamps every value into its supported range.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.width = self.width.max(1);
        self.height = self.height.max(1);
        self.custom_vertices = clamp_vertex_count(self.custom_vertices);
        if let Shape::Custom(n) = self.shape {
            self.shape = Shape::custom(n);
        }
        self.scale = clamp_scale(finite_or(self.scale, defaults.scale));
        self.rotation_speed =
            clamp_rotation_speed(finite_or(self.rotation_speed, defaults.rotation_speed));
        self.motion_speed = clamp_motion_speed(finite_or(self.motion_speed, defaults.motion_speed));

        let gravity = &mut self.gravity;
        gravity.max_strength = finite_or(gravity.max_strength, MAX_GRAVITY_STRENGTH).max(0.0);
        gravity.strength =
            finite_or(gravity.strength, DEFAULT_GRAVITY_STRENGTH).clamp(0.0, gravity.max_strength);
        gravity.acceleration_rate =
            finite_or(gravity.acceleration_rate, DEFAULT_GRAVITY_ACCELERATION).max(0.0);
        gravity.accelerating &= gravity.enabled;

        if self.target_fps == Some(0) {
            self.target_fps = None;
        }
        self
    }

    pub fn frame_rate(&self) -> FrameRate {
        FrameRate::from_fps(self.target_fps)
    }

    pub fn sim_settings(&self) -> SimSettings {
        let gravity = GravityConfig {
            enabled: self.gravity.enabled,
            strength: self.gravity.strength,
            base_strength: self.gravity.strength,
            accelerating: self.gravity.accelerating,
            acceleration_rate: self.gravity.acceleration_rate,
            max_strength: self.gravity.max_strength,
        };
        SimSettings {
            shape: self.shape,
            custom_vertices: self.custom_vertices,
            scale: self.scale,
            rotation_speed: self.rotation_speed,
            motion_speed: self.motion_speed,
            gravity,
            frame_rate: self.frame_rate(),
            seed: self.seed,
            viewport_width: self.width,
            viewport_height: self.height,
        }
    }

    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            vsync: self.vsync,
        }
    }

    pub fn action_map(&self) -> ActionMap {
        let mut map = ActionMap::default_bindings();
        for (key, action) in &self.key_bindings {
            map.bind(*action, key);
        }
        map
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Accepts a positive frame cap or `unlimited`.
pub fn parse_frame_rate(value: &str) -> Result<FrameRate, String> {
    if value.eq_ignore_ascii_case("unlimited") {
        return Ok(FrameRate::Unlimited);
    }
    match value.parse::<u32>() {
        Ok(fps) => Ok(FrameRate::from_fps(Some(fps))),
        Err(_) => Err(format!("expected a number or `unlimited`, got {value:?}")),
    }
}

#[derive(Debug, Parser)]
#[command(name = "polybounce", version, about = "Spinning rainbow polygon with bounce physics")]
pub struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// triangle, square, circle or custom
    #[arg(long)]
    pub shape: Option<String>,
    /// Vertex count for the custom shape (3-100)
    #[arg(long)]
    pub vertices: Option<u32>,
    /// Target frame rate: 30, 60, 120 or unlimited
    #[arg(long, value_parser = parse_frame_rate)]
    pub fps: Option<FrameRate>,
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Loads the config file, if any, and layers the flags over it.
    pub fn resolve(&self) -> Result<AppConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        self.apply(base)
    }

    pub fn apply(&self, mut config: AppConfig) -> Result<AppConfig, ConfigError> {
        if let Some(vertices) = self.vertices {
            config.custom_vertices = vertices;
            if let Shape::Custom(_) = config.shape {
                config.shape = Shape::custom(vertices);
            }
        }
        if let Some(name) = &self.shape {
            config.shape = Shape::from_name(name, config.custom_vertices)
                .ok_or_else(|| ConfigError::UnknownShape(name.clone()))?;
        }
        if let Some(rate) = self.fps {
            config.target_fps = match rate {
                FrameRate::Capped(fps) => Some(fps),
                FrameRate::Unlimited => None,
            };
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config.sanitized())
    }
}
