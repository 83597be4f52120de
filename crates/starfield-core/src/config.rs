//! Engine configuration.
//!
//! Every field has a default (see [`crate::constants`]), so a config file
//! only needs to list what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{FlightMode, OscillatorType};
use crate::types::Bounds;

/// Everything needed to build an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// RNG seed. Same seed = same scene and same frames.
    pub seed: u64,
    pub mode: FlightMode,
    pub viewport: Viewport,
    pub generation: GenerationConfig,
    pub physics: PhysicsConfig,
    /// Initial values of the live-editable parameters.
    pub settings: FlightSettings,
    /// Looping-mode boundary. Defaults to the scatter region.
    pub wrap_bounds: Option<Bounds>,
    /// Draw a marker at the spawn point every frame.
    pub show_spawn_marker: bool,
}

/// Render target size, fixed for the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Scene generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub planet_count: usize,
    pub star_count: usize,
    pub spread_multiplier: f64,
    /// Half-width of the planet-free square around the origin.
    pub clearance: f64,
    pub behind_spawn_offset: f64,
    /// Rejected candidates allowed per requested planet before giving up.
    pub attempts_per_planet: usize,
}

/// Flight model constants. Rates are per millisecond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub turn_rate: f64,
    pub thrust_rate: f64,
    pub gravity: f64,
    pub gravity_reach: f64,
    pub planet_footprint: f64,
}

/// Live-editable camera, light and audio parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightSettings {
    /// Exposed to the control panel; the flight model does not read it.
    pub animate_speed: f64,
    pub camera_distance: f64,
    /// Field of view in radians.
    pub fov: f64,
    pub z_near: f64,
    pub z_far: f64,
    pub light_x: f64,
    pub light_y: f64,
    pub light_z: f64,
    pub oscillator_type_1: OscillatorType,
    pub oscillator_type_2: OscillatorType,
    pub oscillator_detune_1: f64,
    pub oscillator_detune_2: f64,
}

/// Configuration loading errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            mode: FlightMode::default(),
            viewport: Viewport::default(),
            generation: GenerationConfig::default(),
            physics: PhysicsConfig::default(),
            settings: FlightSettings::default(),
            wrap_bounds: None,
            show_spawn_marker: false,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            planet_count: PLANET_COUNT,
            star_count: STAR_COUNT,
            spread_multiplier: SPREAD_MULTIPLIER,
            clearance: CLOSEST_PLANET_DISTANCE,
            behind_spawn_offset: BEHIND_SPAWN_OFFSET,
            attempts_per_planet: PLACEMENT_ATTEMPTS_PER_PLANET,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            turn_rate: TURN_RATE,
            thrust_rate: THRUST_RATE,
            gravity: GRAVITY_CONSTANT,
            gravity_reach: MAX_PLANET_G_FORCE_REACH,
            planet_footprint: PLANET_FOOTPRINT,
        }
    }
}

impl Default for FlightSettings {
    fn default() -> Self {
        Self {
            animate_speed: 0.0,
            camera_distance: CAMERA_DISTANCE,
            fov: FIELD_OF_VIEW,
            z_near: Z_NEAR,
            z_far: Z_FAR,
            light_x: LIGHT_DIRECTION[0],
            light_y: LIGHT_DIRECTION[1],
            light_z: LIGHT_DIRECTION[2],
            oscillator_type_1: OscillatorType::Sawtooth,
            oscillator_type_2: OscillatorType::Triangle,
            oscillator_detune_1: OSCILLATOR_DETUNE_1,
            oscillator_detune_2: OSCILLATOR_DETUNE_2,
        }
    }
}

impl FlightConfig {
    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The rectangle scenery is scattered over.
    pub fn scatter_bounds(&self) -> Bounds {
        Bounds::centered(
            self.viewport.width as f64 * self.generation.spread_multiplier,
            self.viewport.height as f64 * self.generation.spread_multiplier,
        )
    }

    /// The looping-mode boundary.
    pub fn effective_wrap_bounds(&self) -> Bounds {
        self.wrap_bounds.unwrap_or_else(|| self.scatter_bounds())
    }
}

impl Viewport {
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl FlightSettings {
    /// Light direction as configured (not normalized).
    pub fn light_direction(&self) -> [f64; 3] {
        [self.light_x, self.light_y, self.light_z]
    }
}
