//! Default tuning parameters. Every value here can be overridden through
//! [`crate::config::FlightConfig`].

use std::f64::consts::PI;

// --- Viewport ---

/// Default render target width in pixels.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

/// Default render target height in pixels.
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 720;

// --- Scene generation ---

/// Number of planets scattered at startup (the behind-spawn planet is extra).
pub const PLANET_COUNT: usize = 100;

/// Number of stars scattered at startup.
pub const STAR_COUNT: usize = 400;

/// The scatter region is the viewport scaled by this factor.
pub const SPREAD_MULTIPLIER: f64 = 50.0;

/// Half-width of the square around the origin that scattered planets avoid.
pub const CLOSEST_PLANET_DISTANCE: f64 = 800.0;

/// The guaranteed planet sits this far behind the spawn point (along -Y).
pub const BEHIND_SPAWN_OFFSET: f64 = 400.0;

/// Rejected planet candidates allowed per requested planet.
pub const PLACEMENT_ATTEMPTS_PER_PLANET: usize = 10;

// --- Flight model (all rates are per millisecond) ---

/// Heading change per millisecond of turning.
pub const TURN_RATE: f64 = 0.005;

/// Thrust impulse per millisecond while the thrust latch is set.
pub const THRUST_RATE: f64 = 0.0003;

/// Planet attraction constant.
pub const GRAVITY_CONSTANT: f64 = 0.5;

/// Planets farther than this exert no pull.
pub const MAX_PLANET_G_FORCE_REACH: f64 = 1000.0;

/// Half-width of a planet's lethal footprint on each axis.
pub const PLANET_FOOTPRINT: f64 = 100.0;

// --- Camera and light ---

/// Camera height above the ship.
pub const CAMERA_DISTANCE: f64 = 500.0;

/// Field of view: 60 degrees.
pub const FIELD_OF_VIEW: f64 = PI / 3.0;

pub const Z_NEAR: f64 = 1.0;

pub const Z_FAR: f64 = 5000.0;

/// Unnormalized light direction.
pub const LIGHT_DIRECTION: [f64; 3] = [1.0, 1.0, 1.0];

// --- Input ---

pub const KEY_LEFT: u32 = 37;

pub const KEY_THRUST: u32 = 38;

pub const KEY_RIGHT: u32 = 39;

// --- Audio ---

/// Engine rumble stops on its own after this long (milliseconds).
pub const RUMBLE_AUTO_STOP_MS: f64 = 3000.0;

/// Rumble oscillator frequencies (Hz).
pub const RUMBLE_FREQUENCIES: [f64; 2] = [50.0, 30.0];

pub const OSCILLATOR_DETUNE_1: f64 = -10.0;

pub const OSCILLATOR_DETUNE_2: f64 = 10.0;

// --- Frame driver ---

/// Nominal display refresh interval used by the host loop (milliseconds).
pub const FRAME_INTERVAL_MS: u64 = 16;
