//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 3D position in world units. The flight plane is X-Y; Z points at the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// The ship's pose.
///
/// `vel_x` / `vel_y` are retreat amounts: each frame the position moves by
/// `-vel`. Thrust adds along the heading at the moment it is applied, so the
/// pair is path dependent rather than an inertial vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Position,
    /// Heading in radians.
    pub heading: f64,
    pub vel_x: f64,
    pub vel_y: f64,
}

/// The three level-triggered control flags read once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLatch {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
}

/// Frame timing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FrameTime {
    /// Frames advanced so far.
    pub frame: u64,
    /// Sum of all frame deltas in milliseconds.
    pub elapsed_ms: f64,
    /// Delta of the most recent frame in milliseconds.
    pub last_dt_ms: f64,
}

/// Axis-aligned rectangle in the flight plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance in the flight plane (ignoring z).
    pub fn planar_distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Pose {
    /// Where a ship starts, and where it respawns after dying: the origin,
    /// at rest, facing backward.
    pub fn spawn() -> Self {
        Self {
            position: Position::default(),
            heading: std::f64::consts::PI,
            vel_x: 0.0,
            vel_y: 0.0,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::spawn()
    }
}

impl FrameTime {
    /// Record one frame of `dt_ms`.
    pub fn advance(&mut self, dt_ms: f64) {
        self.frame += 1;
        self.elapsed_ms += dt_ms;
        self.last_dt_ms = dt_ms;
    }

    /// Frames per second implied by the last delta, or 0 before any time has passed.
    pub fn fps(&self) -> f64 {
        if self.last_dt_ms > 0.0 {
            1000.0 / self.last_dt_ms
        } else {
            0.0
        }
    }
}

impl Bounds {
    /// Rectangle of `width` × `height` centered on the origin.
    pub fn centered(width: f64, height: f64) -> Self {
        Self {
            min_x: -width / 2.0,
            max_x: width / 2.0,
            min_y: -height / 2.0,
            max_y: height / 2.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}
