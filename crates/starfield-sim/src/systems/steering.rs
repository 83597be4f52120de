//! Heading update from the steering flags.

use starfield_core::config::PhysicsConfig;
use starfield_core::types::{InputLatch, Pose};

/// Turn the ship. Right turns clockwise (heading decreases), left turns
/// counter-clockwise; holding both cancels out.
pub fn run(pose: &mut Pose, input: &InputLatch, physics: &PhysicsConfig, dt_ms: f64) {
    if input.right {
        pose.heading -= physics.turn_rate * dt_ms;
    }
    if input.left {
        pose.heading += physics.turn_rate * dt_ms;
    }
}
