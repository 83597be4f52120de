//! Thrust accumulation and position integration.

use std::f64::consts::FRAC_PI_2;

use starfield_core::config::PhysicsConfig;
use starfield_core::types::{InputLatch, Pose};

/// Thrust magnitude for this frame.
pub fn thrust(input: &InputLatch, physics: &PhysicsConfig, dt_ms: f64) -> f64 {
    if input.thrust {
        physics.thrust_rate * dt_ms
    } else {
        0.0
    }
}

/// Accumulate thrust along the current heading, then retreat by the velocity.
///
/// Thrust scales with dt twice (once in its magnitude, once here), and the
/// position moves by `-vel` regardless of dt.
pub fn run(pose: &mut Pose, input: &InputLatch, physics: &PhysicsConfig, dt_ms: f64) {
    let thrust = thrust(input, physics, dt_ms);
    let facing = pose.heading + FRAC_PI_2;
    pose.vel_x += facing.cos() * thrust * dt_ms;
    pose.vel_y += facing.sin() * thrust * dt_ms;

    pose.position.x -= pose.vel_x;
    pose.position.y -= pose.vel_y;
}
