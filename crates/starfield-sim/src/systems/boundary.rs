//! Looping-mode boundary wrap.

use starfield_core::events::FlightEvent;
use starfield_core::types::{Bounds, Pose};

/// Move a ship that left the rectangle to the opposite edge, per axis.
/// Velocity is kept.
pub fn run(pose: &mut Pose, bounds: &Bounds) -> Option<FlightEvent> {
    let from = pose.position;
    let pos = &mut pose.position;

    if pos.x < bounds.min_x {
        pos.x = bounds.max_x;
    } else if pos.x > bounds.max_x {
        pos.x = bounds.min_x;
    }

    if pos.y < bounds.min_y {
        pos.y = bounds.max_y;
    } else if pos.y > bounds.max_y {
        pos.y = bounds.min_y;
    }

    if *pos != from {
        Some(FlightEvent::Wrapped { from, to: *pos })
    } else {
        None
    }
}
