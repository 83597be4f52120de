//! Planet gravity wells and contact deaths (open-world mode only).

use hecs::World;
use log::info;

use starfield_core::config::PhysicsConfig;
use starfield_core::events::FlightEvent;
use starfield_core::types::Pose;

use crate::world_setup::planets_in_order;

/// Apply every planet in reach, in generation order.
///
/// A planet whose footprint contains the ship kills it: the pose resets to
/// `respawn` and the loop moves on to the next planet, which then sees the
/// respawned ship. Returns one `ShipDestroyed` per death.
pub fn run(
    world: &World,
    pose: &mut Pose,
    respawn: Pose,
    physics: &PhysicsConfig,
    dt_ms: f64,
) -> Vec<FlightEvent> {
    let mut events = Vec::new();

    for planet in planets_in_order(world) {
        let tx = pose.position.x - planet.x;
        let ty = pose.position.y - planet.y;
        let dist = (tx * tx + ty * ty).sqrt();

        if dist > physics.gravity_reach {
            continue;
        }

        if tx.abs() < physics.planet_footprint && ty.abs() < physics.planet_footprint {
            info!(
                "Ship destroyed at ({:.1}, {:.1}) by planet at ({:.1}, {:.1})",
                pose.position.x, pose.position.y, planet.x, planet.y
            );
            events.push(FlightEvent::ShipDestroyed {
                at: pose.position,
                planet,
            });
            *pose = respawn;
            continue;
        }

        // dist > 0 here: zero distance is inside any positive footprint.
        if dist > 0.0 {
            let pull = physics.gravity * dt_ms / dist;
            pose.vel_x += (tx / dist) * pull;
            pose.vel_y += (ty / dist) * pull;
        }
    }

    events
}
