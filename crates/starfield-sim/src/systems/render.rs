//! Render step: turns the scene into an ordered list of render commands.
//!
//! Every drawable goes through the same chain: its translation, then the
//! camera view, then its z rotation, then the projection.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starfield_core::config::FlightSettings;
use starfield_core::enums::EntityKind;
use starfield_core::math::{
    make_inverse, make_perspective, make_translation, make_z_rotation, matrix_multiply,
    normalize, Mat4,
};
use starfield_core::state::{DrawCall, RenderCommand};
use starfield_core::types::{Pose, Position};

use crate::error::RenderError;
use crate::geometry::MeshTable;
use crate::world_setup::scenery_in_order;

/// What the render step needs to know about the frame besides the scenery.
pub struct FrameView<'a> {
    pub ship: &'a Pose,
    pub settings: &'a FlightSettings,
    pub aspect: f64,
    /// Draw the exhaust plume behind the ship.
    pub draw_plume: bool,
    /// Where to draw the spawn marker, if at all.
    pub marker: Option<Position>,
}

/// Camera placed `camera_distance` above the ship, looking down -z.
pub fn camera_matrix(ship: &Pose, settings: &FlightSettings) -> Mat4 {
    make_translation(
        ship.position.x,
        ship.position.y,
        ship.position.z + settings.camera_distance,
    )
}

pub fn projection_matrix(settings: &FlightSettings, aspect: f64) -> Mat4 {
    make_perspective(settings.fov, aspect, settings.z_near, settings.z_far)
}

/// `((translation × view) × rotation) × projection`.
pub fn composite(position: &Position, angle: f64, view: &Mat4, projection: &Mat4) -> Mat4 {
    let world = make_translation(position.x, position.y, position.z);
    let matrix = matrix_multiply(&world, view);
    let matrix = matrix_multiply(&matrix, &make_z_rotation(angle));
    matrix_multiply(&matrix, projection)
}

/// Build this frame's commands: clear, light, ship, overlays, then scenery in
/// generation order.
///
/// Star colors are drawn from `rng` on every draw, so stars twinkle.
pub fn run(
    world: &World,
    frame: &FrameView,
    mesh: &MeshTable,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<RenderCommand>, RenderError> {
    let view = make_inverse(&camera_matrix(frame.ship, frame.settings));
    let projection = projection_matrix(frame.settings, frame.aspect);

    let scenery = scenery_in_order(world);
    let mut commands = Vec::with_capacity(scenery.len() + 5);

    commands.push(RenderCommand::Clear);
    commands.push(RenderCommand::SetLightDirection {
        direction: normalize(frame.settings.light_direction()),
    });

    let ship_at = frame.ship.position;
    let heading = frame.ship.heading;
    let mut draw = |kind: EntityKind, position: &Position, angle: f64| -> Result<(), RenderError> {
        let range = mesh.range(kind)?;
        let color = match kind {
            EntityKind::Star => {
                let r = rng.gen::<f32>();
                [r, 0.0, 1.0 - r, 1.0]
            }
            other => other.base_color(),
        };
        commands.push(RenderCommand::Draw(DrawCall {
            kind,
            world_view_projection: composite(position, angle, &view, &projection),
            world: make_translation(position.x, position.y, position.z),
            color,
            range,
        }));
        Ok(())
    };

    draw(EntityKind::Ship, &ship_at, heading)?;
    if frame.draw_plume {
        draw(EntityKind::ThrustPlume, &ship_at, heading)?;
    }
    if let Some(marker) = frame.marker {
        draw(EntityKind::Marker, &marker, 0.0)?;
    }
    for (kind, position) in &scenery {
        draw(*kind, position, 0.0)?;
    }

    Ok(commands)
}
