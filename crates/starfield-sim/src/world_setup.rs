//! Scenery generation.
//!
//! Planets and stars are scattered uniformly over the scatter rectangle with
//! rejection sampling. Each spawned entity carries a [`SpawnOrder`] so systems
//! can visit scenery in generation order regardless of archetype layout.

use hecs::World;
use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starfield_core::components::{Planet, SpawnOrder, Star};
use starfield_core::config::FlightConfig;
use starfield_core::enums::EntityKind;
use starfield_core::types::{Bounds, Position};

use crate::error::SetupError;

/// Populate the world with scenery: P planets outside the clearance square,
/// then S unconstrained stars, then one planet directly behind `spawn`.
///
/// Returns the number of entities spawned (P + S + 1).
pub fn populate_scenery(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &FlightConfig,
    spawn: Position,
) -> Result<usize, SetupError> {
    let generation = &config.generation;
    let bounds = config.scatter_bounds();
    let max_rejections = generation.attempts_per_planet * generation.planet_count;

    let mut order = 0u32;
    let mut placed = 0usize;
    let mut rejected = 0usize;

    while placed < generation.planet_count {
        let (x, y) = sample(rng, &bounds);
        if inside_clearance(x, y, generation.clearance) {
            rejected += 1;
            if rejected > max_rejections {
                return Err(SetupError::PlacementExhausted {
                    requested: generation.planet_count,
                    placed,
                    rejected,
                });
            }
            continue;
        }
        spawn_planet(world, order, Position::new(x, y, 0.0));
        order += 1;
        placed += 1;
    }

    for _ in 0..generation.star_count {
        let (x, y) = sample(rng, &bounds);
        spawn_star(world, order, Position::new(x, y, 0.0));
        order += 1;
    }

    spawn_planet(
        world,
        order,
        Position::new(spawn.x, spawn.y - generation.behind_spawn_offset, 0.0),
    );
    order += 1;

    debug!(
        "Scenery ready: {} planets, {} stars, {} rejected candidates",
        placed + 1,
        generation.star_count,
        rejected
    );

    Ok(order as usize)
}

/// Spawn a planet at the given position.
pub fn spawn_planet(world: &mut World, order: u32, position: Position) -> hecs::Entity {
    world.spawn((position, SpawnOrder(order), Planet))
}

/// Spawn a star at the given position.
pub fn spawn_star(world: &mut World, order: u32, position: Position) -> hecs::Entity {
    world.spawn((position, SpawnOrder(order), Star))
}

/// All scenery in generation order, tagged with its kind.
pub fn scenery_in_order(world: &World) -> Vec<(EntityKind, Position)> {
    let mut scenery: Vec<(SpawnOrder, EntityKind, Position)> = Vec::new();
    for (_entity, (pos, order, _planet)) in world.query::<(&Position, &SpawnOrder, &Planet)>().iter() {
        scenery.push((*order, EntityKind::Planet, *pos));
    }
    for (_entity, (pos, order, _star)) in world.query::<(&Position, &SpawnOrder, &Star)>().iter() {
        scenery.push((*order, EntityKind::Star, *pos));
    }
    scenery.sort_by_key(|(order, _, _)| *order);
    scenery.into_iter().map(|(_, kind, pos)| (kind, pos)).collect()
}

/// Planet positions in generation order.
pub fn planets_in_order(world: &World) -> Vec<Position> {
    let mut planets: Vec<(SpawnOrder, Position)> = world
        .query::<(&Position, &SpawnOrder, &Planet)>()
        .iter()
        .map(|(_entity, (pos, order, _planet))| (*order, *pos))
        .collect();
    planets.sort_by_key(|(order, _)| *order);
    planets.into_iter().map(|(_, pos)| pos).collect()
}

/// Uniform sample over the rectangle, x drawn before y.
fn sample(rng: &mut ChaCha8Rng, bounds: &Bounds) -> (f64, f64) {
    let x = rng.gen::<f64>() * bounds.width() + bounds.min_x;
    let y = rng.gen::<f64>() * bounds.height() + bounds.min_y;
    (x, y)
}

/// Strictly inside the planet-free square around the origin.
fn inside_clearance(x: f64, y: f64, clearance: f64) -> bool {
    x.abs() < clearance && y.abs() < clearance
}
