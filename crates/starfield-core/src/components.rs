//! ECS components for hecs scenery entities.
//!
//! Components are plain data structs with no methods.
//! Scenery is spawned once as `(Position, SpawnOrder, Planet | Star)`.

use serde::{Deserialize, Serialize};

/// Marks an entity as a planet (gravity well in open-world mode).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Planet;

/// Marks an entity as a background star.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Star;

/// Position in the generation sequence. Systems sort by it so gravity and
/// drawing visit scenery in the order it was generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnOrder(pub u32);
