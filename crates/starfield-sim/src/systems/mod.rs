//! Per-frame systems, run in a fixed order by the engine.
//!
//! Systems are plain functions over the ship pose and the scenery world.
//! They do not own state; the engine passes in everything they touch.

pub mod boundary;
pub mod gravity;
pub mod movement;
pub mod render;
pub mod steering;
