//! Simulation engine for STARFIELD.
//!
//! Owns the hecs scenery world and the ship, applies input at frame
//! boundaries, runs the flight systems for a variable dt, and renders each
//! frame into a `FrameSnapshot` for the host.

pub mod audio;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod systems;
pub mod world_setup;

pub use engine::FlightEngine;
pub use error::{RenderError, SetupError, SimError};
pub use starfield_core as core;

#[cfg(test)]
mod tests;
