//! STARFIELD host application.
//!
//! Wires the flight engine to a graphics backend and a frame clock, and
//! exposes a command channel for input and control-panel changes.

pub mod backend;
pub mod game_loop;
pub mod script;
pub mod state;

pub use starfield_core as core;
pub use starfield_sim as sim;
