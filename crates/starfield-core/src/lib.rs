//! Core types and definitions for the STARFIELD flight toy.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the matrix kernel, components, commands, frame snapshots, events,
//! configuration and constants. It has no dependency on any runtime host.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod math;
pub mod state;
pub mod types;
