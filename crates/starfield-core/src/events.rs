//! Events emitted by the simulation for the audio collaborator and the host.

use serde::{Deserialize, Serialize};

use crate::enums::OscillatorType;
use crate::types::Position;

/// One oscillator of a two-voice tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub frequency: f64,
    pub waveform: OscillatorType,
    /// Detune in cents.
    pub detune: f64,
}

/// Audio events for the external synthesizer. Each start is paired with
/// exactly one stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Engine rumble began.
    RumbleStart { voices: [Voice; 2] },
    /// Engine rumble ended (thrust released or auto-stop timer).
    RumbleStop,
    /// A keyboard note began.
    NoteStart { frequency: f64, voices: [Voice; 2] },
    /// A keyboard note ended.
    NoteStop { frequency: f64 },
}

/// Gameplay events reported in the frame snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FlightEvent {
    /// The ship entered a planet footprint and was reset to the spawn pose.
    ShipDestroyed {
        /// Where the ship was when it died.
        at: Position,
        /// The planet that killed it.
        planet: Position,
    },
    /// The ship crossed the looping boundary.
    Wrapped { from: Position, to: Position },
}
