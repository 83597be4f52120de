//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// What an entity is. Decides its mesh segment and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Planet,
    Star,
    /// Exhaust drawn behind the ship while thrusting.
    ThrustPlume,
    Marker,
}

/// Which flight model runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightMode {
    /// Unbounded field with planet gravity and death on contact.
    #[default]
    OpenWorld,
    /// No gravity; the ship wraps around a fixed rectangle.
    Looping,
}

/// Oscillator waveform for the external synthesizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OscillatorType {
    #[default]
    Sawtooth,
    Triangle,
    Sine,
    Square,
}

impl EntityKind {
    /// Flat color for this kind. Stars are recolored on every draw, so theirs
    /// is only the fallback.
    pub fn base_color(self) -> [f32; 4] {
        match self {
            EntityKind::Ship => [0.7, 0.2, 0.2, 1.0],
            EntityKind::ThrustPlume => [1.0, 0.5, 0.0, 0.8],
            EntityKind::Planet => [0.2, 0.7, 0.2, 1.0],
            EntityKind::Marker => [1.0, 1.0, 1.0, 1.0],
            EntityKind::Star => [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl std::str::FromStr for FlightMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open_world" | "open-world" | "open" => Ok(FlightMode::OpenWorld),
            "looping" | "loop" => Ok(FlightMode::Looping),
            other => Err(format!("unknown flight mode: {other}")),
        }
    }
}
