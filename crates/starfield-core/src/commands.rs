//! Commands sent from the host to the simulation.
//!
//! Commands are queued and applied at the next frame boundary, so the last
//! write before a frame is the one that frame sees.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::enums::OscillatorType;

/// All host-originated inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FlightCommand {
    // --- Keyboard ---
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },

    // --- Touch ---
    /// The X coordinates of every active touch (empty when all fingers lift).
    Touch { touch_xs: Vec<f64> },

    // --- Control panel ---
    SetParameter { parameter: Parameter },

    // --- Piano keyboard ---
    NoteOn { frequency: f64 },
    NoteOff { frequency: f64 },
}

/// One externally settable field, as edited by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "camelCase")]
pub enum Parameter {
    AnimateSpeed(f64),
    X(f64),
    Y(f64),
    Z(f64),
    /// Ship heading in radians.
    R(f64),
    VelX(f64),
    VelY(f64),
    LightX(f64),
    LightY(f64),
    LightZ(f64),
    CameraDistance(f64),
    Fov(f64),
    ZNear(f64),
    ZFar(f64),
    OscillatorType1(OscillatorType),
    OscillatorType2(OscillatorType),
    OscillatorDetune1(f64),
    OscillatorDetune2(f64),
}

/// Slider range the control panel offers for a numeric parameter.
///
/// These are soft limits for the panel only; the simulation accepts any value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

const fn range(name: &'static str, min: f64, max: f64) -> PanelRange {
    PanelRange { name, min, max }
}

/// Ranges for every numeric parameter, in panel order.
pub const PANEL_RANGES: [PanelRange; 16] = [
    range("animateSpeed", 0.0, 1.0),
    range("x", -500.0, 500.0),
    range("y", -2000.0, 2000.0),
    range("z", -500.0, 500.0),
    range("r", 0.0, PI * 2.0),
    range("velX", 0.0, 20.0),
    range("velY", 0.0, 20.0),
    range("lightX", 0.0, 1.0),
    range("lightY", 0.0, 1.0),
    range("lightZ", 0.0, 1.0),
    range("cameraDistance", 0.0, 2000.0),
    range("fov", 0.0, PI),
    range("zNear", 1.0, 1000.0),
    range("zFar", 0.0, 5000.0),
    range("oscillatorDetune1", -100.0, 100.0),
    range("oscillatorDetune2", -100.0, 100.0),
];

impl Parameter {
    /// Panel name of this parameter.
    pub fn name(&self) -> &'static str {
        match self {
            Parameter::AnimateSpeed(_) => "animateSpeed",
            Parameter::X(_) => "x",
            Parameter::Y(_) => "y",
            Parameter::Z(_) => "z",
            Parameter::R(_) => "r",
            Parameter::VelX(_) => "velX",
            Parameter::VelY(_) => "velY",
            Parameter::LightX(_) => "lightX",
            Parameter::LightY(_) => "lightY",
            Parameter::LightZ(_) => "lightZ",
            Parameter::CameraDistance(_) => "cameraDistance",
            Parameter::Fov(_) => "fov",
            Parameter::ZNear(_) => "zNear",
            Parameter::ZFar(_) => "zFar",
            Parameter::OscillatorType1(_) => "oscillatorType1",
            Parameter::OscillatorType2(_) => "oscillatorType2",
            Parameter::OscillatorDetune1(_) => "oscillatorDetune1",
            Parameter::OscillatorDetune2(_) => "oscillatorDetune2",
        }
    }

    /// Slider range, or `None` for the oscillator type selectors.
    pub fn panel_range(&self) -> Option<PanelRange> {
        let name = self.name();
        PANEL_RANGES.iter().copied().find(|r| r.name == name)
    }
}
