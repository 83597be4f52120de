//! Frame snapshot: everything the host needs to present one frame.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, FlightMode};
use crate::events::{AudioEvent, FlightEvent};
use crate::math::Mat4;
use crate::types::{FrameTime, InputLatch, Pose};

/// Output of one engine frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: FrameTime,
    pub mode: FlightMode,
    pub ship: Pose,
    /// Input the frame was simulated with.
    pub input: InputLatch,
    pub fps: f64,
    /// Deaths since the engine started.
    pub deaths: u32,
    /// Ordered graphics submissions for this frame.
    pub commands: Vec<RenderCommand>,
    pub audio_events: Vec<AudioEvent>,
    pub events: Vec<FlightEvent>,
}

/// One graphics submission, in the order it must be issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderCommand {
    /// Clear color and depth buffers.
    Clear,
    /// Upload the (normalized) reverse light direction uniform.
    SetLightDirection { direction: [f64; 3] },
    /// Upload per-entity uniforms and draw its vertex range.
    Draw(DrawCall),
}

/// Per-entity uniforms plus a triangle-list draw over the shared vertex buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCall {
    pub kind: EntityKind,
    /// Entity → view → rotation → projection.
    pub world_view_projection: Mat4,
    /// Translation-only world matrix, used for lighting.
    pub world: Mat4,
    pub color: [f32; 4],
    pub range: VertexRange,
}

/// A contiguous run of vertices in the shared buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexRange {
    pub first: u32,
    pub count: u32,
}

impl FrameSnapshot {
    /// Draw calls in submission order.
    pub fn draw_calls(&self) -> impl Iterator<Item = &DrawCall> {
        self.commands.iter().filter_map(|c| match c {
            RenderCommand::Draw(call) => Some(call),
            _ => None,
        })
    }

    /// Number of draws of the given kind this frame.
    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.draw_calls().filter(|c| c.kind == kind).count()
    }
}
