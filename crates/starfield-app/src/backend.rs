//! Graphics backend seam.
//!
//! The engine only produces render commands. A backend owns the GPU side:
//! it receives the shared vertex buffers once, then one command list per
//! frame. `RecordingBackend` is the headless implementation used by the CLI
//! and the tests.

use log::debug;

use starfield_core::state::RenderCommand;
use starfield_sim::geometry::MeshBuffers;

/// Backend failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("frame submitted before geometry was uploaded")]
    GeometryNotUploaded,

    #[error("draw of {first}..{end} exceeds the {uploaded} uploaded vertices")]
    RangeOutOfBounds { first: u32, end: u32, uploaded: u32 },

    #[error("position and normal buffers differ in length ({positions} vs {normals})")]
    MismatchedBuffers { positions: usize, normals: usize },

    #[error("backend lost: {0}")]
    Lost(String),
}

/// Something that can draw frames.
pub trait GraphicsBackend {
    /// Upload the shared vertex and normal buffers. Called once before the
    /// first frame.
    fn upload_geometry(&mut self, mesh: &MeshBuffers) -> Result<(), BackendError>;

    /// Execute one frame's commands in order.
    fn submit(&mut self, commands: &[RenderCommand]) -> Result<(), BackendError>;
}

/// Backend that validates and records what it is given.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    uploaded_vertices: Option<u32>,
    frames: u64,
    draws: u64,
    last_frame: Vec<RenderCommand>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices uploaded, if geometry has been uploaded.
    pub fn uploaded_vertices(&self) -> Option<u32> {
        self.uploaded_vertices
    }

    /// Frames submitted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw calls submitted so far, across all frames.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Commands of the most recent frame.
    pub fn last_frame(&self) -> &[RenderCommand] {
        &self.last_frame
    }
}

impl GraphicsBackend for RecordingBackend {
    fn upload_geometry(&mut self, mesh: &MeshBuffers) -> Result<(), BackendError> {
        if mesh.positions.len() != mesh.normals.len() {
            return Err(BackendError::MismatchedBuffers {
                positions: mesh.positions.len(),
                normals: mesh.normals.len(),
            });
        }
        self.uploaded_vertices = Some(mesh.positions.len() as u32);
        debug!("Uploaded {} vertices", mesh.positions.len());
        Ok(())
    }

    fn submit(&mut self, commands: &[RenderCommand]) -> Result<(), BackendError> {
        let uploaded = self
            .uploaded_vertices
            .ok_or(BackendError::GeometryNotUploaded)?;

        let mut draws = 0;
        for command in commands {
            if let RenderCommand::Draw(call) = command {
                let end = call.range.first + call.range.count;
                if end > uploaded {
                    return Err(BackendError::RangeOutOfBounds {
                        first: call.range.first,
                        end,
                        uploaded,
                    });
                }
                draws += 1;
            }
        }

        self.frames += 1;
        self.draws += draws;
        self.last_frame = commands.to_vec();
        Ok(())
    }
}
