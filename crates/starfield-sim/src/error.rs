//! Error types for scene setup and rendering.

use starfield_core::enums::EntityKind;

/// Scenery generation failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error(
        "placed {placed} of {requested} planets before hitting {rejected} rejected candidates; \
         the clearance square probably covers the scatter region"
    )]
    PlacementExhausted {
        requested: usize,
        placed: usize,
        rejected: usize,
    },
}

/// Render step failures.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    #[error("no vertex range mapped for entity kind {0:?}")]
    UnmappedKind(EntityKind),
}

/// Anything the engine can fail with.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("scene setup failed: {0}")]
    Setup(#[from] SetupError),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}
