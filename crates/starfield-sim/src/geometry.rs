//! Mesh geometry for every drawable kind.
//!
//! All meshes share one vertex buffer. Each kind owns a contiguous segment of
//! it; the [`MeshTable`] maps a kind to its segment and is built once from the
//! segment lengths, in buffer order.

use std::collections::HashMap;

use glam::DVec3;
use serde::Serialize;

use starfield_core::enums::{EntityKind, FlightMode};
use starfield_core::state::VertexRange;

use crate::error::RenderError;

// --- Ship ---

const MIDDLE_HEIGHT: f64 = 40.0;
const WING_SPAN: f64 = 10.0;
const TIP_LENGTH: f64 = -15.0;
const TOP_RIDGE_LENGTH: f64 = 5.0;
const WING_LENGTH: f64 = TOP_RIDGE_LENGTH + 10.0;
const REAR_RIDGE_LENGTH: f64 = 5.0;

// --- Thrust plume ---

const THRUST_START: f64 = TOP_RIDGE_LENGTH * 1.1;
const THRUST_END: f64 = 30.0;
const THRUST_WIDTH: f64 = WING_SPAN * 0.6;
const THRUST_Z: f64 = 5.0;

// --- Scenery ---

/// Half the edge length of the planet cube.
pub const PLANET_HALF_WIDTH: f64 = 100.0;
const STAR_LONG: f64 = 20.0;
const STAR_SHORT: f64 = 10.0;
/// Stars sit far behind the flight plane.
pub const STAR_DEPTH: f64 = -2000.0;

const MARKER_SIZE: f64 = 5.0;

/// Corner signs of the planet cube, three per triangle.
const CUBE_CORNERS: [[i8; 3]; 36] = [
    [-1, -1, -1], [-1, -1, 1], [-1, 1, 1],
    [1, 1, -1], [-1, -1, -1], [-1, 1, -1],
    [1, -1, 1], [-1, -1, -1], [1, -1, -1],
    [1, 1, -1], [1, -1, -1], [-1, -1, -1],
    [-1, -1, -1], [-1, 1, 1], [-1, 1, -1],
    [1, -1, 1], [-1, -1, 1], [-1, -1, -1],
    [-1, 1, 1], [-1, -1, 1], [1, -1, 1],
    [1, 1, 1], [1, -1, -1], [1, 1, -1],
    [1, -1, -1], [1, 1, 1], [1, -1, 1],
    [1, 1, 1], [1, 1, -1], [-1, 1, -1],
    [1, 1, 1], [-1, 1, -1], [-1, 1, 1],
    [1, 1, 1], [-1, 1, 1], [1, -1, 1],
];

/// Ship: a double pyramid, four front faces and four rear faces.
pub fn ship_vertices() -> Vec<[f64; 3]> {
    let tip = [0.0, TIP_LENGTH, 0.0];
    let rear_tip = [0.0, TOP_RIDGE_LENGTH + REAR_RIDGE_LENGTH, 0.0];
    let top = [0.0, TOP_RIDGE_LENGTH, -MIDDLE_HEIGHT];
    let bottom = [0.0, TOP_RIDGE_LENGTH, MIDDLE_HEIGHT];
    let right = [WING_SPAN, WING_LENGTH, 0.0];
    let left = [-WING_SPAN, WING_LENGTH, 0.0];

    vec![
        tip, top, right, //
        tip, left, top, //
        tip, right, bottom, //
        tip, bottom, left, //
        top, rear_tip, right, //
        top, left, rear_tip, //
        rear_tip, bottom, right, //
        bottom, rear_tip, left,
    ]
}

pub fn planet_vertices() -> Vec<[f64; 3]> {
    CUBE_CORNERS
        .iter()
        .map(|c| {
            [
                c[0] as f64 * PLANET_HALF_WIDTH,
                c[1] as f64 * PLANET_HALF_WIDTH,
                c[2] as f64 * PLANET_HALF_WIDTH,
            ]
        })
        .collect()
}

/// Star: two overlapping triangles forming a six-point star.
pub fn star_vertices() -> Vec<[f64; 3]> {
    vec![
        [0.0, STAR_LONG, STAR_DEPTH],
        [-STAR_LONG, -STAR_SHORT, STAR_DEPTH],
        [STAR_LONG, -STAR_SHORT, STAR_DEPTH],
        [0.0, -STAR_LONG, STAR_DEPTH],
        [STAR_LONG, STAR_SHORT, STAR_DEPTH],
        [-STAR_LONG, STAR_SHORT, STAR_DEPTH],
    ]
}

pub fn thrust_vertices() -> Vec<[f64; 3]> {
    vec![
        [0.0, THRUST_END, THRUST_Z],
        [-THRUST_WIDTH, THRUST_START, THRUST_Z],
        [THRUST_WIDTH, THRUST_START, THRUST_Z],
    ]
}

pub fn marker_vertices() -> Vec<[f64; 3]> {
    vec![
        [0.0, -MARKER_SIZE, 0.0],
        [MARKER_SIZE, MARKER_SIZE, 0.0],
        [-MARKER_SIZE, MARKER_SIZE, 0.0],
    ]
}

/// Segments in buffer order for a flight mode.
///
/// Looping mode carries only the ship and the scenery.
pub fn segments_for(mode: FlightMode) -> Vec<(EntityKind, Vec<[f64; 3]>)> {
    let mut segments = vec![
        (EntityKind::Ship, ship_vertices()),
        (EntityKind::Planet, planet_vertices()),
        (EntityKind::Star, star_vertices()),
    ];
    if mode == FlightMode::OpenWorld {
        segments.push((EntityKind::ThrustPlume, thrust_vertices()));
        segments.push((EntityKind::Marker, marker_vertices()));
    }
    segments
}

/// One flat normal per vertex: every vertex of a triangle gets the face normal.
///
/// A degenerate triangle gets a zero normal. Trailing vertices that do not
/// complete a triangle are dropped.
pub fn flat_normals(positions: &[[f64; 3]]) -> Vec<[f64; 3]> {
    let mut normals = Vec::with_capacity(positions.len());
    for tri in positions.chunks_exact(3) {
        let a = DVec3::from_array(tri[0]);
        let b = DVec3::from_array(tri[1]);
        let c = DVec3::from_array(tri[2]);
        let n = (b - a).cross(c - a).normalize_or_zero().to_array();
        normals.extend_from_slice(&[n, n, n]);
    }
    normals
}

/// Vertex and normal data for upload, single precision.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
}

/// Kind → vertex range lookup.
#[derive(Debug, Clone, Default)]
pub struct MeshTable {
    ranges: HashMap<EntityKind, VertexRange>,
    vertex_count: u32,
}

/// Buffers plus the table describing them.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub buffers: MeshBuffers,
    pub table: MeshTable,
}

impl MeshTable {
    /// Lay segments out back to back, starting at vertex 0.
    pub fn from_segments(segments: &[(EntityKind, u32)]) -> Self {
        let mut table = Self::default();
        for &(kind, count) in segments {
            table.ranges.insert(
                kind,
                VertexRange {
                    first: table.vertex_count,
                    count,
                },
            );
            table.vertex_count += count;
        }
        table
    }

    /// Range for a kind, or an error if this table has no segment for it.
    pub fn range(&self, kind: EntityKind) -> Result<VertexRange, RenderError> {
        self.ranges
            .get(&kind)
            .copied()
            .ok_or(RenderError::UnmappedKind(kind))
    }

    pub fn contains(&self, kind: EntityKind) -> bool {
        self.ranges.contains_key(&kind)
    }

    /// Total vertices across all segments.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

impl Mesh {
    /// Build the shared buffers and table for a flight mode.
    pub fn for_mode(mode: FlightMode) -> Self {
        let segments = segments_for(mode);

        let lengths: Vec<(EntityKind, u32)> = segments
            .iter()
            .map(|(kind, verts)| (*kind, verts.len() as u32))
            .collect();
        let table = MeshTable::from_segments(&lengths);

        let positions: Vec<[f64; 3]> = segments.into_iter().flat_map(|(_, v)| v).collect();
        let normals = flat_normals(&positions);

        Self {
            buffers: MeshBuffers {
                positions: positions.iter().map(|p| to_f32(*p)).collect(),
                normals: normals.iter().map(|n| to_f32(*n)).collect(),
            },
            table,
        }
    }
}

fn to_f32(v: [f64; 3]) -> [f32; 3] {
    [v[0] as f32, v[1] as f32, v[2] as f32]
}
