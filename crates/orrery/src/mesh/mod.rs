//! # Mesh — CPU-Side Triangle Meshes
//!
//! A [`Mesh`] is a vertex list plus an index list read three at a time as
//! triangles. Every generator in this module returns one, ready to upload with
//! [`GpuMesh`](crate::render::GpuMesh).
//!
//! ## Building Blocks
//!
//! ```text
//!   Surface (closure or value)         polygon(sides, r)
//!            │                                │
//!            ▼                                ▼
//!   SurfaceGrid::build ──► lateral mesh   cap mesh (local XY, +Z)
//!                               │             │
//!                               │   rotate ±90° about X, translate
//!                               ▼             ▼
//!                        Mesh::append_transformed (indices shifted)
//!                               │
//!                               ▼
//!                           final Mesh
//! ```
//!
//! ## Winding Order
//!
//! All triangles wind counter-clockwise when viewed from the side their
//! normals point to, matching wgpu's `FrontFace::Ccw` so that back-face
//! culling removes the far side of closed shapes.

pub mod cylinder;
pub mod desc;
pub mod parametric;
pub mod polygon;
pub mod polyhedron;
pub mod shapes;
pub mod topology;
mod vertex;

pub use cylinder::{CylinderParams, cone, cylinder, cylindrical};
pub use desc::ShapeDesc;
pub use parametric::{Facing, Surface, SurfaceGrid};
pub use polygon::polygon;
pub use polyhedron::{PolyhedronKind, polyhedron};
pub use shapes::{plane, sphere, torus};
pub use topology::EdgeReport;
pub use vertex::MeshVertex;

use crate::error::{MeshError, ShapeError};
use crate::math::{Transform, Vec3};

/// Default vertex colors. Neighbouring grid cells get different entries so
/// the facets are visible when the lit program runs in vertex-color mode.
pub const PALETTE: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0],
];

/// Reject lengths that are negative, NaN, or infinite.
pub(crate) fn check_length(name: &'static str, value: f32) -> Result<(), ShapeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ShapeError::InvalidDimension { name, value })
    }
}

/// Reserve room for a generated mesh, failing with an error rather than
/// aborting when the counts are out of range or the memory is unavailable.
pub(crate) fn reserve(vertices: usize, indices: usize) -> Result<(Vec<MeshVertex>, Vec<u32>), ShapeError> {
    if u32::try_from(vertices).is_err() {
        return Err(MeshError::TooManyVertices(vertices).into());
    }
    let mut vertex_buf = Vec::new();
    let mut index_buf = Vec::new();
    vertex_buf
        .try_reserve_exact(vertices)
        .and_then(|()| index_buf.try_reserve_exact(indices))
        .map_err(|_| ShapeError::AllocationFailed { vertices })?;
    Ok((vertex_buf, index_buf))
}

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from raw parts, rejecting malformed index data.
    pub fn from_parts(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Result<Self, MeshError> {
        let mesh = Self { vertices, indices };
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Check that indices form whole triangles and stay in range.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(self.indices.len()));
        }
        if u32::try_from(self.vertices.len()).is_err() {
            return Err(MeshError::TooManyVertices(self.vertices.len()));
        }
        let vertex_count = self.vertices.len();
        for (triangle, tri) in self.triangles().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Concatenate `other` onto this mesh without moving it.
    pub fn append(&mut self, other: &Mesh) -> Result<(), MeshError> {
        self.append_transformed(other, &Transform::IDENTITY)
    }

    /// Concatenate `other` onto this mesh after applying `transform` to it.
    ///
    /// Positions go through the full matrix, normals through its
    /// inverse-transpose. `other`'s indices are shifted by this mesh's vertex
    /// count; existing vertices and indices are left untouched.
    pub fn append_transformed(&mut self, other: &Mesh, transform: &Transform) -> Result<(), MeshError> {
        let total = self.vertices.len() + other.vertices.len();
        let base = u32::try_from(self.vertices.len())
            .ok()
            .filter(|_| u32::try_from(total).is_ok())
            .ok_or(MeshError::TooManyVertices(total))?;

        let mut placed = other.clone();
        placed.transform(transform);

        self.vertices.extend_from_slice(&placed.vertices);
        self.indices.extend(placed.indices.iter().map(|&i| i + base));
        Ok(())
    }

    /// Apply a transform to every vertex in place.
    pub fn transform(&mut self, transform: &Transform) {
        if *transform == Transform::IDENTITY {
            return;
        }
        let matrix = transform.matrix();
        let normal_matrix = transform.normal_matrix();
        if normal_matrix.is_none() {
            log::warn!("singular transform {transform:?}: normals left unchanged");
        }
        for v in &mut self.vertices {
            v.position = matrix.transform_point3(Vec3::from(v.position)).to_array();
            if let Some(n) = normal_matrix {
                let normal = (n * Vec3::from(v.normal)).normalize_or(Vec3::from(v.normal));
                v.normal = normal.to_array();
            }
        }
    }

    /// Set every vertex color.
    pub fn paint(&mut self, color: [f32; 3]) {
        for v in &mut self.vertices {
            v.color = color;
        }
    }

    /// Reverse every triangle and negate every normal.
    pub fn flip_winding(&mut self) {
        for tri in self.indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
        for v in &mut self.vertices {
            v.normal = (-Vec3::from(v.normal)).to_array();
        }
    }

    /// Axis-aligned bounds as `(min, max)`. `None` for a mesh with no vertices.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from(v.position));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Edge usage statistics over position-welded vertices.
    pub fn edge_report(&self) -> EdgeReport {
        EdgeReport::new(self)
    }
}
