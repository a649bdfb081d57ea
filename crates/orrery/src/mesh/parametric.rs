//! # Parametric Surfaces — Sampling (u, v) Onto a Grid
//!
//! A parametric surface is a function from the unit square to 3D space.
//! [`SurfaceGrid`] samples it on a regular `(u_divisions + 1) ×
//! (v_divisions + 1)` lattice and splits every lattice cell into two
//! triangles:
//!
//! ```text
//!   v
//!   ▲   i3 ─── i2
//!   │   │    ╱ │      UCrossV: (i0, i1, i2) (i0, i2, i3)
//!   │   │  ╱   │      VCrossU: (i0, i2, i1) (i0, i3, i2)
//!   │   i0 ─── i1
//!   └──────────────► u
//! ```
//!
//! Row `v_index` holds the samples for one value of `v`, so vertex
//! `v_index * (u_divisions + 1) + u_index` sits at `(u, v)`. Both edge
//! columns `u = 0` and `u = 1` are emitted even when they coincide in space
//! (a closed sweep): the duplicated seam keeps texture coordinates
//! continuous and avoids a wrap-around special case in the index loop.
//!
//! ## Normals
//!
//! A [`Surface`] may supply an analytic normal. Otherwise the grid estimates
//! one from central differences of the position function, with a step of 1%
//! of a cell. Where the surface pinches to a point (a cone apex, a pole) the
//! estimate degenerates; the position direction is used instead, then +Y.
//!
//! ## Facing
//!
//! Which side of the surface is the front depends on how the function is
//! parameterized. [`Facing`] picks whether `∂p/∂u × ∂p/∂v` or its negation is
//! the outward direction; triangles are wound CCW around that direction.

use crate::error::ShapeError;
use crate::math::Vec3;

use super::{Mesh, MeshVertex, PALETTE, reserve};

/// A position function over `(u, v) ∈ [0, 1]²`.
///
/// Any `Fn(f32, f32) -> Vec3` closure is a surface with estimated normals.
pub trait Surface {
    fn position(&self, u: f32, v: f32) -> Vec3;

    /// Outward unit normal, if known in closed form.
    fn normal(&self, _u: f32, _v: f32) -> Option<Vec3> {
        None
    }
}

impl<F> Surface for F
where
    F: Fn(f32, f32) -> Vec3,
{
    fn position(&self, u: f32, v: f32) -> Vec3 {
        self(u, v)
    }
}

/// Which tangent cross product points out of the front face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    UCrossV,
    VCrossU,
}

/// Sampling resolution and orientation for a parametric surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceGrid {
    pub u_divisions: u32,
    pub v_divisions: u32,
    pub facing: Facing,
}

impl SurfaceGrid {
    pub fn new(u_divisions: u32, v_divisions: u32) -> Self {
        Self {
            u_divisions,
            v_divisions,
            facing: Facing::default(),
        }
    }

    pub fn facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    /// Number of vertices [`build`](Self::build) emits. Saturates at
    /// `usize::MAX`.
    pub fn vertex_count(&self) -> usize {
        (self.u_divisions as usize + 1).saturating_mul(self.v_divisions as usize + 1)
    }

    /// Number of triangles [`build`](Self::build) emits. Saturates at
    /// `usize::MAX`.
    pub fn triangle_count(&self) -> usize {
        (self.u_divisions as usize)
            .saturating_mul(self.v_divisions as usize)
            .saturating_mul(2)
    }

    /// Sample `surface` and triangulate the grid.
    pub fn build<S: Surface + ?Sized>(&self, surface: &S) -> Result<Mesh, ShapeError> {
        let (nu, nv) = (self.u_divisions, self.v_divisions);
        if nu == 0 || nv == 0 {
            return Err(ShapeError::EmptyGrid { u: nu, v: nv });
        }

        // Every index below stays in u32 once the vertex count does.
        let (mut vertices, mut indices) = reserve(self.vertex_count(), self.triangle_count().saturating_mul(3))?;

        for vi in 0..=nv {
            let v = vi as f32 / nv as f32;
            for ui in 0..=nu {
                let u = ui as f32 / nu as f32;
                let position = surface.position(u, v);
                let normal = surface
                    .normal(u, v)
                    .unwrap_or_else(|| self.estimate_normal(surface, u, v, position));
                vertices.push(MeshVertex {
                    position: position.to_array(),
                    color: PALETTE[(ui + vi) as usize % PALETTE.len()],
                    normal: normal.to_array(),
                    uv: [u, v],
                });
            }
        }

        let row = nu + 1;
        for vi in 0..nv {
            for ui in 0..nu {
                let i0 = vi * row + ui;
                let i1 = i0 + 1;
                let i3 = i0 + row;
                let i2 = i3 + 1;
                match self.facing {
                    Facing::UCrossV => indices.extend_from_slice(&[i0, i1, i2, i0, i2, i3]),
                    Facing::VCrossU => indices.extend_from_slice(&[i0, i2, i1, i0, i3, i2]),
                }
            }
        }

        Ok(Mesh::from_parts(vertices, indices)?)
    }

    fn estimate_normal<S: Surface + ?Sized>(&self, surface: &S, u: f32, v: f32, position: Vec3) -> Vec3 {
        let du = 0.01 / self.u_divisions as f32;
        let dv = 0.01 / self.v_divisions as f32;
        let tu = (surface.position(u + du, v) - surface.position(u - du, v)) / (2.0 * du);
        let tv = (surface.position(u, v + dv) - surface.position(u, v - dv)) / (2.0 * dv);
        let n = match self.facing {
            Facing::UCrossV => tu.cross(tv),
            Facing::VCrossU => tv.cross(tu),
        };
        n.try_normalize()
            .or_else(|| position.try_normalize())
            .unwrap_or(Vec3::Y)
    }
}
