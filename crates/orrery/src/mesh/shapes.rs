//! # Shapes — Parametric Primitives
//!
//! Planes, spheres and tori for the gravity scene: spheres for bodies, tori
//! for orbit rings, planes for the reference grid. Each is a position
//! function handed to a [`SurfaceGrid`].
//!
//! | Shape  | Surface                                              | Facing  |
//! |--------|------------------------------------------------------|---------|
//! | plane  | `(w·(u − ½), 0, d·(½ − v))`                          | UCrossV |
//! | sphere | `r·(sin πv cos 2πu, cos πv, sin πv sin 2πu)`         | UCrossV |
//! | torus  | `((R + r cos 2πv) cos 2πu, (R + r cos 2πv) sin 2πu, r sin 2πv)` | UCrossV |
//!
//! The sphere uses equirectangular UVs (longitude → U, latitude → V), which
//! squeezes texels at the poles. The pole rows are degenerate rings of
//! coincident vertices; their normals are still exact because the sphere
//! supplies them analytically.

use std::f32::consts::{PI, TAU};

use crate::error::ShapeError;
use crate::math::Vec3;

use super::parametric::{Surface, SurfaceGrid};
use super::{Mesh, check_length};

struct Plane {
    width: f32,
    depth: f32,
}

impl Surface for Plane {
    fn position(&self, u: f32, v: f32) -> Vec3 {
        Vec3::new(self.width * (u - 0.5), 0.0, self.depth * (0.5 - v))
    }

    fn normal(&self, _u: f32, _v: f32) -> Option<Vec3> {
        Some(Vec3::Y)
    }
}

struct Sphere {
    radius: f32,
}

impl Sphere {
    fn direction(u: f32, v: f32) -> Vec3 {
        let (sin_t, cos_t) = (u * TAU).sin_cos();
        let (sin_p, cos_p) = (v * PI).sin_cos();
        Vec3::new(sin_p * cos_t, cos_p, sin_p * sin_t)
    }
}

impl Surface for Sphere {
    fn position(&self, u: f32, v: f32) -> Vec3 {
        Self::direction(u, v) * self.radius
    }

    fn normal(&self, u: f32, v: f32) -> Option<Vec3> {
        Some(Self::direction(u, v))
    }
}

/// A plane on XZ facing +Y, centered at the origin.
pub fn plane(width: f32, depth: f32, width_divisions: u32, depth_divisions: u32) -> Result<Mesh, ShapeError> {
    check_length("width", width)?;
    check_length("depth", depth)?;
    SurfaceGrid::new(width_divisions, depth_divisions).build(&Plane { width, depth })
}

/// A UV sphere centered at the origin.
///
/// `segments` divide the longitude, `rings` the latitude.
pub fn sphere(radius: f32, segments: u32, rings: u32) -> Result<Mesh, ShapeError> {
    check_length("radius", radius)?;
    if segments < 3 {
        return Err(ShapeError::TooFewRadialDivisions(segments));
    }
    if rings < 2 {
        return Err(ShapeError::TooFewHeightDivisions(rings));
    }
    let mesh = SurfaceGrid::new(segments, rings).build(&Sphere { radius })?;
    log::debug!("generated sphere r={radius}: {} vertices", mesh.vertex_count());
    Ok(mesh)
}

/// A torus around the Z axis, ring in the XY plane.
///
/// `major_radius` is the distance from the center to the middle of the tube,
/// `minor_radius` the tube's own radius. Normals are estimated from the
/// surface function.
pub fn torus(
    major_radius: f32,
    minor_radius: f32,
    radial_divisions: u32,
    tubular_divisions: u32,
) -> Result<Mesh, ShapeError> {
    check_length("major_radius", major_radius)?;
    check_length("minor_radius", minor_radius)?;
    if radial_divisions < 3 {
        return Err(ShapeError::TooFewRadialDivisions(radial_divisions));
    }
    if tubular_divisions < 3 {
        return Err(ShapeError::TooFewSides(tubular_divisions));
    }

    let surface = |u: f32, v: f32| {
        let (sin_u, cos_u) = (u * TAU).sin_cos();
        let (sin_v, cos_v) = (v * TAU).sin_cos();
        let ring = major_radius + minor_radius * cos_v;
        Vec3::new(ring * cos_u, ring * sin_u, minor_radius * sin_v)
    };
    SurfaceGrid::new(radial_divisions, tubular_divisions).build(&surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn plane_faces_up_and_spans_its_size() {
        let mesh = plane(4.0, 2.0, 4, 2).unwrap();
        assert_eq!(mesh.vertex_count(), 5 * 3);
        let (lo, hi) = mesh.bounds().unwrap();
        assert!(lo.abs_diff_eq(Vec3::new(-2.0, 0.0, -1.0), 1e-6));
        assert!(hi.abs_diff_eq(Vec3::new(2.0, 0.0, 1.0), 1e-6));
        for [a, b, c] in mesh.triangles() {
            let p = |i: u32| Vec3::from(mesh.vertices[i as usize].position);
            assert!((p(b) - p(a)).cross(p(c) - p(a)).y > 0.0);
        }
    }

    #[test]
    fn sphere_counts_match_grid() {
        let mesh = sphere(0.5, 32, 16).unwrap();
        assert_eq!(mesh.vertex_count(), 17 * 33);
        assert_eq!(mesh.indices.len(), 16 * 32 * 6);
    }

    #[test]
    fn sphere_vertices_on_surface_with_radial_normals() {
        let mesh = sphere(2.0, 12, 6).unwrap();
        for v in &mesh.vertices {
            let p = Vec3::from(v.position);
            assert_abs_diff_eq!(p.length(), 2.0, epsilon = 1e-5);
            assert!(Vec3::from(v.normal).abs_diff_eq(p / 2.0, 1e-5));
        }
    }

    #[test]
    fn sphere_is_closed_apart_from_pole_slivers() {
        let report = sphere(1.0, 8, 4).unwrap().edge_report();
        assert_eq!(report.degenerate_triangles, 2 * 8);
        assert!(report.is_watertight(), "{report:?}");
    }

    #[test]
    fn torus_is_watertight_with_outward_normals() {
        let (major, minor) = (1.0, 0.25);
        let mesh = torus(major, minor, 16, 8).unwrap();
        assert!(mesh.edge_report().is_watertight());
        for v in &mesh.vertices {
            let p = Vec3::from(v.position);
            let tube_center = Vec3::new(p.x, p.y, 0.0).normalize() * major;
            let outward = (p - tube_center).normalize();
            assert!(Vec3::from(v.normal).dot(outward) > 0.99);
        }
    }

    #[test]
    fn bad_resolutions_are_rejected() {
        assert_eq!(sphere(1.0, 2, 4).unwrap_err(), ShapeError::TooFewRadialDivisions(2));
        assert_eq!(sphere(1.0, 8, 1).unwrap_err(), ShapeError::TooFewHeightDivisions(1));
        assert_eq!(torus(1.0, 0.2, 8, 2).unwrap_err(), ShapeError::TooFewSides(2));
        assert!(plane(1.0, 1.0, 0, 1).is_err());
    }
}
