//! Flat regular polygons, the building block for end caps.

use std::f32::consts::TAU;

use crate::error::ShapeError;

use super::{Mesh, MeshVertex, PALETTE, check_length, reserve};

/// A regular `sides`-gon of circumradius `radius` in the XY plane, facing +Z.
///
/// Rim vertex `i` sits at angle `i / sides × 2π`. The polygon is triangulated
/// as a fan anchored on rim vertex 0, so it has `sides` vertices and
/// `sides - 2` triangles, and its rim edges are exactly the polygon's sides.
/// UVs map the circumscribed circle onto the unit square.
pub fn polygon(sides: u32, radius: f32) -> Result<Mesh, ShapeError> {
    if sides < 3 {
        return Err(ShapeError::TooFewSides(sides));
    }
    check_length("radius", radius)?;

    let (mut vertices, mut indices) = reserve(sides as usize, (sides as usize - 2) * 3)?;
    vertices.extend((0..sides).map(|i| {
        let (sin, cos) = (i as f32 / sides as f32 * TAU).sin_cos();
        MeshVertex {
            position: [radius * cos, radius * sin, 0.0],
            // Alternate red and blue around the rim.
            color: PALETTE[(i % 2 * 2) as usize],
            normal: [0.0, 0.0, 1.0],
            uv: [0.5 + cos * 0.5, 0.5 + sin * 0.5],
        }
    }));
    indices.extend((1..sides - 1).flat_map(|i| [0, i, i + 1]));

    Ok(Mesh::from_parts(vertices, indices)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fan_counts() {
        let mesh = polygon(6, 1.0).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn rim_lies_on_circle() {
        let mesh = polygon(7, 2.5).unwrap();
        for v in &mesh.vertices {
            let r = Vec3::from(v.position).truncate().length();
            assert_abs_diff_eq!(r, 2.5, epsilon = 1e-5);
            assert_eq!(v.position[2], 0.0);
        }
    }

    #[test]
    fn triangles_face_plus_z() {
        let mesh = polygon(5, 1.0).unwrap();
        for [a, b, c] in mesh.triangles() {
            let p = |i: u32| Vec3::from(mesh.vertices[i as usize].position);
            let n = (p(b) - p(a)).cross(p(c) - p(a));
            assert!(n.z > 0.0);
        }
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(polygon(2, 1.0).unwrap_err(), ShapeError::TooFewSides(2));
        assert!(matches!(
            polygon(4, -1.0),
            Err(ShapeError::InvalidDimension { name: "radius", .. })
        ));
    }
}
