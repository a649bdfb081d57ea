//! # Polyhedra — Platonic Solids on a Sphere
//!
//! The five Platonic solids, scaled so every corner lies on a sphere of the
//! requested radius. Each polygonal face is fanned into triangles; with
//! `subdivisions > 0` every triangle is split into four, the new edge
//! midpoints pushed back out to the sphere. Three levels on an icosahedron
//! give a geodesic sphere without the UV sphere's pole pinch.
//!
//! Shared corners are shared vertices, so the result is watertight and its
//! vertex normals are the (area-weighted) average of the faces around them.

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::math::Vec3;

use super::{Mesh, MeshVertex, PALETTE, check_length};

/// Each level multiplies the triangle count by four.
pub const MAX_SUBDIVISIONS: u32 = 7;

const PHI: f32 = 1.618_034;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolyhedronKind {
    Tetrahedron,
    Octahedron,
    Cube,
    Icosahedron,
    Dodecahedron,
}

impl PolyhedronKind {
    pub const ALL: [Self; 5] = [
        Self::Tetrahedron,
        Self::Octahedron,
        Self::Cube,
        Self::Icosahedron,
        Self::Dodecahedron,
    ];

    fn corners(self) -> Vec<Vec3> {
        let v = Vec3::new;
        match self {
            Self::Tetrahedron => vec![
                v(1.0, 1.0, 1.0),
                v(1.0, -1.0, -1.0),
                v(-1.0, 1.0, -1.0),
                v(-1.0, -1.0, 1.0),
            ],
            Self::Octahedron => vec![
                Vec3::X,
                Vec3::NEG_X,
                Vec3::Y,
                Vec3::NEG_Y,
                Vec3::Z,
                Vec3::NEG_Z,
            ],
            // Corner index bits are (x > 0, y > 0, z > 0).
            Self::Cube => (0..8)
                .map(|i| {
                    let sign = |bit: u32| if i & bit != 0 { 1.0 } else { -1.0 };
                    v(sign(4), sign(2), sign(1))
                })
                .collect(),
            Self::Icosahedron => vec![
                v(-1.0, PHI, 0.0),
                v(1.0, PHI, 0.0),
                v(-1.0, -PHI, 0.0),
                v(1.0, -PHI, 0.0),
                v(0.0, -1.0, PHI),
                v(0.0, 1.0, PHI),
                v(0.0, -1.0, -PHI),
                v(0.0, 1.0, -PHI),
                v(PHI, 0.0, -1.0),
                v(PHI, 0.0, 1.0),
                v(-PHI, 0.0, -1.0),
                v(-PHI, 0.0, 1.0),
            ],
            Self::Dodecahedron => DODECAHEDRON_CORNERS.iter().map(|&p| Vec3::from(p)).collect(),
        }
    }

    fn faces(self) -> &'static [&'static [u32]] {
        match self {
            Self::Tetrahedron => &[&[0, 1, 2], &[0, 3, 1], &[0, 2, 3], &[1, 3, 2]],
            Self::Octahedron => &[
                &[0, 2, 4],
                &[0, 4, 3],
                &[0, 3, 5],
                &[0, 5, 2],
                &[1, 2, 5],
                &[1, 5, 3],
                &[1, 3, 4],
                &[1, 4, 2],
            ],
            Self::Cube => &[
                &[0, 1, 3, 2],
                &[4, 6, 7, 5],
                &[0, 4, 5, 1],
                &[2, 3, 7, 6],
                &[0, 2, 6, 4],
                &[1, 5, 7, 3],
            ],
            Self::Icosahedron => &[
                &[0, 11, 5],
                &[0, 5, 1],
                &[0, 1, 7],
                &[0, 7, 10],
                &[0, 10, 11],
                &[1, 5, 9],
                &[5, 11, 4],
                &[11, 10, 2],
                &[10, 7, 6],
                &[7, 1, 8],
                &[3, 9, 4],
                &[3, 4, 2],
                &[3, 2, 6],
                &[3, 6, 8],
                &[3, 8, 9],
                &[4, 9, 5],
                &[2, 4, 11],
                &[6, 2, 10],
                &[8, 6, 7],
                &[9, 8, 1],
            ],
            Self::Dodecahedron => &[
                &[0, 1, 4, 7, 2],
                &[0, 2, 6, 9, 3],
                &[0, 3, 8, 5, 1],
                &[1, 5, 11, 10, 4],
                &[2, 7, 13, 12, 6],
                &[3, 9, 15, 14, 8],
                &[4, 10, 16, 13, 7],
                &[5, 8, 14, 17, 11],
                &[6, 12, 18, 15, 9],
                &[10, 11, 17, 19, 16],
                &[12, 13, 16, 19, 18],
                &[14, 15, 18, 19, 17],
            ],
        }
    }

    /// Number of polygonal faces before triangulation.
    pub fn face_count(self) -> usize {
        self.faces().len()
    }
}

const DODECAHEDRON_CORNERS: [[f32; 3]; 20] = [
    [0.0, 0.0, 1.070_466],
    [0.713_644_2, 0.0, 0.797_878_4],
    [-0.356_822_1, 0.618_034, 0.797_878_4],
    [-0.356_822_1, -0.618_034, 0.797_878_4],
    [0.797_878_4, 0.618_034, 0.356_822_1],
    [0.797_878_4, -0.618_034, 0.356_822_1],
    [-0.934_172_4, 0.381_966, 0.356_822_1],
    [0.136_293_9, 1.0, 0.356_822_1],
    [0.136_293_9, -1.0, 0.356_822_1],
    [-0.934_172_4, -0.381_966, 0.356_822_1],
    [0.934_172_4, 0.381_966, -0.356_822_1],
    [0.934_172_4, -0.381_966, -0.356_822_1],
    [-0.797_878_4, 0.618_034, -0.356_822_1],
    [-0.136_293_9, 1.0, -0.356_822_1],
    [-0.136_293_9, -1.0, -0.356_822_1],
    [-0.797_878_4, -0.618_034, -0.356_822_1],
    [0.356_822_1, 0.618_034, -0.797_878_4],
    [0.356_822_1, -0.618_034, -0.797_878_4],
    [-0.713_644_2, 0.0, -0.797_878_4],
    [0.0, 0.0, -1.070_466],
];

/// A triangle plus the polygonal face it was cut from.
#[derive(Clone, Copy)]
struct Facet {
    corners: [u32; 3],
    face: usize,
}

/// A Platonic solid inscribed in a sphere of `radius`, centered at the origin.
///
/// Vertex colors come from the palette by the first face that touches the
/// vertex; UVs are the spherical longitude/latitude of the vertex direction.
pub fn polyhedron(kind: PolyhedronKind, radius: f32, subdivisions: u32) -> Result<Mesh, ShapeError> {
    check_length("radius", radius)?;
    if subdivisions > MAX_SUBDIVISIONS {
        return Err(ShapeError::TooManySubdivisions {
            requested: subdivisions,
            max: MAX_SUBDIVISIONS,
        });
    }

    let mut points: Vec<Vec3> = kind.corners().into_iter().map(Vec3::normalize).collect();
    let mut facets = fan(kind, &points);
    for _ in 0..subdivisions {
        facets = subdivide(&facets, &mut points);
    }

    let mut normals = vec![Vec3::ZERO; points.len()];
    let mut first_face = vec![None; points.len()];
    for facet in &facets {
        let [a, b, c] = facet.corners.map(|i| points[i as usize]);
        let area_normal = (b - a).cross(c - a);
        for i in facet.corners {
            normals[i as usize] += area_normal;
            first_face[i as usize].get_or_insert(facet.face);
        }
    }

    let vertices = points
        .iter()
        .zip(&normals)
        .zip(&first_face)
        .map(|((&p, &n), face)| MeshVertex {
            position: (p * radius).to_array(),
            color: PALETTE[face.unwrap_or(0) % PALETTE.len()],
            normal: n.normalize_or(p).to_array(),
            uv: [0.5 + p.x.atan2(p.z) / TAU, 0.5 + p.y.clamp(-1.0, 1.0).asin() / PI],
        })
        .collect();
    let indices = facets.iter().flat_map(|f| f.corners).collect();

    let mesh = Mesh::from_parts(vertices, indices)?;
    log::debug!(
        "generated {kind:?} r={radius} subdiv={subdivisions}: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Fan every face from its first corner, winding each triangle outward.
fn fan(kind: PolyhedronKind, points: &[Vec3]) -> Vec<Facet> {
    let mut facets = Vec::new();
    for (face, corners) in kind.faces().iter().enumerate() {
        for pair in corners[1..].windows(2) {
            let mut tri = [corners[0], pair[0], pair[1]];
            let [a, b, c] = tri.map(|i| points[i as usize]);
            if (b - a).cross(c - a).dot(a + b + c) < 0.0 {
                tri.swap(1, 2);
            }
            facets.push(Facet { corners: tri, face });
        }
    }
    facets
}

/// Split each triangle into four, sharing midpoints across neighbours.
fn subdivide(facets: &[Facet], points: &mut Vec<Vec3>) -> Vec<Facet> {
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
    let mut midpoint = |a: u32, b: u32| {
        let key = (a.min(b), a.max(b));
        *midpoints.entry(key).or_insert_with(|| {
            let p = (points[a as usize] + points[b as usize]).normalize();
            points.push(p);
            (points.len() - 1) as u32
        })
    };

    let mut out = Vec::with_capacity(facets.len() * 4);
    for &Facet { corners: [a, b, c], face } in facets {
        let ab = midpoint(a, b);
        let bc = midpoint(b, c);
        let ca = midpoint(c, a);
        for corners in [[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]] {
            out.push(Facet { corners, face });
        }
    }
    out
}
