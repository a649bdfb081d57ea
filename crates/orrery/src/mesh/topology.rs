//! Edge statistics for watertightness checks.
//!
//! Generated meshes duplicate positions on purpose (UV seams, caps with their
//! own flat normals), so edges are counted over vertices welded by position
//! rather than by raw index.
//!
//! Welding hashes positions onto a grid of [`WELD_EPSILON`] cells and then
//! searches the 27 cells around each point, so two points within the
//! tolerance weld even when they fall on opposite sides of a cell boundary.

use std::collections::HashMap;

use crate::math::Vec3;

use super::Mesh;

/// Positions closer than this collapse to one vertex.
pub const WELD_EPSILON: f32 = 1e-4;

/// Assigns one id per distinct position, up to [`WELD_EPSILON`].
#[derive(Default)]
struct Welder {
    cells: HashMap<[i64; 3], Vec<u32>>,
    points: Vec<Vec3>,
}

impl Welder {
    fn cell(p: Vec3) -> [i64; 3] {
        (p / WELD_EPSILON).floor().to_array().map(|c| c as i64)
    }

    fn weld(&mut self, p: Vec3) -> u32 {
        let [x, y, z] = Self::cell(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(ids) = self.cells.get(&[x + dx, y + dy, z + dz]) else {
                        continue;
                    };
                    if let Some(&id) = ids.iter().find(|&&id| self.points[id as usize].distance(p) <= WELD_EPSILON) {
                        return id;
                    }
                }
            }
        }
        let id = self.points.len() as u32;
        self.points.push(p);
        self.cells.entry([x, y, z]).or_default().push(id);
        id
    }
}

/// Edge usage over a position-welded copy of a mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeReport {
    /// Distinct positions after welding.
    pub welded_vertices: usize,
    /// Distinct undirected edges.
    pub edges: usize,
    /// Edges used by exactly one triangle (holes).
    pub boundary_edges: usize,
    /// Edges used by three or more triangles.
    pub non_manifold_edges: usize,
    /// Directed edges that do not have exactly one opposite partner.
    pub unpaired_directed_edges: usize,
    /// Triangles that collapse to a line or a point after welding.
    pub degenerate_triangles: usize,
}

impl EdgeReport {
    pub fn new(mesh: &Mesh) -> Self {
        let mut welder = Welder::default();
        let welded: Vec<u32> = mesh
            .vertices
            .iter()
            .map(|v| welder.weld(Vec3::from(v.position)))
            .collect();

        let mut directed: HashMap<(u32, u32), u32> = HashMap::new();
        let mut degenerate_triangles = 0;
        for tri in mesh.triangles() {
            let [a, b, c] = tri.map(|i| welded[i as usize]);
            if a == b || b == c || c == a {
                degenerate_triangles += 1;
                continue;
            }
            for edge in [(a, b), (b, c), (c, a)] {
                *directed.entry(edge).or_default() += 1;
            }
        }

        let mut undirected: HashMap<(u32, u32), u32> = HashMap::new();
        for (&(a, b), &count) in &directed {
            *undirected.entry((a.min(b), a.max(b))).or_default() += count;
        }

        let unpaired_directed_edges = directed
            .iter()
            .filter(|&(&(a, b), &count)| count != 1 || directed.get(&(b, a)) != Some(&1))
            .count();

        Self {
            welded_vertices: welder.points.len(),
            edges: undirected.len(),
            boundary_edges: undirected.values().filter(|&&n| n == 1).count(),
            non_manifold_edges: undirected.values().filter(|&&n| n > 2).count(),
            unpaired_directed_edges,
            degenerate_triangles,
        }
    }

    /// Every edge is shared by exactly two triangles.
    pub fn is_closed(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0
    }

    /// Closed, and every shared edge is traversed once in each direction.
    pub fn is_watertight(&self) -> bool {
        self.is_closed() && self.unpaired_directed_edges == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshVertex;

    fn at(position: [f32; 3]) -> MeshVertex {
        MeshVertex {
            position,
            ..Default::default()
        }
    }

    fn tetrahedron(indices: Vec<u32>) -> Mesh {
        Mesh {
            vertices: vec![
                at([0.0, 0.0, 0.0]),
                at([1.0, 0.0, 0.0]),
                at([0.0, 1.0, 0.0]),
                at([0.0, 0.0, 1.0]),
            ],
            indices,
        }
    }

    #[test]
    fn closed_tetrahedron_is_watertight() {
        let mesh = tetrahedron(vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3]);
        let report = mesh.edge_report();
        assert_eq!(report.edges, 6);
        assert!(report.is_watertight(), "{report:?}");
    }

    #[test]
    fn missing_face_leaves_boundary() {
        let mesh = tetrahedron(vec![0, 2, 1, 0, 1, 3, 0, 3, 2]);
        let report = mesh.edge_report();
        assert_eq!(report.boundary_edges, 3);
        assert!(!report.is_closed());
    }

    #[test]
    fn flipped_face_is_closed_but_not_watertight() {
        let mesh = tetrahedron(vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 3, 2]);
        let report = mesh.edge_report();
        assert!(report.is_closed());
        assert!(!report.is_watertight());
    }

    #[test]
    fn duplicated_positions_weld_together() {
        let mut mesh = tetrahedron(vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 4, 2, 3]);
        mesh.vertices.push(at([1.0, 0.0, 0.0]));
        let report = mesh.edge_report();
        assert_eq!(report.welded_vertices, 4);
        assert!(report.is_watertight());
    }

    #[test]
    fn near_duplicates_weld_across_a_cell_boundary() {
        // 0.0001995 and 0.0002005 are 1e-6 apart but sit in different cells.
        let mut mesh = tetrahedron(vec![0, 2, 1, 4, 1, 3, 0, 3, 2, 1, 2, 3]);
        mesh.vertices[0].position = [-1.0, -1.0, 0.000_199_5];
        mesh.vertices.push(at([-1.0, -1.0, 0.000_200_5]));
        let report = mesh.edge_report();
        assert_eq!(report.welded_vertices, 4);
        assert!(report.is_watertight(), "{report:?}");
    }

    #[test]
    fn distinct_points_stay_apart() {
        let mut mesh = tetrahedron(vec![0, 2, 1, 4, 1, 3, 0, 3, 2, 1, 2, 3]);
        mesh.vertices.push(at([3.0 * WELD_EPSILON, 0.0, 0.0]));
        let report = mesh.edge_report();
        assert_eq!(report.welded_vertices, 5);
        assert!(!report.is_closed());
    }
}
