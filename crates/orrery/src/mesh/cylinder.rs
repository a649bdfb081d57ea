//! # Cylinder — Ruled Surfaces of Revolution With Caps
//!
//! One generator covers the whole cylinder family: a right cylinder (equal
//! radii), a frustum (different radii), and a cone (one radius zero). The
//! lateral surface is the parametric function
//!
//! ```text
//!   r(v)    = bottom_radius + v · (top_radius − bottom_radius)
//!   p(u, v) = (r(v) · cos 2πu,  height · (v − ½),  r(v) · sin 2πu)
//! ```
//!
//! sampled by a [`SurfaceGrid`] with `radial_divisions` columns and
//! `height_divisions` rows. The shape is centered on the origin, its axis on
//! +Y.
//!
//! ## Caps
//!
//! Each cap is a standalone [`polygon`] built in its own XY plane facing +Z,
//! then placed with [`Mesh::append_transformed`]:
//!
//! ```text
//!   top:     rotate −90° about X (+Z → +Y), raise by height/2
//!   bottom:  rotate +90° about X (+Z → −Y), lower by height/2
//! ```
//!
//! The polygon's rim angles are multiples of `2π / radial_divisions`, the
//! same angles the lateral grid samples, so every cap rim vertex lands on a
//! lateral ring vertex. The rotation leaves rounding error of a few ulps, so
//! after placement each rim position is replaced by the ring position it
//! lands on and the two are bit-identical. The top placement reverses the
//! polygon's angular order: its rim vertex `k` matches ring column
//! `(n − k) mod n`. A cap whose radius is zero would be a single point; it is
//! skipped.

use std::f32::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::math::{Transform, Vec3};

use super::parametric::{Facing, Surface, SurfaceGrid};
use super::{Mesh, check_length, polygon};

/// Parameters for [`cylindrical`].
///
/// Radii and height are lengths: finite and non-negative. `radial_divisions`
/// must be at least 3, `height_divisions` at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderParams {
    pub top_radius: f32,
    pub bottom_radius: f32,
    pub height: f32,
    pub radial_divisions: u32,
    pub height_divisions: u32,
    pub top_cap: bool,
    pub bottom_cap: bool,
}

impl CylinderParams {
    pub fn new(top_radius: f32, bottom_radius: f32, height: f32) -> Self {
        Self {
            top_radius,
            bottom_radius,
            height,
            ..Self::default()
        }
    }

    pub fn divisions(mut self, radial: u32, height: u32) -> Self {
        self.radial_divisions = radial;
        self.height_divisions = height;
        self
    }

    pub fn caps(mut self, top: bool, bottom: bool) -> Self {
        self.top_cap = top;
        self.bottom_cap = bottom;
        self
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.radial_divisions < 3 {
            return Err(ShapeError::TooFewRadialDivisions(self.radial_divisions));
        }
        if self.height_divisions < 1 {
            return Err(ShapeError::TooFewHeightDivisions(self.height_divisions));
        }
        for (name, value) in [
            ("top_radius", self.top_radius),
            ("bottom_radius", self.bottom_radius),
            ("height", self.height),
        ] {
            check_length(name, value)?;
        }
        if self.top_radius == 0.0 && self.bottom_radius == 0.0 {
            return Err(ShapeError::DegenerateProfile);
        }
        Ok(())
    }
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            top_radius: 1.0,
            bottom_radius: 1.0,
            height: 1.0,
            radial_divisions: 32,
            height_divisions: 1,
            top_cap: true,
            bottom_cap: true,
        }
    }
}

/// The lateral surface as a [`Surface`] with closed-form normals.
#[derive(Debug, Clone, Copy)]
struct Frustum {
    top_radius: f32,
    bottom_radius: f32,
    height: f32,
}

impl Frustum {
    fn radius(&self, v: f32) -> f32 {
        self.bottom_radius + v * (self.top_radius - self.bottom_radius)
    }
}

impl Surface for Frustum {
    fn position(&self, u: f32, v: f32) -> Vec3 {
        let (sin, cos) = (u * TAU).sin_cos();
        let r = self.radius(v);
        Vec3::new(r * cos, self.height * (v - 0.5), r * sin)
    }

    fn normal(&self, u: f32, _v: f32) -> Option<Vec3> {
        let (sin, cos) = (u * TAU).sin_cos();
        Vec3::new(
            self.height * cos,
            self.bottom_radius - self.top_radius,
            self.height * sin,
        )
        .try_normalize()
    }
}

/// Generate a cylinder, frustum, or cone. See the [module docs](self).
pub fn cylindrical(params: &CylinderParams) -> Result<Mesh, ShapeError> {
    params.validate()?;

    if params.height == 0.0 && params.top_radius == params.bottom_radius {
        log::warn!(
            "cylinder with radius {} and zero height is a flat disk with zero volume",
            params.top_radius
        );
    }

    let lateral = Frustum {
        top_radius: params.top_radius,
        bottom_radius: params.bottom_radius,
        height: params.height,
    };
    let mut mesh = SurfaceGrid::new(params.radial_divisions, params.height_divisions)
        .facing(Facing::VCrossU)
        .build(&lateral)?;

    let half = params.height * 0.5;
    let sides = params.radial_divisions;
    if params.top_cap {
        let top_ring = params.height_divisions as usize * (sides as usize + 1);
        let cap = Cap {
            which: "top",
            radius: params.top_radius,
            placement: Transform::from_rotation_x(-FRAC_PI_2).with_translation(Vec3::new(0.0, half, 0.0)),
            ring_start: top_ring,
            reversed: true,
        };
        cap.attach(&mut mesh, sides)?;
    }
    if params.bottom_cap {
        let cap = Cap {
            which: "bottom",
            radius: params.bottom_radius,
            placement: Transform::from_rotation_x(FRAC_PI_2).with_translation(Vec3::new(0.0, -half, 0.0)),
            ring_start: 0,
            reversed: false,
        };
        cap.attach(&mut mesh, sides)?;
    }

    log::debug!(
        "generated cylinder r={}..{} h={}: {} vertices, {} triangles",
        params.bottom_radius,
        params.top_radius,
        params.height,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// One end cap and the lateral ring it closes.
struct Cap {
    which: &'static str,
    radius: f32,
    placement: Transform,
    /// Index of the ring's first vertex in the lateral mesh.
    ring_start: usize,
    /// The placement runs the polygon's rim against the ring's direction.
    reversed: bool,
}

impl Cap {
    fn attach(&self, mesh: &mut Mesh, sides: u32) -> Result<(), ShapeError> {
        if self.radius == 0.0 {
            log::debug!("skipping {} cap: radius is zero", self.which);
            return Ok(());
        }
        let base = mesh.vertex_count();
        mesh.append_transformed(&polygon(sides, self.radius)?, &self.placement)?;

        for k in 0..sides {
            let column = if self.reversed { (sides - k) % sides } else { k };
            let ring = mesh.vertices[self.ring_start + column as usize].position;
            mesh.vertices[base + k as usize].position = ring;
        }
        Ok(())
    }
}

/// A closed right cylinder.
pub fn cylinder(radius: f32, height: f32, radial_divisions: u32, height_divisions: u32) -> Result<Mesh, ShapeError> {
    cylindrical(&CylinderParams::new(radius, radius, height).divisions(radial_divisions, height_divisions))
}

/// A cone with its apex up and a base cap.
pub fn cone(radius: f32, height: f32, radial_divisions: u32, height_divisions: u32) -> Result<Mesh, ShapeError> {
    cylindrical(
        &CylinderParams::new(0.0, radius, height)
            .divisions(radial_divisions, height_divisions)
            .caps(false, true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn lateral(params: CylinderParams) -> Mesh {
        cylindrical(&params.caps(false, false)).unwrap()
    }

    fn radial_distance(p: [f32; 3]) -> f32 {
        (p[0] * p[0] + p[2] * p[2]).sqrt()
    }

    #[test]
    fn lateral_counts_for_many_resolutions() {
        for radial in [3u32, 4, 7, 32] {
            for rows in [1u32, 2, 5] {
                let mesh = lateral(CylinderParams::new(0.5, 1.5, 2.0).divisions(radial, rows));
                assert_eq!(mesh.vertex_count(), ((radial + 1) * (rows + 1)) as usize);
                assert_eq!(mesh.triangle_count(), (radial * rows * 2) as usize);
            }
        }
    }

    #[test]
    fn shape_is_vertically_centered() {
        let height = 3.0;
        let radial = 6;
        let mesh = lateral(CylinderParams::new(1.0, 2.0, height).divisions(radial, 4));
        let row = (radial + 1) as usize;
        for v in &mesh.vertices[..row] {
            assert_abs_diff_eq!(v.position[1], -height / 2.0, epsilon = 1e-6);
        }
        for v in &mesh.vertices[mesh.vertex_count() - row..] {
            assert_abs_diff_eq!(v.position[1], height / 2.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn radius_interpolates_linearly_with_v() {
        let (top, bottom) = (0.25, 2.0);
        let mesh = lateral(CylinderParams::new(top, bottom, 1.0).divisions(8, 4));
        for v in &mesh.vertices {
            let t = v.uv[1];
            assert_abs_diff_eq!(radial_distance(v.position), bottom + t * (top - bottom), epsilon = 1e-5);
        }
    }

    #[test]
    fn right_cylinder_keeps_constant_radius() {
        let mesh = lateral(CylinderParams::new(1.75, 1.75, 2.0).divisions(16, 3));
        for v in &mesh.vertices {
            assert_abs_diff_eq!(radial_distance(v.position), 1.75, epsilon = 1e-5);
        }
    }

    #[test]
    fn lateral_normals_point_outward() {
        let mesh = lateral(CylinderParams::new(0.5, 1.0, 1.0).divisions(12, 2));
        for v in &mesh.vertices {
            let n = Vec3::from(v.normal);
            assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-5);
            let radial = Vec3::new(v.position[0], 0.0, v.position[2]);
            assert!(n.dot(radial) > 0.0);
        }
    }

    #[test]
    fn caps_are_appended_without_renumbering() {
        let params = CylinderParams::new(1.0, 0.5, 2.0).divisions(5, 2);
        let bare = lateral(params);
        let capped = cylindrical(&params.caps(true, true)).unwrap();

        assert_eq!(capped.vertex_count(), bare.vertex_count() + 2 * 5);
        assert_eq!(&capped.vertices[..bare.vertex_count()], &bare.vertices[..]);
        assert_eq!(&capped.indices[..bare.indices.len()], &bare.indices[..]);
        assert!(capped.indices.iter().all(|&i| (i as usize) < capped.vertex_count()));
    }

    #[test]
    fn caps_sit_at_the_ends_and_face_away() {
        let params = CylinderParams::new(1.0, 2.0, 4.0).divisions(6, 1);
        let mesh = cylindrical(&params).unwrap();
        let lateral_count = 7 * 2;
        let (top, bottom) = mesh.vertices[lateral_count..].split_at(6);
        for v in top {
            assert_abs_diff_eq!(v.position[1], 2.0, epsilon = 1e-5);
            assert_abs_diff_eq!(radial_distance(v.position), 1.0, epsilon = 1e-5);
            assert!(Vec3::from(v.normal).abs_diff_eq(Vec3::Y, 1e-5));
        }
        for v in bottom {
            assert_abs_diff_eq!(v.position[1], -2.0, epsilon = 1e-5);
            assert_abs_diff_eq!(radial_distance(v.position), 2.0, epsilon = 1e-5);
            assert!(Vec3::from(v.normal).abs_diff_eq(Vec3::NEG_Y, 1e-5));
        }
    }

    #[test]
    fn unit_square_cylinder_is_watertight() {
        let params = CylinderParams::new(1.0, 1.0, 2.0).divisions(4, 1).caps(true, true);
        let mesh = cylindrical(&params).unwrap();

        assert_eq!(mesh.vertex_count(), 5 * 2 + 2 * 4);
        assert_eq!(mesh.triangle_count(), 4 * 2 + 2 * 2);

        let report = mesh.edge_report();
        assert_eq!(report.degenerate_triangles, 0);
        assert!(report.is_watertight(), "{report:?}");
        // 4 top ring + 4 bottom ring + 4 vertical + 4 lateral diagonals + 2 cap diagonals
        assert_eq!(report.edges, 18);
    }

    #[test]
    fn taller_frustum_is_watertight() {
        let params = CylinderParams::new(0.5, 1.5, 3.0).divisions(9, 4);
        assert!(cylindrical(&params).unwrap().edge_report().is_watertight());
    }

    #[test]
    fn closed_shapes_are_watertight_across_resolutions() {
        let profiles = [
            (1.0, 1.0, 1.0),
            (12.7, 12.7, 0.01),
            (0.5, 1.5, 3.0),
            (2.0, 0.25, 7.0),
            (0.0, 1.0, 1.0),
        ];
        for (top, bottom, height) in profiles {
            for radial in 3..=64 {
                for rows in [1, 3] {
                    let params = CylinderParams::new(top, bottom, height).divisions(radial, rows);
                    let report = cylindrical(&params).unwrap().edge_report();
                    assert!(report.is_watertight(), "{params:?} {report:?}");
                }
            }
        }
    }

    #[test]
    fn cap_rims_reuse_ring_positions_exactly() {
        let params = CylinderParams::new(12.7, 3.1, 0.01).divisions(19, 2);
        let mesh = cylindrical(&params).unwrap();
        let ring = 20;
        let caps = &mesh.vertices[ring * 3..];
        let top_ring = &mesh.vertices[ring * 2..ring * 3];
        let bottom_ring = &mesh.vertices[..ring];
        for k in 0..19 {
            assert_eq!(caps[k].position, top_ring[(19 - k) % 19].position, "top rim {k}");
            assert_eq!(caps[19 + k].position, bottom_ring[k].position, "bottom rim {k}");
        }
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_outside() {
        for (top, bottom) in [(0.5, 1.5), (1.5, 0.5), (1.0, 1.0), (0.0, 1.0)] {
            let mesh = cylindrical(&CylinderParams::new(top, bottom, 2.0).divisions(10, 3)).unwrap();
            let p = |i: u32| Vec3::from(mesh.vertices[i as usize].position);
            for [a, b, c] in mesh.triangles() {
                let geometric = (p(b) - p(a)).cross(p(c) - p(a));
                if geometric.length_squared() < 1e-12 {
                    // Collapsed cells at a cone apex.
                    continue;
                }
                let normal = Vec3::from(mesh.vertices[a as usize].normal);
                let centroid = (p(a) + p(b) + p(c)) / 3.0;
                assert!(geometric.dot(normal) > 0.0, "r={top}..{bottom} triangle [{a}, {b}, {c}]");
                assert!(geometric.dot(centroid) > 0.0, "r={top}..{bottom} triangle [{a}, {b}, {c}]");
            }
        }
    }

    #[test]
    fn open_cylinder_has_boundary_rings() {
        let mesh = lateral(CylinderParams::new(1.0, 1.0, 1.0).divisions(8, 1));
        let report = mesh.edge_report();
        assert_eq!(report.boundary_edges, 16);
    }

    #[test]
    fn cone_skips_the_apex_cap() {
        let mesh = cylindrical(&CylinderParams::new(0.0, 1.0, 1.0).divisions(8, 1)).unwrap();
        assert_eq!(mesh.vertex_count(), 9 * 2 + 8);
        assert!(mesh.edge_report().is_watertight());
        assert_eq!(mesh, cone(1.0, 1.0, 8, 1).unwrap());
    }

    #[test]
    fn zero_height_disk_is_permitted() {
        let mesh = cylindrical(&CylinderParams::new(1.0, 1.0, 0.0).divisions(6, 1)).unwrap();
        assert!(mesh.vertices.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn same_parameters_same_mesh() {
        let params = CylinderParams::new(0.3, 0.9, 1.2).divisions(11, 3);
        assert_eq!(cylindrical(&params).unwrap(), cylindrical(&params).unwrap());
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let base = CylinderParams::new(1.0, 1.0, 1.0);
        assert_eq!(
            cylindrical(&base.divisions(2, 1)).unwrap_err(),
            ShapeError::TooFewRadialDivisions(2)
        );
        assert_eq!(
            cylindrical(&base.divisions(8, 0)).unwrap_err(),
            ShapeError::TooFewHeightDivisions(0)
        );
        assert_eq!(
            cylindrical(&CylinderParams::new(-1.0, 1.0, 1.0)).unwrap_err(),
            ShapeError::InvalidDimension {
                name: "top_radius",
                value: -1.0
            }
        );
        assert!(matches!(
            cylindrical(&CylinderParams::new(1.0, 1.0, f32::NAN)),
            Err(ShapeError::InvalidDimension { name: "height", .. })
        ));
        assert_eq!(
            cylindrical(&CylinderParams::new(0.0, 0.0, 1.0)).unwrap_err(),
            ShapeError::DegenerateProfile
        );
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: CylinderParams = serde_json::from_str(r#"{ "top_radius": 0.5, "top_cap": false }"#).unwrap();
        assert_eq!(params.top_radius, 0.5);
        assert_eq!(params.bottom_radius, 1.0);
        assert_eq!(params.radial_divisions, 32);
        assert!(!params.top_cap);
        assert!(params.bottom_cap);
    }
}
