//! Serializable shape descriptions.
//!
//! A [`ShapeDesc`] names a generator and carries its parameters, so scenes
//! can be written as JSON:
//!
//! ```json
//! [
//!   { "shape": "sphere", "radius": 0.5 },
//!   { "shape": "cylinder", "top_radius": 0.2, "bottom_radius": 0.4, "height": 1.0 },
//!   { "shape": "polyhedron", "kind": "icosahedron", "subdivisions": 2 }
//! ]
//! ```
//!
//! Omitted fields take the generator's defaults.

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;

use super::{CylinderParams, Mesh, PolyhedronKind};

fn one() -> f32 {
    1.0
}

fn one_division() -> u32 {
    1
}

fn segments() -> u32 {
    32
}

fn rings() -> u32 {
    16
}

fn sides() -> u32 {
    6
}

fn major_radius() -> f32 {
    1.0
}

fn minor_radius() -> f32 {
    0.25
}

fn tubular() -> u32 {
    16
}

fn icosahedron() -> PolyhedronKind {
    PolyhedronKind::Icosahedron
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeDesc {
    Cylinder(CylinderParams),
    Cone {
        #[serde(default = "one")]
        radius: f32,
        #[serde(default = "one")]
        height: f32,
        #[serde(default = "segments")]
        radial_divisions: u32,
        #[serde(default = "one_division")]
        height_divisions: u32,
    },
    Sphere {
        #[serde(default = "one")]
        radius: f32,
        #[serde(default = "segments")]
        segments: u32,
        #[serde(default = "rings")]
        rings: u32,
    },
    Plane {
        #[serde(default = "one")]
        width: f32,
        #[serde(default = "one")]
        depth: f32,
        #[serde(default = "one_division")]
        width_divisions: u32,
        #[serde(default = "one_division")]
        depth_divisions: u32,
    },
    Torus {
        #[serde(default = "major_radius")]
        major_radius: f32,
        #[serde(default = "minor_radius")]
        minor_radius: f32,
        #[serde(default = "segments")]
        radial_divisions: u32,
        #[serde(default = "tubular")]
        tubular_divisions: u32,
    },
    Polygon {
        #[serde(default = "sides")]
        sides: u32,
        #[serde(default = "one")]
        radius: f32,
    },
    Polyhedron {
        #[serde(default = "icosahedron")]
        kind: PolyhedronKind,
        #[serde(default = "one")]
        radius: f32,
        #[serde(default)]
        subdivisions: u32,
    },
}

/// A scene file holds either one shape or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scene {
    One(ShapeDesc),
    Many(Vec<ShapeDesc>),
}

impl ShapeDesc {
    /// The generator this description selects, as written in JSON.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cylinder(_) => "cylinder",
            Self::Cone { .. } => "cone",
            Self::Sphere { .. } => "sphere",
            Self::Plane { .. } => "plane",
            Self::Torus { .. } => "torus",
            Self::Polygon { .. } => "polygon",
            Self::Polyhedron { .. } => "polyhedron",
        }
    }

    /// Run the generator.
    pub fn build(&self) -> Result<Mesh, ShapeError> {
        match *self {
            Self::Cylinder(ref params) => super::cylindrical(params),
            Self::Cone {
                radius,
                height,
                radial_divisions,
                height_divisions,
            } => super::cone(radius, height, radial_divisions, height_divisions),
            Self::Sphere { radius, segments, rings } => super::sphere(radius, segments, rings),
            Self::Plane {
                width,
                depth,
                width_divisions,
                depth_divisions,
            } => super::plane(width, depth, width_divisions, depth_divisions),
            Self::Torus {
                major_radius,
                minor_radius,
                radial_divisions,
                tubular_divisions,
            } => super::torus(major_radius, minor_radius, radial_divisions, tubular_divisions),
            Self::Polygon { sides, radius } => super::polygon(sides, radius),
            Self::Polyhedron {
                kind,
                radius,
                subdivisions,
            } => super::polyhedron(kind, radius, subdivisions),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse a single shape object or an array of them.
    pub fn parse_scene(json: &str) -> serde_json::Result<Vec<Self>> {
        Ok(match serde_json::from_str(json)? {
            Scene::One(shape) => vec![shape],
            Scene::Many(shapes) => shapes,
        })
    }
}
