//! # Orrery — Procedural Meshes and Lit Shading
//!
//! The geometry and shading core of a small gravity visualizer. Bodies,
//! orbits and markers are drawn from meshes generated on the CPU by sampling
//! parametric surfaces, then shaded with a single directional-ambient
//! lighting program on wgpu.
//!
//! - [`mesh`] — surface sampling, caps, mesh merging, and the shape library
//! - [`shading`] — the uniform contract and a CPU reference of the lighting
//! - [`render`] — GPU upload and the lit render pipeline (feature `render`)
//!
//! ```no_run
//! use orrery::mesh::{CylinderParams, cylindrical};
//!
//! let mesh = cylindrical(&CylinderParams::new(1.0, 1.0, 2.0)).unwrap();
//! assert!(mesh.validate().is_ok());
//! ```

pub mod error;
pub mod math;
pub mod mesh;
pub mod shading;

#[cfg(feature = "render")]
pub mod render;

pub use error::{MeshError, ShapeError, UniformError};
#[cfg(feature = "render")]
pub use error::RenderError;
pub use mesh::{Mesh, MeshVertex};
