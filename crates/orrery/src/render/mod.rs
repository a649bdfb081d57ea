//! # Render — wgpu Objects for the Lit Program
//!
//! ```text
//!   Mesh ──GpuMesh::upload──► GpuMesh ─────────────┐
//!                                                   ▼
//!   LitUniforms ──UniformBinding::write──► LitPipeline::draw(pass, ..)
//! ```
//!
//! Per frame the driver writes each binding, begins a pass with a color and
//! a [`DEPTH_FORMAT`] attachment, and calls [`LitPipeline::draw`] per mesh.

pub mod gpu;
pub mod mesh;
pub mod pipeline;
pub mod target;

pub use gpu::GpuContext;
pub use mesh::GpuMesh;
pub use pipeline::{DEPTH_FORMAT, LitPipeline, UniformBinding, create_depth_texture};
pub use target::OffscreenTarget;
