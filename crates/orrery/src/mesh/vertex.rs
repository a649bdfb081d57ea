//! # Vertex — Per-Corner Data for Generated Meshes
//!
//! Every generated vertex carries a position, a color, a surface normal, and
//! a texture coordinate. The first three are what the lit program reads; the
//! UV rides along for textured materials.
//!
//! ## Memory Layout
//!
//! ```text
//! MeshVertex (44 bytes)
//! ┌──────────────┬──────────────┬──────────────┬──────────────┐
//! │ position     │ color        │ normal       │ uv           │
//! │ [f32; 3]     │ [f32; 3]     │ [f32; 3]     │ [f32; 2]     │
//! │ offset 0     │ offset 12    │ offset 24    │ offset 36    │
//! │ location(0)  │ location(1)  │ location(2)  │ location(3)  │
//! └──────────────┴──────────────┴──────────────┴──────────────┘
//! ```
//!
//! Locations 0, 1 and 2 are fixed by the lit program's interface. Any upload
//! path must keep them, offsets included, or the shader reads garbage.
//!
//! `#[repr(C)]` plus the `bytemuck` traits let `&[MeshVertex]` be cast to
//! `&[u8]` for upload without a copy.

use bytemuck::{Pod, Zeroable};

/// Per-vertex data: position, color, surface normal, texture UV.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub const POSITION_LOCATION: u32 = 0;
    pub const COLOR_LOCATION: u32 = 1;
    pub const NORMAL_LOCATION: u32 = 2;
    pub const UV_LOCATION: u32 = 3;

    #[cfg(feature = "render")]
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position: vec3<f32>
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: Self::POSITION_LOCATION,
                format: wgpu::VertexFormat::Float32x3,
            },
            // color: vec3<f32>
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: Self::COLOR_LOCATION,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal: vec3<f32>
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: Self::NORMAL_LOCATION,
                format: wgpu::VertexFormat::Float32x3,
            },
            // uv: vec2<f32>
            wgpu::VertexAttribute {
                offset: 36,
                shader_location: Self::UV_LOCATION,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };
}
