//! Uploading a [`Mesh`] to GPU buffers.

use wgpu::util::DeviceExt;

use super::GpuContext;
use crate::error::RenderError;
use crate::mesh::Mesh;

/// A mesh that has been uploaded to GPU buffers.
///
/// The buffers live as long as this value; drop it to release them.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    /// Validate `mesh` and copy its vertices and indices into new buffers.
    pub fn upload(gpu: &GpuContext, mesh: &Mesh) -> Result<Self, RenderError> {
        mesh.validate()?;

        let vertex_buffer = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh vertex buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh index buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "uploaded mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.index_count == 0
    }
}
