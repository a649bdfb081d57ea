//! # Pipeline — The Lit Render Pipeline
//!
//! [`LitPipeline`] compiles the lit WGSL program into a render pipeline:
//!
//! - **One bind group**: group 0 binding 0 is the [`LitUniforms`] block,
//!   visible to both stages. Each draw binds its own [`UniformBinding`].
//! - **Backface culling**: meshes wind counter-clockwise from outside, so
//!   `FrontFace::Ccw` with back faces culled hides the far side of closed
//!   shapes.
//! - **Depth buffer**: `Depth32Float`, less-than compare. Attach a view from
//!   [`create_depth_texture`] to every pass that draws with this pipeline.
//!
//! Shader and pipeline creation run inside a validation error scope. A
//! program that fails to compile is reported as [`RenderError::Shader`]
//! instead of poisoning the device.

use wgpu::util::DeviceExt;

use super::{GpuContext, GpuMesh};
use crate::error::RenderError;
use crate::mesh::MeshVertex;
use crate::shading::{LIT_SHADER, LitUniforms, UniformSet};

/// Depth texture format used by the lit pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// A uniform buffer and the bind group that exposes it at group 0.
pub struct UniformBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl UniformBinding {
    pub fn write(&self, queue: &wgpu::Queue, uniforms: &LitUniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Pack a named set and write it. Nothing is written if packing fails.
    pub fn write_set(&self, queue: &wgpu::Queue, set: &UniformSet) -> Result<(), RenderError> {
        let uniforms = LitUniforms::from_set(set)?;
        self.write(queue, &uniforms);
        Ok(())
    }
}

pub struct LitPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
}

impl LitPipeline {
    /// Build the pipeline from the bundled lit program.
    pub fn new(gpu: &GpuContext, color_format: wgpu::TextureFormat) -> Result<Self, RenderError> {
        Self::from_source(gpu, "lit shader", LIT_SHADER, color_format)
    }

    /// Build the pipeline from WGSL `source`, which must declare the same
    /// interface as the bundled program.
    pub fn from_source(
        gpu: &GpuContext,
        label: &str,
        source: &str,
        color_format: wgpu::TextureFormat,
    ) -> Result<Self, RenderError> {
        let bind_group_layout = gpu.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lit uniforms layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<LitUniforms>() as u64),
                },
                count: None,
            }],
        });

        let pipeline = build_pipeline(gpu, &bind_group_layout, label, source, color_format)?;
        log::info!("created lit pipeline `{label}` targeting {color_format:?}");

        Ok(Self {
            pipeline,
            bind_group_layout,
            color_format,
        })
    }

    /// Recompile from new WGSL source. On failure the current pipeline is
    /// kept and the error returned.
    pub fn reload(&mut self, gpu: &GpuContext, label: &str, source: &str) -> Result<(), RenderError> {
        match build_pipeline(gpu, &self.bind_group_layout, label, source, self.color_format) {
            Ok(pipeline) => {
                self.pipeline = pipeline;
                log::info!("reloaded lit pipeline `{label}`");
                Ok(())
            }
            Err(err) => {
                log::warn!("{err}. Keeping old pipeline.");
                Err(err)
            }
        }
    }

    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.color_format
    }

    /// Allocate a uniform buffer initialized with `uniforms`.
    pub fn create_binding(&self, gpu: &GpuContext, uniforms: &LitUniforms) -> UniformBinding {
        let buffer = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lit uniforms buffer"),
            contents: bytemuck::bytes_of(uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lit uniforms bind group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        UniformBinding { buffer, bind_group }
    }

    /// Record one indexed draw of `mesh` with `binding`'s uniforms.
    ///
    /// Empty meshes record nothing.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, binding: &UniformBinding, mesh: &GpuMesh) {
        if mesh.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &binding.bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

fn build_pipeline(
    gpu: &GpuContext,
    bind_group_layout: &wgpu::BindGroupLayout,
    label: &str,
    source: &str,
    color_format: wgpu::TextureFormat,
) -> Result<wgpu::RenderPipeline, RenderError> {
    let device = &gpu.device;
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("lit pipeline layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("lit pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[MeshVertex::LAYOUT],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: None, // opaque only
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => Err(RenderError::Shader {
            label: label.to_string(),
            message: err.to_string(),
        }),
        None => Ok(pipeline),
    }
}

/// Create a depth texture view at the given dimensions.
pub fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("lit depth texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
