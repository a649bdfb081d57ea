//! Headless draw — render a lit frustum into an offscreen texture.
//!
//! Cycles through the mesh-color presets and both color modes, one frame
//! each, to exercise the uniform path end to end.

use orrery::math::{Mat4, Quat, Transform, Vec3};
use orrery::mesh::{CylinderParams, cylindrical};
use orrery::render::{GpuContext, GpuMesh, LitPipeline, OffscreenTarget};
use orrery::shading::{LightingState, LitUniforms};

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let gpu = GpuContext::headless()?;
    let pipeline = LitPipeline::new(&gpu, FORMAT)?;
    let target = OffscreenTarget::new(&gpu, 256, 256, FORMAT);

    let params = CylinderParams::new(0.5, 1.0, 2.0).divisions(32, 4);
    let mesh = GpuMesh::upload(&gpu, &cylindrical(&params)?)?;

    let mut lighting = LightingState::default();
    let mut uniforms = LitUniforms::default();
    uniforms.set_view(Mat4::look_at_rh(Vec3::new(0.0, 2.0, 5.0), Vec3::ZERO, Vec3::Y));
    uniforms.set_projection(Mat4::perspective_rh(45f32.to_radians(), 1.0, 0.1, 100.0));
    let binding = pipeline.create_binding(&gpu, &uniforms);

    for frame in 0..10u32 {
        let time = frame as f32 / 60.0;
        if frame % 5 == 4 {
            lighting.toggle_color_mode();
        } else {
            lighting.cycle_color();
        }
        lighting.increase_ambient(0.1);

        let rotation = Transform::IDENTITY.with_rotation(Quat::from_rotation_y(time * 2.0));
        uniforms.set_model(rotation.matrix());
        uniforms.time = time;
        lighting.apply(&mut uniforms);
        binding.write(&gpu.queue, &uniforms);

        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("headless frame encoder"),
        });
        {
            let mut pass = target.begin_pass(
                &mut encoder,
                wgpu::Color {
                    r: 0.02,
                    g: 0.02,
                    b: 0.05,
                    a: 1.0,
                },
            );
            pipeline.draw(&mut pass, &binding, &mesh);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));

        log::info!(
            "frame {frame}: ambient {:.1}, {}, mesh color {}",
            lighting.ambient_strength,
            lighting.color_mode_label(),
            lighting.mesh_color()
        );
    }

    Ok(())
}
