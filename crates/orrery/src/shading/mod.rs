//! # Shading — The Lit Program and Its Inputs
//!
//! One WGSL program, [`LIT_SHADER`], shades every generated mesh with a fixed
//! downward light plus an ambient floor. This module owns what the program
//! expects from the CPU side:
//!
//! - [`uniforms`] — the named uniform set and the 240-byte block it packs into
//! - [`lighting`] — the fragment math on the CPU, and the lighting controls
//!
//! Vertex inputs are [`MeshVertex`](crate::mesh::MeshVertex) locations 0-3.
//! The GPU objects that run the program live in `render`.

pub mod lighting;
pub mod uniforms;

pub use lighting::{LightingState, light_factor, shade, world_normal};
pub use uniforms::{LitUniforms, UniformSet, UniformValue};

/// WGSL source of the lit program. Entry points `vs_main` and `fs_main`.
pub const LIT_SHADER: &str = include_str!("shader_lit.wgsl");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshVertex;

    fn parse() -> naga::Module {
        naga::front::wgsl::parse_str(LIT_SHADER).unwrap_or_else(|e| panic!("{}", e.emit_to_string(LIT_SHADER)))
    }

    #[test]
    fn lit_shader_validates() {
        let module = parse();
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator.validate(&module).unwrap();
    }

    #[test]
    fn vertex_inputs_match_mesh_vertex() {
        let module = parse();
        let entry = module
            .entry_points
            .iter()
            .find(|e| e.name == "vs_main")
            .unwrap();
        let arg = &entry.function.arguments[0];
        let naga::TypeInner::Struct { members, .. } = &module.types[arg.ty].inner else {
            panic!("vs_main takes a struct");
        };
        let locations: Vec<(&str, u32)> = members
            .iter()
            .filter_map(|m| match m.binding {
                Some(naga::Binding::Location { location, .. }) => Some((m.name.as_deref()?, location)),
                _ => None,
            })
            .collect();
        assert_eq!(
            locations,
            vec![
                ("position", MeshVertex::POSITION_LOCATION),
                ("color", MeshVertex::COLOR_LOCATION),
                ("normal", MeshVertex::NORMAL_LOCATION),
                ("uv", MeshVertex::UV_LOCATION),
            ]
        );
    }

    #[test]
    fn uniform_block_size_matches_wgsl() {
        let module = parse();
        let (_, ty) = module
            .types
            .iter()
            .find(|(_, t)| t.name.as_deref() == Some("LitUniforms"))
            .unwrap();
        let size = ty.inner.size(module.to_ctx());
        assert_eq!(size as usize, std::mem::size_of::<LitUniforms>());
    }

    #[test]
    fn both_entry_points_exist() {
        let module = parse();
        let names: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(names.contains(&"vs_main"));
        assert!(names.contains(&"fs_main"));
    }
}
