//! CPU mirror of the lit fragment shader, and the interactive lighting state
//! that feeds it.
//!
//! ```text
//!   factor  = max(N · L, 0) + 0.2          L = (0, −1, 0)
//!   ambient = ambient_strength × ambient_color × factor
//!   base    = use_custom_color ? mesh_color : vertex_color
//!   out     = (ambient × base, 1)
//! ```

use serde::{Deserialize, Serialize};

use crate::math::{Mat3, Mat4, Vec3, Vec4};

use super::uniforms::LitUniforms;

/// Direction the single light travels in: straight down.
pub const LIGHT_DIRECTION: Vec3 = Vec3::NEG_Y;

/// Minimum light factor, so unlit faces stay visible.
pub const LIGHT_FLOOR: f32 = 0.2;

pub const MIN_AMBIENT: f32 = 0.0;
pub const MAX_AMBIENT: f32 = 2.0;
pub const AMBIENT_STEP: f32 = 0.1;

/// Mesh colors walked by [`LightingState::cycle_color`].
pub const COLOR_PRESETS: [[f32; 3]; 5] = [
    [0.0, 0.7, 1.0],
    [0.0, 0.8, 0.4],
    [1.0, 0.4, 0.0],
    [0.8, 0.2, 0.8],
    [1.0, 0.8, 0.0],
];

/// A model-space normal carried into world space, renormalized.
///
/// Uses the cofactor of the model's upper 3x3, which is its inverse-transpose
/// times the determinant, so non-uniform scale keeps normals perpendicular
/// to the surface. The sign is corrected for mirroring models.
pub fn world_normal(model: Mat4, normal: Vec3) -> Vec3 {
    let linear = Mat3::from_mat4(model);
    let (c0, c1, c2) = (linear.x_axis, linear.y_axis, linear.z_axis);
    let cofactor = Mat3::from_cols(c1.cross(c2), c2.cross(c0), c0.cross(c1));
    let sign = if linear.determinant() < 0.0 { -1.0 } else { 1.0 };
    (sign * (cofactor * normal)).normalize_or_zero()
}

/// Light factor for a world-space normal.
pub fn light_factor(normal: Vec3) -> f32 {
    normal.normalize_or_zero().dot(LIGHT_DIRECTION).max(0.0) + LIGHT_FLOOR
}

/// The color the lit program writes for one fragment.
pub fn shade(uniforms: &LitUniforms, world_normal: Vec3, vertex_color: Vec3) -> Vec4 {
    let ambient = uniforms.ambient_strength * Vec3::from(uniforms.ambient_color) * light_factor(world_normal);
    let base = if uniforms.uses_custom_color() {
        Vec3::from(uniforms.mesh_color)
    } else {
        vertex_color
    };
    (ambient * base).extend(1.0)
}

/// Ambient strength, ambient color, and mesh-color choice for a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingState {
    pub ambient_strength: f32,
    pub ambient_color: Vec3,
    pub use_custom_color: bool,
    pub color_index: usize,
}

impl Default for LightingState {
    fn default() -> Self {
        Self {
            ambient_strength: 0.5,
            ambient_color: Vec3::ONE,
            use_custom_color: true,
            color_index: 0,
        }
    }
}

impl LightingState {
    pub fn new(ambient_strength: f32, color_index: usize) -> Self {
        Self {
            ambient_strength: ambient_strength.clamp(MIN_AMBIENT, MAX_AMBIENT),
            color_index: color_index % COLOR_PRESETS.len(),
            ..Self::default()
        }
    }

    pub fn increase_ambient(&mut self, step: f32) {
        self.ambient_strength = (self.ambient_strength + step).min(MAX_AMBIENT);
    }

    pub fn decrease_ambient(&mut self, step: f32) {
        self.ambient_strength = (self.ambient_strength - step).max(MIN_AMBIENT);
    }

    pub fn mesh_color(&self) -> Vec3 {
        Vec3::from(COLOR_PRESETS[self.color_index % COLOR_PRESETS.len()])
    }

    /// Advance to the next preset, wrapping around. Returns the new color.
    pub fn cycle_color(&mut self) -> Vec3 {
        self.color_index = (self.color_index + 1) % COLOR_PRESETS.len();
        self.mesh_color()
    }

    /// Switch between the preset mesh color and per-vertex colors.
    pub fn toggle_color_mode(&mut self) -> bool {
        self.use_custom_color = !self.use_custom_color;
        self.use_custom_color
    }

    pub fn color_mode_label(&self) -> &'static str {
        if self.use_custom_color {
            "custom color"
        } else {
            "vertex colors"
        }
    }

    /// Write the lighting fields of a uniform block; matrices and time are
    /// left alone.
    pub fn apply(&self, uniforms: &mut LitUniforms) {
        uniforms.ambient_strength = self.ambient_strength;
        uniforms.ambient_color = self.ambient_color.to_array();
        uniforms.mesh_color = self.mesh_color().to_array();
        uniforms.use_custom_color = u32::from(self.use_custom_color);
    }
}
