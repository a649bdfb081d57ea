//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) types so users don't need to
//! depend on it directly. [`Transform`] places a sub-mesh (a cap, a marker)
//! inside a parent mesh and builds model matrices for the lit shader.

pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// Determinant magnitude below which a transform is treated as singular.
const SINGULAR_EPSILON: f32 = 1e-8;

/// A 3D transform: translation, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform (origin, no rotation, uniform scale of 1).
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Rotation of `angle` radians about the X axis, at the origin.
    pub fn from_rotation_x(angle: f32) -> Self {
        Self {
            rotation: Quat::from_rotation_x(angle),
            ..Self::IDENTITY
        }
    }

    /// Return a copy with the rotation replaced.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Return a copy with the translation replaced.
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Return a copy with uniform scale applied.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Compute the 4x4 model matrix (scale, then rotate, then translate).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Inverse-transpose of the upper 3x3, used to carry normals through
    /// non-uniform scale. `None` if the transform collapses a dimension.
    pub fn normal_matrix(&self) -> Option<Mat3> {
        let linear = Mat3::from_mat4(self.matrix());
        if linear.determinant().abs() < SINGULAR_EPSILON {
            return None;
        }
        Some(linear.inverse().transpose())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_about_x_maps_z_to_y() {
        let t = Transform::from_rotation_x(-FRAC_PI_2);
        let n = t.matrix().transform_vector3(Vec3::Z);
        assert!(n.abs_diff_eq(Vec3::Y, 1e-6), "got {n}");
    }

    #[test]
    fn zero_scale_has_no_normal_matrix() {
        let t = Transform::IDENTITY.with_scale(0.0);
        assert!(t.normal_matrix().is_none());
    }

    #[test]
    fn normal_matrix_of_rotation_is_the_rotation() {
        let t = Transform::from_rotation_x(0.3);
        let n = t.normal_matrix().unwrap();
        assert!(n.abs_diff_eq(Mat3::from_quat(t.rotation), 1e-5));
    }
}
