//! # Uniforms — The Lit Program's Per-Draw Inputs
//!
//! The lit program reads eight named uniforms. Frame drivers can set them
//! by name through a [`UniformSet`] (handy for JSON-configured scenes and
//! tools) or fill the GPU block [`LitUniforms`] directly.
//!
//! ## Block Layout
//!
//! ```text
//! LitUniforms (240 bytes, group 0 binding 0)
//! ┌──────────────────────────────┬────────┬─────────────────────────┐
//! │ field                        │ offset │ uniform name            │
//! ├──────────────────────────────┼────────┼─────────────────────────┤
//! │ model: mat4x4<f32>           │      0 │ model                   │
//! │ view: mat4x4<f32>            │     64 │ view                    │
//! │ projection: mat4x4<f32>      │    128 │ projection              │
//! │ ambient_color: vec3<f32>     │    192 │ ambientColor            │
//! │ ambient_strength: f32        │    204 │ ambientStrength         │
//! │ mesh_color: vec3<f32>        │    208 │ meshColor               │
//! │ use_custom_color: u32        │    220 │ useCustomColor          │
//! │ time: f32                    │    224 │ time                    │
//! │ (padding to 16-byte stride)  │    228 │                         │
//! └──────────────────────────────┴────────┴─────────────────────────┘
//! ```
//!
//! Each `vec3` is followed by a scalar so the pair fills a 16-byte slot, the
//! same packing WGSL gives the struct in `shader_lit.wgsl`.

use std::collections::BTreeMap;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::UniformError;
use crate::math::{Mat4, Vec2, Vec3, Vec4};

pub const MODEL: &str = "model";
pub const VIEW: &str = "view";
pub const PROJECTION: &str = "projection";
pub const TIME: &str = "time";
pub const AMBIENT_STRENGTH: &str = "ambientStrength";
pub const AMBIENT_COLOR: &str = "ambientColor";
pub const MESH_COLOR: &str = "meshColor";
pub const USE_CUSTOM_COLOR: &str = "useCustomColor";

/// Every identifier the lit program declares.
pub const LIT_UNIFORM_NAMES: [&str; 8] = [
    MODEL,
    VIEW,
    PROJECTION,
    TIME,
    AMBIENT_STRENGTH,
    AMBIENT_COLOR,
    MESH_COLOR,
    USE_CUSTOM_COLOR,
];

/// A typed uniform value.
///
/// Serialized as `{ "type": "vec3", "value": [1.0, 0.5, 0.0] }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
    /// A texture sampler bound to texture unit `unit`.
    Sampler { unit: u32 },
}

impl UniformValue {
    /// The GLSL-style type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Vec4(_) => "vec4",
            Self::Mat4(_) => "mat4",
            Self::Sampler { .. } => "sampler2D",
        }
    }
}

impl From<bool> for UniformValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        Self::Mat4(v)
    }
}

/// Named uniform values for one draw.
///
/// Ordered by name so serialized sets are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniformSet {
    values: BTreeMap<String, UniformValue>,
}

macro_rules! typed_getter {
    ($fn_name:ident, $variant:ident, $ty:ty, $expected:literal) => {
        pub fn $fn_name(&self, name: &'static str) -> Result<$ty, UniformError> {
            match self.values.get(name) {
                Some(UniformValue::$variant(v)) => Ok(*v),
                Some(other) => Err(UniformError::TypeMismatch {
                    name: name.to_string(),
                    expected: $expected,
                    found: other.type_name(),
                }),
                None => Err(UniformError::Missing(name)),
            }
        }
    };
}

impl UniformSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a uniform, returning the value it replaced.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<UniformValue>) -> Option<UniformValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<UniformValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<UniformValue> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    typed_getter!(flag, Bool, bool, "bool");
    typed_getter!(float, Float, f32, "float");
    typed_getter!(vec3, Vec3, Vec3, "vec3");
    typed_getter!(mat4, Mat4, Mat4, "mat4");

    /// Names in this set the lit program does not declare.
    pub fn unknown_names(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|name| !LIT_UNIFORM_NAMES.contains(name))
    }
}

impl FromIterator<(String, UniformValue)> for UniformSet {
    fn from_iter<I: IntoIterator<Item = (String, UniformValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// The lit program's uniform block, ready for `queue.write_buffer`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LitUniforms {
    pub model: [[f32; 4]; 4],      // 64 bytes
    pub view: [[f32; 4]; 4],       // 64 bytes
    pub projection: [[f32; 4]; 4], // 64 bytes
    pub ambient_color: [f32; 3],   // 12 bytes
    pub ambient_strength: f32,     // 4 bytes
    pub mesh_color: [f32; 3],      // 12 bytes
    pub use_custom_color: u32,     // 4 bytes
    pub time: f32,                 // 4 bytes
    pub _padding: [f32; 3],        // 12 bytes → total 240
}

impl Default for LitUniforms {
    fn default() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            model: identity,
            view: identity,
            projection: identity,
            ambient_color: [1.0; 3],
            ambient_strength: 1.0,
            mesh_color: [1.0; 3],
            use_custom_color: 0,
            time: 0.0,
            _padding: [0.0; 3],
        }
    }
}

impl LitUniforms {
    pub fn set_model(&mut self, model: Mat4) {
        self.model = model.to_cols_array_2d();
    }

    pub fn set_view(&mut self, view: Mat4) {
        self.view = view.to_cols_array_2d();
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection.to_cols_array_2d();
    }

    pub fn uses_custom_color(&self) -> bool {
        self.use_custom_color != 0
    }

    /// Pack a named set into the block.
    ///
    /// Every identifier except `time` must be present with its declared
    /// type; `time` defaults to zero. Names the program does not declare are
    /// rejected rather than silently dropped.
    pub fn from_set(set: &UniformSet) -> Result<Self, UniformError> {
        if let Some(name) = set.unknown_names().next() {
            return Err(UniformError::Unknown(name.to_string()));
        }
        let time = match set.get(TIME) {
            None => 0.0,
            Some(_) => set.float(TIME)?,
        };
        Ok(Self {
            model: set.mat4(MODEL)?.to_cols_array_2d(),
            view: set.mat4(VIEW)?.to_cols_array_2d(),
            projection: set.mat4(PROJECTION)?.to_cols_array_2d(),
            ambient_color: set.vec3(AMBIENT_COLOR)?.to_array(),
            ambient_strength: set.float(AMBIENT_STRENGTH)?,
            mesh_color: set.vec3(MESH_COLOR)?.to_array(),
            use_custom_color: u32::from(set.flag(USE_CUSTOM_COLOR)?),
            time,
            _padding: [0.0; 3],
        })
    }

    /// Unpack the block into a named set holding all eight identifiers.
    pub fn to_set(&self) -> UniformSet {
        UniformSet::new()
            .with(MODEL, Mat4::from_cols_array_2d(&self.model))
            .with(VIEW, Mat4::from_cols_array_2d(&self.view))
            .with(PROJECTION, Mat4::from_cols_array_2d(&self.projection))
            .with(TIME, self.time)
            .with(AMBIENT_STRENGTH, self.ambient_strength)
            .with(AMBIENT_COLOR, Vec3::from(self.ambient_color))
            .with(MESH_COLOR, Vec3::from(self.mesh_color))
            .with(USE_CUSTOM_COLOR, self.uses_custom_color())
    }
}

impl TryFrom<&UniformSet> for LitUniforms {
    type Error = UniformError;

    fn try_from(set: &UniformSet) -> Result<Self, Self::Error> {
        Self::from_set(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    fn full_set() -> UniformSet {
        UniformSet::new()
            .with(MODEL, Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)))
            .with(VIEW, Mat4::IDENTITY)
            .with(PROJECTION, Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0))
            .with(TIME, 4.5_f32)
            .with(AMBIENT_STRENGTH, 0.5_f32)
            .with(AMBIENT_COLOR, Vec3::ONE)
            .with(MESH_COLOR, Vec3::new(0.0, 0.7, 1.0))
            .with(USE_CUSTOM_COLOR, true)
    }

    #[test]
    fn block_matches_wgsl_packing() {
        assert_eq!(size_of::<LitUniforms>(), 240);
        assert_eq!(offset_of!(LitUniforms, view), 64);
        assert_eq!(offset_of!(LitUniforms, projection), 128);
        assert_eq!(offset_of!(LitUniforms, ambient_color), 192);
        assert_eq!(offset_of!(LitUniforms, ambient_strength), 204);
        assert_eq!(offset_of!(LitUniforms, mesh_color), 208);
        assert_eq!(offset_of!(LitUniforms, use_custom_color), 220);
        assert_eq!(offset_of!(LitUniforms, time), 224);
    }

    #[test]
    fn set_converts_to_block_and_back() {
        let set = full_set();
        let block = LitUniforms::from_set(&set).unwrap();
        assert_eq!(block.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(block.use_custom_color, 1);
        assert_eq!(block.time, 4.5);
        assert_eq!(block.to_set(), set);
    }

    #[test]
    fn time_is_optional() {
        let mut set = full_set();
        set.remove(TIME);
        assert_eq!(LitUniforms::from_set(&set).unwrap().time, 0.0);
    }

    #[test]
    fn missing_uniform_is_reported() {
        let mut set = full_set();
        set.remove(MESH_COLOR);
        assert_eq!(LitUniforms::from_set(&set).unwrap_err(), UniformError::Missing(MESH_COLOR));
    }

    #[test]
    fn wrong_type_is_reported() {
        let set = full_set().with(AMBIENT_STRENGTH, Vec3::ONE);
        assert_eq!(
            LitUniforms::from_set(&set).unwrap_err(),
            UniformError::TypeMismatch {
                name: AMBIENT_STRENGTH.to_string(),
                expected: "float",
                found: "vec3",
            }
        );

        let set = full_set().with(USE_CUSTOM_COLOR, 1_i32);
        assert!(matches!(
            LitUniforms::try_from(&set),
            Err(UniformError::TypeMismatch { found: "int", .. })
        ));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let set = full_set().with("texture1", UniformValue::Sampler { unit: 0 });
        assert_eq!(
            LitUniforms::from_set(&set).unwrap_err(),
            UniformError::Unknown("texture1".to_string())
        );
    }

    #[test]
    fn set_round_trips_through_json() {
        let set = full_set();
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.contains(r#""useCustomColor":{"type":"bool","value":true}"#));
        let back: UniformSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn default_block_is_identity_and_vertex_colored() {
        let block = LitUniforms::default();
        assert_eq!(Mat4::from_cols_array_2d(&block.model), Mat4::IDENTITY);
        assert!(!block.uses_custom_color());
    }
}
