//! Error types, one enum per concern.

use thiserror::Error;

/// Invalid shape parameters. Raised before any geometry is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("radial_divisions must be at least 3, got {0}")]
    TooFewRadialDivisions(u32),

    #[error("height_divisions must be at least 1, got {0}")]
    TooFewHeightDivisions(u32),

    #[error("polygon needs at least 3 sides, got {0}")]
    TooFewSides(u32),

    #[error("surface grid needs at least one division per axis, got {u}x{v}")]
    EmptyGrid { u: u32, v: u32 },

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },

    #[error("top and bottom radius are both zero")]
    DegenerateProfile,

    #[error("at most {max} subdivision levels supported, got {requested}")]
    TooManySubdivisions { requested: u32, max: u32 },

    #[error("cannot allocate {vertices} vertices")]
    AllocationFailed { vertices: usize },

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Structural problems with vertex/index data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),

    #[error("triangle {triangle} references vertex {index}, mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("{0} vertices exceed the u32 index range")]
    TooManyVertices(usize),
}

/// A uniform set that cannot be turned into a uniform block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UniformError {
    #[error("uniform `{0}` is not set")]
    Missing(&'static str),

    #[error("uniform `{0}` is not part of the lit program interface")]
    Unknown(String),

    #[error("uniform `{name}` expects {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// GPU setup or pipeline failures. Fatal at startup.
#[cfg(feature = "render")]
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("shader `{label}` failed validation: {message}")]
    Shader { label: String, message: String },

    #[error(transparent)]
    Uniform(#[from] UniformError),

    #[error(transparent)]
    Mesh(#[from] MeshError),
}
