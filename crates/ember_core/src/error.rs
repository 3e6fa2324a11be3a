use ember_math::Vec3;
use thiserror::Error;

/// Errors that can occur while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error(
        "triangle {primitive_id} references material {material_id}, \
         but the scene only has {material_count} materials"
    )]
    InvalidMaterialId {
        primitive_id: usize,
        material_id: u32,
        material_count: usize,
    },

    #[error("too many triangles: {0} (primitive ids must stay below u32::MAX)")]
    TooManyTriangles(usize),

    #[error("camera direction {direction} cannot form a basis with up vector {up}")]
    DegenerateCamera { direction: Vec3, up: Vec3 },

    #[error("camera {name} must be positive and finite, got {value}")]
    InvalidCamera { name: &'static str, value: f32 },
}

pub type SceneResult<T> = Result<T, SceneError>;
