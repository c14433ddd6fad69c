//! Decomposition of 4x4 transformation matrices into translation, scale,
//! rotation, skew and perspective, and recomposition of those components into
//! a matrix.
//!
//! Matrices are [`nalgebra::Matrix4`] values in column-major storage using the
//! column-vector convention: translation lives in the fourth column and
//! perspective in the fourth row.

mod macros;

pub mod angle;
pub mod component;
pub mod config;
pub mod owner;
pub mod transform;

mod num;

pub use component::{
    ComponentAccessor, TransformComponent, TransformField, component, with_component,
};
pub use config::DecompositionConfig;
pub use num::Float;
pub use owner::{ActionSuppressionGuard, TransformOwner};
pub use transform::{
    DecomposedTransform, DecompositionError, EulerAngles, Skew, TransformOps, compose, decompose,
    decompose_with_config, matrix_from_column_major, matrix_to_column_major,
};
