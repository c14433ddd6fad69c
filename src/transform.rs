//! Decomposition and recomposition of transformation matrices.

mod compose;
mod decompose;
mod decomposed;
mod euler;
mod ops;

pub use compose::compose;
pub use decompose::{DecompositionError, decompose, decompose_with_config};
pub use decomposed::{DecomposedTransform, Skew};
pub use euler::EulerAngles;
pub use ops::TransformOps;

use crate::num::Float;
use nalgebra::Matrix4;

/// Creates a matrix from 16 values in column-major order, which is also the
/// memory order of a row-major matrix using the row-vector convention.
pub fn matrix_from_column_major<F: Float>(values: &[F; 16]) -> Matrix4<F> {
    Matrix4::from_column_slice(values)
}

/// Returns the 16 values of the given matrix in column-major order.
pub fn matrix_to_column_major<F: Float>(matrix: &Matrix4<F>) -> [F; 16] {
    let mut values = [F::ZERO; 16];
    values.copy_from_slice(matrix.as_slice());
    values
}
