//! Recomposition of transformation matrices.

use crate::{
    num::Float,
    transform::{DecomposedTransform, TransformOps},
};
use nalgebra::Matrix4;

/// Merges the components of the given decomposed transform into a
/// transformation matrix.
///
/// The upper-left 3x3 block becomes `R * K * S`, where `R` is the rotation,
/// `K` the unit upper-triangular shear and `S` the diagonal scaling, the
/// fourth column holds the translation and the last row is set to the
/// perspective. This is the exact reverse of the order in which
/// [`decompose`](crate::decompose) extracts the components.
///
/// The rotation is used as is. A quaternion built with
/// [`UnitQuaternion::new_unchecked`](nalgebra::UnitQuaternion::new_unchecked)
/// that is not of unit length yields a matrix that is not a pure rotation
/// times shear and scale.
pub fn compose<F: Float>(decomposed: &DecomposedTransform<F>) -> Matrix4<F> {
    Matrix4::identity()
        .translated_by(&decomposed.translation)
        .rotated_by(&decomposed.rotation)
        .skewed_by(&decomposed.skew)
        .scaled_by(&decomposed.scale)
        .with_perspective(&decomposed.perspective)
}
