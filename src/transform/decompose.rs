//! Decomposition of transformation matrices.

use crate::{
    config::DecompositionConfig,
    num::Float,
    transform::decomposed::{DecomposedTransform, Skew},
};
use nalgebra::{Matrix4, RowVector4, UnitQuaternion, Vector3, Vector4};
use thiserror::Error;

/// Errors that can occur when decomposing a transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecompositionError {
    /// The matrix has a vanishing homogeneous scale term, a vanishing basis
    /// column or non-finite elements, so its components are undefined.
    #[error("Matrix is degenerate and cannot be decomposed")]
    Degenerate,
}

/// Decomposes the given transformation matrix into its translation, scale,
/// rotation, skew and perspective using the default
/// [`DecompositionConfig`].
///
/// See [`decompose_with_config`].
///
/// # Errors
/// Returns [`DecompositionError::Degenerate`] if the matrix cannot be
/// decomposed.
pub fn decompose<F: Float>(
    matrix: &Matrix4<F>,
) -> Result<DecomposedTransform<F>, DecompositionError> {
    decompose_with_config(matrix, &DecompositionConfig::default())
}

/// Decomposes the given transformation matrix into its translation, scale,
/// rotation, skew and perspective.
///
/// The matrix is first normalized so that its bottom-right element is one.
/// The last row then gives the perspective, the upper three elements of the
/// fourth column the translation, and the upper-left 3x3 block is
/// orthogonalized column by column (Gram-Schmidt) to obtain the scale, the
/// skew and an orthonormal basis from which the rotation is computed. If the
/// basis is left-handed, the scale and the basis are negated so that the
/// rotation is proper.
///
/// Recomposing the result with [`compose`](crate::compose) reproduces the
/// normalized matrix.
///
/// # Errors
/// Returns [`DecompositionError::Degenerate`] if the matrix has non-finite
/// elements, if the magnitude of its bottom-right element is at or below
/// [`DecompositionConfig::degeneracy_tolerance`], if the length of a basis
/// column after orthogonalization is at or below the tolerance times the
/// length of the longest basis column, or if any resulting component would
/// be non-finite.
pub fn decompose_with_config<F: Float>(
    matrix: &Matrix4<F>,
    config: &DecompositionConfig<F>,
) -> Result<DecomposedTransform<F>, DecompositionError> {
    let tolerance = config.degeneracy_tolerance;

    if !matrix.iter().all(|element| element.is_finite()) {
        log::debug!("Cannot decompose matrix with non-finite elements");
        return Err(DecompositionError::Degenerate);
    }

    let homogeneous_scale = matrix[(3, 3)];
    if homogeneous_scale.abs() <= tolerance {
        log::debug!(
            "Cannot decompose matrix with homogeneous scale {}",
            homogeneous_scale
        );
        return Err(DecompositionError::Degenerate);
    }

    let mut local = matrix.map(|element| element / homogeneous_scale);

    let perspective = if local[(3, 0)] != F::ZERO
        || local[(3, 1)] != F::ZERO
        || local[(3, 2)] != F::ZERO
    {
        let perspective = local.row(3).transpose();
        local.set_row(3, &RowVector4::new(F::ZERO, F::ZERO, F::ZERO, F::ONE));
        perspective
    } else {
        Vector4::new(F::ZERO, F::ZERO, F::ZERO, F::ONE)
    };

    let translation: Vector3<F> = local.fixed_view::<3, 1>(0, 3).into_owned();
    local.fixed_view_mut::<3, 1>(0, 3).fill(F::ZERO);

    let mut column_x: Vector3<F> = local.fixed_view::<3, 1>(0, 0).into_owned();
    let mut column_y: Vector3<F> = local.fixed_view::<3, 1>(0, 1).into_owned();
    let mut column_z: Vector3<F> = local.fixed_view::<3, 1>(0, 2).into_owned();

    let reference_length = column_x.norm().max(column_y.norm()).max(column_z.norm());
    if !reference_length.is_finite() {
        log::debug!("Cannot decompose matrix with basis column lengths out of range");
        return Err(DecompositionError::Degenerate);
    }
    // Column lengths are compared relative to the longest column
    let tolerance = tolerance * reference_length;

    let mut scale_x = normalize_column(&mut column_x, tolerance, "x")?;

    let mut skew_xy = column_x.dot(&column_y);
    column_y -= column_x * skew_xy;

    let mut scale_y = normalize_column(&mut column_y, tolerance, "y")?;
    skew_xy /= scale_y;

    let mut skew_xz = column_x.dot(&column_z);
    column_z -= column_x * skew_xz;
    let mut skew_yz = column_y.dot(&column_z);
    column_z -= column_y * skew_yz;

    let mut scale_z = normalize_column(&mut column_z, tolerance, "z")?;
    skew_xz /= scale_z;
    skew_yz /= scale_z;

    // A left-handed basis cannot be represented by a rotation, so the flip is
    // moved into the scale
    if column_x.dot(&column_y.cross(&column_z)) < F::ZERO {
        scale_x = -scale_x;
        scale_y = -scale_y;
        scale_z = -scale_z;
        column_x = -column_x;
        column_y = -column_y;
        column_z = -column_z;
    }

    let rotation = UnitQuaternion::from_basis_unchecked(&[column_x, column_y, column_z]);

    let decomposed = DecomposedTransform {
        translation,
        scale: Vector3::new(scale_x, scale_y, scale_z),
        rotation,
        skew: Skew::new(skew_xy, skew_xz, skew_yz),
        perspective,
    };

    if !decomposed.is_finite() {
        log::debug!("Decomposition of matrix has non-finite components");
        return Err(DecompositionError::Degenerate);
    }

    log::trace!("Decomposed matrix into {:?}", decomposed);

    Ok(decomposed)
}

/// Normalizes the given basis column in place and returns its original
/// length.
fn normalize_column<F: Float>(
    column: &mut Vector3<F>,
    tolerance: F,
    axis: &str,
) -> Result<F, DecompositionError> {
    let length = column.norm();
    if !length.is_finite() || length <= tolerance {
        log::debug!(
            "Cannot decompose matrix with vanishing {} basis column (length {})",
            axis,
            length
        );
        return Err(DecompositionError::Degenerate);
    }
    *column /= length;
    Ok(length)
}
