//! Incremental operations on transformation matrices.

use crate::{
    num::Float,
    transform::{EulerAngles, Skew},
};
use nalgebra::{Matrix4, UnitQuaternion, Vector3, Vector4};

/// Operations applying a single transformation to a matrix.
///
/// Translation, rotation, skew and scaling are post-multiplied, so they act
/// in the local frame of the existing transform: the new transformation is
/// applied to a point before the existing one. Setting the perspective
/// replaces the last row instead.
pub trait TransformOps<F: Float> {
    /// Returns a copy translated by the given amount.
    fn translated_by(&self, translation: &Vector3<F>) -> Self;

    /// Returns a copy with the first three columns scaled by the given
    /// factors.
    fn scaled_by(&self, scale: &Vector3<F>) -> Self;

    /// Returns a copy rotated by the given rotation.
    fn rotated_by(&self, rotation: &UnitQuaternion<F>) -> Self;

    /// Returns a copy rotated by the given Euler angles.
    fn rotated_by_euler(&self, angles: &EulerAngles<F>) -> Self;

    /// Returns a copy sheared by the given skew.
    fn skewed_by(&self, skew: &Skew<F>) -> Self;

    /// Returns a copy with the last row replaced by the given perspective.
    fn with_perspective(&self, perspective: &Vector4<F>) -> Self;
}

impl<F: Float> TransformOps<F> for Matrix4<F> {
    fn translated_by(&self, translation: &Vector3<F>) -> Self {
        self * Matrix4::new_translation(translation)
    }

    fn scaled_by(&self, scale: &Vector3<F>) -> Self {
        self * Matrix4::new_nonuniform_scaling(scale)
    }

    fn rotated_by(&self, rotation: &UnitQuaternion<F>) -> Self {
        self * rotation.to_homogeneous()
    }

    fn rotated_by_euler(&self, angles: &EulerAngles<F>) -> Self {
        self.rotated_by(&angles.to_quaternion())
    }

    fn skewed_by(&self, skew: &Skew<F>) -> Self {
        if skew.is_zero() {
            return *self;
        }
        let mut shear = Matrix4::identity();
        shear[(0, 1)] = skew.xy;
        shear[(0, 2)] = skew.xz;
        shear[(1, 2)] = skew.yz;
        self * shear
    }

    fn with_perspective(&self, perspective: &Vector4<F>) -> Self {
        let mut matrix = *self;
        matrix.set_row(3, &perspective.transpose());
        matrix
    }
}
