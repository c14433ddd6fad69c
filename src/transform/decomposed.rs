//! Transformation components.

use crate::{num::Float, transform::compose};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Matrix4, UnitQuaternion, Vector3, Vector4};
use std::fmt;

/// Shear factors of a transform.
///
/// Each factor tilts one basis axis towards another: `xy` adds a multiple of
/// the x-axis to the y-axis, `xz` a multiple of the x-axis to the z-axis and
/// `yz` a multiple of the y-axis to the z-axis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Skew<F> {
    pub xy: F,
    pub xz: F,
    pub yz: F,
}

/// A transformation matrix broken down into its translation, scale, rotation,
/// skew and perspective components.
///
/// Obtained from [`decompose`](crate::decompose) and turned back into a matrix
/// with [`recomposed`](Self::recomposed).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecomposedTransform<F: Float> {
    pub translation: Vector3<F>,
    /// Scale factors along the (skewed) basis axes. Either all positive or,
    /// for transforms that flip handedness, all negative.
    pub scale: Vector3<F>,
    pub rotation: UnitQuaternion<F>,
    pub skew: Skew<F>,
    /// The last row of the matrix. `(0, 0, 0, 1)` for affine transforms.
    pub perspective: Vector4<F>,
}

impl<F: Float> Skew<F> {
    pub fn new(xy: F, xz: F, yz: F) -> Self {
        Self { xy, xz, yz }
    }

    /// Creates a skew with all factors zero.
    pub fn zero() -> Self {
        Self::new(F::ZERO, F::ZERO, F::ZERO)
    }

    /// Whether all shear factors are zero.
    pub fn is_zero(&self) -> bool {
        self.xy == F::ZERO && self.xz == F::ZERO && self.yz == F::ZERO
    }
}

impl<F: Float> Default for Skew<F> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<F: Float> AbsDiffEq for Skew<F> {
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        self.xy.abs_diff_eq(&other.xy, epsilon)
            && self.xz.abs_diff_eq(&other.xz, epsilon)
            && self.yz.abs_diff_eq(&other.yz, epsilon)
    }
}

impl<F: Float> RelativeEq for Skew<F> {
    fn default_max_relative() -> F {
        F::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: F, max_relative: F) -> bool {
        self.xy.relative_eq(&other.xy, epsilon, max_relative)
            && self.xz.relative_eq(&other.xz, epsilon, max_relative)
            && self.yz.relative_eq(&other.yz, epsilon, max_relative)
    }
}

impl<F: Float> fmt::Display for Skew<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(xy: {}, xz: {}, yz: {})", self.xy, self.xz, self.yz)
    }
}

impl<F: Float> DecomposedTransform<F> {
    /// Creates the decomposition of the identity matrix.
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            scale: Vector3::repeat(F::ONE),
            rotation: UnitQuaternion::identity(),
            skew: Skew::zero(),
            perspective: Vector4::new(F::ZERO, F::ZERO, F::ZERO, F::ONE),
        }
    }

    /// Merges the components into a transformation matrix.
    pub fn recomposed(&self) -> Matrix4<F> {
        compose(self)
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.translation.iter().all(|value| value.is_finite())
            && self.scale.iter().all(|value| value.is_finite())
            && self.rotation.coords.iter().all(|value| value.is_finite())
            && self.skew.xy.is_finite()
            && self.skew.xz.is_finite()
            && self.skew.yz.is_finite()
            && self.perspective.iter().all(|value| value.is_finite())
    }
}

impl<F: Float> Default for DecomposedTransform<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: Float> AbsDiffEq for DecomposedTransform<F> {
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::default_epsilon()
    }

    /// The rotations are compared up to the sign of the quaternion, as `q`
    /// and `-q` represent the same rotation.
    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        self.translation.abs_diff_eq(&other.translation, epsilon)
            && self.scale.abs_diff_eq(&other.scale, epsilon)
            && (self.rotation.abs_diff_eq(&other.rotation, epsilon)
                || self
                    .rotation
                    .into_inner()
                    .abs_diff_eq(&(-other.rotation.into_inner()), epsilon))
            && self.skew.abs_diff_eq(&other.skew, epsilon)
            && self.perspective.abs_diff_eq(&other.perspective, epsilon)
    }
}

impl<F: Float> RelativeEq for DecomposedTransform<F> {
    fn default_max_relative() -> F {
        F::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: F, max_relative: F) -> bool {
        self.translation
            .relative_eq(&other.translation, epsilon, max_relative)
            && self.scale.relative_eq(&other.scale, epsilon, max_relative)
            && (self
                .rotation
                .relative_eq(&other.rotation, epsilon, max_relative)
                || self.rotation.into_inner().relative_eq(
                    &(-other.rotation.into_inner()),
                    epsilon,
                    max_relative,
                ))
            && self.skew.relative_eq(&other.skew, epsilon, max_relative)
            && self
                .perspective
                .relative_eq(&other.perspective, epsilon, max_relative)
    }
}

impl<F: Float> fmt::Display for DecomposedTransform<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rotation = self.rotation.quaternion();
        writeln!(
            f,
            "translation: ({}, {}, {})",
            self.translation.x, self.translation.y, self.translation.z
        )?;
        writeln!(
            f,
            "scale:       ({}, {}, {})",
            self.scale.x, self.scale.y, self.scale.z
        )?;
        writeln!(
            f,
            "rotation:    (x: {}, y: {}, z: {}, w: {})",
            rotation.i, rotation.j, rotation.k, rotation.w
        )?;
        writeln!(f, "skew:        {}", self.skew)?;
        write!(
            f,
            "perspective: ({}, {}, {}, {})",
            self.perspective.x, self.perspective.y, self.perspective.z, self.perspective.w
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_abs_diff_ne};
    use nalgebra::{Quaternion, Vector3};

    #[test]
    fn identity_decomposition_has_neutral_components() {
        let identity = DecomposedTransform::<f64>::identity();
        assert_eq!(identity.translation, Vector3::zeros());
        assert_eq!(identity.scale, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(identity.rotation, UnitQuaternion::identity());
        assert!(identity.skew.is_zero());
        assert_eq!(identity.perspective, Vector4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn decomposition_with_infinite_scale_is_not_finite() {
        let decomposed = DecomposedTransform {
            scale: Vector3::new(f64::INFINITY, 1.0, 1.0),
            ..DecomposedTransform::identity()
        };
        assert!(DecomposedTransform::<f64>::identity().is_finite());
        assert!(!decomposed.is_finite());
    }

    #[test]
    fn default_decomposition_is_identity() {
        assert_eq!(
            DecomposedTransform::<f32>::default(),
            DecomposedTransform::identity()
        );
    }

    #[test]
    fn decompositions_with_opposite_quaternion_signs_are_approximately_equal() {
        let rotation = UnitQuaternion::from_euler_angles(0.3, -0.2, 1.1);
        let decomposed = DecomposedTransform {
            rotation,
            ..DecomposedTransform::<f64>::identity()
        };
        let negated = DecomposedTransform {
            rotation: UnitQuaternion::new_unchecked(-rotation.into_inner()),
            ..decomposed
        };
        assert_abs_diff_eq!(decomposed, negated, epsilon = 1e-12);
    }

    #[test]
    fn decompositions_with_different_skews_are_not_approximately_equal() {
        let decomposed = DecomposedTransform::<f64>::identity();
        let skewed = DecomposedTransform {
            skew: Skew::new(0.0, 0.1, 0.0),
            ..decomposed
        };
        assert_abs_diff_ne!(decomposed, skewed, epsilon = 1e-3);
    }

    #[test]
    fn decompositions_with_different_rotations_are_not_approximately_equal() {
        let decomposed = DecomposedTransform::<f64>::identity();
        let rotated = DecomposedTransform {
            rotation: UnitQuaternion::from_quaternion(Quaternion::new(0.0, 1.0, 0.0, 0.0)),
            ..decomposed
        };
        assert_abs_diff_ne!(decomposed, rotated, epsilon = 1e-3);
    }
}
