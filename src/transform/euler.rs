//! Euler angle view of rotations.

use crate::{
    angle::{Angle, Radians},
    num::Float,
};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::UnitQuaternion;
use std::fmt;

/// A rotation expressed as angles in radians about the x-, y- and z-axis.
///
/// The rotations are extrinsic and applied in the order x, then y, then z, so
/// the rotation matrix is `Rz(z) * Ry(y) * Rx(x)`.
///
/// Converting a quaternion to Euler angles and back gives the original
/// rotation, and converting angles with `x` and `z` in `(-π, π]` and `y` in
/// `(-π/2, π/2)` to a quaternion and back gives the original angles. When `y`
/// is at `±π/2` the x- and z-axis rotations act about the same axis (gimbal
/// lock) and only their combination is recoverable: `z` is then reported as
/// zero and the full remaining rotation is attributed to `x`. The rotation is
/// still preserved, but the original angles are not.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EulerAngles<F> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> EulerAngles<F> {
    /// Creates Euler angles from the given radian values.
    pub fn new(x: F, y: F, z: F) -> Self {
        Self { x, y, z }
    }

    /// Creates Euler angles from angles in any unit.
    pub fn from_angles<A: Angle<F>>(x: A, y: A, z: A) -> Self {
        Self::new(x.radians(), y.radians(), z.radians())
    }

    /// Creates zero Euler angles.
    pub fn zero() -> Self {
        Self::new(F::ZERO, F::ZERO, F::ZERO)
    }

    /// Computes the Euler angles of the given rotation.
    pub fn from_quaternion(rotation: &UnitQuaternion<F>) -> Self {
        let m = rotation.to_rotation_matrix().into_inner();

        // The first column and last row hold the x- and z-rotations scaled by
        // cos(y), and m[(2, 0)] is -sin(y)
        let cos_y = (m[(0, 0)] * m[(0, 0)] + m[(1, 0)] * m[(1, 0)]).sqrt();
        let sin_y = -m[(2, 0)];

        if cos_y <= F::default_epsilon().sqrt() {
            // Gimbal lock: only x - z (for y = π/2) or x + z (for y = -π/2)
            // is determined, so all of it goes into x
            if sin_y > F::ZERO {
                Self::new(m[(0, 1)].atan2(m[(0, 2)]), F::FRAC_PI_2(), F::ZERO)
            } else {
                Self::new((-m[(0, 1)]).atan2(-m[(0, 2)]), -F::FRAC_PI_2(), F::ZERO)
            }
        } else {
            Self::new(
                m[(2, 1)].atan2(m[(2, 2)]),
                sin_y.atan2(cos_y),
                m[(1, 0)].atan2(m[(0, 0)]),
            )
        }
    }

    /// Computes the rotation corresponding to these Euler angles.
    pub fn to_quaternion(&self) -> UnitQuaternion<F> {
        UnitQuaternion::from_euler_angles(self.x, self.y, self.z)
    }

    /// Returns the angles as [`Radians`].
    pub fn as_radians(&self) -> [Radians<F>; 3] {
        [Radians(self.x), Radians(self.y), Radians(self.z)]
    }

    /// Whether the y-angle is within the given tolerance of `±π/2`, where the
    /// conversion from a quaternion loses one degree of freedom.
    pub fn is_near_gimbal_lock(&self, tolerance: F) -> bool {
        (self.y.abs() - F::FRAC_PI_2()).abs() <= tolerance
    }
}

impl<F: Float> Default for EulerAngles<F> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<F: Float> From<UnitQuaternion<F>> for EulerAngles<F> {
    fn from(rotation: UnitQuaternion<F>) -> Self {
        Self::from_quaternion(&rotation)
    }
}

impl<F: Float> From<EulerAngles<F>> for UnitQuaternion<F> {
    fn from(angles: EulerAngles<F>) -> Self {
        angles.to_quaternion()
    }
}

impl<F: Float> AbsDiffEq for EulerAngles<F> {
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl<F: Float> RelativeEq for EulerAngles<F> {
    fn default_max_relative() -> F {
        F::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: F, max_relative: F) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

impl<F: Float> fmt::Display for EulerAngles<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {}, y: {}, z: {}) rad", self.x, self.y, self.z)
    }
}
