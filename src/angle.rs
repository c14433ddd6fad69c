//! Angle units.

use crate::num::Float;
use approx::{AbsDiffEq, RelativeEq};

/// An angle in some unit.
pub trait Angle<F>: Copy {
    /// The value of the angle in degrees.
    fn degrees(self) -> F;

    /// The value of the angle in radians.
    fn radians(self) -> F;
}

/// An angle in degrees.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Degrees<F>(pub F);

/// An angle in radians.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Radians<F>(pub F);

impl<F: Float> Angle<F> for Degrees<F> {
    fn degrees(self) -> F {
        self.0
    }

    fn radians(self) -> F {
        Radians::from(self).0
    }
}

impl<F: Float> Angle<F> for Radians<F> {
    fn degrees(self) -> F {
        Degrees::from(self).0
    }

    fn radians(self) -> F {
        self.0
    }
}

impl<F: Float> From<Radians<F>> for Degrees<F> {
    fn from(radians: Radians<F>) -> Self {
        Self(radians.0 * F::HALF_TURN_DEGREES * F::FRAC_1_PI())
    }
}

impl<F: Float> From<Degrees<F>> for Radians<F> {
    fn from(degrees: Degrees<F>) -> Self {
        Self(degrees.0 * F::PI() / F::HALF_TURN_DEGREES)
    }
}

macro_rules! impl_approx_for_angle {
    ($angle:ident) => {
        impl<F: Float> AbsDiffEq for $angle<F> {
            type Epsilon = F;

            fn default_epsilon() -> F {
                F::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
                self.0.abs_diff_eq(&other.0, epsilon)
            }
        }

        impl<F: Float> RelativeEq for $angle<F> {
            fn default_max_relative() -> F {
                F::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: F, max_relative: F) -> bool {
                self.0.relative_eq(&other.0, epsilon, max_relative)
            }
        }
    };
}

impl_approx_for_angle!(Degrees);
impl_approx_for_angle!(Radians);
