//! Floating point scalars.

use nalgebra as na;
use num_traits as nt;

/// Floating point types that matrices and their components can be made of.
pub trait Float: Copy + nt::FloatConst + na::RealField {
    const ZERO: Self;
    const ONE: Self;
    /// The number of degrees in half a turn (π radians).
    const HALF_TURN_DEGREES: Self;
}

macro_rules! impl_float {
    ($f:ty) => {
        impl Float for $f {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const HALF_TURN_DEGREES: Self = 180.0;
        }
    };
}

impl_float!(f32);
impl_float!(f64);
