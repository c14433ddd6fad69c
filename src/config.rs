//! Configuration parameters for decomposition.

use crate::num::Float;

/// Configuration parameters for decomposing a transformation matrix.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecompositionConfig<F> {
    /// Magnitude at or below which the homogeneous scale term is considered
    /// zero, making the matrix degenerate. Basis columns are degenerate when
    /// their length after orthogonalization is at or below this tolerance
    /// times the length of the longest basis column, so uniformly scaling a
    /// matrix does not change whether it is degenerate.
    pub degeneracy_tolerance: F,
}

impl<F: Float> DecompositionConfig<F> {
    /// Creates a configuration with the given degeneracy tolerance. Negative
    /// tolerances are clamped to zero.
    pub fn with_degeneracy_tolerance(degeneracy_tolerance: F) -> Self {
        Self {
            degeneracy_tolerance: degeneracy_tolerance.max(F::ZERO),
        }
    }
}

impl<F: Float> Default for DecompositionConfig<F> {
    fn default() -> Self {
        Self {
            degeneracy_tolerance: F::default_epsilon(),
        }
    }
}
