//! Decomposition and recomposition tests.

use approx::{abs_diff_eq, assert_abs_diff_eq};
use decomposed::{
    DecomposedTransform, DecompositionError, EulerAngles, Skew, TransformOps, compose, decompose,
    matrix_from_column_major, matrix_to_column_major,
};
use nalgebra::{Matrix4, UnitQuaternion, Vector3, Vector4};
use proptest::prelude::*;
use std::f64::consts::PI;

#[test]
fn identity_round_trips_exactly() {
    let decomposed = decompose(&Matrix4::<f64>::identity()).unwrap();
    assert_eq!(decomposed, DecomposedTransform::identity());
    assert_eq!(compose(&decomposed), Matrix4::identity());
}

#[test]
fn platform_buffer_round_trips_through_decomposition() {
    // A row-major, row-vector platform matrix translating by (5, 6, 7) after
    // scaling x by 2, laid out m11..m44
    let values = [
        2.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        5.0, 6.0, 7.0, 1.0,
    ];

    let decomposed = decompose(&matrix_from_column_major(&values)).unwrap();

    assert_abs_diff_eq!(decomposed.translation, Vector3::new(5.0, 6.0, 7.0));
    assert_abs_diff_eq!(decomposed.scale, Vector3::new(2.0, 1.0, 1.0));
    assert_eq!(matrix_to_column_major(&compose(&decomposed)), values);
}

#[test]
fn matrix_with_vanishing_homogeneous_scale_is_degenerate() {
    let mut matrix = Matrix4::<f64>::identity().translated_by(&Vector3::new(1.0, 2.0, 3.0));
    matrix[(3, 3)] = 0.0;
    assert_eq!(decompose(&matrix), Err(DecompositionError::Degenerate));
}

#[test]
fn mirrored_matrix_decomposes_to_negative_scale_and_proper_rotation() {
    let matrix = Matrix4::<f64>::identity()
        .rotated_by_euler(&EulerAngles::new(0.5, 0.1, -0.3))
        .scaled_by(&Vector3::new(1.0, 1.0, -4.0));

    let decomposed = decompose(&matrix).unwrap();

    assert_abs_diff_eq!(decomposed.scale, Vector3::new(-1.0, -1.0, -4.0), epsilon = 1e-12);
    assert_abs_diff_eq!(
        decomposed.rotation.to_rotation_matrix().matrix().determinant(),
        1.0,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(compose(&decomposed), matrix, epsilon = 1e-12);
}

#[test]
fn incremental_operations_match_composition() {
    let translation = Vector3::new(3.0, -1.0, 0.5);
    let rotation = UnitQuaternion::from_euler_angles(1.0, -0.2, 0.7);
    let skew = Skew::new(0.2, 0.0, 0.1);
    let scale = Vector3::new(1.5, 2.5, 0.5);

    let built = Matrix4::<f64>::identity()
        .translated_by(&translation)
        .rotated_by(&rotation)
        .skewed_by(&skew)
        .scaled_by(&scale);

    let composed = compose(&DecomposedTransform {
        translation,
        scale,
        rotation,
        skew,
        perspective: Vector4::new(0.0, 0.0, 0.0, 1.0),
    });

    assert_eq!(built, composed);
}

prop_compose! {
    fn well_conditioned_transform_strategy()(
        translation in prop::array::uniform3(-1e3..1e3),
        scale in prop::array::uniform3(0.1..10.0),
        angles in prop::array::uniform3(-PI..PI),
        skew in prop::array::uniform3(-0.3..0.3),
    ) -> DecomposedTransform<f64> {
        DecomposedTransform {
            translation: Vector3::from(translation),
            scale: Vector3::from(scale),
            rotation: EulerAngles::new(angles[0], angles[1], angles[2]).to_quaternion(),
            skew: Skew::new(skew[0], skew[1], skew[2]),
            perspective: Vector4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

proptest! {
    #[test]
    fn should_reproduce_well_conditioned_matrix(
        decomposed in well_conditioned_transform_strategy()
    ) {
        let matrix = compose(&decomposed);
        let recomposed = compose(&decompose(&matrix).unwrap());
        prop_assert!(abs_diff_eq!(recomposed, matrix, epsilon = 1e-5));
    }
}

proptest! {
    #[test]
    fn should_reproduce_single_precision_matrix(
        decomposed in well_conditioned_transform_strategy()
    ) {
        let matrix: Matrix4<f32> = compose(&decomposed).cast();
        let recomposed = compose(&decompose(&matrix).unwrap());
        prop_assert!(abs_diff_eq!(recomposed, matrix, epsilon = 1e-2));
    }
}
