//! Reading and writing individual components of transformation matrices.

use crate::{
    config::DecompositionConfig,
    num::Float,
    transform::{DecomposedTransform, EulerAngles, Skew, compose, decompose_with_config},
};
use nalgebra::{Matrix4, UnitQuaternion, Vector2, Vector3, Vector4};
use std::fmt;

/// A component of a decomposed transform that can be read or written on its
/// own.
#[cfg_attr(feature = "cli", derive(::clap::ValueEnum))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformField {
    Translation,
    /// The x- and y-components of the translation.
    TranslationXY,
    Scale,
    /// The x- and y-components of the scale.
    ScaleXY,
    Rotation,
    /// The rotation as Euler angles.
    EulerAngles,
    Skew,
    Perspective,
}

/// The value of a single [`TransformField`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformComponent<F: Float> {
    Translation(Vector3<F>),
    TranslationXY(Vector2<F>),
    Scale(Vector3<F>),
    ScaleXY(Vector2<F>),
    Rotation(UnitQuaternion<F>),
    EulerAngles(EulerAngles<F>),
    Skew(Skew<F>),
    Perspective(Vector4<F>),
}

/// Reads and writes single components of transformation matrices, using the
/// identity decomposition in place of matrices that cannot be decomposed.
///
/// The matrix is decomposed anew on every access, so it remains the only
/// state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComponentAccessor<F> {
    config: DecompositionConfig<F>,
}

impl TransformField {
    pub const ALL: [Self; 8] = [
        Self::Translation,
        Self::TranslationXY,
        Self::Scale,
        Self::ScaleXY,
        Self::Rotation,
        Self::EulerAngles,
        Self::Skew,
        Self::Perspective,
    ];
}

impl<F: Float> TransformComponent<F> {
    /// Returns the field this is a value of.
    pub fn field(&self) -> TransformField {
        match self {
            Self::Translation(_) => TransformField::Translation,
            Self::TranslationXY(_) => TransformField::TranslationXY,
            Self::Scale(_) => TransformField::Scale,
            Self::ScaleXY(_) => TransformField::ScaleXY,
            Self::Rotation(_) => TransformField::Rotation,
            Self::EulerAngles(_) => TransformField::EulerAngles,
            Self::Skew(_) => TransformField::Skew,
            Self::Perspective(_) => TransformField::Perspective,
        }
    }
}

impl<F: Float> fmt::Display for TransformComponent<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translation(translation) => write!(
                f,
                "translation: ({}, {}, {})",
                translation.x, translation.y, translation.z
            ),
            Self::TranslationXY(translation) => {
                write!(f, "translation: ({}, {})", translation.x, translation.y)
            }
            Self::Scale(scale) => write!(f, "scale: ({}, {}, {})", scale.x, scale.y, scale.z),
            Self::ScaleXY(scale) => write!(f, "scale: ({}, {})", scale.x, scale.y),
            Self::Rotation(rotation) => {
                let rotation = rotation.quaternion();
                write!(
                    f,
                    "rotation: (x: {}, y: {}, z: {}, w: {})",
                    rotation.i, rotation.j, rotation.k, rotation.w
                )
            }
            Self::EulerAngles(angles) => write!(f, "euler angles: {}", angles),
            Self::Skew(skew) => write!(f, "skew: {}", skew),
            Self::Perspective(perspective) => write!(
                f,
                "perspective: ({}, {}, {}, {})",
                perspective.x, perspective.y, perspective.z, perspective.w
            ),
        }
    }
}

impl<F: Float> DecomposedTransform<F> {
    /// Returns the value of the given field.
    pub fn component(&self, field: TransformField) -> TransformComponent<F> {
        match field {
            TransformField::Translation => TransformComponent::Translation(self.translation),
            TransformField::TranslationXY => {
                TransformComponent::TranslationXY(self.translation.xy())
            }
            TransformField::Scale => TransformComponent::Scale(self.scale),
            TransformField::ScaleXY => TransformComponent::ScaleXY(self.scale.xy()),
            TransformField::Rotation => TransformComponent::Rotation(self.rotation),
            TransformField::EulerAngles => {
                TransformComponent::EulerAngles(EulerAngles::from_quaternion(&self.rotation))
            }
            TransformField::Skew => TransformComponent::Skew(self.skew),
            TransformField::Perspective => TransformComponent::Perspective(self.perspective),
        }
    }

    /// Replaces the field of the given component with its value, leaving all
    /// other fields as they are.
    ///
    /// Two-dimensional values replace the x- and y-components and keep the
    /// z-component.
    pub fn set_component(&mut self, component: TransformComponent<F>) {
        match component {
            TransformComponent::Translation(translation) => {
                self.translation = translation;
            }
            TransformComponent::TranslationXY(translation) => {
                self.set_component(TransformComponent::Translation(Vector3::new(
                    translation.x,
                    translation.y,
                    self.translation.z,
                )));
            }
            TransformComponent::Scale(scale) => {
                self.scale = scale;
            }
            TransformComponent::ScaleXY(scale) => {
                self.set_component(TransformComponent::Scale(Vector3::new(
                    scale.x,
                    scale.y,
                    self.scale.z,
                )));
            }
            TransformComponent::Rotation(rotation) => {
                self.rotation = rotation;
            }
            TransformComponent::EulerAngles(angles) => {
                self.set_component(TransformComponent::Rotation(angles.to_quaternion()));
            }
            TransformComponent::Skew(skew) => {
                self.skew = skew;
            }
            TransformComponent::Perspective(perspective) => {
                self.perspective = perspective;
            }
        }
    }
}

impl<F: Float> ComponentAccessor<F> {
    /// Creates an accessor decomposing matrices with the given configuration.
    pub fn new(config: DecompositionConfig<F>) -> Self {
        Self { config }
    }

    /// Returns the decomposition configuration.
    pub fn config(&self) -> &DecompositionConfig<F> {
        &self.config
    }

    /// Returns the value of the given field of the matrix, or of the identity
    /// matrix if the matrix is degenerate.
    pub fn get(&self, matrix: &Matrix4<F>, field: TransformField) -> TransformComponent<F> {
        self.decompose_or_identity(matrix).component(field)
    }

    /// Returns a copy of the matrix with the field of the given component
    /// replaced. A degenerate matrix is treated as the identity, so only the
    /// given component survives.
    pub fn set(&self, matrix: &Matrix4<F>, component: TransformComponent<F>) -> Matrix4<F> {
        let mut decomposed = self.decompose_or_identity(matrix);
        decomposed.set_component(component);
        compose(&decomposed)
    }

    fn decompose_or_identity(&self, matrix: &Matrix4<F>) -> DecomposedTransform<F> {
        decompose_with_config(matrix, &self.config).unwrap_or_else(|error| {
            log::warn!("{}, falling back to identity transform", error);
            DecomposedTransform::identity()
        })
    }
}

impl<F: Float> Default for ComponentAccessor<F> {
    fn default() -> Self {
        Self::new(DecompositionConfig::default())
    }
}

/// Returns the value of the given field of the matrix, using the default
/// [`DecompositionConfig`].
///
/// See [`ComponentAccessor::get`].
pub fn component<F: Float>(matrix: &Matrix4<F>, field: TransformField) -> TransformComponent<F> {
    ComponentAccessor::default().get(matrix, field)
}

/// Returns a copy of the matrix with the field of the given component
/// replaced, using the default [`DecompositionConfig`].
///
/// See [`ComponentAccessor::set`].
pub fn with_component<F: Float>(
    matrix: &Matrix4<F>,
    component: TransformComponent<F>,
) -> Matrix4<F> {
    ComponentAccessor::default().set(matrix, component)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::transform::{TransformOps, decompose};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn general_matrix() -> Matrix4<f64> {
        Matrix4::identity()
            .translated_by(&Vector3::new(1.0, -2.0, 3.0))
            .rotated_by_euler(&EulerAngles::new(0.3, -0.5, 1.1))
            .skewed_by(&Skew::new(0.1, 0.2, -0.1))
            .scaled_by(&Vector3::new(2.0, 0.5, 1.5))
    }

    fn degenerate_matrix() -> Matrix4<f64> {
        let mut matrix = Matrix4::identity();
        matrix[(3, 3)] = 0.0;
        matrix
    }

    #[test]
    fn getting_translation_reads_fourth_column() {
        let matrix = Matrix4::new_translation(&Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(
            component(&matrix, TransformField::Translation),
            TransformComponent::Translation(Vector3::new(4.0, 5.0, 6.0))
        );
    }

    #[test]
    fn getting_xy_translation_ignores_z() {
        let matrix = Matrix4::new_translation(&Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(
            component(&matrix, TransformField::TranslationXY),
            TransformComponent::TranslationXY(Vector2::new(4.0, 5.0))
        );
    }

    #[test]
    fn gotten_component_has_requested_field() {
        let matrix = general_matrix();
        for field in TransformField::ALL {
            assert_eq!(component(&matrix, field).field(), field);
        }
    }

    #[test]
    fn setting_scale_changes_only_scale() {
        let matrix = general_matrix();
        let before = decompose(&matrix).unwrap();

        let updated = with_component(
            &matrix,
            TransformComponent::Scale(Vector3::new(3.0, 3.0, 3.0)),
        );
        let after = decompose(&updated).unwrap();

        assert_abs_diff_eq!(after.scale, Vector3::new(3.0, 3.0, 3.0), epsilon = 1e-9);
        assert_abs_diff_eq!(
            DecomposedTransform {
                scale: before.scale,
                ..after
            },
            before,
            epsilon = 1e-9
        );
    }

    #[test]
    fn setting_xy_translation_keeps_z() {
        let matrix = general_matrix();
        let updated = with_component(
            &matrix,
            TransformComponent::TranslationXY(Vector2::new(7.0, 8.0)),
        );
        assert_abs_diff_eq!(
            decompose(&updated).unwrap().translation,
            Vector3::new(7.0, 8.0, 3.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn setting_xy_scale_keeps_z() {
        let matrix = general_matrix();
        let updated = with_component(&matrix, TransformComponent::ScaleXY(Vector2::new(4.0, 0.25)));
        assert_abs_diff_eq!(
            decompose(&updated).unwrap().scale,
            Vector3::new(4.0, 0.25, 1.5),
            epsilon = 1e-9
        );
    }

    #[test]
    fn setting_euler_angles_sets_equivalent_rotation() {
        let angles = EulerAngles::new(0.2, 0.4, -0.6);
        let updated = with_component(&general_matrix(), TransformComponent::EulerAngles(angles));

        assert!(
            decompose(&updated)
                .unwrap()
                .rotation
                .angle_to(&angles.to_quaternion())
                < 1e-6
        );
        match component(&updated, TransformField::EulerAngles) {
            TransformComponent::EulerAngles(recovered) => {
                assert_abs_diff_eq!(recovered, angles, epsilon = 1e-9);
            }
            other => panic!("Unexpected component {:?}", other),
        }
    }

    #[test]
    fn setting_skew_and_perspective_is_reflected_when_getting() {
        let skew = Skew::new(0.3, 0.0, -0.2);
        let perspective = Vector4::new(0.0, 0.0, -0.01, 1.0);

        let matrix = with_component(&general_matrix(), TransformComponent::Skew(skew));
        let matrix = with_component(&matrix, TransformComponent::Perspective(perspective));

        match component(&matrix, TransformField::Skew) {
            TransformComponent::Skew(recovered) => {
                assert_abs_diff_eq!(recovered, skew, epsilon = 1e-9);
            }
            other => panic!("Unexpected component {:?}", other),
        }
        assert_eq!(
            component(&matrix, TransformField::Perspective),
            TransformComponent::Perspective(perspective)
        );
    }

    #[test]
    fn getting_from_degenerate_matrix_gives_identity_component() {
        let matrix = degenerate_matrix();
        let identity = DecomposedTransform::<f64>::identity();
        for field in TransformField::ALL {
            assert_eq!(component(&matrix, field), identity.component(field));
        }
    }

    #[test]
    fn getting_from_matrix_with_overflowing_scale_gives_identity_component() {
        let matrix = Matrix4::from_diagonal(&Vector4::new(1e200, 1.0, 1.0, 1.0));
        assert_eq!(
            component(&matrix, TransformField::Scale),
            TransformComponent::Scale(Vector3::new(1.0, 1.0, 1.0))
        );
        assert_eq!(
            component(&matrix, TransformField::Rotation),
            TransformComponent::Rotation(UnitQuaternion::identity())
        );
    }

    #[test]
    fn setting_on_degenerate_matrix_starts_from_identity() {
        let updated = with_component(
            &degenerate_matrix(),
            TransformComponent::Rotation(UnitQuaternion::from_axis_angle(
                &Vector3::z_axis(),
                FRAC_PI_2,
            )),
        );
        assert!(updated.iter().all(|element| element.is_finite()));
        assert_abs_diff_eq!(
            updated,
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2).to_homogeneous(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn accessor_with_larger_tolerance_falls_back_for_nearly_degenerate_matrix() {
        let matrix = Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 1e-6, 1.0));
        let accessor = ComponentAccessor::new(DecompositionConfig::with_degeneracy_tolerance(1e-3));

        assert_eq!(
            accessor.get(&matrix, TransformField::Scale),
            TransformComponent::Scale(Vector3::new(1.0, 1.0, 1.0))
        );
        match component(&matrix, TransformField::Scale) {
            TransformComponent::Scale(scale) => {
                assert_abs_diff_eq!(scale, Vector3::new(1.0, 1e-6, 1.0), epsilon = 1e-12);
            }
            other => panic!("Unexpected component {:?}", other),
        }
    }
}
