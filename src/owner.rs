//! Objects owning a transformation matrix.

use crate::{
    component::{TransformComponent, TransformField, component, with_component},
    num::Float,
};
use nalgebra::Matrix4;
use std::{
    fmt,
    marker::PhantomData,
    ops::{Deref, DerefMut},
};

/// An object that stores a transformation matrix and lets its individual
/// components be read and written.
///
/// Implementors that trigger side effects (for example implicit animations)
/// whenever their matrix changes can override
/// [`begin_suppressing_actions`](Self::begin_suppressing_actions) and
/// [`end_suppressing_actions`](Self::end_suppressing_actions).
/// [`set_transform_component`](Self::set_transform_component) calls them
/// around the write.
pub trait TransformOwner<F: Float> {
    /// Returns the current transformation matrix.
    fn transform(&self) -> Matrix4<F>;

    /// Stores the given transformation matrix.
    fn set_transform(&mut self, transform: Matrix4<F>);

    /// Starts suppressing side effects of matrix changes. Does nothing by
    /// default.
    fn begin_suppressing_actions(&mut self) {}

    /// Stops suppressing side effects of matrix changes. Does nothing by
    /// default.
    fn end_suppressing_actions(&mut self) {}

    /// Returns the value of the given field of the current transform.
    fn transform_component(&self, field: TransformField) -> TransformComponent<F> {
        component(&self.transform(), field)
    }

    /// Replaces one field of the current transform, with actions suppressed
    /// for the duration of the write.
    fn set_transform_component(&mut self, component: TransformComponent<F>) {
        let mut owner = ActionSuppressionGuard::<F, Self>::new(self);
        let transform = with_component(&owner.transform(), component);
        owner.set_transform(transform);
    }
}

/// Suppresses actions on a [`TransformOwner`] for as long as it is alive.
pub struct ActionSuppressionGuard<'a, F: Float, O: TransformOwner<F> + ?Sized> {
    owner: &'a mut O,
    _phantom: PhantomData<F>,
}

impl<'a, F: Float, O: TransformOwner<F> + ?Sized> ActionSuppressionGuard<'a, F, O> {
    /// Begins suppressing actions on the given owner until the returned guard
    /// is dropped.
    pub fn new(owner: &'a mut O) -> Self {
        owner.begin_suppressing_actions();
        Self {
            owner,
            _phantom: PhantomData,
        }
    }
}

impl<F: Float, O: TransformOwner<F> + ?Sized> Deref for ActionSuppressionGuard<'_, F, O> {
    type Target = O;

    fn deref(&self) -> &O {
        self.owner
    }
}

impl<F: Float, O: TransformOwner<F> + ?Sized> DerefMut for ActionSuppressionGuard<'_, F, O> {
    fn deref_mut(&mut self) -> &mut O {
        self.owner
    }
}

impl<F: Float, O: TransformOwner<F> + ?Sized> Drop for ActionSuppressionGuard<'_, F, O> {
    fn drop(&mut self) {
        self.owner.end_suppressing_actions();
    }
}

impl<F: Float, O: TransformOwner<F> + ?Sized> fmt::Debug for ActionSuppressionGuard<'_, F, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSuppressionGuard").finish_non_exhaustive()
    }
}
