use crate::components::{Component, HolderSlot};
use crate::holders::{AnyHolder, ComponentHolder};
use crate::error::BindError;
use std::any::type_name;
use tracing::debug;
use std::rc::Rc;

/// A [Component] that keeps a back-reference to the holder it belongs to.
///
/// `#[derive(Component)]` implements this trait for any type with a `#[holder]` field.
/// The holder type is fixed per component type; binding to any other holder type fails.
pub trait Bindable: Component {
	/// The type of holder this component expects.
	type Holder: ComponentHolder;

	fn holder_slot(&self) -> &HolderSlot<Self::Holder>;

	/// Get the holder this component is bound to.
	fn holder(&self) -> Option<Rc<Self::Holder>> {
		self.holder_slot().get()
	}
}

/// The object-safe side of [Bindable], used by holders to bind components whose
/// concrete type they don't know.
///
/// A component moves from unbound to bound exactly once; bound is terminal.
pub trait BindableComponent: Component {
	/// Bind this component to `holder`.
	///
	/// Fails with [BindError::TypeMismatch] if `holder` is not the expected holder type,
	/// and with [BindError::AlreadyBound] if the component already has a holder.
	fn bind(&self, holder: Rc<dyn AnyHolder>) -> Result<(), BindError>;

	/// Get the holder this component is bound to, as an [AnyHolder].
	fn bound_holder(&self) -> Option<Rc<dyn AnyHolder>>;

	fn is_bound(&self) -> bool;
}

impl<T: Bindable> BindableComponent for T {
	fn bind(&self, holder: Rc<dyn AnyHolder>) -> Result<(), BindError> {
		let result = self.holder_slot().bind(holder);
		match &result {
			Ok(()) => debug!(
				component = type_name::<T>(),
				holder = type_name::<T::Holder>(),
				"Component bound"
			),
			Err(err) => debug!(component = type_name::<T>(), error = %err, "Bind rejected"),
		}
		result
	}

	fn bound_holder(&self) -> Option<Rc<dyn AnyHolder>> {
		Bindable::holder(self).map(|holder| holder as Rc<dyn AnyHolder>)
	}

	fn is_bound(&self) -> bool {
		self.holder_slot().is_bound()
	}
}

#[inline(always)]
pub(crate) fn assert_bound(component: &dyn BindableComponent) {
	#[cfg(not(feature = "debug_only_assertions"))]
	assert!(component.is_bound(), "Component is not bound after a successful bind");

	#[cfg(feature = "debug_only_assertions")]
	debug_assert!(component.is_bound(), "Component is not bound after a successful bind");
}
