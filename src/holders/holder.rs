use crate::components::{assert_bound, BindableComponent, Component};
use crate::data_structures::{cast, Iter, TypedCollection, Upcast};
use crate::holders::{AnyHolder, ComponentHolder};
use crate::error::{Error, Result};
use std::error::Error as StdError;
use std::any::type_name;
use tracing::trace;
use std::rc::Rc;
use std::fmt;

/// An ordered set of [components](Component), queried by capability.
///
/// Components are added through [ComponentHolderExt](crate::holders::ComponentHolderExt)
/// on an `Rc` of the holder, so that [bindable](BindableComponent) components can be given
/// a back-reference to it. Multiple components of the same type are allowed.
///
/// `C` is the base type every component is stored as. A holder scoped to a narrower
/// capability only accepts components that declare it:
///
/// ```
/// use turbo_components::prelude::*;
/// use std::rc::Rc;
///
/// trait Widget: Component {}
///
/// #[derive(Default, Component)]
/// #[capability(dyn Widget)]
/// struct Button;
/// impl Widget for Button {}
///
/// let panel = Rc::new(Holder::<dyn Widget>::default());
/// panel.add_component(Button::default).unwrap();
/// assert_eq!(panel.get_components::<dyn Widget>().len(), 1);
/// ```
///
/// ```compile_fail
/// use turbo_components::prelude::*;
/// use std::rc::Rc;
///
/// trait Widget: Component {}
///
/// #[derive(Default, Component)]
/// struct Label;
///
/// let panel = Rc::new(Holder::<dyn Widget>::default());
/// panel.add_component(Label::default).unwrap();
/// ```
pub struct Holder<C: ?Sized + Component = dyn Component> {
	components: TypedCollection<C>,
}

impl Holder {
	pub fn new() -> Self {
		Self::with_capacity(0)
	}

	/// Create a new [Holder] with room for `capacity` components.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			components: TypedCollection::with_capacity(capacity),
		}
	}

	/// Create a new [Holder], ready to have components added to it.
	pub fn shared() -> Rc<Self> {
		Rc::new(Self::new())
	}
}

impl<C: ?Sized + Component> Holder<C> {
	/// Reserve room for at least `additional` more components.
	pub fn reserve(&self, additional: usize) {
		self.components.reserve(additional);
	}

	pub fn len(&self) -> usize {
		self.components.len()
	}

	pub fn is_empty(&self) -> bool {
		self.components.is_empty()
	}

	/// Get the first component satisfying the capability `U`.
	pub fn get_component<U: ?Sized + 'static>(&self) -> Option<Rc<U>> {
		self.components.first::<U>()
	}

	/// Get all the components satisfying the capability `U`, in the order they were added.
	pub fn get_components<U: ?Sized + 'static>(&self) -> Vec<Rc<U>> {
		self.components.all::<U>()
	}

	/// Invoke `action` on every component.
	///
	/// The walk is live: components added or removed by `action` affect the rest of the pass,
	/// see [Traversal::Live](crate::data_structures::Traversal::Live).
	pub fn each_component<F: FnMut(&Rc<C>)>(&self, action: F) {
		self.components.for_each(action)
	}

	/// Invoke `action` on every component satisfying the capability `U`. The walk is live.
	pub fn each_component_of<U, F>(&self, action: F)
	where
		U: ?Sized + 'static,
		F: FnMut(&Rc<U>),
	{
		self.components.for_each_of::<U, F>(action)
	}

	/// Remove `component` from the holder. Returns whether it was present.
	///
	/// A removed bindable component stays bound to this holder.
	pub fn remove_component<U: ?Sized>(&self, component: &Rc<U>) -> bool {
		self.components.remove(component)
	}

	pub fn contains_component<U: ?Sized>(&self, component: &Rc<U>) -> bool {
		self.components.contains(component)
	}

	/// Copy the current components into an independent collection.
	pub fn snapshot(&self) -> TypedCollection<C> {
		self.components.snapshot()
	}

	/// Iterate over all components, in the order they were added.
	pub fn iter(&self) -> Iter<'_, C> {
		self.components.iter()
	}

	/// Construct a component, bind it to `owner` if it is bindable, then store it.
	/// Nothing is stored if either step fails.
	pub(crate) fn attach<U, F, Failure>(&self, owner: Rc<dyn AnyHolder>, construct: F) -> Result<Rc<U>>
	where
		U: Component + Upcast<C>,
		F: FnOnce() -> std::result::Result<U, Failure>,
		Failure: Into<Box<dyn StdError + Send + Sync>>,
	{
		let component = construct().map_err(|source| Error::Construction {
			component: type_name::<U>(),
			source: source.into(),
		})?;
		let component = Rc::new(component);

		if let Some(bindable) = cast::<U, dyn BindableComponent>(&component) {
			bindable.bind(owner)?;
			assert_bound(&*bindable);
		}

		self.components.add(<U as Upcast<C>>::upcast(Rc::clone(&component)));
		trace!(component = type_name::<U>(), len = self.len(), "Component added");
		Ok(component)
	}
}

impl<C: ?Sized + Component> ComponentHolder for Holder<C> {
	type Capability = C;

	#[inline(always)]
	fn holder(&self) -> &Holder<C> {
		self
	}
}

impl<C: ?Sized + Component> Default for Holder<C> {
	fn default() -> Self {
		Self {
			components: TypedCollection::new(),
		}
	}
}

impl<C: ?Sized + Component> fmt::Debug for Holder<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let names: Vec<_> = self.iter().map(|component| component.component_name()).collect();
		f.debug_struct("Holder").field("components", &names).finish()
	}
}

impl<'l, C: ?Sized + Component> IntoIterator for &'l Holder<C> {
	type Item = Rc<C>;
	type IntoIter = Iter<'l, C>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
