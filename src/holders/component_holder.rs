use crate::components::Component;
use crate::data_structures::Upcast;
use downcast_rs::{impl_downcast, Downcast};
use std::error::Error as StdError;
use crate::holders::Holder;
use crate::error::Result;
use std::convert::Infallible;
use std::any::type_name;
use std::rc::Rc;

/// An object that holds components.
///
/// Implemented by [Holder] itself and by any type that embeds one.
/// [Bindable](crate::components::Bindable) components name a concrete [ComponentHolder]
/// as the only holder type they accept.
pub trait ComponentHolder: 'static {
	/// The base type every component of this holder is stored as.
	type Capability: ?Sized + Component;

	/// The [Holder] storing this object's components.
	fn holder(&self) -> &Holder<Self::Capability>;

	/// See [Holder::get_component].
	fn get_component<U: ?Sized + 'static>(&self) -> Option<Rc<U>> {
		self.holder().get_component::<U>()
	}

	/// See [Holder::get_components].
	fn get_components<U: ?Sized + 'static>(&self) -> Vec<Rc<U>> {
		self.holder().get_components::<U>()
	}

	/// See [Holder::each_component].
	fn each_component<F: FnMut(&Rc<Self::Capability>)>(&self, action: F) {
		self.holder().each_component(action)
	}

	/// See [Holder::each_component_of].
	fn each_component_of<U, F>(&self, action: F)
	where
		U: ?Sized + 'static,
		F: FnMut(&Rc<U>),
	{
		self.holder().each_component_of::<U, F>(action)
	}
}

/// A [ComponentHolder] with its capability erased.
///
/// This is what bindable components receive and keep; it can be downcast back to the concrete holder.
pub trait AnyHolder: Downcast {
	/// The name of the concrete holder type.
	fn holder_name(&self) -> &'static str;
}
impl_downcast!(AnyHolder);

impl<H: ComponentHolder> AnyHolder for H {
	fn holder_name(&self) -> &'static str {
		type_name::<H>()
	}
}

/// Adds components to a shared holder.
///
/// Adding goes through the `Rc` so that bindable components receive a reference to the
/// full holder object, not just the [Holder] it embeds.
pub trait ComponentHolderExt {
	/// The base type added components are stored as.
	type Capability: ?Sized;

	/// Construct a component with `construct` and add it.
	///
	/// If the component is [bindable](crate::components::BindableComponent), it is bound to
	/// this holder before it is stored; a rejected bind is returned as [Error::Binding](crate::Error::Binding)
	/// and nothing is added.
	fn add_component<U, F>(&self, construct: F) -> Result<Rc<U>>
	where
		U: Component + Upcast<Self::Capability>,
		F: FnOnce() -> U;

	/// Construct a component with the fallible `construct` and add it.
	///
	/// A failed construction is returned as [Error::Construction](crate::Error::Construction).
	fn try_add_component<U, F, Failure>(&self, construct: F) -> Result<Rc<U>>
	where
		U: Component + Upcast<Self::Capability>,
		F: FnOnce() -> std::result::Result<U, Failure>,
		Failure: Into<Box<dyn StdError + Send + Sync>>;
}

impl<H: ComponentHolder> ComponentHolderExt for Rc<H> {
	type Capability = H::Capability;

	fn add_component<U, F>(&self, construct: F) -> Result<Rc<U>>
	where
		U: Component + Upcast<Self::Capability>,
		F: FnOnce() -> U,
	{
		self.try_add_component(|| Ok::<U, Infallible>(construct()))
	}

	fn try_add_component<U, F, Failure>(&self, construct: F) -> Result<Rc<U>>
	where
		U: Component + Upcast<Self::Capability>,
		F: FnOnce() -> std::result::Result<U, Failure>,
		Failure: Into<Box<dyn StdError + Send + Sync>>,
	{
		let owner = Rc::<H>::clone(self) as Rc<dyn AnyHolder>;
		self.holder().attach(owner, construct)
	}
}
