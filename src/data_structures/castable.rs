//! Runtime capability checks for the elements of a [TypedCollection](super::TypedCollection).
//!
//! A capability is any `'static` type used as a query key: a concrete type (`Position`)
//! or a trait object (`dyn Component`). Each concrete element type knows which capabilities
//! it satisfies and converts an `Rc<Self>` into the matching `Rc<Capability>` on request.
//! The set of element types is open; nothing has to be registered up front.

use std::any::{Any, TypeId};
use std::rc::Rc;

/// A type that can be viewed through one or more capabilities at runtime.
///
/// Usually implemented through `#[derive(Component)]`, which accepts the concrete type itself,
/// `dyn Component` and every trait listed in `#[capability(...)]`.
///
/// # Contract
/// When `cast` returns `Some`, the box must contain an `Rc<C>` where `TypeId::of::<C>() == capability`,
/// pointing to the same allocation as `self`.
pub trait Castable: 'static {
	/// Converts `self` into the capability identified by `capability`, boxed as [Any].
	fn cast(self: Rc<Self>, capability: TypeId) -> Option<Box<dyn Any>>;
}

/// A statically checked conversion of `Rc<Self>` into `Rc<T>`.
///
/// Stands in for unsized coercion, which cannot be expressed as a generic bound.
pub trait Upcast<T: ?Sized> {
	fn upcast(self: Rc<Self>) -> Rc<T>;
}

impl<T: ?Sized> Upcast<T> for T {
	#[inline(always)]
	fn upcast(self: Rc<Self>) -> Rc<T> {
		self
	}
}

/// Views `element` through capability `E`, returning `None` if its runtime type does not satisfy it.
///
/// An element always satisfies the base type it is stored as.
pub fn cast<T, E>(element: &Rc<T>) -> Option<Rc<E>>
where
	T: ?Sized + Castable,
	E: ?Sized + 'static,
{
	let boxed: Box<dyn Any> = if TypeId::of::<T>() == TypeId::of::<E>() {
		Box::new(Rc::clone(element))
	} else {
		Rc::clone(element).cast(TypeId::of::<E>())?
	};

	boxed.downcast::<Rc<E>>().ok().map(|rc| *rc)
}

/// Returns true if `a` and `b` point to the same allocation, regardless of how they are typed.
#[inline(always)]
pub fn same_element<A: ?Sized, B: ?Sized>(a: &Rc<A>, b: &Rc<B>) -> bool {
	std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
