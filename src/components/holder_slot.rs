use crate::holders::{AnyHolder, ComponentHolder};
use crate::error::BindError;
use std::cell::OnceCell;
use std::rc::{Rc, Weak};
use std::any::type_name;
use std::fmt;

/// A write-once back-reference from a component to its holder of type `H`.
///
/// The slot starts empty and can be filled exactly once; there is no way to clear or replace it.
/// It does not keep the holder alive: once the holder is dropped, [HolderSlot::get] returns
/// `None`, but the slot remains bound.
pub struct HolderSlot<H> {
	holder: OnceCell<Weak<H>>,
}

impl<H> HolderSlot<H> {
	/// Create a new, unbound [HolderSlot].
	pub const fn new() -> Self {
		Self {
			holder: OnceCell::new(),
		}
	}

	/// Returns true once a holder has been set.
	pub fn is_bound(&self) -> bool {
		self.holder.get().is_some()
	}
}

impl<H: ComponentHolder> HolderSlot<H> {
	/// Get the holder, if bound and still alive.
	pub fn get(&self) -> Option<Rc<H>> {
		self.holder.get().and_then(Weak::upgrade)
	}

	/// Set the holder.
	///
	/// Fails with [BindError::TypeMismatch] if `holder` is not an `H`,
	/// or with [BindError::AlreadyBound] if the slot was already filled, even with the same holder.
	pub fn bind(&self, holder: Rc<dyn AnyHolder>) -> Result<(), BindError> {
		let found = holder.holder_name();
		let holder = holder.downcast_rc::<H>().map_err(|_| BindError::TypeMismatch {
			expected: type_name::<H>(),
			found,
		})?;

		self.holder.set(Rc::downgrade(&holder)).map_err(|_| BindError::AlreadyBound {
			holder: type_name::<H>(),
		})
	}
}

impl<H> Default for HolderSlot<H> {
	fn default() -> Self {
		Self::new()
	}
}

impl<H> fmt::Debug for HolderSlot<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HolderSlot")
			.field("holder", &type_name::<H>())
			.field("bound", &self.is_bound())
			.finish()
	}
}
