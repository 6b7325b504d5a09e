use crate::data_structures::{cast, same_element, Castable, Upcast};
use crate::error::{Error, Result};
use std::any::type_name;
use std::cell::RefCell;
use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// Selects how a `for_each` call walks a [TypedCollection].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Traversal {
	/// Walk the backing sequence itself.
	///
	/// Mutations made from the callback are visible to the remaining steps:
	/// appended elements are visited in the same pass, and removing an element at or before
	/// the current position shifts the rest left, so the element after it is skipped.
	#[default]
	Live,
	/// Copy the sequence first and walk the copy.
	/// Mutations made from the callback do not affect the pass in progress.
	Snapshot,
}

/// An ordered list of heterogeneous elements stored behind the base type `T`,
/// which can be queried by the capabilities of their concrete runtime types.
///
/// All operations take `&self`, so callbacks may add or remove elements while a traversal is running.
/// The backing storage is never borrowed while user code runs.
pub struct TypedCollection<T: ?Sized> {
	elements: RefCell<Vec<Rc<T>>>,
}

impl<T: ?Sized + Castable> TypedCollection<T> {
	/// Create a new, empty [TypedCollection].
	pub fn new() -> Self {
		Self::with_capacity(0)
	}

	/// Create a new [TypedCollection] with the specified capacity.
	///
	/// # Arguments
	/// * `capacity` - The number of elements the collection can hold without reallocating
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			elements: RefCell::new(Vec::with_capacity(capacity)),
		}
	}

	/// Reserve space for at least `additional` more elements.
	pub fn reserve(&self, additional: usize) {
		self.elements.borrow_mut().reserve(additional);
	}

	pub fn len(&self) -> usize {
		self.elements.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.borrow().is_empty()
	}

	/// Get the element at `index`, in insertion order.
	pub fn get(&self, index: usize) -> Option<Rc<T>> {
		self.elements.borrow().get(index).cloned()
	}

	/// Construct a new element with `construct`, append it and return it.
	pub fn add_constructed<E, F>(&self, construct: F) -> Rc<E>
	where
		E: Upcast<T>,
		F: FnOnce() -> E,
	{
		let element = Rc::new(construct());
		self.push(<E as Upcast<T>>::upcast(Rc::clone(&element)));
		trace!(element = type_name::<E>(), len = self.len(), "Element constructed");
		element
	}

	/// Construct a new element with the fallible `construct`, append it and return it.
	///
	/// If `construct` fails the collection is left untouched and [Error::Construction] is returned.
	pub fn try_add_constructed<E, F, Failure>(&self, construct: F) -> Result<Rc<E>>
	where
		E: Upcast<T>,
		F: FnOnce() -> std::result::Result<E, Failure>,
		Failure: Into<Box<dyn StdError + Send + Sync>>,
	{
		let element = construct().map_err(|source| Error::Construction {
			component: type_name::<E>(),
			source: source.into(),
		})?;
		Ok(self.add_constructed(|| element))
	}

	/// Append a pre-built element.
	pub fn add(&self, element: Rc<T>) {
		self.push(element);
		trace!(base = type_name::<T>(), len = self.len(), "Element added");
	}

	/// Remove the first occurrence of `element`, compared by identity.
	/// Returns whether an element was removed.
	pub fn remove<E: ?Sized>(&self, element: &Rc<E>) -> bool {
		// The removed element is dropped after the borrow ends, its destructor may touch the collection.
		let removed = {
			let mut elements = self.elements.borrow_mut();
			elements
				.iter()
				.position(|e| same_element(e, element))
				.map(|index| elements.remove(index))
		};

		trace!(base = type_name::<T>(), removed = removed.is_some(), "Element removal");
		removed.is_some()
	}

	/// Returns true if `element` is stored in the collection, compared by identity.
	pub fn contains<E: ?Sized>(&self, element: &Rc<E>) -> bool {
		self.elements.borrow().iter().any(|e| same_element(e, element))
	}

	/// Get the first element satisfying the capability `E`, in insertion order.
	pub fn first<E: ?Sized + 'static>(&self) -> Option<Rc<E>> {
		self.iter().find_map(|element| cast::<T, E>(&element))
	}

	/// Get all the elements satisfying the capability `E`, in insertion order.
	pub fn all<E: ?Sized + 'static>(&self) -> Vec<Rc<E>> {
		self.iter().filter_map(|element| cast::<T, E>(&element)).collect()
	}

	/// Invoke `action` on every element, walking the live sequence.
	pub fn for_each<F: FnMut(&Rc<T>)>(&self, action: F) {
		self.for_each_in(Traversal::Live, action)
	}

	/// Invoke `action` on every element satisfying the capability `E`, walking the live sequence.
	pub fn for_each_of<E, F>(&self, action: F)
	where
		E: ?Sized + 'static,
		F: FnMut(&Rc<E>),
	{
		self.for_each_of_in::<E, F>(Traversal::Live, action)
	}

	/// Invoke `action` on every element.
	///
	/// # Arguments
	/// * `traversal` - Whether to walk the live sequence or a snapshot of it
	/// * `action` - The action performed on each element
	pub fn for_each_in<F: FnMut(&Rc<T>)>(&self, traversal: Traversal, mut action: F) {
		match traversal {
			Traversal::Live => self.iter().for_each(|element| action(&element)),
			Traversal::Snapshot => self.to_vec().iter().for_each(action),
		}
	}

	/// Invoke `action` on every element satisfying the capability `E`.
	///
	/// # Arguments
	/// * `traversal` - Whether to walk the live sequence or a snapshot of it
	/// * `action` - The action performed on each matching element
	pub fn for_each_of_in<E, F>(&self, traversal: Traversal, mut action: F)
	where
		E: ?Sized + 'static,
		F: FnMut(&Rc<E>),
	{
		self.for_each_in(traversal, |element| {
			if let Some(element) = cast::<T, E>(element) {
				action(&element);
			}
		})
	}

	/// Create a new collection sharing the same elements, with an independent backing sequence.
	pub fn snapshot(&self) -> Self {
		let elements = self.to_vec();
		trace!(base = type_name::<T>(), len = elements.len(), "Snapshot taken");
		Self {
			elements: RefCell::new(elements),
		}
	}

	/// Copy the current sequence of elements.
	pub fn to_vec(&self) -> Vec<Rc<T>> {
		self.elements.borrow().clone()
	}

	/// Iterate over all elements, in insertion order.
	///
	/// The iterator walks the live sequence by position and follows the same rules as [Traversal::Live].
	pub fn iter(&self) -> Iter<'_, T> {
		Iter {
			collection: self,
			cursor: 0,
		}
	}

	#[inline(always)]
	fn push(&self, element: Rc<T>) {
		self.elements.borrow_mut().push(element);
	}
}

impl<T: ?Sized + Castable> Default for TypedCollection<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: ?Sized + Castable> Clone for TypedCollection<T> {
	fn clone(&self) -> Self {
		self.snapshot()
	}
}

impl<T: ?Sized + Castable> Extend<Rc<T>> for TypedCollection<T> {
	fn extend<I: IntoIterator<Item = Rc<T>>>(&mut self, iter: I) {
		self.elements.get_mut().extend(iter);
	}
}

impl<T: ?Sized + Castable> FromIterator<Rc<T>> for TypedCollection<T> {
	fn from_iter<I: IntoIterator<Item = Rc<T>>>(iter: I) -> Self {
		Self {
			elements: RefCell::new(iter.into_iter().collect()),
		}
	}
}

impl<T: ?Sized> fmt::Debug for TypedCollection<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypedCollection")
			.field("base", &type_name::<T>())
			.field("len", &self.elements.borrow().len())
			.finish()
	}
}

impl<'l, T: ?Sized + Castable> IntoIterator for &'l TypedCollection<T> {
	type Item = Rc<T>;
	type IntoIter = Iter<'l, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// A positional iterator over the elements of a [TypedCollection].
pub struct Iter<'l, T: ?Sized> {
	collection: &'l TypedCollection<T>,
	cursor: usize,
}

impl<T: ?Sized + Castable> Iterator for Iter<'_, T> {
	type Item = Rc<T>;

	fn next(&mut self) -> Option<Self::Item> {
		let element = self.collection.get(self.cursor)?;
		self.cursor += 1;
		Some(element)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		// The collection may grow or shrink between steps.
		(0, None)
	}
}
