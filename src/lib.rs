//! Type-indexed component composition.
//!
//! A [Holder](holders::Holder) owns an open-ended set of [components](components::Component)
//! of any concrete type and hands them back by capability: by concrete type, as `dyn Component`,
//! or as any trait a component declares with `#[capability(...)]`.
//! Components that need to reach their holder keep a write-once [HolderSlot](components::HolderSlot)
//! and are bound to exactly one holder for their whole lifetime.
//!
//! ```
//! use turbo_components::prelude::*;
//! use std::rc::Rc;
//!
//! #[derive(Default, Component)]
//! struct Position {
//! 	#[holder]
//! 	holder: HolderSlot<Holder>,
//! }
//!
//! let holder = Holder::shared();
//! let position = holder.add_component(Position::default).unwrap();
//! assert!(Rc::ptr_eq(&position.holder().unwrap(), &holder));
//! assert!(holder.get_component::<Position>().is_some());
//! ```

extern crate self as turbo_components;

pub mod data_structures;
pub mod components;
pub mod holders;
mod error;

pub use error::*;

pub mod prelude {
	pub use crate::components::*;
	pub use crate::holders::*;
	pub use crate::data_structures::{TypedCollection, Traversal};
	pub use crate::error::{Error, BindError};
}

#[cfg(test)]
mod tests;
