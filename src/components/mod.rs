//! [Components](Component) are the units of state and behaviour a [Holder](crate::holders::Holder) owns.
//!
//! A component is found again by its concrete type or by any capability trait it declares.
//! Components that need to reach their holder implement [Bindable] through a [HolderSlot] field.

mod bindable;
mod component;
mod holder_slot;

pub use bindable::*;
pub(crate) use bindable::assert_bound;
pub use component::*;
pub use holder_slot::*;
pub use turbo_components_derive::Component;
