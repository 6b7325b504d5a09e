//! Storage primitives.
//!
//! [TypedCollection] keeps heterogeneous elements behind one base type and answers queries
//! by runtime capability, through the [Castable] conversions of each element.

mod castable;
mod typed_collection;

pub use castable::*;
pub use typed_collection::*;
