use crate::data_structures::Castable;
use std::any::type_name;

/// A unit of state or behaviour attached to a [Holder](crate::holders::Holder).
///
/// The trait carries no data of its own; it marks the types a holder accepts and,
/// through [Castable], lets them be found again by any capability they declare.
/// Implement it with `#[derive(Component)]`.
pub trait Component: Castable {
	/// The name of the concrete component type.
	fn component_name(&self) -> &'static str {
		type_name::<Self>()
	}
}
