//! Error types returned by collections, holders and bindable components.
//!
//! Every error is a synchronous failure of the call that returned it. No operation leaves
//! partial state behind: a failed construction adds nothing, and a rejected bind leaves both
//! the component and the holder exactly as they were.

use std::error::Error as StdError;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type returned when adding components.
#[derive(Error, Debug)]
pub enum Error {
	/// The factory supplied for a component failed.
	#[error("failed to construct component `{component}`")]
	Construction {
		component: &'static str,
		#[source]
		source: Box<dyn StdError + Send + Sync>,
	},

	/// A freshly constructed bindable component refused its holder.
	#[error("failed to bind component to its holder")]
	Binding(#[from] BindError),
}

/// The error type returned by [`BindableComponent::bind`](crate::components::BindableComponent::bind).
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum BindError {
	/// The holder is not of the type the component expects.
	#[error("holder must be a `{expected}`, found a `{found}`")]
	TypeMismatch {
		expected: &'static str,
		found: &'static str,
	},

	/// The component already has a holder. A component can only ever have one.
	#[error("component is already bound to a `{holder}`; a component can only have one holder")]
	AlreadyBound { holder: &'static str },
}
