//! [Holders](Holder) own an ordered set of [components](crate::components::Component)
//! and hand them back by capability.
//!
//! Application types become holders by embedding a [Holder] and implementing [ComponentHolder].

mod holder;
mod component_holder;

pub use holder::*;
pub use component_holder::*;
