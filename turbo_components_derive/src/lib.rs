mod component;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Implements `Component`, `Castable` and the matching `Upcast` conversions.
///
/// * `#[capability(dyn A, dyn B)]` declares additional traits the type can be queried by.
/// * `#[holder]` marks a `HolderSlot<H>` field, making the type a `Bindable` component of `H`.
#[proc_macro_derive(Component, attributes(capability, holder))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    component::impl_component(&ast)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
