use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::punctuated::Punctuated;
use syn::{
    parse_quote, Data, DeriveInput, GenericArgument, Ident, Index, Member, PathArguments, Token,
    Type, TypeParamBound,
};

struct HolderField {
    member: Member,
    holder: Type,
}

pub fn impl_component(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &ast.ident;
    if let Some(lifetime) = ast.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "components must be 'static, lifetime parameters are not supported",
        ));
    }

    let mut generics = ast.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut capabilities: Vec<Type> = vec![parse_quote!(dyn ::turbo_components::components::Component)];
    let holder_field = find_holder_field(ast)?;
    if holder_field.is_some() {
        capabilities.push(parse_quote!(dyn ::turbo_components::components::BindableComponent));
    }
    capabilities.extend(parse_capabilities(ast)?);

    let cast_arms = capabilities.iter().map(|ty| {
        quote! {
            if capability == ::std::any::TypeId::of::<#ty>() {
                return ::std::option::Option::Some(::std::boxed::Box::new(self as ::std::rc::Rc<#ty>));
            }
        }
    });

    let upcasts = capabilities.iter().map(|ty| {
        quote! {
            impl #impl_generics ::turbo_components::data_structures::Upcast<#ty> for #name #ty_generics #where_clause {
                #[inline(always)]
                fn upcast(self: ::std::rc::Rc<Self>) -> ::std::rc::Rc<#ty> {
                    self
                }
            }
        }
    });

    let bindable = holder_field.map(|HolderField { member, holder }| {
        quote! {
            impl #impl_generics ::turbo_components::components::Bindable for #name #ty_generics #where_clause {
                type Holder = #holder;

                #[inline(always)]
                fn holder_slot(&self) -> &::turbo_components::components::HolderSlot<#holder> {
                    &self.#member
                }
            }
        }
    });

    let gen = quote! {
        impl #impl_generics ::turbo_components::data_structures::Castable for #name #ty_generics #where_clause {
            fn cast(
                self: ::std::rc::Rc<Self>,
                capability: ::std::any::TypeId,
            ) -> ::std::option::Option<::std::boxed::Box<dyn ::std::any::Any>> {
                if capability == ::std::any::TypeId::of::<Self>() {
                    return ::std::option::Option::Some(::std::boxed::Box::new(self));
                }
                #(#cast_arms)*
                ::std::option::Option::None
            }
        }

        impl #impl_generics ::turbo_components::components::Component for #name #ty_generics #where_clause {}

        #(#upcasts)*

        #bindable
    };
    Ok(gen)
}

fn parse_capabilities(ast: &DeriveInput) -> syn::Result<Vec<Type>> {
    let mut capabilities = Vec::new();
    for attr in ast.attrs.iter().filter(|attr| attr.path.is_ident("capability")) {
        let types = attr.parse_args_with(Punctuated::<Type, Token![,]>::parse_terminated)?;
        for ty in types {
            check_capability(&ast.ident, &ty)?;

            let key = ty.to_token_stream().to_string();
            if capabilities.iter().any(|c: &Type| c.to_token_stream().to_string() == key) {
                return Err(syn::Error::new_spanned(ty, "capability is declared more than once"));
            }
            capabilities.push(ty);
        }
    }
    Ok(capabilities)
}

/// Rejects capabilities the derive already provides.
fn check_capability(name: &Ident, ty: &Type) -> syn::Result<()> {
    let implied = match ty {
        Type::Path(path) => {
            path.qself.is_none()
                && (path.path.is_ident("Self")
                    || path.path.segments.last().map_or(false, |s| s.ident == *name))
        },
        Type::TraitObject(object) => object.bounds.iter().any(|bound| match bound {
            TypeParamBound::Trait(bound) => bound.path.segments.last().map_or(false, |s| {
                s.ident == "Component" || s.ident == "BindableComponent"
            }),
            _ => false,
        }),
        _ => false,
    };

    if implied {
        return Err(syn::Error::new_spanned(
            ty,
            "capability is always provided by #[derive(Component)] and must not be listed",
        ));
    }
    Ok(())
}

fn find_holder_field(ast: &DeriveInput) -> syn::Result<Option<HolderField>> {
    let fields = match &ast.data {
        Data::Struct(data) => &data.fields,
        _ => return Ok(None),
    };

    let mut found = None;
    for (index, field) in fields.iter().enumerate() {
        if !field.attrs.iter().any(|attr| attr.path.is_ident("holder")) {
            continue;
        }
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "a component can only have one #[holder] field",
            ));
        }

        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(index)),
        };
        found = Some(HolderField {
            member,
            holder: slot_holder_type(&field.ty)?,
        });
    }

    Ok(found)
}

/// Extracts `H` from a `HolderSlot<H>` field type.
fn slot_holder_type(ty: &Type) -> syn::Result<Type> {
    if let Type::Path(path) = ty {
        if let Some(segment) = path.path.segments.last() {
            if let PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(GenericArgument::Type(holder)) = args.args.first() {
                    return Ok(holder.clone());
                }
            }
        }
    }
    Err(syn::Error::new_spanned(
        ty,
        "#[holder] fields must be of type `HolderSlot<H>`",
    ))
}

#[cfg(test)]
mod tests {
    use super::impl_component;
    use syn::{parse_quote, DeriveInput};

    fn error_of(ast: DeriveInput) -> String {
        match impl_component(&ast) {
            Ok(_) => panic!("Derive should have been rejected"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn accepts_capabilities_and_holder() {
        let ast: DeriveInput = parse_quote! {
            #[capability(dyn Moving, dyn Named)]
            struct Rocket<T> {
                #[holder]
                holder: HolderSlot<Scene>,
                payload: T,
            }
        };
        let tokens = impl_component(&ast).expect("Derive should succeed").to_string();
        assert!(tokens.contains("Bindable"), "Holder field did not produce a Bindable impl");
        assert!(tokens.contains("Moving") && tokens.contains("Named"));
    }

    #[test]
    fn rejects_implied_capabilities() {
        let ast: DeriveInput = parse_quote! {
            #[capability(dyn Component)]
            struct Tag;
        };
        assert!(error_of(ast).contains("always provided"));

        let ast: DeriveInput = parse_quote! {
            #[capability(dyn turbo_components::components::BindableComponent)]
            struct Tag;
        };
        assert!(error_of(ast).contains("always provided"));

        let ast: DeriveInput = parse_quote! {
            #[capability(Tag)]
            struct Tag;
        };
        assert!(error_of(ast).contains("always provided"));

        let ast: DeriveInput = parse_quote! {
            #[capability(Self)]
            struct Tag;
        };
        assert!(error_of(ast).contains("always provided"));
    }

    #[test]
    fn rejects_duplicate_capabilities() {
        let ast: DeriveInput = parse_quote! {
            #[capability(dyn Moving)]
            #[capability(dyn Moving)]
            struct Rocket;
        };
        assert!(error_of(ast).contains("more than once"));
    }

    #[test]
    fn rejects_lifetimes() {
        let ast: DeriveInput = parse_quote! {
            struct Label<'a> {
                text: &'a str,
            }
        };
        assert!(error_of(ast).contains("lifetime parameters"));
    }

    #[test]
    fn rejects_second_holder_field() {
        let ast: DeriveInput = parse_quote! {
            struct Camera {
                #[holder]
                scene: HolderSlot<Scene>,
                #[holder]
                other: HolderSlot<Scene>,
            }
        };
        assert!(error_of(ast).contains("only have one #[holder]"));
    }
}
