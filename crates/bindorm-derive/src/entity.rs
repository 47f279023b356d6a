//! Entity derive macro implementation
//!
//! ## Module Structure
//!
//! - `attrs`: Struct and field attribute parsing

mod attrs;

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let struct_attr = attrs::parse_struct_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Entity can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Entity can only be derived for structs",
            ));
        }
    };

    let mut descriptors = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let field_attr = attrs::parse_field_attrs(&field.attrs)?;
        if field_attr.skip {
            continue;
        }

        // `r#type` is looked up as `type`.
        let field_name = field_ident.unraw().to_string();
        let column = match &field_attr.column {
            Some(lit) => quote! { ::core::option::Option::Some(#lit) },
            None => quote! { ::core::option::Option::None },
        };

        let field_ty = &field.ty;
        let is_zero = if is_option(field_ty) {
            quote! { entity.#field_ident.is_none() }
        } else {
            quote! { entity.#field_ident == <#field_ty as ::core::default::Default>::default() }
        };

        descriptors.push(quote! {
            ::bindorm::FieldDescriptor {
                name: #field_name,
                column: #column,
                getter: |entity: &Self| {
                    ::bindorm::Param::new(::core::clone::Clone::clone(&entity.#field_ident))
                },
                is_zero: |entity: &Self| #is_zero,
            }
        });
    }

    if descriptors.is_empty() {
        return Err(syn::Error::new_spanned(
            &input,
            "Entity requires at least one mapped field",
        ));
    }

    let type_name = name.unraw().to_string();
    let table = match &struct_attr.table {
        Some(lit) => quote! { ::core::option::Option::Some(#lit) },
        None => quote! { ::core::option::Option::None },
    };
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::bindorm::Entity for #name #ty_generics #where_clause {
            fn describe() -> ::bindorm::EntityDescriptor<Self> {
                ::bindorm::EntityDescriptor {
                    type_name: #type_name,
                    table: #table,
                    fields: ::std::vec![#(#descriptors),*],
                }
            }
        }
    })
}

/// `Option<T>`, `std::option::Option<T>` or `core::option::Option<T>`.
fn is_option(ty: &syn::Type) -> bool {
    let syn::Type::Path(type_path) = ty else {
        return false;
    };
    let Some(seg) = type_path.path.segments.last() else {
        return false;
    };
    seg.ident == "Option"
        && matches!(&seg.arguments, syn::PathArguments::AngleBracketed(args) if args.args.len() == 1)
}
