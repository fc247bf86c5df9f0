//! `#[derive(Tag)]`
//!
//! The rendered name defaults to the snake-case identifier and can be set
//! with `#[tag(name = "...")]`. The identity path is assembled by the
//! compiler with `concat!(module_path!(), ...)`, so two tags with the same
//! name in different modules stay distinct.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr};

use crate::common::to_snake_case;

pub fn expand_derive_tag(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "tags cannot be generic\n\
             \n\
             A tag names exactly one slot. Declare one unit struct per slot instead.",
        ));
    }

    match &input.data {
        Data::Struct(s) if matches!(s.fields, Fields::Unit) => {}
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "#[derive(Tag)] only supports unit structs\n\
                 \n\
                 Example: `#[derive(Tag)] struct Count;`",
            ));
        }
    }

    let mut name = to_snake_case(&ident.to_string());
    for attr in &input.attrs {
        if !attr.path().is_ident("tag") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                name = lit.value();
                Ok(())
            } else {
                Err(meta.error("unsupported tag attribute, expected `name = \"...\"`"))
            }
        })?;
    }

    let ident_str = ident.to_string();
    Ok(quote! {
        impl ::tola_stack::Tag for #ident {
            const NAME: &'static str = #name;
            const PATH: &'static str = ::core::concat!(::core::module_path!(), "::", #ident_str);
        }
    })
}
