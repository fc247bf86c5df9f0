//! `combine!` - compose components onto a base
//!
//! ```ignore
//! combine! {
//!     /// Devices with a counter.
//!     pub Device = [Counter, Storage<tuple_t![Count: i32]>, Base];
//! }
//! ```
//!
//! expands to a marker struct implementing `Combination` with
//! `Stack = (Counter, (Storage<..>, Base))`, plus a const item that
//! validates the stack while the crate is compiled.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    bracketed,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute, Ident, Token, Type, Visibility,
};

use crate::common::{check_duplicates, type_key};

/// `#[attrs] vis Name = [L1, ..., Base];`
pub struct Definition {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub name: Ident,
    pub layers: Vec<Type>,
}

impl Parse for Definition {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        let name: Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        let content;
        bracketed!(content in input);
        let layers = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
        Ok(Definition { attrs, vis, name, layers: layers.into_iter().collect() })
    }
}

pub struct CombineInput {
    pub definitions: Vec<Definition>,
}

impl Parse for CombineInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut definitions = Vec::new();
        while !input.is_empty() {
            definitions.push(input.parse()?);
            if input.is_empty() {
                break;
            }
            input.parse::<Token![;]>()?;
        }
        Ok(CombineInput { definitions })
    }
}

/// Fold the layer list: [A, B, Base] -> (A, (B, Base))
pub fn build_stack(layers: &[Type]) -> TokenStream2 {
    let mut iter = layers.iter().rev();
    let mut result = match iter.next() {
        Some(base) => quote! { #base },
        None => return quote! { () },
    };
    for layer in iter {
        result = quote! { (#layer, #result) };
    }
    result
}

fn expand_definition(def: &Definition) -> syn::Result<TokenStream2> {
    let Definition { attrs, vis, name, layers } = def;

    if layers.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "empty component list\n\
             \n\
             A combination needs at least its base, e.g. `[Base]`.",
        ));
    }
    check_duplicates(
        layers,
        type_key,
        "component",
        "Each component may appear only once in a combination.",
    )?;

    let stack = build_stack(layers);
    Ok(quote! {
        #(#attrs)*
        #[derive(Debug, Clone, Copy, Default)]
        #vis struct #name;

        impl ::tola_stack::Combination for #name {
            type Stack = #stack;
            type Node = <#stack as ::tola_stack::Stack>::Node;
            type Net = <#stack as ::tola_stack::Stack>::Net<<#stack as ::tola_stack::Stack>::Node>;
        }

        const _: () = ::tola_stack::compose::assert_valid(<#stack as ::tola_stack::Stack>::MANIFEST);
        const _: () = ::tola_stack::compose::assert_reads::<#stack, _>();
    })
}

pub fn expand_combine(input: CombineInput) -> syn::Result<TokenStream2> {
    let mut out = TokenStream2::new();
    for def in &input.definitions {
        out.extend(expand_definition(def)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_nesting() {
        let layers: Vec<Type> = vec![syn::parse_quote!(A), syn::parse_quote!(B), syn::parse_quote!(Base)];
        assert_eq!(build_stack(&layers).to_string(), quote!((A, (B, Base))).to_string());
        assert_eq!(build_stack(&layers[2..]).to_string(), "Base");
    }

    #[test]
    fn test_multiple_definitions() {
        let input: CombineInput = syn::parse2(quote! {
            pub First = [A, Base];
            Second = [Base];
        })
        .unwrap();
        assert_eq!(input.definitions.len(), 2);
        assert!(expand_combine(input).is_ok());
    }

    #[test]
    fn test_emits_both_stack_checks() {
        let input: CombineInput = syn::parse2(quote!(C = [A, Base])).unwrap();
        let out = expand_combine(input).unwrap().to_string();
        assert!(out.contains("assert_valid"));
        assert!(out.contains("assert_reads"));
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        let dup: CombineInput = syn::parse2(quote!(C = [A, A, Base])).unwrap();
        assert!(expand_combine(dup).unwrap_err().to_string().contains("duplicate component `A`"));
        let empty: CombineInput = syn::parse2(quote!(C = [])).unwrap();
        assert!(expand_combine(empty).is_err());
    }
}
