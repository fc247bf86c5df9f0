//! Tagged tuple construction macros
//!
//! - `tuple_t![A: bool, #[required] B: f64]` - record type
//! - `tuple![A: true, B: 2.0]` - record value

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    Attribute, Expr, Token, Type,
};

use crate::common::{check_duplicates, parse_comma_separated, type_key};

const DUPLICATE_HELP: &str = "Each tag names one slot of the tuple and may appear only once.";

// =============================================================================
// tuple_t! Input Parser
// =============================================================================

/// `#[required]? Tag: Type`
pub struct TypeEntry {
    pub required: bool,
    pub tag: Type,
    pub ty: Type,
}

impl Parse for TypeEntry {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut required = false;
        for attr in input.call(Attribute::parse_outer)? {
            if attr.path().is_ident("required") {
                attr.meta.require_path_only()?;
                required = true;
            } else {
                return Err(syn::Error::new_spanned(
                    attr,
                    "unsupported attribute on a tuple entry\n\
                     \n\
                     Only `#[required]` is accepted: the entry then has no default and\n\
                     construction fails when the initializer omits it.",
                ));
            }
        }
        let tag: Type = input.parse()?;
        input.parse::<Token![:]>()?;
        let ty: Type = input.parse()?;
        Ok(TypeEntry { required, tag, ty })
    }
}

pub struct TupleTypeInput {
    pub entries: Vec<TypeEntry>,
}

impl Parse for TupleTypeInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        Ok(TupleTypeInput { entries: parse_comma_separated(input)? })
    }
}

/// Build the record type: Entry<A, VA, DA, Entry<B, VB, DB, Nil>>
pub fn expand_tuple_type(input: TupleTypeInput) -> syn::Result<TokenStream2> {
    check_duplicates(input.entries.iter().map(|e| &e.tag), type_key, "tag", DUPLICATE_HELP)?;

    let mut result = quote! { ::tola_stack::Nil };
    for entry in input.entries.iter().rev() {
        let TypeEntry { required, tag, ty } = entry;
        let policy = if *required {
            quote! { ::tola_stack::Required }
        } else {
            quote! { ::tola_stack::Defaulted }
        };
        result = quote! { ::tola_stack::Entry<#tag, #ty, #policy, #result> };
    }
    Ok(result)
}

// =============================================================================
// tuple! Input Parser
// =============================================================================

/// `Tag: expr`
pub struct ValueEntry {
    pub tag: Type,
    pub value: Expr,
}

impl Parse for ValueEntry {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let tag: Type = input.parse()?;
        input.parse::<Token![:]>()?;
        let value: Expr = input.parse()?;
        Ok(ValueEntry { tag, value })
    }
}

pub struct TupleValueInput {
    pub entries: Vec<ValueEntry>,
}

impl Parse for TupleValueInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        Ok(TupleValueInput { entries: parse_comma_separated(input)? })
    }
}

/// Build the record value. Value types are inferred from the expressions.
pub fn expand_tuple_value(input: TupleValueInput) -> syn::Result<TokenStream2> {
    check_duplicates(input.entries.iter().map(|e| &e.tag), type_key, "tag", DUPLICATE_HELP)?;

    let mut result = quote! { ::tola_stack::Nil };
    for ValueEntry { tag, value } in input.entries.iter().rev() {
        result = quote! {
            ::tola_stack::Entry::<#tag, _, ::tola_stack::Defaulted, _>::new(#value, #result)
        };
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_type(tokens: TokenStream2) -> syn::Result<TokenStream2> {
        expand_tuple_type(syn::parse2(tokens)?)
    }

    #[test]
    fn test_type_fold_order() {
        let out = parse_type(quote!(A: bool, #[required] B: f64)).unwrap().to_string();
        let a = out.find("A ,").unwrap();
        let b = out.find("B ,").unwrap();
        assert!(a < b);
        assert!(out.contains("Required"));
        assert!(out.contains("Defaulted"));
    }

    #[test]
    fn test_empty_is_nil() {
        let out = parse_type(quote!()).unwrap().to_string();
        assert_eq!(out, quote!(::tola_stack::Nil).to_string());
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let err = parse_type(quote!(A: bool, B: i32, A: u8)).unwrap_err();
        assert!(err.to_string().contains("duplicate tag `A`"));
        let input: TupleValueInput = syn::parse2(quote!(A: true, A: false)).unwrap();
        assert!(expand_tuple_value(input).is_err());
    }

    #[test]
    fn test_unknown_attribute_rejected() {
        assert!(syn::parse2::<TupleTypeInput>(quote!(#[optional] A: bool)).is_err());
    }
}
