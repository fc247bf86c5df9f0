//! `decls![Parallel<true>, Synchronised<false>]` - declaration list type

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    Type,
};

use crate::common::{check_duplicates, parse_comma_separated, type_head};

pub struct DeclsInput {
    pub options: Vec<Type>,
}

impl Parse for DeclsInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        Ok(DeclsInput { options: parse_comma_separated(input)? })
    }
}

/// Build Decl<A, Decl<B, ()>>
pub fn expand_decls(input: DeclsInput) -> syn::Result<TokenStream2> {
    check_duplicates(
        &input.options,
        type_head,
        "option",
        "An option may be declared once per component; drop one of the two values.",
    )?;

    let mut result = quote! { () };
    for ty in input.options.iter().rev() {
        result = quote! { ::tola_stack::Decl<#ty, #result> };
    }
    Ok(result)
}
