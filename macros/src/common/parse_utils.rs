//! Common parsing utilities
//!
//! Shared parsing helpers for consistent syntax across macros.

use std::collections::HashSet;

use quote::ToTokens;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Token, Type,
};

// =============================================================================
// Comma-separated List Parsing
// =============================================================================

/// Parse a comma-separated list of items
pub fn parse_comma_separated<T: Parse>(input: ParseStream) -> syn::Result<Vec<T>> {
    let items = Punctuated::<T, Token![,]>::parse_terminated(input)?;
    Ok(items.into_iter().collect())
}

// =============================================================================
// Duplicate Detection
// =============================================================================

/// Canonical spelling of a type, whitespace removed.
pub fn type_key(ty: &Type) -> String {
    ty.to_token_stream().to_string().replace(' ', "")
}

/// Last path segment of a type, without generic arguments.
///
/// `Parallel<true>` and `crate::Parallel<false>` both give `Parallel`.
pub fn type_head(ty: &Type) -> String {
    match ty {
        Type::Path(p) => match p.path.segments.last() {
            Some(seg) => seg.ident.to_string(),
            None => type_key(ty),
        },
        _ => type_key(ty),
    }
}

/// Fails on the first item whose key was already seen.
///
/// `what` names the items in the message, `help` explains the rule.
pub fn check_duplicates<'a, T, I, K>(items: I, key: K, what: &str, help: &str) -> syn::Result<()>
where
    T: ToTokens + 'a,
    I: IntoIterator<Item = &'a T>,
    K: Fn(&T) -> String,
{
    let mut seen = HashSet::new();
    for item in items {
        let k = key(item);
        if !seen.insert(k.clone()) {
            return Err(syn::Error::new_spanned(
                item,
                format!(
                    "duplicate {} `{}`\n\
                     \n\
                     {}",
                    what, k, help
                ),
            ));
        }
    }
    Ok(())
}

// =============================================================================
// Naming
// =============================================================================

/// `RoundCount` -> `round_count`, `HTTPPort` -> `http_port`.
pub fn to_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p == '_' => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("Flag"), "flag");
        assert_eq!(to_snake_case("RoundCount"), "round_count");
        assert_eq!(to_snake_case("HTTPPort"), "http_port");
        assert_eq!(to_snake_case("Node2Id"), "node2_id");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_type_head_ignores_generics() {
        let a: Type = syn::parse_quote!(Parallel<true>);
        let b: Type = syn::parse_quote!(crate::Parallel<false>);
        assert_eq!(type_head(&a), type_head(&b));
        assert_ne!(type_key(&a), type_key(&b));
    }

    #[test]
    fn test_duplicates_reported() {
        let types: Vec<Type> = vec![syn::parse_quote!(A), syn::parse_quote!(B), syn::parse_quote!(A)];
        let err = check_duplicates(&types, type_key, "tag", "help").unwrap_err();
        assert!(err.to_string().starts_with("duplicate tag `A`"));
        assert!(check_duplicates(&types[..2], type_key, "tag", "help").is_ok());
    }
}
