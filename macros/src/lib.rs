//! Procedural macros for tola-stack
//!
//! | Macro | Target | Purpose |
//! |-------|--------|---------|
//! | `#[derive(Tag)]` | unit struct | Declare a tag |
//! | `tuple_t![]` | - | Build a tagged tuple type |
//! | `tuple![]` | - | Build a tagged tuple value |
//! | `decls![]` | - | Build a declaration list type |
//! | `combine!{}` | - | Compose components onto a base |
//!
//! ## Example
//!
//! ```ignore
//! #[derive(Tag)]
//! struct Count;
//!
//! combine! {
//!     pub Device = [Storage<tuple_t![Count: i32]>, Base<decls![Parallel<true>]>];
//! }
//!
//! let mut net = NetOf::<Device>::build(&Nil)?;
//! net.spawn(&tuple![Count: 2i32])?;
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod common;
mod user;

/// Derive `Tag` for a unit struct.
///
/// The rendered name is the snake-case identifier unless overridden:
///
/// ```ignore
/// #[derive(Tag)]
/// #[tag(name = "uid")]
/// struct NodeId;
/// ```
#[proc_macro_derive(Tag, attributes(tag))]
pub fn derive_tag(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    user::tag::expand_derive_tag(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Build a tagged tuple type.
///
/// Entries default when the initializer omits them; `#[required]` entries
/// make construction fail instead.
///
/// ```ignore
/// type Data = tuple_t![Flag: bool, Count: i32, #[required] Weight: f64];
/// ```
#[proc_macro]
pub fn tuple_t(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as user::tuple::TupleTypeInput);
    user::tuple::expand_tuple_type(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Build a tagged tuple value, usable as an initializer.
///
/// ```ignore
/// let init = tuple![Count: 2i32, Flag: true];
/// ```
#[proc_macro]
pub fn tuple(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as user::tuple::TupleValueInput);
    user::tuple::expand_tuple_value(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Build a declaration list type for a component's options.
///
/// ```ignore
/// type Decls = decls![Parallel<true>];
/// ```
#[proc_macro]
pub fn decls(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as user::decls::DeclsInput);
    user::decls::expand_decls(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Compose components onto a base and validate the result.
///
/// The first listed component is the outermost layer. A broken stack
/// (duplicate tag, unknown option, missing dependency) fails to compile.
#[proc_macro]
pub fn combine(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as user::combine::CombineInput);
    user::combine::expand_combine(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
