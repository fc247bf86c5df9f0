//! Declaration options passed to components at build time.
//!
//! Options are marker types carried in a component's type parameters,
//! e.g. `Base<decls![Parallel<true>]>`. Each component lists the option
//! names it recognises; the composition driver rejects options nobody
//! recognises.

use core::marker::PhantomData;

/// A boolean declaration option.
pub trait Declaration: 'static {
    const NAME: &'static str;
    const VALUE: bool;
}

/// Declared options, most recent first.
#[derive(Debug, Clone, Copy)]
pub enum DeclList {
    Nil,
    Cons { name: &'static str, value: bool, rest: &'static DeclList },
}

impl DeclList {
    /// Value of option `name`, or `default` when not declared.
    pub const fn flag(&self, name: &str, default: bool) -> bool {
        let mut cur = self;
        while let DeclList::Cons { name: n, value, rest } = cur {
            if crate::primitives::str_eq(*n, name) {
                return *value;
            }
            cur = *rest;
        }
        default
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, DeclList::Nil)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        let mut cur = self;
        core::iter::from_fn(move || match cur {
            DeclList::Nil => None,
            DeclList::Cons { name, rest, .. } => {
                cur = *rest;
                Some(*name)
            }
        })
    }
}

/// A type-level list of declarations. Built with `decls![...]`.
pub trait Declarations: 'static {
    const LIST: &'static DeclList;
}

impl Declarations for () {
    const LIST: &'static DeclList = &DeclList::Nil;
}

/// Cons cell of a declaration list.
pub struct Decl<H, T>(PhantomData<(H, T)>);

impl<H: Declaration, T: Declarations> Declarations for Decl<H, T> {
    const LIST: &'static DeclList = &DeclList::Cons { name: H::NAME, value: H::VALUE, rest: T::LIST };
}

/// Defines boolean declaration markers from snake-case option names.
///
/// ```ignore
/// declare_flags! {
///     /// Nodes exchange messages in lockstep.
///     synchronised,
/// }
/// // struct Synchronised<const B: bool>; NAME = "synchronised"
/// ```
#[macro_export]
macro_rules! declare_flags {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $crate::paste::paste! {
            $(
                $(#[$meta])*
                #[derive(Debug, Clone, Copy, Default)]
                pub struct [<$name:camel>]<const B: bool>;

                impl<const B: bool> $crate::component::Declaration for [<$name:camel>]<B> {
                    const NAME: &'static str = stringify!($name);
                    const VALUE: bool = B;
                }
            )*
        }
    };
}

declare_flags! {
    /// Nodes may be operated from several execution contexts.
    parallel,
    /// Nodes run their rounds in lockstep.
    synchronised,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names() {
        assert_eq!(<Parallel<true> as Declaration>::NAME, "parallel");
        assert_eq!(<Synchronised<false> as Declaration>::NAME, "synchronised");
        assert!(<Parallel<true> as Declaration>::VALUE);
    }

    #[test]
    fn test_flag_lookup() {
        type D = Decl<Parallel<true>, Decl<Synchronised<false>, ()>>;
        const PARALLEL: bool = D::LIST.flag("parallel", false);
        const SYNC: bool = D::LIST.flag("synchronised", true);
        const OTHER: bool = D::LIST.flag("other", true);
        assert!(PARALLEL);
        assert!(!SYNC);
        assert!(OTHER);
        assert_eq!(D::LIST.names().collect::<Vec<_>>(), ["parallel", "synchronised"]);
        assert!(<() as Declarations>::LIST.is_empty());
    }
}
