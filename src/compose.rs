//! # Layer 3: Composition
//!
//! Folds a list of components onto a terminal base and validates the
//! result in const context.
//!
//! ```text
//! combine! { pub Combo = [A, B, Base]; }
//!
//!   Stack    = (A, (B, Base))
//!   Node     = A::Node<B::Node<BaseNode>>
//!   Manifest = a -> b -> base
//! ```
//!
//! Validation runs when the `combine!` output is compiled; a broken stack
//! is a compile error naming the offending component and tag or option.

use core::fmt;

use crate::component::{
    Base, BaseNet, BaseNode, Component, DeclList, Declarations, Net, Node, Provides,
};
use crate::error::CompositionError;
use crate::primitives::{contains_str, str_eq};
use crate::tuple::{Record, TagKey, TagList};

// =============================================================================
// Manifest
// =============================================================================

/// Const description of one layer and, through `below`, of the rest of the
/// stack.
#[derive(Debug, Clone, Copy)]
pub struct Manifest {
    pub component: &'static str,
    pub tags: &'static TagList,
    /// Whether `tags` are stored by this layer and can be read from above.
    pub stores: bool,
    pub reads: &'static TagList,
    pub options: &'static [&'static str],
    pub declared: &'static DeclList,
    pub requires: &'static [&'static str],
    pub below: Option<&'static Manifest>,
}

impl Manifest {
    /// Layers from the outermost down to the base.
    pub fn layers(&'static self) -> impl Iterator<Item = &'static Manifest> {
        core::iter::successors(Some(self), |m| m.below)
    }

    /// Number of layers, base included.
    pub const fn depth(&self) -> usize {
        let mut n = 1;
        let mut cur = self.below;
        while let Some(m) = cur {
            n += 1;
            cur = m.below;
        }
        n
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component)?;
        let mut cur = self.below;
        while let Some(m) = cur {
            write!(f, " -> {}", m.component)?;
            cur = m.below;
        }
        Ok(())
    }
}

// =============================================================================
// Stack
// =============================================================================

/// A component list folded onto a base.
pub trait Stack: 'static {
    type Node: Node;

    type Net<N: Node>: Net<Node = N>;

    const MANIFEST: &'static Manifest;
}

impl<D: Declarations> Stack for Base<D> {
    type Node = BaseNode;
    type Net<N: Node> = BaseNet<N, D>;

    const MANIFEST: &'static Manifest = &Manifest {
        component: "base",
        tags: &TagList::Nil,
        stores: false,
        reads: &TagList::Nil,
        options: &["parallel"],
        declared: D::LIST,
        requires: &[],
        below: None,
    };
}

impl<L: Component, S: Stack> Stack for (L, S) {
    type Node = L::Node<S::Node>;
    type Net<N: Node> = L::Net<S::Net<N>>;

    const MANIFEST: &'static Manifest = &Manifest {
        component: L::NAME,
        tags: L::TAGS,
        stores: L::STORES,
        reads: <L::Reads as Record>::TAGS,
        options: L::OPTIONS,
        declared: L::DECLARED,
        requires: L::REQUIRES,
        below: Some(S::MANIFEST),
    };
}

// =============================================================================
// Validation
// =============================================================================

/// First component, from `cur` down to the base, that lists `key` in its tags.
const fn tagged_by(mut cur: Option<&'static Manifest>, key: &TagKey) -> Option<&'static str> {
    while let Some(m) = cur {
        if m.tags.contains(key) {
            return Some(m.component);
        }
        cur = m.below;
    }
    None
}

/// Like [`tagged_by`], counting only layers that store their tags.
const fn stored_by(mut cur: Option<&'static Manifest>, key: &TagKey) -> Option<&'static str> {
    while let Some(m) = cur {
        if m.stores && m.tags.contains(key) {
            return Some(m.component);
        }
        cur = m.below;
    }
    None
}

const fn has_component(mut cur: Option<&'static Manifest>, name: &str) -> bool {
    while let Some(m) = cur {
        if str_eq(m.component, name) {
            return true;
        }
        cur = m.below;
    }
    false
}

const fn recognised(mut cur: Option<&'static Manifest>, option: &str) -> bool {
    while let Some(m) = cur {
        if contains_str(m.options, option) {
            return true;
        }
        cur = m.below;
    }
    false
}

/// Checks a whole stack.
///
/// Reports the first violation found walking from the outermost layer:
/// a component listed twice, a tag stored by two layers (or twice by one),
/// a `REQUIRES` or `Reads` entry not satisfied by a layer closer to the
/// base, or a declared option no layer recognises.
///
/// Read tags only count when a storing layer lists them; the value types
/// are checked by [`assert_reads`].
pub const fn validate(top: &'static Manifest) -> Result<(), CompositionError> {
    let mut cur = Some(top);
    while let Some(m) = cur {
        if has_component(m.below, m.component) {
            return Err(CompositionError::DuplicateComponent { component: m.component });
        }

        let mut tags = m.tags;
        while let TagList::Cons(key, rest) = tags {
            if rest.contains(key) {
                return Err(CompositionError::DuplicateTag {
                    tag: key.name,
                    first: m.component,
                    second: m.component,
                });
            }
            if let Some(other) = tagged_by(m.below, key) {
                return Err(CompositionError::DuplicateTag {
                    tag: key.name,
                    first: m.component,
                    second: other,
                });
            }
            tags = *rest;
        }

        let mut i = 0;
        while i < m.requires.len() {
            if !has_component(m.below, m.requires[i]) {
                return Err(CompositionError::MissingDependency {
                    component: m.component,
                    requires: m.requires[i],
                });
            }
            i += 1;
        }

        let mut reads = m.reads;
        while let TagList::Cons(key, rest) = reads {
            if stored_by(m.below, key).is_none() {
                return Err(CompositionError::MissingStorage { tag: key.name, component: m.component });
            }
            reads = *rest;
        }

        let mut declared = m.declared;
        while let DeclList::Cons { name, rest, .. } = declared {
            if !recognised(Some(top), *name) {
                return Err(CompositionError::UnknownOption { option: *name, component: m.component });
            }
            declared = *rest;
        }

        cur = m.below;
    }
    Ok(())
}

/// [`validate`], turning a violation into a const-evaluation panic.
///
/// ```compile_fail
/// use tola_stack::prelude::*;
///
/// #[derive(Tag)]
/// struct Count;
///
/// combine! { Broken = [Storage<tuple_t![Count: i32]>, Storage<tuple_t![Count: u8]>, Base]; }
/// ```
pub const fn assert_valid(top: &'static Manifest) {
    if let Err(err) = validate(top) {
        let msg = err.message();
        panic!("{}", msg.as_str());
    }
}

/// Every layer's `Reads` is provided, with matching value types, by the
/// storage of the layers below it.
#[diagnostic::on_unimplemented(
    message = "a component of `{Self}` reads storage the layers below do not provide",
    label = "read tag missing below, or stored with another value type",
    note = "every entry of a component's `Reads` must be stored closer to the base with the same value type."
)]
pub trait ReadsProvided<I> {}

impl<D: Declarations> ReadsProvided<()> for Base<D> {}

impl<L, S, I, J> ReadsProvided<(I, J)> for (L, S)
where
    L: Component,
    S: Stack + ReadsProvided<J>,
    S::Node: Provides<L::Reads, I>,
{
}

/// Type-level companion of [`assert_valid`]; fails to compile unless
/// every read resolves to a stored entry of the same value type.
///
/// ```compile_fail
/// use tola_stack::prelude::*;
///
/// #[derive(Tag)]
/// struct Count;
///
/// struct Bump;
///
/// impl Component for Bump {
///     const NAME: &'static str = "bump";
///     type Reads = tuple_t![Count: i32];
///     type Node<P: Node> = P;
///     type Net<P: Net> = P;
/// }
///
/// combine! { Mistyped = [Bump, Storage<tuple_t![Count: i64]>, Base]; }
/// ```
pub const fn assert_reads<S: Stack + ReadsProvided<I>, I>() {}

// =============================================================================
// Combination
// =============================================================================

/// A validated stack, as emitted by `combine!`.
pub trait Combination: 'static {
    type Stack: Stack;

    type Node: Node;

    type Net: Net<Node = Self::Node>;

    fn manifest() -> &'static Manifest {
        <Self::Stack as Stack>::MANIFEST
    }

    fn validate() -> Result<(), CompositionError> {
        validate(Self::manifest())
    }
}

/// Node type of a combination.
pub type NodeOf<C> = <C as Combination>::Node;

/// Net type of a combination.
pub type NetOf<C> = <C as Combination>::Net;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Decl, Parallel, Storage, Synchronised};
    use crate::tuple::Tag;

    #[derive(crate::Tag)]
    struct Count;

    #[derive(crate::Tag)]
    struct Flag;

    type Counted = Storage<crate::tuple_t![Count: i32]>;

    /// Stores `Count` itself, adds nothing at run time.
    struct Tally;

    impl Component for Tally {
        const NAME: &'static str = "tally";
        const TAGS: &'static TagList = &TagList::Cons(Count::KEY, &TagList::Nil);
        type Reads = crate::tuple::Nil;
        type Node<P: Node> = P;
        type Net<P: Net> = P;
    }

    /// Reads `Flag` and needs storage below it.
    struct Reader;

    impl Component for Reader {
        const NAME: &'static str = "reader";
        const REQUIRES: &'static [&'static str] = &["storage"];
        type Reads = crate::tuple_t![Flag: bool];
        type Node<P: Node> = P;
        type Net<P: Net> = P;
    }

    /// Lists `Flag` without storing it.
    struct Shadow;

    impl Component for Shadow {
        const NAME: &'static str = "shadow";
        const TAGS: &'static TagList = &TagList::Cons(Flag::KEY, &TagList::Nil);
        type Reads = crate::tuple::Nil;
        type Node<P: Node> = P;
        type Net<P: Net> = P;
    }

    fn check<S: Stack>() -> Result<(), CompositionError> {
        validate(S::MANIFEST)
    }

    #[test]
    fn test_manifest_order() {
        let manifest = <(Tally, (Counted, Base)) as Stack>::MANIFEST;
        let names: Vec<_> = manifest.layers().map(|m| m.component).collect();
        assert_eq!(names, ["tally", "storage", "base"]);
        assert_eq!(manifest.depth(), 3);
        assert_eq!(manifest.to_string(), "tally -> storage -> base");
    }

    #[test]
    fn test_valid_stack() {
        assert_eq!(check::<(Counted, Base<Decl<Parallel<true>, ()>>)>(), Ok(()));
        assert_eq!(check::<(Reader, (Storage<crate::tuple_t![Flag: bool]>, Base))>(), Ok(()));
    }

    #[test]
    fn test_duplicate_tag_across_layers() {
        assert_eq!(
            check::<(Tally, (Counted, Base))>(),
            Err(CompositionError::DuplicateTag { tag: "count", first: "tally", second: "storage" })
        );
    }

    #[test]
    fn test_duplicate_tag_within_layer() {
        type Twice = crate::Entry<Count, i32, crate::Defaulted, crate::tuple_t![Count: u8]>;
        assert_eq!(
            check::<(Storage<Twice>, Base)>(),
            Err(CompositionError::DuplicateTag { tag: "count", first: "storage", second: "storage" })
        );
    }

    #[test]
    fn test_duplicate_component() {
        assert_eq!(
            check::<(Storage<crate::tuple_t![Flag: bool]>, (Counted, Base))>(),
            Err(CompositionError::DuplicateComponent { component: "storage" })
        );
    }

    #[test]
    fn test_missing_dependency_and_storage() {
        assert_eq!(
            check::<(Reader, Base)>(),
            Err(CompositionError::MissingDependency { component: "reader", requires: "storage" })
        );
        assert_eq!(
            check::<(Reader, (Counted, Base))>(),
            Err(CompositionError::MissingStorage { tag: "flag", component: "reader" })
        );
        // providers must sit closer to the base
        assert_eq!(
            check::<(Storage<crate::tuple_t![Flag: bool]>, (Reader, Base))>(),
            Err(CompositionError::MissingDependency { component: "reader", requires: "storage" })
        );
    }

    #[test]
    fn test_reads_need_a_storing_layer() {
        assert_eq!(
            check::<(Reader, (Shadow, (Counted, Base)))>(),
            Err(CompositionError::MissingStorage { tag: "flag", component: "reader" })
        );
        let manifest = <(Reader, (Shadow, (Counted, Base))) as Stack>::MANIFEST;
        let stores: Vec<_> = manifest.layers().map(|m| m.stores).collect();
        assert_eq!(stores, [false, false, true, false]);
    }

    #[test]
    fn test_reads_resolve_with_value_type() {
        const _: () = assert_reads::<(Reader, (Storage<crate::tuple_t![Flag: bool]>, Base)), _>();
        const _: () = assert_reads::<(Tally, (Counted, Base)), _>();
        let manifest = <(Reader, (Storage<crate::tuple_t![Flag: bool]>, Base)) as Stack>::MANIFEST;
        let reads: Vec<_> = manifest.reads.into_iter().map(|key| key.name).collect();
        assert_eq!(reads, ["flag"]);
    }

    #[test]
    fn test_unknown_option() {
        assert_eq!(
            check::<(Counted, Base<Decl<Synchronised<true>, ()>>)>(),
            Err(CompositionError::UnknownOption { option: "synchronised", component: "base" })
        );
    }

    #[test]
    fn test_assert_valid_accepts() {
        const _: () = assert_valid(<(Counted, Base) as Stack>::MANIFEST);
    }
}
