//! Tags: zero-sized names for record slots.

use core::fmt;

use crate::primitives::const_utils::{fnv1a_64_str, str_eq};

/// Tag Trait
///
/// Implemented by unit structs naming a slot of a tagged tuple.
/// Use `#[derive(Tag)]` rather than implementing it by hand.
pub trait Tag: 'static {
    /// Name used when rendering records (`name:value`).
    const NAME: &'static str;

    /// Full path of the tag type, `module::Ident`. This is the identity.
    const PATH: &'static str;

    /// Const descriptor of this tag.
    const KEY: TagKey = TagKey::new(Self::NAME, Self::PATH);
}

/// Runtime-visible descriptor of a [`Tag`], usable in const context.
#[derive(Clone, Copy)]
pub struct TagKey {
    pub name: &'static str,
    pub path: &'static str,
    /// FNV-1a hash of `path`.
    pub id: u64,
}

impl TagKey {
    pub const fn new(name: &'static str, path: &'static str) -> Self {
        Self { name, path, id: fnv1a_64_str(path) }
    }

    /// Identity comparison: hash first, then the full path.
    pub const fn same(&self, other: &TagKey) -> bool {
        self.id == other.id && str_eq(self.path, other.path)
    }
}

impl PartialEq for TagKey {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for TagKey {}

impl fmt::Debug for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// =============================================================================
// TagList - const linked list of keys
// =============================================================================

/// Tags of a record (or of a whole layer) in declaration order.
///
/// Built as a linked list so generic impls can prepend to their parent's
/// list inside an associated const.
#[derive(Debug, Clone, Copy)]
pub enum TagList {
    Nil,
    Cons(TagKey, &'static TagList),
}

impl TagList {
    pub const fn len(&self) -> usize {
        let mut n = 0;
        let mut cur = self;
        while let TagList::Cons(_, rest) = cur {
            n += 1;
            cur = *rest;
        }
        n
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, TagList::Nil)
    }

    pub const fn contains(&self, key: &TagKey) -> bool {
        let mut cur = self;
        while let TagList::Cons(head, rest) = cur {
            if head.same(key) {
                return true;
            }
            cur = *rest;
        }
        false
    }

    pub fn iter(&self) -> TagIter<'_> {
        TagIter { cur: self }
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a TagKey;
    type IntoIter = TagIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct TagIter<'a> {
    cur: &'a TagList,
}

impl<'a> Iterator for TagIter<'a> {
    type Item = &'a TagKey;

    fn next(&mut self) -> Option<Self::Item> {
        match self.cur {
            TagList::Nil => None,
            TagList::Cons(head, rest) => {
                self.cur = *rest;
                Some(head)
            }
        }
    }
}

// =============================================================================
// Standard Tags
// =============================================================================

/// Node unique identifier.
#[derive(Debug, Clone, Copy, Default, crate::Tag)]
#[tag(name = "uid")]
pub struct Uid;

/// Start time of a node.
#[derive(Debug, Clone, Copy, Default, crate::Tag)]
#[tag(name = "start")]
pub struct Start;
