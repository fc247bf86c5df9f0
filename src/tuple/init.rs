//! Building records from initializers.
//!
//! An initializer is any set of `(tag, value)` pairs that can be probed by
//! key. A record takes each declared tag from the initializer if present,
//! otherwise applies the entry's fallback policy. Tags the record does
//! not declare are ignored.

use core::any::{Any, type_name};

use super::record::{Entry, Nil, Record};
use super::tag::{Tag, TagKey};
use crate::error::BuildError;

// =============================================================================
// Initializer
// =============================================================================

/// Source of construction-time values.
pub trait Initializer {
    fn find(&self, key: &TagKey) -> Option<&dyn Any>;
}

impl Initializer for Nil {
    fn find(&self, _key: &TagKey) -> Option<&dyn Any> {
        None
    }
}

impl<T, V, D, R> Initializer for Entry<T, V, D, R>
where
    Entry<T, V, D, R>: Record,
{
    fn find(&self, key: &TagKey) -> Option<&dyn Any> {
        self.entry(key)
    }
}

impl<I: Initializer + ?Sized> Initializer for &I {
    fn find(&self, key: &TagKey) -> Option<&dyn Any> {
        (**self).find(key)
    }
}

/// Overlay of two initializers: `A` wins, `B` fills the gaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chain<A, B>(pub A, pub B);

impl<A: Initializer, B: Initializer> Initializer for Chain<A, B> {
    fn find(&self, key: &TagKey) -> Option<&dyn Any> {
        self.0.find(key).or_else(|| self.1.find(key))
    }
}

// =============================================================================
// Fallback policies
// =============================================================================

/// What an entry does when the initializer omits its tag.
pub trait Fallback<V>: 'static {
    fn fallback(key: &TagKey) -> Result<V, BuildError>;
}

/// Missing tags take `Default::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Defaulted;

/// Missing tags fail construction with [`BuildError::MissingTag`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl<V: Default> Fallback<V> for Defaulted {
    #[inline]
    fn fallback(_key: &TagKey) -> Result<V, BuildError> {
        Ok(V::default())
    }
}

impl<V> Fallback<V> for Required {
    fn fallback(key: &TagKey) -> Result<V, BuildError> {
        Err(BuildError::MissingTag { tag: key.name })
    }
}

// =============================================================================
// FromInit
// =============================================================================

/// Construction of a record from an initializer.
pub trait FromInit: Sized {
    fn from_init<I: Initializer + ?Sized>(init: &I) -> Result<Self, BuildError>;
}

impl FromInit for Nil {
    #[inline]
    fn from_init<I: Initializer + ?Sized>(_init: &I) -> Result<Self, BuildError> {
        Ok(Nil)
    }
}

impl<T, V, D, R> FromInit for Entry<T, V, D, R>
where
    T: Tag,
    V: Clone + 'static,
    D: Fallback<V>,
    R: FromInit,
{
    fn from_init<I: Initializer + ?Sized>(init: &I) -> Result<Self, BuildError> {
        let value = match init.find(&T::KEY) {
            Some(any) => any.downcast_ref::<V>().cloned().ok_or(BuildError::TypeMismatch {
                tag: T::NAME,
                expected: type_name::<V>(),
            })?,
            None => D::fallback(&T::KEY)?,
        };
        Ok(Entry::new(value, R::from_init(init)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(crate::Tag)]
    struct A;
    #[derive(crate::Tag)]
    struct B;
    #[derive(crate::Tag)]
    struct C;

    type Rec = Entry<A, bool, Defaulted, Entry<B, i32, Required, Nil>>;

    #[test]
    fn test_supplied_and_defaulted() {
        let init: Entry<B, i32, Defaulted, Nil> = Entry::new(5, Nil);
        let rec = Rec::from_init(&init).unwrap();
        assert!(!*rec.get::<A, _>());
        assert_eq!(*rec.get::<B, _>(), 5);
    }

    #[test]
    fn test_required_missing() {
        let init: Entry<A, bool, Defaulted, Nil> = Entry::new(true, Nil);
        let err = Rec::from_init(&init).unwrap_err();
        assert_eq!(err, BuildError::MissingTag { tag: "b" });
    }

    #[test]
    fn test_type_mismatch() {
        let init: Entry<B, u8, Defaulted, Nil> = Entry::new(5, Nil);
        let err = Rec::from_init(&init).unwrap_err();
        assert_eq!(err, BuildError::TypeMismatch { tag: "b", expected: "i32" });
    }

    #[test]
    fn test_unknown_tags_ignored() {
        let init: Entry<C, &'static str, Defaulted, Entry<B, i32, Defaulted, Nil>> =
            Entry::new("elsewhere", Entry::new(1, Nil));
        assert!(Rec::from_init(&init).is_ok());
    }

    #[test]
    fn test_chain_prefers_left() {
        let left: Entry<B, i32, Defaulted, Nil> = Entry::new(1, Nil);
        let right: Entry<B, i32, Defaulted, Entry<A, bool, Defaulted, Nil>> =
            Entry::new(2, Entry::new(true, Nil));
        let rec = Rec::from_init(&Chain(&left, &right)).unwrap();
        assert_eq!(*rec.get::<B, _>(), 1);
        assert!(*rec.get::<A, _>());
    }
}
