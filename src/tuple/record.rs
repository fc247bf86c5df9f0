//! Tagged tuple storage: `Nil` and `Entry` cons cells.
//!
//! Shape is fixed by the type; only values change. Lookup by tag is
//! resolved at compile time through the `Here` / `There<I>` index types.

use core::any::Any;
use core::marker::PhantomData;

use super::tag::{Tag, TagKey, TagList};

// =============================================================================
// Storage
// =============================================================================

/// Empty tagged tuple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nil;

/// One `(tag, value)` slot followed by the rest of the tuple.
///
/// `D` is the fallback policy applied when an initializer omits the tag
/// (see [`Defaulted`](super::Defaulted) and [`Required`](super::Required)).
pub struct Entry<T, V, D, R> {
    value: V,
    rest: R,
    // fn() keeps auto traits independent of the tag and policy markers
    _marker: PhantomData<fn() -> (T, D)>,
}

impl<T, V, D, R> Entry<T, V, D, R> {
    #[inline]
    pub const fn new(value: V, rest: R) -> Self {
        Self { value, rest, _marker: PhantomData }
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    #[inline]
    pub fn rest(&self) -> &R {
        &self.rest
    }

    #[inline]
    pub fn rest_mut(&mut self) -> &mut R {
        &mut self.rest
    }

    pub fn into_parts(self) -> (V, R) {
        (self.value, self.rest)
    }
}

impl<T, V: Clone, D, R: Clone> Clone for Entry<T, V, D, R> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone(), self.rest.clone())
    }
}

impl<T, V: PartialEq, D, R: PartialEq> PartialEq for Entry<T, V, D, R> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.rest == other.rest
    }
}

impl<T, V: Eq, D, R: Eq> Eq for Entry<T, V, D, R> {}

impl<T, V: Default, R: Default> Default for Entry<T, V, super::Defaulted, R> {
    fn default() -> Self {
        Self::new(V::default(), R::default())
    }
}

// =============================================================================
// Field - compile-time indexed access
// =============================================================================

/// Index: the tag is at the head.
pub struct Here;

/// Index: the tag is somewhere in the rest.
pub struct There<I>(PhantomData<I>);

/// Access to the slot named by tag `T`.
///
/// `I` is inferred; callers write `_`.
#[diagnostic::on_unimplemented(
    message = "tag `{T}` is not declared in this tagged tuple",
    label = "`{Self}` has no slot for `{T}`",
    note = "declare the tag in the `tuple_t!` list of the record."
)]
pub trait Field<T, I> {
    type Value;

    fn field(&self) -> &Self::Value;

    fn field_mut(&mut self) -> &mut Self::Value;
}

impl<T, V, D, R> Field<T, Here> for Entry<T, V, D, R> {
    type Value = V;

    #[inline(always)]
    fn field(&self) -> &V {
        &self.value
    }

    #[inline(always)]
    fn field_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

impl<T, U, V, D, R, I> Field<T, There<I>> for Entry<U, V, D, R>
where
    R: Field<T, I>,
{
    type Value = R::Value;

    #[inline(always)]
    fn field(&self) -> &R::Value {
        self.rest.field()
    }

    #[inline(always)]
    fn field_mut(&mut self) -> &mut R::Value {
        self.rest.field_mut()
    }
}

// =============================================================================
// Record - whole-tuple operations
// =============================================================================

/// A tagged tuple.
///
/// Provides tag-addressed accessors on top of [`Field`] and the dynamic
/// `entry` probe used by initializers and generic layers.
pub trait Record: Sized + 'static {
    /// Declared tags, in declaration order.
    const TAGS: &'static TagList;

    /// Number of slots.
    const LEN: usize;

    /// Dynamic lookup by key.
    fn entry(&self, key: &TagKey) -> Option<&dyn Any>;

    /// Dynamic mutable lookup by key.
    fn entry_mut(&mut self, key: &TagKey) -> Option<&mut dyn Any>;

    /// Read access to the slot of `T`.
    #[inline]
    fn get<T, I>(&self) -> &<Self as Field<T, I>>::Value
    where
        Self: Field<T, I>,
    {
        self.field()
    }

    /// Write access to the slot of `T`.
    #[inline]
    fn get_mut<T, I>(&mut self) -> &mut <Self as Field<T, I>>::Value
    where
        Self: Field<T, I>,
    {
        self.field_mut()
    }

    /// Read access, with the tag given as a value.
    #[inline]
    fn at<T, I>(&self, _tag: T) -> &<Self as Field<T, I>>::Value
    where
        Self: Field<T, I>,
    {
        self.field()
    }

    /// Write access, with the tag given as a value.
    #[inline]
    fn at_mut<T, I>(&mut self, _tag: T) -> &mut <Self as Field<T, I>>::Value
    where
        Self: Field<T, I>,
    {
        self.field_mut()
    }

    /// Replace the value of `T`, returning the previous one.
    #[inline]
    fn set<T, I>(&mut self, value: <Self as Field<T, I>>::Value) -> <Self as Field<T, I>>::Value
    where
        Self: Field<T, I>,
    {
        core::mem::replace(self.field_mut(), value)
    }

    /// Displayable view rendering `tag:value, ...` without delimiters.
    #[inline]
    fn fields(&self) -> super::render::Fields<'_, Self> {
        super::render::Fields::new(self)
    }
}

impl Record for Nil {
    const TAGS: &'static TagList = &TagList::Nil;
    const LEN: usize = 0;

    fn entry(&self, _key: &TagKey) -> Option<&dyn Any> {
        None
    }

    fn entry_mut(&mut self, _key: &TagKey) -> Option<&mut dyn Any> {
        None
    }
}

impl<T, V, D, R> Record for Entry<T, V, D, R>
where
    T: Tag,
    V: Any,
    D: 'static,
    R: Record,
{
    const TAGS: &'static TagList = &TagList::Cons(T::KEY, R::TAGS);
    const LEN: usize = R::LEN + 1;

    fn entry(&self, key: &TagKey) -> Option<&dyn Any> {
        if T::KEY.same(key) {
            Some(&self.value)
        } else {
            self.rest.entry(key)
        }
    }

    fn entry_mut(&mut self, key: &TagKey) -> Option<&mut dyn Any> {
        if T::KEY.same(key) {
            Some(&mut self.value)
        } else {
            self.rest.entry_mut(key)
        }
    }
}
