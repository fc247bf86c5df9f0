//! A pair of values that may or may not share storage.
//!
//! `Twin<T, Mirrored>` keeps a single cell: `first` and `second` are two
//! names for it, and a write through one is seen through the other.
//! `Twin<T, Separate>` keeps two independent cells. The mode is part of
//! the type.
//!
//! ```
//! use tola_stack::twin::{Mirrored, Twin};
//!
//! let mut t = Twin::<i32, Mirrored>::new(0);
//! *t.first_mut() = 42;
//! assert_eq!(*t.second(), 42);
//! ```

use core::fmt;

use crate::primitives::If;

/// Storage strategy of a [`Twin`].
pub trait Aliasing: 'static {
    const MIRRORED: bool;

    type Slots<T>;

    fn fill_default<T: Default>() -> Self::Slots<T>;

    fn first<T>(slots: &Self::Slots<T>) -> &T;

    fn first_mut<T>(slots: &mut Self::Slots<T>) -> &mut T;

    fn second<T>(slots: &Self::Slots<T>) -> &T;

    fn second_mut<T>(slots: &mut Self::Slots<T>) -> &mut T;
}

/// One cell behind both names.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mirrored;

/// One cell per name.
#[derive(Debug, Clone, Copy, Default)]
pub struct Separate;

impl Aliasing for Mirrored {
    const MIRRORED: bool = true;

    type Slots<T> = T;

    #[inline]
    fn fill_default<T: Default>() -> T {
        T::default()
    }

    #[inline]
    fn first<T>(slots: &T) -> &T {
        slots
    }

    #[inline]
    fn first_mut<T>(slots: &mut T) -> &mut T {
        slots
    }

    #[inline]
    fn second<T>(slots: &T) -> &T {
        slots
    }

    #[inline]
    fn second_mut<T>(slots: &mut T) -> &mut T {
        slots
    }
}

impl Aliasing for Separate {
    const MIRRORED: bool = false;

    type Slots<T> = (T, T);

    #[inline]
    fn fill_default<T: Default>() -> (T, T) {
        (T::default(), T::default())
    }

    #[inline]
    fn first<T>(slots: &(T, T)) -> &T {
        &slots.0
    }

    #[inline]
    fn first_mut<T>(slots: &mut (T, T)) -> &mut T {
        &mut slots.0
    }

    #[inline]
    fn second<T>(slots: &(T, T)) -> &T {
        &slots.1
    }

    #[inline]
    fn second_mut<T>(slots: &mut (T, T)) -> &mut T {
        &mut slots.1
    }
}

/// Seeds both names of a [`Twin`] from one value.
///
/// Only `Separate` needs a second copy, so only it asks for `T: Clone`.
pub trait Fill<T>: Aliasing {
    fn fill(value: T) -> Self::Slots<T>;
}

impl<T> Fill<T> for Mirrored {
    #[inline]
    fn fill(value: T) -> T {
        value
    }
}

impl<T: Clone> Fill<T> for Separate {
    #[inline]
    fn fill(value: T) -> (T, T) {
        (value.clone(), value)
    }
}

/// Two logical values, `first` and `second`, stored according to `M`.
pub struct Twin<T, M: Aliasing = Separate> {
    slots: M::Slots<T>,
}

/// [`Twin`] with the mode picked by a const flag.
pub type TwinOf<T, const MIRRORED: bool> = Twin<T, If<MIRRORED, Mirrored, Separate>>;

impl<T, M: Aliasing> Twin<T, M> {
    /// Both names start out holding `value`.
    pub fn new(value: T) -> Self
    where
        M: Fill<T>,
    {
        Twin { slots: M::fill(value) }
    }

    #[inline]
    pub fn first(&self) -> &T {
        M::first(&self.slots)
    }

    #[inline]
    pub fn first_mut(&mut self) -> &mut T {
        M::first_mut(&mut self.slots)
    }

    #[inline]
    pub fn second(&self) -> &T {
        M::second(&self.slots)
    }

    #[inline]
    pub fn second_mut(&mut self) -> &mut T {
        M::second_mut(&mut self.slots)
    }

    #[inline]
    pub const fn is_mirrored(&self) -> bool {
        M::MIRRORED
    }
}

impl<T> Twin<T, Separate> {
    pub fn from_pair(first: T, second: T) -> Self {
        Twin { slots: (first, second) }
    }

    pub fn into_pair(self) -> (T, T) {
        self.slots
    }
}

impl<T: Default, M: Aliasing> Default for Twin<T, M> {
    fn default() -> Self {
        Twin { slots: M::fill_default() }
    }
}

impl<T, M: Aliasing> Clone for Twin<T, M>
where
    M::Slots<T>: Clone,
{
    fn clone(&self) -> Self {
        Twin { slots: self.slots.clone() }
    }
}

impl<T, M: Aliasing> Copy for Twin<T, M> where M::Slots<T>: Copy {}

impl<T: PartialEq, M: Aliasing> PartialEq for Twin<T, M> {
    fn eq(&self, other: &Self) -> bool {
        self.first() == other.first() && self.second() == other.second()
    }
}

impl<T: Eq, M: Aliasing> Eq for Twin<T, M> {}

impl<T: fmt::Debug, M: Aliasing> fmt::Debug for Twin<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Twin")
            .field("first", self.first())
            .field("second", self.second())
            .field("mirrored", &M::MIRRORED)
            .finish()
    }
}

impl<T: fmt::Display, M: Aliasing> fmt::Display for Twin<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(first:{}, second:{})", self.first(), self.second())
    }
}
