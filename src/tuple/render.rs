//! Textual rendering of tagged tuples.
//!
//! Canonical form is `(tag:value, tag:value)` in declaration order. Tooling
//! parses this from logs, so keep it stable.

use core::fmt;

use super::record::{Entry, Nil};
use super::tag::Tag;

/// Writes the `tag:value` sequence of a record.
pub trait PrintFields {
    fn print_fields(&self, f: &mut fmt::Formatter<'_>, first: bool) -> fmt::Result;
}

impl PrintFields for Nil {
    fn print_fields(&self, _f: &mut fmt::Formatter<'_>, _first: bool) -> fmt::Result {
        Ok(())
    }
}

impl<T: Tag, V: fmt::Display, D, R: PrintFields> PrintFields for Entry<T, V, D, R> {
    fn print_fields(&self, f: &mut fmt::Formatter<'_>, first: bool) -> fmt::Result {
        if !first {
            f.write_str(", ")?;
        }
        write!(f, "{}:{}", T::NAME, self.value())?;
        self.rest().print_fields(f, false)
    }
}

/// Bare `tag:value, ...` view of a record, see [`Record::fields`](super::Record::fields).
pub struct Fields<'a, R>(&'a R);

impl<'a, R> Fields<'a, R> {
    pub(crate) fn new(record: &'a R) -> Self {
        Self(record)
    }
}

impl<R: PrintFields> fmt::Display for Fields<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.print_fields(f, true)
    }
}

impl fmt::Display for Nil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("()")
    }
}

impl<T, V, D, R> fmt::Display for Entry<T, V, D, R>
where
    Self: PrintFields,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        self.print_fields(f, true)?;
        f.write_str(")")
    }
}

// =============================================================================
// Debug
// =============================================================================

/// Adds every slot of a record to a debug map.
pub trait DebugFields {
    fn debug_fields(&self, map: &mut fmt::DebugMap<'_, '_>);
}

impl DebugFields for Nil {
    fn debug_fields(&self, _map: &mut fmt::DebugMap<'_, '_>) {}
}

impl<T: Tag, V: fmt::Debug, D, R: DebugFields> DebugFields for Entry<T, V, D, R> {
    fn debug_fields(&self, map: &mut fmt::DebugMap<'_, '_>) {
        map.entry(&format_args!("{}", T::NAME), self.value());
        self.rest().debug_fields(map);
    }
}

impl<T, V, D, R> fmt::Debug for Entry<T, V, D, R>
where
    Self: DebugFields,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.debug_fields(&mut map);
        map.finish()
    }
}
