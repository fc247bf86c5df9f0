//! # Tagged Tuples
//!
//! Fixed-shape heterogeneous records addressed by [`Tag`] types.
//!
//! - **Types**: `Nil`, `Entry<Tag, Value, Fallback, Rest>` (build with `tuple_t!`).
//! - **Values**: `tuple!` for literals, `FromInit` for initializer-driven construction.
//! - **Access**: `get::<T, _>()`, `get_mut::<T, _>()`, `at(tag)`, `at_mut(tag)`, `set`.
//!
//! ```text
//! tuple_t![Flag: bool, Count: i32]
//!   = Entry<Flag, bool, Defaulted, Entry<Count, i32, Defaulted, Nil>>
//! ```

pub mod tag;
pub mod record;
pub mod init;
pub mod render;

pub use tag::{Start, Tag, TagIter, TagKey, TagList, Uid};
pub use record::{Entry, Field, Here, Nil, Record, There};
pub use init::{Chain, Defaulted, Fallback, FromInit, Initializer, Required};
pub use render::{DebugFields, Fields, PrintFields};
