#![allow(clippy::crate_in_macro_def)]

//! # tola-stack
//!
//! Compile-time composition of layered node and net types.
//!
//! **Capability layers for simulated devices, stacked at the type level.**
//!
//! ## Architecture
//!
//! A stack is a list of components folded onto a terminal base. Each
//! component wraps the node and net produced by the components below it,
//! inherits all of their operations and adds its own.
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |  Layer 0: Primitives                                              |
//! |  - const-bool type selection, const string helpers, messages      |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 1: Tagged Tuple                                            |
//! |  - Tag, Entry/Nil records, Field lookup, Initializer, rendering   |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 2: Components                                              |
//! |  - Node / Net contracts, Base, Storage, declaration options       |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 3: Composition                                             |
//! |  - Stack fold, Manifest, const validation, combine!               |
//! +-------------------------------------------------------------------+
//! ```
//!
//! ### Tags
//! A tag is a unit struct. Its identity is its full path
//! (`module_path!()::Ident`), hashed with 64-bit FNV-1a into a [`TagKey`]
//! that composition-time checks compare in const context.
//!
//! ### Ordering
//! The first listed component is the outermost type. A component that
//! reads another one's storage must be listed before it.
//!
//! ## Quick Start
//!
//! ```
//! use tola_stack::prelude::*;
//!
//! #[derive(Tag)]
//! pub struct Flag;
//!
//! #[derive(Tag)]
//! pub struct Count;
//!
//! combine! {
//!     pub Device = [Storage<tuple_t![Flag: bool, Count: i32, Start: f64]>, Base];
//! }
//!
//! let mut net = NetOf::<Device>::build(&Nil).unwrap();
//! let uid = net.spawn(&tuple![Count: 2i32, Flag: true, Start: 1.0f64]).unwrap();
//! let node = net.node_mut(uid).unwrap();
//! *node.storage_mut::<Count, _>() += 1;
//! assert_eq!(*node.storage::<Count, _>(), 3);
//! assert_eq!(node.storage_tuple().to_string(), "(flag:true, count:3, start:1)");
//! ```
//!
//! A stack that stores the same tag twice does not compile:
//!
//! ```compile_fail
//! use tola_stack::prelude::*;
//!
//! #[derive(Tag)]
//! struct Count;
//!
//! struct Tally;
//!
//! impl Component for Tally {
//!     const NAME: &'static str = "tally";
//!     const TAGS: &'static TagList = &TagList::Cons(Count::KEY, &TagList::Nil);
//!     type Reads = Nil;
//!     type Node<P: Node> = P;
//!     type Net<P: Net> = P;
//! }
//!
//! combine! { Broken = [Tally, Storage<tuple_t![Count: i32]>, Base]; }
//! ```
//!
//! Neither does one passing an option nobody recognises:
//!
//! ```compile_fail
//! use tola_stack::prelude::*;
//!
//! combine! { Broken = [Base<decls![Synchronised<true>]>]; }
//! ```

// Allow `::tola_stack` to work inside the crate itself
extern crate self as tola_stack;

// Re-export paste for declare_flags!
pub use paste;

// =============================================================================
// Layer 0: Primitives (no dependencies)
// =============================================================================
pub mod primitives;

// =============================================================================
// Layer 1: Tagged Tuple
// =============================================================================
pub mod tuple;

pub mod error;

// =============================================================================
// Layer 2: Components
// =============================================================================
pub mod component;

// =============================================================================
// Layer 3: Composition
// =============================================================================
pub mod compose;

pub mod twin;

// =============================================================================
// Re-exports at Crate Root
// =============================================================================

pub use tuple::{
    Chain, Defaulted, Entry, Field, Fallback, FromInit, Here, Initializer, Nil, Record, Required,
    Start, Tag, TagKey, TagList, There, Uid,
};
pub use component::{
    Base, BaseNet, BaseNode, Component, Decl, Declaration, Declarations, DeviceId, Layered, Net,
    Node, Parallel, Storage, StorageAccess, StorageNode, Synchronised, TIME_MAX, TIME_MIN, Times,
};
pub use compose::{Combination, Manifest, NetOf, NodeOf, Stack};
pub use error::{BuildError, CompositionError};
pub use twin::{Mirrored, Separate, Twin, TwinOf};

// Re-export proc-macros
pub use macros::{Tag, combine, decls, tuple, tuple_t};

/// Common items for building stacks.
pub mod prelude {
    pub use crate::component::{
        // Contracts
        Component, Layered, Net, Node,
        // Layers
        Base, Storage, StorageAccess,
        // Options
        Parallel, Synchronised,
        DeviceId, Times,
    };
    pub use crate::compose::{Combination, NetOf, NodeOf};
    pub use crate::error::BuildError;
    pub use crate::tuple::{Chain, FromInit, Initializer, Nil, Record, Start, Tag, TagList, Uid};
    pub use macros::{Tag, combine, decls, tuple, tuple_t};
}
