//! # Layer 2: Components
//!
//! A component is a type-level function from a parent node/net pair to a
//! child pair that inherits every parent capability and adds its own state
//! and operations.
//!
//! ```text
//! combine![Counter, Storage<R>, Base]
//!
//!   Node = CounterNode<StorageNode<R, BaseNode>>
//!   Net  = CounterNet<BaseNet<Node, ()>>          (storage keeps its parent net)
//! ```
//!
//! The first listed component is the outermost type; the terminal base sits
//! last. A component that depends on state declared by another must be
//! listed before it, so that the provider is closer to the base.

pub mod node;
pub mod decl;
pub mod base;
pub mod storage;

pub use node::{DeviceId, Layered, Net, Node, TIME_MAX, TIME_MIN, Times};
pub use decl::{Decl, DeclList, Declaration, Declarations, Parallel, Synchronised};
pub use base::{Base, BaseNet, BaseNode};
pub use storage::{
    Inherited, Local, Provides, Storage, StorageAccess, StorageField, StorageNode, StorageTuple,
};

use crate::tuple::{Record, TagList};

/// A capability layer.
///
/// The associated consts describe the layer to the composition driver; the
/// GATs produce the layer's node and net from the parent ones.
///
/// `Reads` lists the storage entries, with their value types, that the layer
/// uses from layers below it; `Nil` when it reads nothing. `combine!` checks
/// that a storage layer below holds each of them with exactly that type.
pub trait Component: 'static {
    /// Unique name of the component within a stack.
    const NAME: &'static str;

    /// Tags this component contributes.
    const TAGS: &'static TagList = &TagList::Nil;

    /// Whether this component owns a record holding its `TAGS`.
    const STORES: bool = false;

    /// Declaration options this component recognises.
    const OPTIONS: &'static [&'static str] = &[];

    /// Declaration options passed to this component.
    const DECLARED: &'static DeclList = &DeclList::Nil;

    /// Components that must sit below this one.
    const REQUIRES: &'static [&'static str] = &[];

    /// Storage entries read from layers below, e.g. `tuple_t![Count: i32]`.
    type Reads: Record;

    type Node<P: Node>: Node;

    type Net<P: Net>: Net<Node = P::Node>;
}
