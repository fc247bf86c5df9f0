//! Node and net contracts shared by every layer.
//!
//! A layer's node wraps its parent node and implements the full [`Node`]
//! surface. Operations the layer does not change are forwarded to the
//! parent explicitly; overrides call the parent's version themselves when
//! they augment rather than replace it. There is no implicit chaining.

use core::any::Any;

use crate::error::BuildError;
use crate::tuple::{Initializer, TagKey};

/// Node unique identifier.
pub type DeviceId = usize;

/// Simulated time.
pub type Times = f64;

/// Time that never comes.
pub const TIME_MAX: Times = f64::INFINITY;

/// Time before anything happened.
pub const TIME_MIN: Times = f64::NEG_INFINITY;

/// The local part of a composed component stack.
pub trait Node: Sized + 'static {
    /// Builds the node, parent first, from the shared initializer.
    fn build<I: Initializer + ?Sized>(init: &I) -> Result<Self, BuildError>;

    fn uid(&self) -> DeviceId;

    /// Dynamic probe into persistent storage, walking down the layers.
    fn storage_entry(&self, key: &TagKey) -> Option<&dyn Any>;

    fn storage_entry_mut(&mut self, key: &TagKey) -> Option<&mut dyn Any>;

    fn round_start(&mut self, t: Times);

    fn round_main(&mut self, t: Times);

    fn round_end(&mut self, t: Times);

    /// A full round: start, main, end.
    fn round(&mut self, t: Times) {
        self.round_start(t);
        self.round_main(t);
        self.round_end(t);
    }
}

/// The global part of a composed component stack.
pub trait Net: Sized + 'static {
    type Node: Node;

    /// Whether nodes may be operated from several threads. Layers that
    /// care partition access themselves; storage does no locking.
    const PARALLEL: bool;

    fn build<I: Initializer + ?Sized>(init: &I) -> Result<Self, BuildError>;

    /// Builds a node from `init` and takes ownership of it.
    fn spawn<I: Initializer + ?Sized>(&mut self, init: &I) -> Result<DeviceId, BuildError>;

    fn node(&self, uid: DeviceId) -> Option<&Self::Node>;

    fn node_mut(&mut self, uid: DeviceId) -> Option<&mut Self::Node>;

    fn node_count(&self) -> usize;

    /// Runs one round on every node.
    fn update(&mut self, t: Times);
}

/// The is-a link from a layer to the layer it extends.
pub trait Layered {
    type Parent;

    fn parent(&self) -> &Self::Parent;

    fn parent_mut(&mut self) -> &mut Self::Parent;
}
