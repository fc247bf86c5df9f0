//! The terminal layer of every stack.
//!
//! [`BaseNode`] knows its uid and the times of its current and previous
//! rounds. [`BaseNet`] owns the nodes, assigns uids and drives rounds.

use core::any::Any;
use core::marker::PhantomData;
use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use super::decl::Declarations;
use super::node::{DeviceId, Net, Node, TIME_MIN, Times};
use crate::error::BuildError;
use crate::tuple::{Chain, FromInit, Initializer, Record, Tag, TagKey, Uid};

/// Terminal component, parameterised by its declaration options.
///
/// Recognises `parallel`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base<D = ()>(PhantomData<D>);

type BaseInit = crate::tuple_t![Uid: DeviceId];

// =============================================================================
// BaseNode
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BaseNode {
    uid: DeviceId,
    current: Times,
    previous: Times,
}

impl BaseNode {
    /// Start time of the round in progress, or of the last one run.
    pub fn current_time(&self) -> Times {
        self.current
    }

    pub fn previous_time(&self) -> Times {
        self.previous
    }
}

impl Node for BaseNode {
    fn build<I: Initializer + ?Sized>(init: &I) -> Result<Self, BuildError> {
        let init = BaseInit::from_init(init)?;
        Ok(BaseNode { uid: *init.get::<Uid, _>(), current: TIME_MIN, previous: TIME_MIN })
    }

    #[inline]
    fn uid(&self) -> DeviceId {
        self.uid
    }

    fn storage_entry(&self, _key: &TagKey) -> Option<&dyn Any> {
        None
    }

    fn storage_entry_mut(&mut self, _key: &TagKey) -> Option<&mut dyn Any> {
        None
    }

    fn round_start(&mut self, t: Times) {
        self.previous = self.current;
        self.current = t;
    }

    fn round_main(&mut self, _t: Times) {}

    fn round_end(&mut self, _t: Times) {}
}

// =============================================================================
// BaseNet
// =============================================================================

/// Owner of every node of a stack, keyed by uid.
pub struct BaseNet<N, D = ()> {
    nodes: BTreeMap<DeviceId, N>,
    next_uid: DeviceId,
    _decls: PhantomData<fn() -> D>,
}

impl<N, D> BaseNet<N, D> {
    /// Nodes in uid order.
    pub fn iter(&self) -> impl Iterator<Item = (DeviceId, &N)> {
        self.nodes.iter().map(|(uid, node)| (*uid, node))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (DeviceId, &mut N)> {
        self.nodes.iter_mut().map(|(uid, node)| (*uid, node))
    }

    /// Smallest uid at or after `from` not taken by a node.
    fn first_free(&self, from: DeviceId) -> Option<DeviceId> {
        let mut candidate = from;
        for &uid in self.nodes.range(from..).map(|(uid, _)| uid) {
            if uid != candidate {
                break;
            }
            candidate = candidate.checked_add(1)?;
        }
        Some(candidate)
    }

    /// Uid given to a node spawned without one; wraps to the lowest free uid
    /// once the top of the range is taken.
    fn fresh_uid(&self) -> Option<DeviceId> {
        self.first_free(self.next_uid).or_else(|| self.first_free(0))
    }
}

impl<N: core::fmt::Debug, D> core::fmt::Debug for BaseNet<N, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BaseNet")
            .field("nodes", &self.nodes)
            .field("next_uid", &self.next_uid)
            .finish()
    }
}

impl<N: Node, D: Declarations> Net for BaseNet<N, D> {
    type Node = N;

    const PARALLEL: bool = D::LIST.flag("parallel", false);

    fn build<I: Initializer + ?Sized>(_init: &I) -> Result<Self, BuildError> {
        debug!(parallel = Self::PARALLEL, "built base net");
        Ok(BaseNet { nodes: BTreeMap::new(), next_uid: 0, _decls: PhantomData })
    }

    fn spawn<I: Initializer + ?Sized>(&mut self, init: &I) -> Result<DeviceId, BuildError> {
        let built = match self.fresh_uid() {
            Some(fresh) => N::build(&Chain(init, &crate::tuple![Uid: fresh])),
            None if init.find(&Uid::KEY).is_some() => N::build(init),
            None => {
                warn!(nodes = self.nodes.len(), "no free uid for a new node");
                return Err(BuildError::UidsExhausted);
            }
        };
        let node = built.inspect_err(|err| warn!(%err, "node construction failed"))?;
        let uid = node.uid();
        if self.nodes.contains_key(&uid) {
            warn!(uid, "rejected node with a uid already in use");
            return Err(BuildError::DuplicateUid(uid));
        }
        self.next_uid = self.next_uid.max(uid.saturating_add(1));
        self.nodes.insert(uid, node);
        debug!(uid, nodes = self.nodes.len(), "spawned node");
        Ok(uid)
    }

    #[inline]
    fn node(&self, uid: DeviceId) -> Option<&N> {
        self.nodes.get(&uid)
    }

    #[inline]
    fn node_mut(&mut self, uid: DeviceId) -> Option<&mut N> {
        self.nodes.get_mut(&uid)
    }

    #[inline]
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn update(&mut self, t: Times) {
        trace!(t, nodes = self.nodes.len(), "round");
        for node in self.nodes.values_mut() {
            node.round(t);
        }
    }
}
