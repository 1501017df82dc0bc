//! Node slot state.

use crate::types::{NodeId, NodeView};
use bytes::Bytes;
use std::collections::BTreeSet;

/// A single slot on the ring.
///
/// Every identifier has exactly one slot for the lifetime of the ring; a
/// slot is a placeholder until its node completes the join protocol.
/// Finger and predecessor links are identifiers indexing back into the
/// ring's slot array, so the ring stays the sole owner and there are no
/// reference cycles.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) id: NodeId,
    pub(crate) joined: bool,
    /// Entry `i` is the node responsible for `id + 2^i`. Empty until the
    /// join protocol builds the table.
    pub(crate) fingers: Vec<NodeId>,
    pub(crate) predecessor: Option<NodeId>,
    /// Value stored at this slot's identifier, independent of which node
    /// owns the key.
    pub(crate) data: Option<Bytes>,
    /// Keys this node has stored as their owner.
    pub(crate) dataset: BTreeSet<NodeId>,
}

impl Node {
    pub(crate) fn placeholder(id: NodeId) -> Self {
        Self {
            id,
            joined: false,
            fingers: Vec::new(),
            predecessor: None,
            data: None,
            dataset: BTreeSet::new(),
        }
    }

    /// The node's immediate successor, `fingers[0]`.
    ///
    /// Only meaningful once the finger table exists; callers guard with
    /// [`has_routing_state`](Self::has_routing_state).
    pub(crate) fn successor(&self) -> NodeId {
        self.fingers[0]
    }

    /// Whether the node can participate in routing. True for every joined
    /// node, and for a joining node between finger-table construction and
    /// the final joined flag.
    pub(crate) fn has_routing_state(&self) -> bool {
        !self.fingers.is_empty()
    }

    /// Finger start for entry `i`: `id + 2^i` on a ring of `size` slots.
    pub(crate) fn finger_start(&self, i: usize, size: u64) -> NodeId {
        (self.id + (1u64 << i)) % size
    }

    pub(crate) fn view(&self) -> NodeView {
        NodeView {
            id: self.id,
            joined: self.joined,
            predecessor: self.predecessor,
            fingers: self.fingers.clone(),
            has_data: self.data.is_some(),
        }
    }
}
