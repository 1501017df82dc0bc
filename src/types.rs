//! Core types used throughout the ring.

use serde::{Deserialize, Serialize};

/// Identifier of a node slot on the ring.
///
/// Keys and identifiers share the same space: a key `k` is owned by the
/// joined node whose interval `(predecessor, id]` contains `k`.
pub type NodeId = u64;

/// Read-only snapshot of a single node slot.
///
/// This is everything a renderer or driving harness needs to depict ring
/// topology; the core knows nothing about presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    /// The slot's identifier.
    pub id: NodeId,
    /// Whether the node has completed the join protocol.
    pub joined: bool,
    /// The node immediately preceding this one; `None` until joined.
    pub predecessor: Option<NodeId>,
    /// Finger-table contents; empty until joined.
    pub fingers: Vec<NodeId>,
    /// Whether a value is currently stored at this slot's identifier.
    pub has_data: bool,
}

/// One row of a finger-table dump.
///
/// Row `i` pairs the finger start `id + 2^i` with the node currently
/// listed as that start's successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerRow {
    /// Start identifier of this finger interval.
    pub start: NodeId,
    /// Node recorded as the successor of `start`.
    pub node: NodeId,
}

/// Ring-level statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingStats {
    /// Number of identifier slots (`2^m_bits`).
    pub size: u64,
    /// Number of joined members.
    pub joined_count: usize,
    /// Number of slots currently holding a stored value.
    pub stored_keys: usize,
}
