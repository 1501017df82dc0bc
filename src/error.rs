//! Error types for the ring core.

use crate::types::NodeId;
use thiserror::Error;

/// Result type alias for ring operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the ring core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Join protocol precondition violations.
    #[error("join error: {0}")]
    Join(#[from] JoinError),

    /// Routing failures.
    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),

    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),

    /// Identifier outside the ring's identifier space.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),
}

/// Join protocol precondition violations.
///
/// These are reported before any state is mutated; a rejected join leaves
/// the ring exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// The node has already completed the join protocol.
    #[error("node {0} has already joined")]
    AlreadyJoined(NodeId),

    /// The entry-point peer is not itself a joined member.
    #[error("peer {0} is not a joined member of the ring")]
    PeerNotJoined(NodeId),

    /// Bootstrap (join without a peer) attempted on a non-empty ring.
    #[error("ring already has a joined member, bootstrap requires an empty ring")]
    RingNotEmpty,
}

/// Routing failures.
///
/// Apart from `NotJoined`, these indicate inconsistent routing state and
/// should be treated as a bug in join/update logic rather than retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// The node has no routing state; it never joined the ring.
    #[error("node {0} has not joined the ring")]
    NotJoined(NodeId),

    /// A lookup walked more hops than the ring has slots.
    #[error("lookup for {target} exceeded {hops} hops, finger tables are inconsistent")]
    HopLimitExceeded { target: NodeId, hops: u64 },

    /// A finger-update propagation revisited more nodes than the ring has
    /// slots, so the predecessor chain must contain a cycle.
    #[error("finger update for index {index} looped past ring size")]
    UpdateLoop { index: usize },

    /// A joined node is missing its predecessor link.
    #[error("node {0} has no predecessor")]
    MissingPredecessor(NodeId),
}
