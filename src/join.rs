//! The aggressive join protocol: a joining node builds its finger table
//! through an existing member, splices itself in front of its successor,
//! and patches every table that must now route through it.
//!
//! Joins must be serialized against a given ring; there is no mutual
//! exclusion, and the protocol has no stabilization pass to repair the
//! damage of interleaved joins.

use crate::error::{JoinError, Result, RoutingError};
use crate::interval::{in_interval_co, in_interval_oo, pos_mod};
use crate::ring::Ring;
use crate::types::NodeId;
use tracing::{debug, info, warn};

impl Ring {
    /// Integrate node `id` into the ring.
    ///
    /// With `peer` set to `None` this bootstraps the ring's first member:
    /// every finger points at the node itself and it is its own
    /// predecessor. With a joined `peer` as entry point, the node's finger
    /// table is resolved through the peer's routing state and existing
    /// members are notified of the new node.
    ///
    /// All preconditions are checked before any mutation; a rejected join
    /// leaves the ring untouched. A node joins at most once and never
    /// leaves.
    pub fn join(&mut self, id: NodeId, peer: Option<NodeId>) -> Result<()> {
        self.check_id(id)?;
        if self.node(id)?.joined {
            warn!(node = id, "join rejected: already a member");
            return Err(JoinError::AlreadyJoined(id).into());
        }

        match peer {
            Some(peer) => {
                self.check_id(peer)?;
                if !self.node(peer)?.joined {
                    warn!(node = id, peer, "join rejected: peer is not a member");
                    return Err(JoinError::PeerNotJoined(peer).into());
                }
                self.init_finger_table(id, peer)?;
                self.update_others(id)?;
            }
            None => {
                if self.has_joined_member() {
                    warn!(node = id, "bootstrap rejected: ring is not empty");
                    return Err(JoinError::RingNotEmpty.into());
                }
                let fingers = vec![id; self.finger_count()];
                let node = self.node_mut(id)?;
                node.fingers = fingers;
                node.predecessor = Some(id);
            }
        }

        self.node_mut(id)?.joined = true;
        info!(node = id, ?peer, "node joined the ring");
        Ok(())
    }

    /// Build `id`'s finger table through the joined entry point `peer` and
    /// splice `id` in immediately before its successor.
    fn init_finger_table(&mut self, id: NodeId, peer: NodeId) -> Result<()> {
        let size = self.size();

        let successor = self.find_successor(peer, pos_mod(id as i64 + 1, size))?;
        let predecessor = self
            .node(successor)?
            .predecessor
            .ok_or(RoutingError::MissingPredecessor(successor))?;
        self.node_mut(id)?.predecessor = Some(predecessor);
        self.node_mut(successor)?.predecessor = Some(id);

        let mut fingers = Vec::with_capacity(self.finger_count());
        fingers.push(successor);
        for i in 1..self.finger_count() {
            let start = (id + (1u64 << i)) % size;
            let prev = fingers[i - 1];
            // finger starts are non-decreasing in ring order, so the
            // previous entry often already covers this start
            let entry = if in_interval_co(start, id, prev, size) {
                prev
            } else {
                self.find_successor(peer, start)?
            };
            fingers.push(entry);
        }
        self.node_mut(id)?.fingers = fingers;
        debug!(node = id, peer, successor, predecessor, "finger table initialized");
        Ok(())
    }

    /// Notify every node whose finger table must now route through `id`.
    ///
    /// For finger index `i` the last candidate is the joined node at or
    /// before `id - 2^i`; the update then propagates backwards along the
    /// predecessor chain until a node declines.
    fn update_others(&mut self, id: NodeId) -> Result<()> {
        let size = self.size();
        for i in 0..self.finger_count() {
            let target = pos_mod(id as i64 - (1i64 << i), size);
            // find_predecessor(target) stops one node short when the
            // identifier is itself occupied; that node's finger also
            // starts at or before id
            let last = if self.is_joined(target) {
                target
            } else {
                self.find_predecessor(id, target)?
            };
            self.update_finger_table(last, id, i)?;
        }
        Ok(())
    }

    /// Offer `s` as a better `i`-th finger to `at`, walking the
    /// predecessor chain while the offer keeps being accepted.
    ///
    /// The acceptance interval is open on the left: a node never records
    /// itself as its own finger at a start strictly past its identifier.
    fn update_finger_table(&mut self, at: NodeId, s: NodeId, i: usize) -> Result<()> {
        let size = self.size();
        let mut current = at;
        // the predecessor chain revisits no node on a consistent ring
        for _ in 0..size {
            let node = self.node(current)?;
            if !node.has_routing_state() {
                // placeholder slot; nothing routes through it
                return Ok(());
            }
            if !in_interval_oo(s, current, node.fingers[i], size) {
                return Ok(());
            }
            let predecessor = node
                .predecessor
                .ok_or(RoutingError::MissingPredecessor(current))?;
            self.node_mut(current)?.fingers[i] = s;
            debug!(node = current, finger = i, new = s, "finger entry updated");
            current = predecessor;
        }
        Err(RoutingError::UpdateLoop { index: i }.into())
    }
}
