//! The lookup walk: successor and predecessor resolution over finger
//! tables.
//!
//! All three operations are read-only; each lookup either resolves to a
//! joined node or reports a definitive error. A hop cap equal to the ring
//! size guards against inconsistent tables — a lookup must never silently
//! return a wrong owner.

use crate::error::{Result, RoutingError};
use crate::interval::{in_interval_oc, in_interval_oo};
use crate::ring::Ring;
use crate::types::NodeId;
use tracing::trace;

impl Ring {
    /// The node responsible for `target`: the successor of `target`'s
    /// predecessor, resolved by a greedy finger walk starting at `from`.
    pub fn find_successor(&self, from: NodeId, target: NodeId) -> Result<NodeId> {
        let pred = self.find_predecessor(from, target)?;
        Ok(self.node(pred)?.successor())
    }

    /// The node `p` with `target ∈ (p, p.successor]`, found by repeatedly
    /// hopping to the closest preceding finger.
    ///
    /// Each hop lands strictly inside the remaining interval to `target`,
    /// so on a consistent ring this terminates well inside the hop cap.
    pub fn find_predecessor(&self, from: NodeId, target: NodeId) -> Result<NodeId> {
        self.check_id(target)?;
        let size = self.size();
        if !self.node(from)?.has_routing_state() {
            return Err(RoutingError::NotJoined(from).into());
        }

        let mut current = from;
        for _ in 0..=size {
            let node = self.node(current)?;
            if !node.has_routing_state() {
                // a finger led into a placeholder slot
                return Err(RoutingError::NotJoined(current).into());
            }
            if in_interval_oc(target, current, node.successor(), size) {
                return Ok(current);
            }
            let next = self.closest_preceding_finger(current, target)?;
            if next == current {
                // no finger makes progress and the interval check failed:
                // the tables are inconsistent
                break;
            }
            trace!(from = current, next, target, "routing hop");
            current = next;
        }
        Err(RoutingError::HopLimitExceeded { target, hops: size }.into())
    }

    /// The highest finger of `from` lying strictly inside `(from, target)`,
    /// or `from` itself when no finger qualifies.
    pub fn closest_preceding_finger(&self, from: NodeId, target: NodeId) -> Result<NodeId> {
        self.check_id(target)?;
        let size = self.size();
        let node = self.node(from)?;
        if !node.has_routing_state() {
            return Err(RoutingError::NotJoined(from).into());
        }

        for &finger in node.fingers.iter().rev() {
            if in_interval_oo(finger, from, target, size) {
                return Ok(finger);
            }
        }
        Ok(from)
    }
}
