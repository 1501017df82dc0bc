//! The key-value layer: put/get/del routed to the owning node.
//!
//! Keys live in the same space as identifiers. A key belongs to the joined
//! node whose interval `(predecessor, id]` contains it; the value itself
//! sits in the slot indexed by the key, while the owner's `dataset` records
//! the keys it is responsible for.

use crate::error::{Result, RoutingError};
use crate::interval::in_interval_oc;
use crate::ring::Ring;
use crate::types::NodeId;
use bytes::Bytes;
use tracing::debug;

impl Ring {
    /// Store `value` under `key`, entering the ring at the joined node
    /// `from`. Returns the owning node.
    pub fn put(&mut self, from: NodeId, key: NodeId, value: impl Into<Bytes>) -> Result<NodeId> {
        let owner = self.owner_of(from, key)?;
        self.node_mut(owner)?.dataset.insert(key);
        self.node_mut(key)?.data = Some(value.into());
        debug!(key, owner, "key stored");
        Ok(owner)
    }

    /// Look up `key`, entering the ring at the joined node `from`.
    ///
    /// `None` means the key was never stored (or has been deleted); this
    /// is a normal outcome, not an error.
    pub fn get(&self, from: NodeId, key: NodeId) -> Result<Option<Bytes>> {
        let owner = self.owner_of(from, key)?;
        debug!(key, owner, "key resolved");
        Ok(self.node(key)?.data.clone())
    }

    /// Delete `key`, entering the ring at the joined node `from`.
    ///
    /// Returns the value that was present, so callers can tell "deleted"
    /// from "was never stored". Deleting an absent key changes nothing.
    pub fn del(&mut self, from: NodeId, key: NodeId) -> Result<Option<Bytes>> {
        let owner = self.owner_of(from, key)?;
        self.node_mut(owner)?.dataset.remove(&key);
        let prior = self.node_mut(key)?.data.take();
        debug!(key, owner, was_present = prior.is_some(), "key deleted");
        Ok(prior)
    }

    /// Keys a joined node currently holds as owner.
    pub fn stored_keys(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let node = self.node(id)?;
        if !node.joined {
            return Err(RoutingError::NotJoined(id).into());
        }
        Ok(node.dataset.iter().copied().collect())
    }

    /// Resolve the joined node owning `key`: `from` itself when the key
    /// falls in its interval, otherwise one routed lookup.
    fn owner_of(&self, from: NodeId, key: NodeId) -> Result<NodeId> {
        self.check_id(key)?;
        let size = self.size();
        let node = self.node(from)?;
        if !node.joined {
            return Err(RoutingError::NotJoined(from).into());
        }
        let predecessor = node
            .predecessor
            .ok_or(RoutingError::MissingPredecessor(from))?;
        if in_interval_oc(key, predecessor, from, size) {
            Ok(from)
        } else {
            self.find_successor(from, key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RingConfig;
    use crate::error::Error;

    fn three_node_ring() -> Ring {
        let mut ring = Ring::new(RingConfig::new(3)).unwrap();
        ring.join(0, None).unwrap();
        ring.join(4, Some(0)).unwrap();
        ring.join(2, Some(0)).unwrap();
        ring
    }

    #[test]
    fn test_put_routes_to_owner() {
        let mut ring = three_node_ring();
        // 3 falls in (2, 4], owned by node 4
        let owner = ring.put(0, 3, "x").unwrap();
        assert_eq!(owner, 4);
        assert_eq!(ring.stored_keys(4).unwrap(), vec![3]);
        assert!(ring.node_view(3).unwrap().has_data);
    }

    #[test]
    fn test_round_trip_from_any_node() {
        let mut ring = three_node_ring();
        ring.put(0, 3, "x").unwrap();
        for &from in &[0, 2, 4] {
            assert_eq!(
                ring.get(from, 3).unwrap(),
                Some(Bytes::from_static(b"x")),
                "from {}",
                from
            );
        }
    }

    #[test]
    fn test_get_never_stored() {
        let ring = three_node_ring();
        assert_eq!(ring.get(0, 6).unwrap(), None);
    }

    #[test]
    fn test_del_returns_prior_value() {
        let mut ring = three_node_ring();
        ring.put(2, 5, "v").unwrap();
        assert_eq!(ring.del(0, 5).unwrap(), Some(Bytes::from_static(b"v")));
        assert_eq!(ring.get(4, 5).unwrap(), None);
    }

    #[test]
    fn test_del_is_idempotent() {
        let mut ring = three_node_ring();
        assert_eq!(ring.del(0, 5).unwrap(), None);
        assert_eq!(ring.del(0, 5).unwrap(), None);
        assert!(ring.stored_keys(0).unwrap().is_empty());
        assert_eq!(ring.stats().stored_keys, 0);
    }

    #[test]
    fn test_put_overwrites() {
        let mut ring = three_node_ring();
        ring.put(0, 1, "a").unwrap();
        ring.put(4, 1, "b").unwrap();
        assert_eq!(ring.get(2, 1).unwrap(), Some(Bytes::from_static(b"b")));
        // still recorded exactly once by the owner
        assert_eq!(ring.stored_keys(2).unwrap(), vec![1]);
    }

    #[test]
    fn test_key_on_owner_identifier() {
        let mut ring = three_node_ring();
        let owner = ring.put(4, 2, "self").unwrap();
        assert_eq!(owner, 2);
        assert_eq!(ring.get(0, 2).unwrap(), Some(Bytes::from_static(b"self")));
        assert!(ring.node_view(2).unwrap().has_data);
    }

    #[test]
    fn test_ops_require_joined_entry_point() {
        let mut ring = three_node_ring();
        assert_eq!(
            ring.put(5, 3, "x").unwrap_err(),
            Error::Routing(RoutingError::NotJoined(5))
        );
        assert_eq!(
            ring.get(5, 3).unwrap_err(),
            Error::Routing(RoutingError::NotJoined(5))
        );
        assert_eq!(
            ring.del(5, 3).unwrap_err(),
            Error::Routing(RoutingError::NotJoined(5))
        );
    }

    #[test]
    fn test_key_out_of_range_rejected() {
        let mut ring = three_node_ring();
        assert_eq!(ring.put(0, 9, "x").unwrap_err(), Error::UnknownNode(9));
    }
}
