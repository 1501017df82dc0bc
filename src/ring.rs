//! The ring: owner of every node slot and home of ring-level queries.

use crate::config::RingConfig;
use crate::error::{Error, Result, RoutingError};
use crate::node::Node;
use crate::types::{FingerRow, NodeId, NodeView, RingStats};
use tracing::debug;

/// A fixed identifier space of `2^m_bits` node slots.
///
/// The ring owns all slots for its whole lifetime; nodes, finger tables
/// and predecessor links refer to each other through slot indices only.
/// Join, routing and key operations live in sibling modules as further
/// `impl Ring` blocks.
#[derive(Debug, Clone)]
pub struct Ring {
    pub(crate) config: RingConfig,
    pub(crate) nodes: Vec<Node>,
}

impl Ring {
    /// Allocate a ring with one non-joined slot per identifier.
    pub fn new(config: RingConfig) -> Result<Self> {
        config.validate()?;
        let nodes = (0..config.ring_size()).map(Node::placeholder).collect();
        debug!(size = config.ring_size(), "ring allocated");
        Ok(Self { config, nodes })
    }

    /// Number of identifiers on the ring.
    pub fn size(&self) -> u64 {
        self.config.ring_size()
    }

    /// Finger-table length.
    pub fn finger_count(&self) -> usize {
        self.config.finger_count()
    }

    /// The configuration this ring was built with.
    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    /// Whether `id` is a joined member. False for placeholders and for
    /// identifiers outside the ring.
    pub fn is_joined(&self, id: NodeId) -> bool {
        self.nodes.get(id as usize).map_or(false, |n| n.joined)
    }

    /// Identifiers of all joined members, in ring order.
    pub fn joined_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.joined)
            .map(|n| n.id)
            .collect()
    }

    /// Read-only snapshot of one slot.
    pub fn node_view(&self, id: NodeId) -> Result<NodeView> {
        Ok(self.node(id)?.view())
    }

    /// Read-only snapshots of every slot, in identifier order.
    pub fn views(&self) -> Vec<NodeView> {
        self.nodes.iter().map(Node::view).collect()
    }

    /// Diagnostic finger-table dump for a joined node: ordered rows of
    /// `{start, node}`.
    pub fn finger_table(&self, id: NodeId) -> Result<Vec<FingerRow>> {
        let node = self.node(id)?;
        if !node.joined {
            return Err(RoutingError::NotJoined(id).into());
        }
        let size = self.size();
        Ok(node
            .fingers
            .iter()
            .enumerate()
            .map(|(i, &finger)| FingerRow {
                start: node.finger_start(i, size),
                node: finger,
            })
            .collect())
    }

    /// Ring-level statistics.
    pub fn stats(&self) -> RingStats {
        RingStats {
            size: self.size(),
            joined_count: self.nodes.iter().filter(|n| n.joined).count(),
            stored_keys: self.nodes.iter().filter(|n| n.data.is_some()).count(),
        }
    }

    /// Rebuild a joined node's finger table by scanning the ring for the
    /// first joined node at or after each finger start.
    ///
    /// The incremental join-time maintenance can leave individual entries
    /// stale (routing still converges through successor links); this
    /// recomputes the exact table and doubles as an oracle in tests.
    pub fn rebuild_fingers(&mut self, id: NodeId) -> Result<()> {
        if !self.node(id)?.joined {
            return Err(RoutingError::NotJoined(id).into());
        }
        let size = self.size();
        let starts: Vec<NodeId> = {
            let node = self.node(id)?;
            (0..self.finger_count())
                .map(|i| node.finger_start(i, size))
                .collect()
        };
        let fingers: Vec<NodeId> = starts
            .into_iter()
            // `id` itself is joined, so the scan always finds a member
            .map(|start| self.first_joined_at_or_after(start).unwrap_or(id))
            .collect();
        self.node_mut(id)?.fingers = fingers;
        debug!(node = id, "finger table rebuilt");
        Ok(())
    }

    /// First joined node clockwise from `start`, inclusive. `None` only on
    /// a ring with no members.
    pub(crate) fn first_joined_at_or_after(&self, start: NodeId) -> Option<NodeId> {
        let size = self.size();
        (0..size)
            .map(|offset| (start + offset) % size)
            .find(|&id| self.nodes[id as usize].joined)
    }

    pub(crate) fn has_joined_member(&self) -> bool {
        self.nodes.iter().any(|n| n.joined)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id as usize).ok_or(Error::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id as usize).ok_or(Error::UnknownNode(id))
    }

    pub(crate) fn check_id(&self, id: NodeId) -> Result<()> {
        if id < self.size() {
            Ok(())
        } else {
            Err(Error::UnknownNode(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ring_is_empty() {
        let ring = Ring::new(RingConfig::new(3)).unwrap();
        assert_eq!(ring.size(), 8);
        assert_eq!(ring.finger_count(), 3);
        assert!(!ring.has_joined_member());
        assert!(ring.joined_nodes().is_empty());
        assert_eq!(ring.stats().joined_count, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            Ring::new(RingConfig::new(0)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_unknown_node() {
        let ring = Ring::new(RingConfig::new(3)).unwrap();
        assert_eq!(ring.node_view(8).unwrap_err(), Error::UnknownNode(8));
        assert!(!ring.is_joined(8));
    }

    #[test]
    fn test_finger_table_requires_join() {
        let ring = Ring::new(RingConfig::new(3)).unwrap();
        assert_eq!(
            ring.finger_table(1).unwrap_err(),
            Error::Routing(RoutingError::NotJoined(1))
        );
    }

    #[test]
    fn test_first_joined_scan() {
        let mut ring = Ring::new(RingConfig::new(3)).unwrap();
        assert_eq!(ring.first_joined_at_or_after(0), None);
        ring.join(5, None).unwrap();
        assert_eq!(ring.first_joined_at_or_after(0), Some(5));
        assert_eq!(ring.first_joined_at_or_after(5), Some(5));
        assert_eq!(ring.first_joined_at_or_after(6), Some(5));
    }

    #[test]
    fn test_views_cover_every_slot() {
        let mut ring = Ring::new(RingConfig::new(3)).unwrap();
        ring.join(2, None).unwrap();
        let views = ring.views();
        assert_eq!(views.len(), 8);
        assert!(views[2].joined);
        assert!(!views[3].joined);
        assert_eq!(views[2].predecessor, Some(2));
    }

    #[test]
    fn test_rebuild_fingers_oracle() {
        let mut ring = Ring::new(RingConfig::new(3)).unwrap();
        ring.join(0, None).unwrap();
        ring.join(4, Some(0)).unwrap();
        ring.join(2, Some(0)).unwrap();

        ring.rebuild_fingers(0).unwrap();
        // starts 1, 2, 4 -> successors 2, 2, 4
        let rows = ring.finger_table(0).unwrap();
        assert_eq!(rows[0].node, 2);
        assert_eq!(rows[1].node, 2);
        assert_eq!(rows[2].node, 4);
    }
}
