//! Testing utilities for the ring core.
//!
//! [`TestRing`] wraps a [`Ring`] with scenario constructors and the
//! invariant assertions shared by the integration tests: ownership must
//! tile the ring exactly, and every member must resolve the same owner
//! for every key.

mod scenario_tests;

use crate::config::RingConfig;
use crate::interval::in_interval_oc;
use crate::ring::Ring;
use crate::types::NodeId;

/// A ring under test, with invariant assertions.
#[derive(Debug)]
pub struct TestRing {
    pub ring: Ring,
}

impl TestRing {
    /// A ring of `2^m_bits` slots with `first` bootstrapped as its only
    /// member.
    pub fn bootstrapped(m_bits: u32, first: NodeId) -> Self {
        let mut ring = Ring::new(RingConfig::new(m_bits)).expect("valid test config");
        ring.join(first, None).expect("bootstrap join");
        Self { ring }
    }

    /// A ring with `members` joined in order: the first bootstraps, the
    /// rest join through the first.
    pub fn with_members(m_bits: u32, members: &[NodeId]) -> Self {
        assert!(!members.is_empty(), "need at least one member");
        let mut test = Self::bootstrapped(m_bits, members[0]);
        for &id in &members[1..] {
            test.ring.join(id, Some(members[0])).expect("sequential join");
        }
        test
    }

    /// Oracle owner of `key`: the first joined node clockwise from `key`,
    /// computed by a plain scan instead of finger routing.
    pub fn owner_by_scan(&self, key: NodeId) -> NodeId {
        let size = self.ring.size();
        (0..size)
            .map(|offset| (key + offset) % size)
            .find(|&id| self.ring.is_joined(id))
            .expect("ring has at least one member")
    }

    /// Every identifier must fall in exactly one member's owned interval
    /// `(predecessor, id]`, and routed lookups from every member must
    /// agree with the scan oracle.
    pub fn assert_ownership_partition(&self) {
        let size = self.ring.size();
        let members = self.ring.joined_nodes();
        for key in 0..size {
            let owners: Vec<NodeId> = members
                .iter()
                .copied()
                .filter(|&id| {
                    let view = self.ring.node_view(id).expect("member view");
                    let pred = view.predecessor.expect("joined node has predecessor");
                    in_interval_oc(key, pred, id, size)
                })
                .collect();
            assert_eq!(owners.len(), 1, "key {} owned by {:?}", key, owners);
            assert_eq!(owners[0], self.owner_by_scan(key), "key {}", key);

            for &from in &members {
                assert_eq!(
                    self.ring.find_successor(from, key).expect("routed lookup"),
                    owners[0],
                    "key {} from {}",
                    key,
                    from
                );
            }
        }
    }
}
