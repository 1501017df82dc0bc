//! End-to-end scenarios across join, routing and the key-value layer.

#[cfg(test)]
mod tests {
    use crate::testing::TestRing;
    use bytes::Bytes;

    #[test]
    fn test_reference_scenario_m3() {
        // ring size 8: bootstrap 0, join 4 via 0, join 2 via 0
        let mut test = TestRing::with_members(3, &[0, 4, 2]);

        assert_eq!(test.ring.node_view(2).unwrap().predecessor, Some(0));
        assert_eq!(test.ring.finger_table(2).unwrap()[0].node, 4);
        // node 2 spliced in front of 4, so 4's predecessor moved off 0
        assert_eq!(test.ring.node_view(4).unwrap().predecessor, Some(2));

        let owner = test.ring.put(0, 3, "x").unwrap();
        assert_eq!(owner, 4);
        assert_eq!(
            test.ring.get(0, 3).unwrap(),
            Some(Bytes::from_static(b"x"))
        );
    }

    #[test]
    fn test_partition_holds_after_every_join() {
        let members = [5u64, 13, 2, 9, 0, 30, 22, 17];
        let mut test = TestRing::bootstrapped(5, members[0]);
        test.assert_ownership_partition();
        for &id in &members[1..] {
            test.ring.join(id, Some(members[0])).unwrap();
            test.assert_ownership_partition();
        }
    }

    #[test]
    fn test_dense_sequential_ring() {
        // every identifier joins in order; the open intervals between
        // direct neighbors must stay singleton/empty or routing diverges
        let mut test = TestRing::bootstrapped(3, 0);
        for id in 1..8 {
            test.ring.join(id, Some(0)).unwrap();
            test.assert_ownership_partition();
        }
        assert_eq!(test.ring.joined_nodes().len(), 8);
    }

    #[test]
    fn test_every_member_finds_every_member() {
        let test = TestRing::with_members(4, &[1, 8, 12, 3, 10, 5]);
        let members = test.ring.joined_nodes();
        for &a in &members {
            for &b in &members {
                assert_eq!(test.ring.find_successor(a, b).unwrap(), b);
            }
        }
    }

    #[test]
    fn test_round_trip_between_all_member_pairs() {
        let mut test = TestRing::with_members(4, &[0, 6, 11, 14]);
        let members = test.ring.joined_nodes();
        for key in 0..test.ring.size() {
            for &writer in &members {
                let value = format!("{}@{}", key, writer);
                test.ring.put(writer, key, value.clone()).unwrap();
                for &reader in &members {
                    assert_eq!(
                        test.ring.get(reader, key).unwrap(),
                        Some(Bytes::from(value.clone())),
                        "key {} writer {} reader {}",
                        key,
                        writer,
                        reader
                    );
                }
            }
            test.ring.del(members[0], key).unwrap();
            assert_eq!(test.ring.get(members[1], key).unwrap(), None);
        }
    }

    #[test]
    fn test_dataset_matches_owned_keys() {
        let mut test = TestRing::with_members(3, &[0, 4, 2]);
        for key in 0..8 {
            test.ring.put(0, key, "v").unwrap();
        }
        // intervals: (4,0] -> {5,6,7,0}, (0,2] -> {1,2}, (2,4] -> {3,4}
        assert_eq!(test.ring.stored_keys(0).unwrap(), vec![0, 5, 6, 7]);
        assert_eq!(test.ring.stored_keys(2).unwrap(), vec![1, 2]);
        assert_eq!(test.ring.stored_keys(4).unwrap(), vec![3, 4]);
        assert_eq!(test.ring.stats().stored_keys, 8);
    }

    #[test]
    fn test_rebuild_agrees_on_successors() {
        let test = TestRing::with_members(4, &[7, 2, 12, 0, 9]);
        let mut rebuilt = test.ring.clone();
        for &id in &rebuilt.joined_nodes() {
            rebuilt.rebuild_fingers(id).unwrap();
        }
        // successor entries are maintained exactly by the join protocol
        for &id in &test.ring.joined_nodes() {
            assert_eq!(
                test.ring.finger_table(id).unwrap()[0],
                rebuilt.finger_table(id).unwrap()[0],
                "node {}",
                id
            );
        }
    }

    #[test]
    fn test_views_expose_render_state() {
        let mut test = TestRing::with_members(3, &[0, 4]);
        test.ring.put(0, 6, "v").unwrap();

        let views = test.ring.views();
        assert_eq!(views.len(), 8);
        assert!(views[0].joined && views[4].joined);
        assert!(views.iter().filter(|v| v.joined).count() == 2);
        assert!(views[6].has_data);
        assert_eq!(views[4].fingers.len(), 3);
    }
}
