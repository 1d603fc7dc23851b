mod iter;
mod map;
mod set;

pub use iter::{Iter, Keys, Values};
pub use map::LlrbTreeMap;
pub use set::{LlrbTreeSet, SetIter};

#[cfg(test)]
mod tests {
    use super::{LlrbTreeMap, LlrbTreeSet};
    use std::collections::BTreeMap;

    #[derive(Clone)]
    struct XorShift64 {
        state: u64,
    }

    impl XorShift64 {
        fn new(seed: u64) -> Self {
            Self { state: seed }
        }

        fn next_u64(&mut self) -> u64 {
            let mut x = self.state;
            x ^= x << 7;
            x ^= x >> 9;
            x ^= x << 8;
            self.state = x;
            x
        }
    }

    fn oracle_floor(map: &BTreeMap<u64, u64>, key: u64) -> Option<(u64, u64)> {
        map.range(..=key).next_back().map(|(&k, &v)| (k, v))
    }

    fn oracle_ceil(map: &BTreeMap<u64, u64>, key: u64) -> Option<(u64, u64)> {
        map.range(key..).next().map(|(&k, &v)| (k, v))
    }

    #[test]
    fn empty_tree_boundaries() {
        let mut map: LlrbTreeMap<u64, u64> = LlrbTreeMap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.get(&1), None);
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
        assert_eq!(map.floor(&1), None);
        assert_eq!(map.ceil(&1), None);
        assert_eq!(map.select(0), None);
        assert_eq!(map.rank(&1), 0);
        assert_eq!(map.range_len(&1, &9), 0);
        assert_eq!(map.height(), -1);
        assert_eq!(map.remove(&1), None);
        assert_eq!(map.remove_min(), None);
        assert_eq!(map.remove_max(), None);
        assert_eq!(map.clear(), 0);
        assert_eq!(map.iter().next(), None);
        assert_eq!(map.range(1, 9).next(), None);
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut map = LlrbTreeMap::new();
        assert_eq!(map.insert(7u64, 1u64), 1);
        assert_eq!(map.insert(7, 2), 1);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&7), Some(&2));
        map.assert_invariants();
    }

    #[test]
    fn min_max_floor_ceil_small() {
        let mut map = LlrbTreeMap::new();
        for k in 1u64..=5 {
            map.insert(k, k);
        }
        assert_eq!(map.len(), 5);
        assert_eq!(map.min(), Some((&1, &1)));
        assert_eq!(map.max(), Some((&5, &5)));
        assert_eq!(map.floor(&3), Some((&3, &3)));
        assert_eq!(map.ceil(&0), Some((&1, &1)));
    }

    #[test]
    fn floor_ceil_between_keys() {
        let mut map = LlrbTreeMap::new();
        for k in [10u64, 100, 200, 300, 400, 500] {
            map.insert(k, k);
        }
        assert_eq!(map.floor(&50), Some((&10, &10)));
        assert_eq!(map.ceil(&50), Some((&100, &100)));
        assert_eq!(map.floor(&5), None);
        assert_eq!(map.ceil(&600), None);
    }

    #[test]
    fn select_bounds() {
        let mut map = LlrbTreeMap::new();
        for k in 1u64..=5 {
            map.insert(k, k);
        }
        assert_eq!(map.select(0), Some((&1, &1)));
        assert_eq!(map.select(4), Some((&5, &5)));
        assert_eq!(map.select(5), None);
    }

    #[test]
    fn rank_counts_strictly_smaller() {
        let mut map = LlrbTreeMap::new();
        for k in 1u64..=5 {
            map.insert(k, k);
        }
        assert_eq!(map.rank(&0), 0);
        assert_eq!(map.rank(&3), 2);
        assert_eq!(map.rank(&7), 5);
    }

    #[test]
    fn range_len_inclusive() {
        let mut map = LlrbTreeMap::new();
        for k in [10u64, 20, 30, 40, 50] {
            map.insert(k, k);
        }
        assert_eq!(map.range_len(&20, &49), 3);
        assert_eq!(map.range_len(&11, &19), 0);
        assert_eq!(map.range_len(&20, &50), 4);
        assert_eq!(map.range_len(&49, &20), 0);
    }

    #[test]
    fn rank_select_round_trip() {
        let mut map = LlrbTreeMap::new();
        let mut rng = XorShift64::new(0x1234_5678_9ABC_DEF0);
        for _ in 0..512 {
            let k = rng.next_u64() % 10_000;
            map.insert(k, k);
        }
        for r in 0..map.len() {
            let (&k, _) = map.select(r).unwrap();
            assert_eq!(map.rank(&k), r);
        }
    }

    #[test]
    fn iteration_is_ascending() {
        let mut map = LlrbTreeMap::new();
        let mut rng = XorShift64::new(0xDEAD_BEEF);
        for _ in 0..2_000 {
            let k = rng.next_u64() % 5_000;
            map.insert(k, k.wrapping_mul(3));
        }
        let entries = map.to_vec();
        assert_eq!(entries.len(), map.len());
        for pair in entries.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
        let keys: Vec<u64> = map.keys().copied().collect();
        let values: Vec<u64> = map.values().copied().collect();
        assert_eq!(keys.len(), map.len());
        assert_eq!(values.len(), map.len());
        for (i, &k) in keys.iter().enumerate() {
            assert_eq!(values[i], k.wrapping_mul(3));
        }
    }

    #[test]
    fn range_iteration_cutoff() {
        let mut map = LlrbTreeMap::new();
        for k in (0u64..100).map(|k| k * 10) {
            map.insert(k, k);
        }

        // Bounds not present in the tree: only in-tree keys qualify.
        let got: Vec<u64> = map.keys_in_range(95, 145).copied().collect();
        assert_eq!(got, vec![100, 110, 120, 130, 140]);

        // Inclusive on both ends.
        let got: Vec<u64> = map.keys_in_range(100, 140).copied().collect();
        assert_eq!(got, vec![100, 110, 120, 130, 140]);

        // Inverted range yields nothing.
        assert_eq!(map.range(140, 100).next(), None);

        // Range entirely below the smallest key.
        assert_eq!(map.range(10_000, 20_000).next(), None);

        let empty: LlrbTreeMap<u64, u64> = LlrbTreeMap::new();
        assert_eq!(empty.range(0, 100).next(), None);
    }

    #[test]
    fn range_iteration_matches_oracle() {
        let mut map = LlrbTreeMap::new();
        let mut oracle = BTreeMap::new();
        let mut rng = XorShift64::new(0x0BAD_F00D);
        for _ in 0..1_000 {
            let k = rng.next_u64() % 2_048;
            map.insert(k, k);
            oracle.insert(k, k);
        }
        for _ in 0..200 {
            let a = rng.next_u64() % 2_048;
            let b = rng.next_u64() % 2_048;
            let got: Vec<u64> = map.keys_in_range(a, b).copied().collect();
            let expect: Vec<u64> = if a <= b {
                oracle.range(a..=b).map(|(&k, _)| k).collect()
            } else {
                Vec::new()
            };
            assert_eq!(got, expect, "range [{a}, {b}]");
            assert_eq!(map.range_len(&a, &b), expect.len());
        }
    }

    #[test]
    fn remove_min_max_drain() {
        let mut map = LlrbTreeMap::new();
        for k in 0u64..500 {
            map.insert(k, k);
        }
        for expect in 0u64..250 {
            assert_eq!(map.remove_min(), Some((expect, expect)));
        }
        for expect in (250u64..500).rev() {
            assert_eq!(map.remove_max(), Some((expect, expect)));
        }
        assert!(map.is_empty());
        map.assert_invariants();
    }

    #[test]
    fn clear_reports_removed_count() {
        let mut map = LlrbTreeMap::new();
        for k in 0u64..100 {
            map.insert(k, k);
        }
        assert_eq!(map.clear(), 100);
        assert!(map.is_empty());
        assert_eq!(map.height(), -1);
        assert_eq!(map.insert(1, 1), 1);
    }

    #[test]
    fn random_ops_match_btreemap_oracle() {
        let mut rng = XorShift64::new(0xCAFE_BABE_DEAD_2026);
        let mut map = LlrbTreeMap::new();
        let mut oracle: BTreeMap<u64, u64> = BTreeMap::new();

        const OPS: usize = 20_000;
        for op in 0..OPS {
            let roll = rng.next_u64() % 100;
            let key = rng.next_u64() % 4_096;
            if roll < 40 {
                let value = rng.next_u64();
                map.insert(key, value);
                oracle.insert(key, value);
            } else if roll < 60 {
                let got = map.remove(&key);
                let expect = oracle.remove(&key);
                assert_eq!(got, expect);
            } else if roll < 65 {
                assert_eq!(map.remove_min(), oracle.pop_first());
            } else if roll < 70 {
                assert_eq!(map.remove_max(), oracle.pop_last());
            } else if roll < 85 {
                assert_eq!(map.get(&key), oracle.get(&key));
            } else if roll < 95 {
                let got = map.floor(&key).map(|(&k, &v)| (k, v));
                assert_eq!(got, oracle_floor(&oracle, key));
                let got = map.ceil(&key).map(|(&k, &v)| (k, v));
                assert_eq!(got, oracle_ceil(&oracle, key));
            } else {
                let expect = oracle.range(..key).count();
                assert_eq!(map.rank(&key), expect);
            }

            assert_eq!(map.len(), oracle.len());
            if op % 512 == 0 {
                map.assert_invariants();
                let got: Vec<(u64, u64)> = map.iter().map(|(&k, &v)| (k, v)).collect();
                let expect: Vec<(u64, u64)> = oracle.iter().map(|(&k, &v)| (k, v)).collect();
                assert_eq!(got, expect);
            }
        }
        map.assert_invariants();
    }

    // Regression for rotation correctness at scale: sequential inserts
    // are the worst case for an unbalanced BST.
    #[test]
    fn sequential_insert_stress() {
        const N: u64 = 85_732;
        let mut map = LlrbTreeMap::new();
        for k in 0..N {
            map.insert(k, k);
        }
        assert_eq!(map.len(), N as usize);
        map.assert_invariants();

        // Balance bounds the height by 2 log2(n).
        let height = map.height();
        assert!(height >= 0 && height <= 34, "height {height}");

        for k in 0..N {
            assert_eq!(map.get(&k), Some(&k));
        }
        assert_eq!(map.iter().count(), N as usize);
        assert_eq!(map.select(0), Some((&0, &0)));
        assert_eq!(map.select(N as usize - 1), Some((&(N - 1), &(N - 1))));
        assert_eq!(map.rank(&(N / 2)), (N / 2) as usize);
    }

    #[test]
    fn set_basic() {
        let mut set = LlrbTreeSet::new();
        assert_eq!(set.insert(3u64), 1);
        assert_eq!(set.insert(1), 2);
        assert_eq!(set.insert(2), 3);
        assert_eq!(set.insert(2), 3);
        assert_eq!(set.len(), 3);
        assert!(set.contains(&1));
        assert!(!set.contains(&4));
        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&3));
        assert_eq!(set.floor(&2), Some(&2));
        assert_eq!(set.ceil(&4), None);
        assert_eq!(set.select(1), Some(&2));
        assert_eq!(set.rank(&3), 2);
        assert_eq!(set.range_len(&1, &2), 2);
        assert_eq!(set.to_vec(), vec![&1, &2, &3]);

        assert!(set.remove(&2));
        assert!(!set.remove(&2));
        assert_eq!(set.remove_min(), Some(1));
        assert_eq!(set.remove_max(), Some(3));
        assert!(set.is_empty());
        set.assert_invariants();
    }

    #[test]
    fn set_range_iteration() {
        let mut set = LlrbTreeSet::new();
        for k in 0u64..64 {
            set.insert(k * 3);
        }
        set.assert_invariants();
        let got: Vec<u64> = set.range(10, 20).copied().collect();
        assert_eq!(got, vec![12, 15, 18]);
        assert_eq!(set.to_vec_in_range(10, 20), vec![&12, &15, &18]);
        assert_eq!(set.range(20, 10).next(), None);
    }
}
