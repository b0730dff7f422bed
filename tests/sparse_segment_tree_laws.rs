//! Property-based tests for SparseSegmentTree laws.
//!
//! Every law is checked against random update sequences, and the tree as a
//! whole is compared with a naive `BTreeMap` model.

use proptest::prelude::*;
use sparse_segtree::segment::SparseSegmentTree;
use std::collections::BTreeMap;

const MIN_KEY: i64 = -500;
const MAX_KEY: i64 = 500;

fn update_sequences() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((MIN_KEY..=MAX_KEY, -1_000i64..1_000), 0..64)
}

fn build(updates: &[(i64, i64)]) -> SparseSegmentTree<i64> {
    let mut tree = SparseSegmentTree::new(MIN_KEY, MAX_KEY);
    tree.extend(updates.iter().copied());
    tree
}

fn naive_sum(updates: &[(i64, i64)], begin: i64, end: i64) -> i64 {
    updates
        .iter()
        .filter(|(key, _)| begin <= *key && *key <= end)
        .map(|(_, delta)| delta)
        .sum()
}

proptest! {
    /// Total Law: query(min, max) equals the sum of every delta
    #[test]
    fn prop_total_equals_sum_of_deltas(updates in update_sequences()) {
        let tree = build(&updates);
        let expected: i64 = updates.iter().map(|(_, delta)| delta).sum();

        prop_assert_eq!(tree.query(MIN_KEY, MAX_KEY), expected);
        prop_assert_eq!(tree.total(), expected);
    }

    /// Zero Law: inserting zero deltas never changes a query result
    #[test]
    fn prop_zero_inserts_change_nothing(
        updates in update_sequences(),
        zero_keys in prop::collection::vec(MIN_KEY..=MAX_KEY, 1..16),
        begin in MIN_KEY..=MAX_KEY,
        end in MIN_KEY..=MAX_KEY
    ) {
        let mut tree = build(&updates);
        let before = tree.query(begin, end);
        for key in zero_keys {
            tree.insert(key, 0);
        }
        prop_assert_eq!(tree.query(begin, end), before);
    }

    /// Additivity Law: query(a, b) + query(b + 1, c) == query(a, c)
    #[test]
    fn prop_additivity(
        updates in update_sequences(),
        mut bounds in prop::array::uniform3(MIN_KEY..MAX_KEY)
    ) {
        bounds.sort_unstable();
        let [first, middle, last] = bounds;
        let last = last + 1;
        let tree = build(&updates);

        prop_assert_eq!(
            tree.query(first, middle) + tree.query(middle + 1, last),
            tree.query(first, last)
        );
    }

    /// Point Isolation Law: a single insert is visible only at its own key
    #[test]
    fn prop_point_isolation(key in MIN_KEY..=MAX_KEY, delta in 1i64..1_000, probe in MIN_KEY..=MAX_KEY) {
        let mut tree = SparseSegmentTree::new(MIN_KEY, MAX_KEY);
        tree.insert(key, delta);

        prop_assert_eq!(tree.query(key, key), delta);
        if probe != key {
            prop_assert_eq!(tree.query(probe, probe), 0);
        }
    }

    /// Model Law: every range query agrees with a naive scan of the updates
    #[test]
    fn prop_matches_naive_model(
        updates in update_sequences(),
        queries in prop::collection::vec((MIN_KEY..=MAX_KEY, MIN_KEY..=MAX_KEY), 1..32)
    ) {
        let tree = build(&updates);
        for (begin, end) in queries {
            prop_assert_eq!(
                tree.query(begin, end),
                naive_sum(&updates, begin, end),
                "query [{}, {}]",
                begin,
                end
            );
        }
    }

    /// Sparsity Law: node count is bounded by one root-to-leaf path per distinct key
    #[test]
    fn prop_node_count_is_bounded(updates in update_sequences()) {
        let tree = build(&updates);
        let distinct: BTreeMap<i64, ()> = updates.iter().map(|(key, _)| (*key, ())).collect();

        prop_assert!(tree.node_count() >= 1);
        prop_assert!(tree.node_count() <= 1 + distinct.len() * (tree.depth_bound() - 1));
    }

    /// Unmaterialized Law: a range left of every update sums to zero
    #[test]
    fn prop_untouched_prefix_is_zero(updates in update_sequences()) {
        let tree = build(&updates);
        if let Some(lowest) = updates.iter().map(|(key, _)| *key).min()
            && lowest > MIN_KEY
        {
            prop_assert_eq!(tree.query(MIN_KEY, lowest - 1), 0);
        }
    }

    /// Extreme Range Law: the overflow-safe midpoint handles the full u64 range
    #[test]
    fn prop_full_u64_range(keys in prop::collection::vec(any::<u64>(), 1..16), probe: u64) {
        let mut tree: SparseSegmentTree<u64, u128> = SparseSegmentTree::new(0, u64::MAX);
        for key in &keys {
            tree.insert(*key, 1);
        }
        let expected = keys.iter().filter(|key| **key <= probe).count() as u128;

        prop_assert_eq!(tree.query(0, probe), expected);
        prop_assert_eq!(tree.total(), keys.len() as u128);
    }
}
