//! Newick-style rendering of the materialized node intervals.
//!
//! The dump is a debugging aid. It prints every interval the traversal can
//! reach from a materialized node, so absent children still show their labels.

use std::fmt;

use super::key::SegmentKey;
use super::tree::{Node, SparseSegmentTree};

/// A borrowed view of a tree that formats it in Newick style.
///
/// For a node covering `[begin, end]`: if it is materialized and has at least
/// one child, the left subtree `[begin, mid]` and right subtree
/// `[mid + 1, end]` are written inside parentheses, separated by a comma.
/// The label `begin~end` always follows.
///
/// # Examples
///
/// ```rust
/// use sparse_segtree::segment::SparseSegmentTree;
///
/// let mut tree = SparseSegmentTree::new(0, 3);
/// assert_eq!(tree.newick().to_string(), "0~3");
///
/// tree.insert(0, 1);
/// assert_eq!(tree.newick().to_string(), "((0~0,1~1)0~1,2~3)0~3");
/// ```
pub struct NewickDump<'a, K, V> {
    tree: &'a SparseSegmentTree<K, V>,
}

impl<K: SegmentKey, V> SparseSegmentTree<K, V> {
    /// Returns a [`NewickDump`] of the materialized intervals.
    #[must_use]
    pub const fn newick(&self) -> NewickDump<'_, K, V> {
        NewickDump { tree: self }
    }

    /// Emits the Newick dump as a `DEBUG` tracing event.
    ///
    /// Nothing is rendered when `DEBUG` is disabled for this crate.
    pub fn log_tree(&self) {
        tracing::debug!(
            node_count = self.node_count(),
            tree = %self.newick(),
            "materialized intervals"
        );
    }
}

fn write_node<K: SegmentKey, V>(
    formatter: &mut fmt::Formatter<'_>,
    node: Option<&Node<V>>,
    begin: K,
    end: K,
) -> fmt::Result {
    if let Some(node) = node.filter(|node| node.has_children()) {
        let middle = K::midpoint(begin, end);
        write!(formatter, "(")?;
        write_node(formatter, node.left.as_deref(), begin, middle)?;
        write!(formatter, ",")?;
        write_node(formatter, node.right.as_deref(), middle.successor(), end)?;
        write!(formatter, ")")?;
    }
    write!(formatter, "{begin}~{end}")
}

impl<K: SegmentKey, V> fmt::Display for NewickDump<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(
            formatter,
            Some(&*self.tree.root),
            self.tree.min_value,
            self.tree.max_value,
        )
    }
}

impl<K: SegmentKey, V> fmt::Debug for NewickDump<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("NewickDump")
            .field(&format_args!("{self}"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_dump_of_untouched_tree_is_root_label() {
        let tree: SparseSegmentTree<i32> = SparseSegmentTree::new(0, 100);
        assert_eq!(tree.newick().to_string(), "0~100");
    }

    #[rstest]
    fn test_dump_of_single_key_range() {
        let mut tree = SparseSegmentTree::new(4, 4);
        tree.insert(4, 1);
        assert_eq!(tree.newick().to_string(), "4~4");
    }

    #[rstest]
    fn test_dump_shows_absent_siblings() {
        let mut tree = SparseSegmentTree::new(0, 3);
        tree.insert(2, 1);
        assert_eq!(tree.newick().to_string(), "(0~1,(2~2,3~3)2~3)0~3");
    }

    #[rstest]
    fn test_dump_of_fully_materialized_tree() {
        let mut tree = SparseSegmentTree::new(0, 3);
        tree.extend((0..=3).map(|key| (key, 1)));
        assert_eq!(tree.newick().to_string(), "((0~0,1~1)0~1,(2~2,3~3)2~3)0~3");
    }

    #[rstest]
    fn test_dump_with_negative_keys() {
        let mut tree = SparseSegmentTree::new(-2i8, 1);
        tree.insert(-1, 1);
        assert_eq!(tree.newick().to_string(), "((-2~-2,-1~-1)-2~-1,0~1)-2~1");
    }

    #[rstest]
    fn test_debug_wraps_dump() {
        let tree: SparseSegmentTree<u8> = SparseSegmentTree::new(1, 2);
        assert_eq!(format!("{:?}", tree.newick()), "NewickDump(1~2)");
    }

    #[rstest]
    fn test_log_tree_does_not_mutate() {
        let mut tree = SparseSegmentTree::new(0, 7);
        tree.insert(5, 5);
        let before = tree.newick().to_string();
        tree.log_tree();
        assert_eq!(tree.newick().to_string(), before);
        assert_eq!(tree.total(), 5);
    }
}
