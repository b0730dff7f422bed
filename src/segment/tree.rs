//! Sparse segment tree with lazily materialized nodes.
//!
//! # Overview
//!
//! [`SparseSegmentTree`] covers a closed key range `[min_value, max_value]`
//! fixed at construction. Only the root is allocated up front; every other
//! node is created the first time an insert has to descend into it.
//!
//! - O(log R) insert, allocating at most O(log R) nodes
//! - O(log R) query, however wide the queried range is
//! - O(1) `total`, `node_count`
//!
//! where R is `max_value - min_value + 1`.
//!
//! # Examples
//!
//! ```rust
//! use sparse_segtree::segment::SparseSegmentTree;
//!
//! let mut tree = SparseSegmentTree::new(0, 100);
//! tree.insert(20, 2);
//! tree.insert(21, 3);
//!
//! assert_eq!(tree.query(15, 20), 2);
//! assert_eq!(tree.query(21, 25), 3);
//! assert_eq!(tree.query(15, 25), 5);
//! ```

use std::fmt;
use std::ops::Add;

use super::error::RangeViolation;
use super::key::SegmentKey;

// =============================================================================
// Node Definition
// =============================================================================

/// Internal node. Its interval is implied by the path from the root.
#[derive(Clone, Default)]
pub(super) struct Node<V> {
    pub(super) value: V,
    pub(super) left: Option<Box<Self>>,
    pub(super) right: Option<Box<Self>>,
}

impl<V> Node<V> {
    pub(super) const fn has_children(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }
}

/// Returns the child in `slot`, creating an empty one first if it is absent.
fn materialize<'a, V: Default>(
    slot: &'a mut Option<Box<Node<V>>>,
    node_count: &mut usize,
) -> &'a mut Node<V> {
    if slot.is_none() {
        *node_count += 1;
    }
    slot.get_or_insert_with(Box::default)
}

// =============================================================================
// SparseSegmentTree Definition
// =============================================================================

/// A dynamic segment tree for point updates and range sums.
///
/// Keys are integers in `[min_value, max_value]`. Values default to the key
/// type, so `SparseSegmentTree<i64>` indexes `i64` keys and sums `i64`
/// deltas. Any `V: Clone + Default + Add<Output = V>` works as a value, where
/// `V::default()` is the additive identity.
///
/// Overflow of the accumulated sums follows `V`'s `Add` implementation.
///
/// # Time Complexity
///
/// | Operation    | Complexity |
/// |--------------|------------|
/// | `new`        | O(1)       |
/// | `insert`     | O(log R)   |
/// | `query`      | O(log R)   |
/// | `value_at`   | O(log R)   |
/// | `total`      | O(1)       |
/// | `node_count` | O(1)       |
///
/// # Examples
///
/// ```rust
/// use sparse_segtree::segment::SparseSegmentTree;
///
/// let mut tree: SparseSegmentTree<u64> = SparseSegmentTree::new(0, u64::MAX);
/// tree.insert(u64::MAX, 7);
/// tree.insert(0, 1);
///
/// assert_eq!(tree.query(1, u64::MAX), 7);
/// assert_eq!(tree.total(), 8);
/// ```
#[derive(Clone)]
pub struct SparseSegmentTree<K, V = K> {
    pub(super) root: Box<Node<V>>,
    pub(super) min_value: K,
    pub(super) max_value: K,
    node_count: usize,
}

impl<K: SegmentKey, V: Default> SparseSegmentTree<K, V> {
    /// Creates an empty tree over the closed key range `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sparse_segtree::segment::SparseSegmentTree;
    ///
    /// let tree: SparseSegmentTree<i32> = SparseSegmentTree::new(-50, 50);
    /// assert_eq!(tree.min_value(), -50);
    /// assert_eq!(tree.max_value(), 50);
    /// assert_eq!(tree.node_count(), 1);
    /// ```
    #[must_use]
    pub fn new(min: K, max: K) -> Self {
        Self::try_new(min, max).unwrap_or_else(|violation| panic!("{violation}"))
    }

    /// Creates an empty tree over `[min, max]`, or reports inverted bounds.
    ///
    /// # Errors
    ///
    /// Returns [`RangeViolation::InvertedBounds`] if `min > max`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sparse_segtree::segment::{RangeViolation, SparseSegmentTree};
    ///
    /// let result = SparseSegmentTree::<i32>::try_new(3, 1);
    /// assert_eq!(result.err(), Some(RangeViolation::InvertedBounds { min: 3, max: 1 }));
    /// ```
    pub fn try_new(min: K, max: K) -> Result<Self, RangeViolation<K>> {
        if min > max {
            return Err(RangeViolation::InvertedBounds { min, max });
        }
        tracing::debug!(min = %min, max = %max, "created sparse segment tree");
        Ok(Self {
            root: Box::default(),
            min_value: min,
            max_value: max,
            node_count: 1,
        })
    }
}

impl<K: SegmentKey, V> SparseSegmentTree<K, V> {
    /// Returns the lower bound of the key range.
    #[inline]
    #[must_use]
    pub const fn min_value(&self) -> K {
        self.min_value
    }

    /// Returns the upper bound of the key range.
    #[inline]
    #[must_use]
    pub const fn max_value(&self) -> K {
        self.max_value
    }

    /// Returns the number of materialized nodes, the root included.
    ///
    /// A fresh tree has exactly one node. Each insert adds at most
    /// [`depth_bound`](Self::depth_bound) nodes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sparse_segtree::segment::SparseSegmentTree;
    ///
    /// let mut tree = SparseSegmentTree::new(0, 3);
    /// tree.insert(0, 1);
    /// assert_eq!(tree.node_count(), 3); // [0,3], [0,1], [0,0]
    /// tree.insert(1, 1);
    /// assert_eq!(tree.node_count(), 4); // + [1,1]
    /// ```
    #[inline]
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of levels from the root down to the deepest leaf.
    ///
    /// This bounds both the recursion depth of every operation and the number
    /// of nodes a single insert can touch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sparse_segtree::segment::SparseSegmentTree;
    ///
    /// assert_eq!(SparseSegmentTree::<u8>::new(5, 5).depth_bound(), 1);
    /// assert_eq!(SparseSegmentTree::<u8>::new(0, 7).depth_bound(), 4);
    /// assert_eq!(SparseSegmentTree::<i64>::new(i64::MIN, i64::MAX).depth_bound(), 65);
    /// ```
    #[must_use]
    pub fn depth_bound(&self) -> usize {
        // The left half is never smaller than the right one.
        let (begin, mut end) = (self.min_value, self.max_value);
        let mut levels = 1;
        while begin < end {
            end = K::midpoint(begin, end);
            levels += 1;
        }
        levels
    }

    /// Returns `true` if `key` lies within `[min_value, max_value]`.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: K) -> bool {
        self.min_value <= key && key <= self.max_value
    }

    fn check_key(&self, key: K) -> Result<(), RangeViolation<K>> {
        if self.contains_key(key) {
            Ok(())
        } else {
            Err(RangeViolation::KeyOutOfRange {
                key,
                min: self.min_value,
                max: self.max_value,
            })
        }
    }

    fn check_query(&self, begin: K, end: K) -> Result<(), RangeViolation<K>> {
        if begin >= self.min_value && end <= self.max_value {
            Ok(())
        } else {
            Err(RangeViolation::QueryOutOfRange {
                begin,
                end,
                min: self.min_value,
                max: self.max_value,
            })
        }
    }
}

impl<K: SegmentKey, V: Clone + Default + Add<Output = V>> SparseSegmentTree<K, V> {
    /// Adds `delta` at `key`.
    ///
    /// Every interval on the path from the root to the leaf `[key, key]` has
    /// `delta` added to its sum. Missing nodes on that path are materialized.
    ///
    /// # Panics
    ///
    /// Panics if `key` is outside `[min_value, max_value]`.
    ///
    /// # Complexity
    ///
    /// O(log R)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sparse_segtree::segment::SparseSegmentTree;
    ///
    /// let mut tree = SparseSegmentTree::new(0, 100);
    /// tree.insert(0, 4);
    /// tree.insert(100, 6);
    /// assert_eq!(tree.query(0, 100), 10);
    /// ```
    pub fn insert(&mut self, key: K, delta: V) {
        self.try_insert(key, delta)
            .unwrap_or_else(|violation| panic!("{violation}"));
    }

    /// Adds `delta` at `key`, or reports a key outside the range.
    ///
    /// The tree is left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns [`RangeViolation::KeyOutOfRange`] if `key` is outside
    /// `[min_value, max_value]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sparse_segtree::segment::SparseSegmentTree;
    ///
    /// let mut tree = SparseSegmentTree::new(0, 10);
    /// assert!(tree.try_insert(10, 1).is_ok());
    /// assert!(tree.try_insert(11, 1).is_err());
    /// assert_eq!(tree.total(), 1);
    /// ```
    pub fn try_insert(&mut self, key: K, delta: V) -> Result<(), RangeViolation<K>> {
        self.check_key(key)?;
        Self::insert_into_node(
            &mut self.root,
            self.min_value,
            self.max_value,
            key,
            &delta,
            &mut self.node_count,
        );
        Ok(())
    }

    /// Recursive helper for insert.
    fn insert_into_node(
        node: &mut Node<V>,
        begin: K,
        end: K,
        key: K,
        delta: &V,
        node_count: &mut usize,
    ) {
        tracing::trace!(key = %key, begin = %begin, end = %end, "insert visiting node");

        if begin <= key && key <= end {
            node.value = std::mem::take(&mut node.value) + delta.clone();
        }

        // Leaves never get children.
        if begin == end {
            return;
        }

        let middle = K::midpoint(begin, end);
        if key <= middle {
            let left = materialize(&mut node.left, node_count);
            Self::insert_into_node(left, begin, middle, key, delta, node_count);
        } else {
            let right = materialize(&mut node.right, node_count);
            Self::insert_into_node(right, middle.successor(), end, key, delta, node_count);
        }
    }

    /// Returns the sum of all deltas inserted at keys in `[begin, end]`.
    ///
    /// A reversed range (`begin > end`) covers no key and yields the
    /// identity.
    ///
    /// # Panics
    ///
    /// Panics if `begin < min_value` or `end > max_value`.
    ///
    /// # Complexity
    ///
    /// O(log R)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sparse_segtree::segment::SparseSegmentTree;
    ///
    /// let mut tree = SparseSegmentTree::new(0, 100);
    /// tree.insert(20, 2);
    ///
    /// assert_eq!(tree.query(0, 10), 0);
    /// assert_eq!(tree.query(20, 25), 2);
    /// assert_eq!(tree.query(25, 20), 0);
    /// ```
    #[must_use]
    pub fn query(&self, begin: K, end: K) -> V {
        self.try_query(begin, end)
            .unwrap_or_else(|violation| panic!("{violation}"))
    }

    /// Returns the sum over `[begin, end]`, or reports a range reaching
    /// outside the tree.
    ///
    /// # Errors
    ///
    /// Returns [`RangeViolation::QueryOutOfRange`] if `begin < min_value` or
    /// `end > max_value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sparse_segtree::segment::SparseSegmentTree;
    ///
    /// let mut tree = SparseSegmentTree::new(0, 10);
    /// tree.insert(5, 5);
    /// assert_eq!(tree.try_query(0, 10), Ok(5));
    /// assert!(tree.try_query(0, 11).is_err());
    /// ```
    pub fn try_query(&self, begin: K, end: K) -> Result<V, RangeViolation<K>> {
        self.check_query(begin, end)?;
        if begin > end {
            return Ok(V::default());
        }
        Ok(Self::query_node(
            Some(&*self.root),
            self.min_value,
            self.max_value,
            begin,
            end,
        ))
    }

    /// Recursive helper for query.
    fn query_node(
        node: Option<&Node<V>>,
        node_begin: K,
        node_end: K,
        begin: K,
        end: K,
    ) -> V {
        // An absent subtree never received an update.
        let Some(node) = node else {
            return V::default();
        };
        if node_begin > end || node_end < begin {
            return V::default();
        }

        tracing::trace!(
            begin = %begin,
            end = %end,
            node_begin = %node_begin,
            node_end = %node_end,
            "query visiting node"
        );

        if node_begin >= begin && node_end <= end {
            return node.value.clone();
        }

        let middle = K::midpoint(node_begin, node_end);
        Self::query_node(node.left.as_deref(), node_begin, middle, begin, end)
            + Self::query_node(node.right.as_deref(), middle.successor(), node_end, begin, end)
    }

    /// Returns the value accumulated at the single key `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is outside `[min_value, max_value]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sparse_segtree::segment::SparseSegmentTree;
    ///
    /// let mut tree = SparseSegmentTree::new(0, 100);
    /// tree.insert(42, 1);
    /// tree.insert(42, 2);
    /// assert_eq!(tree.value_at(42), 3);
    /// assert_eq!(tree.value_at(43), 0);
    /// ```
    #[must_use]
    pub fn value_at(&self, key: K) -> V {
        self.check_key(key)
            .unwrap_or_else(|violation| panic!("{violation}"));
        self.query(key, key)
    }

    /// Returns the sum of every delta inserted so far.
    ///
    /// Equivalent to `query(min_value, max_value)`, read directly from the
    /// root.
    #[inline]
    #[must_use]
    pub fn total(&self) -> V {
        self.root.value.clone()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<K: SegmentKey, V: Clone + Default + Add<Output = V>> Extend<(K, V)>
    for SparseSegmentTree<K, V>
{
    /// Inserts every `(key, delta)` pair in order.
    ///
    /// # Panics
    ///
    /// Panics on the first key outside `[min_value, max_value]`.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, delta) in iter {
            self.insert(key, delta);
        }
    }
}

impl<K: SegmentKey, V: fmt::Debug> fmt::Debug for SparseSegmentTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SparseSegmentTree")
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("total", &self.root.value)
            .field("node_count", &self.node_count)
            .finish()
    }
}

static_assertions::assert_impl_all!(SparseSegmentTree<i64>: Send, Sync, Clone);
static_assertions::assert_impl_all!(SparseSegmentTree<u32, f64>: Send, Sync);
