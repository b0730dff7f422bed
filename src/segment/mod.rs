//! Sparse segment tree over a fixed integer key range.
//!
//! This module provides [`SparseSegmentTree`], a binary tree in which every node
//! covers a contiguous sub-interval of `[min_value, max_value]` and stores the
//! sum of all deltas inserted at keys inside that interval.
//!
//! - [`SparseSegmentTree`]: the tree itself (point update, range sum)
//! - [`SegmentKey`]: integer key abstraction with an overflow-safe midpoint
//! - [`RangeViolation`]: precondition violations reported by the checked API
//! - [`NewickDump`]: diagnostic rendering of the materialized intervals
//!
//! # Node Intervals
//!
//! Intervals are never stored in nodes. They are rebuilt on every traversal
//! from the root range by the halving rule: a node covering `[begin, end]` has a
//! left child covering `[begin, mid]` and a right child covering
//! `[mid + 1, end]`, where `mid` is the floor midpoint.
//!
//! # Examples
//!
//! ```rust
//! use sparse_segtree::segment::SparseSegmentTree;
//!
//! let mut tree = SparseSegmentTree::new(0, 100);
//! tree.insert(20, 2);
//!
//! assert_eq!(tree.query(0, 10), 0);
//! assert_eq!(tree.query(15, 20), 2);
//! assert_eq!(tree.query(20, 25), 2);
//!
//! // Only the path from the root to the leaf [20, 20] is materialized.
//! assert_eq!(tree.node_count(), tree.depth_bound());
//! ```
//!
//! ## Checked operations
//!
//! ```rust
//! use sparse_segtree::segment::{RangeViolation, SparseSegmentTree};
//!
//! let mut tree: SparseSegmentTree<i32> = SparseSegmentTree::new(0, 10);
//! assert_eq!(
//!     tree.try_insert(11, 1),
//!     Err(RangeViolation::KeyOutOfRange { key: 11, min: 0, max: 10 })
//! );
//! assert_eq!(tree.total(), 0);
//! ```

mod error;
mod key;
mod newick;
mod tree;

pub use error::RangeViolation;
pub use key::SegmentKey;
pub use newick::NewickDump;
pub use tree::SparseSegmentTree;
