//! # sparse-segtree
//!
//! A dynamic, sparsely allocated segment tree over a fixed integer key range.
//!
//! ## Overview
//!
//! [`SparseSegmentTree`] answers "what is the total accumulated value over the
//! key range `[begin, end]`?" in logarithmic time without allocating storage
//! proportional to the key range. Nodes are materialized lazily, only along the
//! paths actually touched by an update.
//!
//! - **Point updates**: [`SparseSegmentTree::insert`] adds a delta at one key
//! - **Range sums**: [`SparseSegmentTree::query`] sums every delta in `[begin, end]`
//! - **Checked variants**: `try_new`, `try_insert`, `try_query` report a
//!   [`RangeViolation`] instead of panicking
//! - **Diagnostics**: [`SparseSegmentTree::newick`] renders the materialized
//!   intervals in a Newick-style form
//!
//! ## Example
//!
//! ```rust
//! use sparse_segtree::prelude::*;
//!
//! let mut tree = SparseSegmentTree::new(0, 100);
//! tree.insert(20, 2);
//! tree.insert(21, 3);
//!
//! assert_eq!(tree.query(0, 10), 0);
//! assert_eq!(tree.query(15, 20), 2);
//! assert_eq!(tree.query(15, 25), 5);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use sparse_segtree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::segment::*;
}

pub mod segment;

pub use segment::{NewickDump, RangeViolation, SegmentKey, SparseSegmentTree};
