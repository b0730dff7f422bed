//! Precondition violations of the segment tree contract.
//!
//! The panicking operations ([`SparseSegmentTree::new`], [`SparseSegmentTree::insert`],
//! [`SparseSegmentTree::query`]) treat these as programming errors and panic with
//! the `Display` text. The checked operations return them instead.
//!
//! [`SparseSegmentTree::new`]: super::SparseSegmentTree::new
//! [`SparseSegmentTree::insert`]: super::SparseSegmentTree::insert
//! [`SparseSegmentTree::query`]: super::SparseSegmentTree::query

use std::fmt;

/// A key or range that lies outside the contract of a segment tree.
///
/// # Examples
///
/// ```rust
/// use sparse_segtree::segment::RangeViolation;
///
/// let error = RangeViolation::InvertedBounds { min: 10, max: 0 };
/// assert_eq!(
///     format!("{error}"),
///     "invalid key range: min_value 10 is greater than max_value 0"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeViolation<K> {
    /// Construction with `min > max`.
    InvertedBounds {
        /// The requested lower bound.
        min: K,
        /// The requested upper bound.
        max: K,
    },
    /// An update key outside `[min, max]`.
    KeyOutOfRange {
        /// The rejected key.
        key: K,
        /// The tree's lower bound.
        min: K,
        /// The tree's upper bound.
        max: K,
    },
    /// A query with `begin < min` or `end > max`.
    QueryOutOfRange {
        /// The requested begin of the query.
        begin: K,
        /// The requested end of the query.
        end: K,
        /// The tree's lower bound.
        min: K,
        /// The tree's upper bound.
        max: K,
    },
}

impl<K: fmt::Display> fmt::Display for RangeViolation<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedBounds { min, max } => write!(
                formatter,
                "invalid key range: min_value {min} is greater than max_value {max}"
            ),
            Self::KeyOutOfRange { key, min, max } => {
                write!(formatter, "key {key} is outside the key range [{min}, {max}]")
            }
            Self::QueryOutOfRange {
                begin,
                end,
                min,
                max,
            } => write!(
                formatter,
                "query [{begin}, {end}] reaches outside the key range [{min}, {max}]"
            ),
        }
    }
}

impl<K: fmt::Debug + fmt::Display> std::error::Error for RangeViolation<K> {}
