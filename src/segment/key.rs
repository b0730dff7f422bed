//! Integer keys for segment tree node intervals.

use std::fmt;

/// A key type that can index a [`SparseSegmentTree`](super::SparseSegmentTree).
///
/// Node intervals are reconstructed on every traversal by repeatedly halving
/// the root range, so a key type only needs ordering, a floor midpoint and a
/// successor.
///
/// # Laws
///
/// For all `begin <= end`:
///
/// ```text
/// begin <= SegmentKey::midpoint(begin, end) <= end
/// begin < end  implies  SegmentKey::midpoint(begin, end) < end
/// ```
///
/// # Examples
///
/// ```rust
/// use sparse_segtree::segment::SegmentKey;
///
/// assert_eq!(SegmentKey::midpoint(0, 100), 50);
/// assert_eq!(SegmentKey::midpoint(-3, 0), -2);
/// assert_eq!(SegmentKey::midpoint(i64::MAX - 1, i64::MAX), i64::MAX - 1);
/// assert_eq!(7u8.successor(), 8);
/// ```
pub trait SegmentKey: Copy + Ord + fmt::Debug + fmt::Display {
    /// Returns `floor((begin + end) / 2)` without overflowing.
    #[must_use]
    fn midpoint(begin: Self, end: Self) -> Self;

    /// Returns `self + 1`.
    ///
    /// Only called with a midpoint strictly below the end of its interval,
    /// so it never overflows during traversal.
    #[must_use]
    fn successor(self) -> Self;
}

// (begin & end) + ((begin ^ end) >> 1) is the exact floor average: the shift is
// arithmetic for signed types and the result always lies in [begin, end].
macro_rules! impl_segment_key_for_integers {
    ($($ty:ty),*) => {
        $(
            impl SegmentKey for $ty {
                #[inline]
                fn midpoint(begin: Self, end: Self) -> Self {
                    (begin & end) + ((begin ^ end) >> 1)
                }

                #[inline]
                fn successor(self) -> Self {
                    self + 1
                }
            }
        )*
    };
}

impl_segment_key_for_integers!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 100, 50)]
    #[case(0, 1, 0)]
    #[case(5, 5, 5)]
    #[case(19, 22, 20)]
    #[case(-1, 0, -1)]
    #[case(-3, 0, -2)]
    #[case(-10, -1, -6)]
    #[case(-7, 7, 0)]
    fn test_midpoint_is_floor_average(#[case] begin: i32, #[case] end: i32, #[case] expected: i32) {
        assert_eq!(SegmentKey::midpoint(begin, end), expected);
    }

    #[rstest]
    fn test_midpoint_of_full_signed_range_does_not_overflow() {
        assert_eq!(SegmentKey::midpoint(i64::MIN, i64::MAX), -1);
        assert_eq!(SegmentKey::midpoint(i8::MIN, i8::MAX), -1);
        assert_eq!(SegmentKey::midpoint(i128::MIN, i128::MIN + 1), i128::MIN);
    }

    macro_rules! unsigned_extremes_tests {
        ($($ty:ty),*) => {
            $(
                paste::paste! {
                    #[rstest]
                    fn [<test_midpoint_at_ $ty _extremes>]() {
                        assert_eq!(SegmentKey::midpoint(<$ty>::MIN, <$ty>::MAX), <$ty>::MAX / 2);
                        assert_eq!(
                            SegmentKey::midpoint(<$ty>::MAX - 1, <$ty>::MAX),
                            <$ty>::MAX - 1
                        );
                        assert_eq!((<$ty>::MAX - 1).successor(), <$ty>::MAX);
                    }
                }
            )*
        };
    }

    unsigned_extremes_tests!(u8, u16, u32, u64, u128, usize);

    #[rstest]
    fn test_midpoint_stays_strictly_below_end() {
        for begin in -20i16..20 {
            for end in (begin + 1)..20 {
                let middle = SegmentKey::midpoint(begin, end);
                assert!(begin <= middle && middle < end, "[{begin}, {end}] -> {middle}");
            }
        }
    }
}
