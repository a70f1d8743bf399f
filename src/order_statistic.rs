/// A one-based rank into the sorted order of a tree.
///
/// Rank 1 is the smallest key. Indexing a [`PersistentAvl`](crate::PersistentAvl) with a rank
/// outside `1..=len` panics.
///
/// # Examples
///
/// ```
/// use persistent_avl::{PersistentAvl, Rank};
///
/// let tree = PersistentAvl::from([30, 10, 20]);
///
/// assert_eq!(tree[Rank(1)], 10);
/// assert_eq!(tree[Rank(3)], 30);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);

/// Distance between two keys, used by `closest` lookups.
///
/// The output must be totally ordered so that the nearest key is well defined. Ties are broken
/// toward the smaller key.
///
/// # Examples
///
/// ```
/// use persistent_avl::Distance;
///
/// assert_eq!(3i32.distance(&-4), 7u32);
/// assert_eq!(10u8.distance(&250), 240u8);
/// ```
pub trait Distance {
    /// The magnitude type of a distance.
    type Output: Ord;

    /// Returns the absolute distance between `self` and `other`.
    fn distance(&self, other: &Self) -> Self::Output;
}

macro_rules! impl_distance {
    ($($key:ty => $out:ty),* $(,)?) => {
        $(
            impl Distance for $key {
                type Output = $out;

                #[inline]
                fn distance(&self, other: &Self) -> $out {
                    self.abs_diff(*other)
                }
            }
        )*
    };
}

impl_distance! {
    i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize,
    u8 => u8, u16 => u16, u32 => u32, u64 => u64, u128 => u128, usize => usize,
}

impl Distance for char {
    type Output = u32;

    #[inline]
    fn distance(&self, other: &Self) -> u32 {
        u32::from(*self).abs_diff(u32::from(*other))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric_and_never_overflows() {
        assert_eq!(i8::MIN.distance(&i8::MAX), 255);
        assert_eq!(i8::MAX.distance(&i8::MIN), 255);
        assert_eq!(0u64.distance(&u64::MAX), u64::MAX);
        assert_eq!('a'.distance(&'d'), 3);
    }
}
