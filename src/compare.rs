//! Ordering policies for a `PairingHeap`.
//!
//! A policy answers a single question: is `a` less extreme than `b`?
//! The heap keeps the most extreme element on top, so `MaxFirst` yields
//! a max-heap and `MinFirst` a min-heap.

/// Represents an ordering policy for elements of type `T`.
///
/// `less_extreme(a, b)` returns true if `a` must end up below `b` within the heap.
///
/// This trait is implicitely implemented already for all closures and functions
/// of type `Fn(&T, &T) -> bool`.
pub trait Compare<T> {
    /// Returns `true` if `a` is strictly less extreme than `b`.
    fn less_extreme(&self, a: &T, b: &T) -> bool;
}

impl<T, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less_extreme(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Keeps the greatest element on top.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MaxFirst;

impl<T: Ord> Compare<T> for MaxFirst {
    #[inline]
    fn less_extreme(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Keeps the smallest element on top.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MinFirst;

impl<T: Ord> Compare<T> for MinFirst {
    #[inline]
    fn less_extreme(&self, a: &T, b: &T) -> bool {
        a > b
    }
}

/// Keeps the element with the greatest extracted key on top.
///
/// Combine with `std::cmp::Reverse` inside the key function to get
/// the smallest key on top instead.
#[derive(Debug, Default, Copy, Clone)]
pub struct ByKey<F>(pub F);

impl<T, K, F> Compare<T> for ByKey<F>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    #[inline]
    fn less_extreme(&self, a: &T, b: &T) -> bool {
        (self.0)(a) < (self.0)(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Reverse;

    #[test]
    fn max_first() {
        assert!(MaxFirst.less_extreme(&1, &2));
        assert!(!MaxFirst.less_extreme(&2, &1));
        assert!(!MaxFirst.less_extreme(&2, &2));
    }

    #[test]
    fn min_first() {
        assert!(MinFirst.less_extreme(&2, &1));
        assert!(!MinFirst.less_extreme(&1, &2));
        assert!(!MinFirst.less_extreme(&1, &1));
    }

    #[test]
    fn closure() {
        let by_len = |a: &&str, b: &&str| a.len() < b.len();
        assert!(by_len.less_extreme(&"ab", &"abc"));
        assert!(!by_len.less_extreme(&"abc", &"xyz"));
    }

    #[test]
    fn by_key() {
        let cmp = ByKey(|&(_, prio): &(char, i64)| Reverse(prio));
        assert!(cmp.less_extreme(&('a', 10), &('b', 5)));
        assert!(!cmp.less_extreme(&('a', 5), &('b', 10)));
    }
}
