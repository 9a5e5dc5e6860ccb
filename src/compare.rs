use std::cmp::Ordering;

use crate::interval::Interval;

/// An ordering over interval bounds of type `R`.
///
/// Implementations provide a single strict-weak-order primitive, [`less`];
/// every other relation between bounds and between whole [`Interval`] keys,
/// and the overlap predicate used by stabbing queries, is derived from it.
///
/// [`NaturalOrder`] (the default) uses `R`'s [`PartialOrd`]. Any
/// `Fn(&R, &R) -> bool` closure is also a comparator:
///
/// ```
/// use interval_avl::{Interval, IntervalTree};
///
/// // A tree over a reversed axis.
/// let mut t = IntervalTree::with_comparator(|a: &i32, b: &i32| a > b);
/// t.insert((1, 0), "low");
/// t.insert((9, 5), "high");
///
/// let keys = t.iter().map(|(k, _)| *k).collect::<Vec<_>>();
/// assert_eq!(keys, [Interval::new(9, 5), Interval::new(1, 0)]);
/// ```
///
/// [`less`]: Comparator::less
pub trait Comparator<R> {
    /// Returns true if `a` is strictly ordered before `b`.
    fn less(&self, a: &R, b: &R) -> bool;

    fn greater(&self, a: &R, b: &R) -> bool {
        self.less(b, a)
    }

    fn less_eq(&self, a: &R, b: &R) -> bool {
        !self.greater(a, b)
    }

    fn greater_eq(&self, a: &R, b: &R) -> bool {
        !self.less(a, b)
    }

    /// Equivalence: neither bound is ordered before the other.
    fn equal(&self, a: &R, b: &R) -> bool {
        !self.less(a, b) && !self.greater(a, b)
    }

    /// Order two keys lexicographically by (lower, upper).
    fn key_less(&self, a: &Interval<R>, b: &Interval<R>) -> bool {
        self.less(a.lower(), b.lower())
            || (self.equal(a.lower(), b.lower()) && self.less(a.upper(), b.upper()))
    }

    fn key_greater(&self, a: &Interval<R>, b: &Interval<R>) -> bool {
        self.key_less(b, a)
    }

    fn key_less_eq(&self, a: &Interval<R>, b: &Interval<R>) -> bool {
        !self.key_greater(a, b)
    }

    fn key_greater_eq(&self, a: &Interval<R>, b: &Interval<R>) -> bool {
        !self.key_less(a, b)
    }

    fn key_equal(&self, a: &Interval<R>, b: &Interval<R>) -> bool {
        !self.key_less(a, b) && !self.key_greater(a, b)
    }

    fn key_cmp(&self, a: &Interval<R>, b: &Interval<R>) -> Ordering {
        if self.key_less(a, b) {
            Ordering::Less
        } else if self.key_greater(a, b) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Returns true if the closed intervals `a` and `b` share at least one
    /// point.
    fn overlaps(&self, a: &Interval<R>, b: &Interval<R>) -> bool {
        self.less_eq(a.lower(), b.upper()) && self.greater_eq(a.upper(), b.lower())
    }

    /// The greater of two bounds, preferring `a` when they are equal.
    fn max_bound<'a>(&self, a: &'a R, b: &'a R) -> &'a R {
        if self.less(a, b) {
            b
        } else {
            a
        }
    }
}

/// Orders bounds by their [`PartialOrd`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<R> Comparator<R> for NaturalOrder
where
    R: PartialOrd,
{
    #[inline]
    fn less(&self, a: &R, b: &R) -> bool {
        a < b
    }
}

impl<R, F> Comparator<R> for F
where
    F: Fn(&R, &R) -> bool,
{
    #[inline]
    fn less(&self, a: &R, b: &R) -> bool {
        self(a, b)
    }
}
