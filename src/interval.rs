use std::{fmt, ops::RangeInclusive};

/// A closed interval `[lower, upper]` used as the key of an
/// [`IntervalTree`](crate::IntervalTree).
///
/// Intervals are ordered by their lower bound, tie-broken by the upper bound.
/// The derived [`Ord`] follows that rule; the tree itself orders keys through
/// its [`Comparator`](crate::Comparator), which applies the same lexicographic
/// rule over the injected bound ordering.
///
/// No check is made that `lower <= upper`. An inverted interval is stored and
/// ordered like any other, but contains no point: under the natural order it
/// only overlaps queries spanning all of `upper..=lower`.
///
/// ```
/// use interval_avl::Interval;
///
/// let inverted = Interval::new(5, 2);
/// assert!(!inverted.overlaps(&Interval::point(3)));
/// assert!(inverted.overlaps(&Interval::new(1, 6)));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval<R> {
    lower: R,
    upper: R,
}

impl<R> Interval<R> {
    /// Construct the interval `[lower, upper]`.
    pub const fn new(lower: R, upper: R) -> Self {
        Self { lower, upper }
    }

    /// The degenerate interval `[point, point]`.
    pub fn point(point: R) -> Self
    where
        R: Clone,
    {
        Self {
            lower: point.clone(),
            upper: point,
        }
    }

    pub fn lower(&self) -> &R {
        &self.lower
    }

    pub fn upper(&self) -> &R {
        &self.upper
    }

    /// Explode this [`Interval`] into its `(lower, upper)` bounds.
    pub fn into_bounds(self) -> (R, R) {
        (self.lower, self.upper)
    }

    /// Returns true if `self` and `other` share at least one point, using
    /// the natural ordering of `R`.
    ///
    /// ```
    /// use interval_avl::Interval;
    ///
    /// assert!(Interval::new(1, 4).overlaps(&Interval::new(4, 9)));
    /// assert!(!Interval::new(1, 4).overlaps(&Interval::new(5, 9)));
    /// ```
    pub fn overlaps(&self, other: &Self) -> bool
    where
        R: PartialOrd,
    {
        self.lower <= other.upper && self.upper >= other.lower
    }
}

impl<R> From<(R, R)> for Interval<R> {
    fn from((lower, upper): (R, R)) -> Self {
        Self { lower, upper }
    }
}

impl<R> From<RangeInclusive<R>> for Interval<R> {
    fn from(value: RangeInclusive<R>) -> Self {
        let (lower, upper) = value.into_inner();
        Self { lower, upper }
    }
}

impl<R> From<Interval<R>> for (R, R) {
    fn from(value: Interval<R>) -> Self {
        value.into_bounds()
    }
}

impl<R> PartialEq<(R, R)> for Interval<R>
where
    R: PartialEq,
{
    fn eq(&self, other: &(R, R)) -> bool {
        self.lower == other.0 && self.upper == other.1
    }
}

impl<R> fmt::Display for Interval<R>
where
    R: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
