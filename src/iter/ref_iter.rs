use std::{fmt, iter::FusedIterator};

use crate::{arena::NodeId, compare::NaturalOrder, interval::Interval, IntervalTree};

/// An iterator over the entries of an [`IntervalTree`] in key order.
///
/// Returned by [`IntervalTree::iter()`] and [`IntervalTree::equal_range()`].
pub struct Iter<'a, R, V, C = NaturalOrder> {
    tree: &'a IntervalTree<R, V, C>,

    /// The next node to yield from each end, valid while `remaining` is
    /// non-zero.
    front: Option<NodeId>,
    back: Option<NodeId>,

    remaining: usize,
}

impl<'a, R, V, C> Iter<'a, R, V, C> {
    pub(crate) fn new(tree: &'a IntervalTree<R, V, C>) -> Self {
        Self::between(tree, tree.first_node(), tree.last_node(), tree.len())
    }

    /// Yield the `len` entries from `front` to `back` inclusive.
    pub(crate) fn between(
        tree: &'a IntervalTree<R, V, C>,
        front: Option<NodeId>,
        back: Option<NodeId>,
        len: usize,
    ) -> Self {
        Self {
            tree,
            front,
            back,
            remaining: len,
        }
    }

    fn entry(&self, id: NodeId) -> (&'a Interval<R>, &'a V) {
        let n = self.tree.node(id);
        (&n.interval, &n.value)
    }
}

impl<'a, R, V, C> Iterator for Iter<'a, R, V, C> {
    type Item = (&'a Interval<R>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let id = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(id);

        Some(self.entry(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R, V, C> DoubleEndedIterator for Iter<'_, R, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let id = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(id);

        Some(self.entry(id))
    }
}

impl<R, V, C> ExactSizeIterator for Iter<'_, R, V, C> {}

impl<R, V, C> FusedIterator for Iter<'_, R, V, C> {}

impl<R, V, C> Clone for Iter<'_, R, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<R, V, C> fmt::Debug for Iter<'_, R, V, C>
where
    R: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
