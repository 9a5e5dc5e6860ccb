use std::iter::FusedIterator;

use crate::{
    arena::NodeId,
    compare::{Comparator, NaturalOrder},
    interval::Interval,
    IntervalTree,
};

/// An iterator over the entries of an [`IntervalTree`] whose keys overlap a
/// query interval, in ascending key order.
///
/// Returned by [`IntervalTree::at()`] and [`IntervalTree::overlapping()`].
#[derive(Debug)]
pub struct Overlaps<'a, R, V, C = NaturalOrder> {
    tree: &'a IntervalTree<R, V, C>,
    query: Interval<R>,
    stack: Vec<NodeId>,
}

impl<'a, R, V, C> Overlaps<'a, R, V, C>
where
    C: Comparator<R>,
{
    pub(crate) fn new(tree: &'a IntervalTree<R, V, C>, query: Interval<R>) -> Self {
        let mut this = Self {
            tree,
            query,
            stack: vec![],
        };

        // Descend down the left side of the tree, pushing all the internal
        // nodes onto the stack until the left-most leaf is reached.
        if let Some(root) = tree.root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: NodeId) {
        let cmp = &self.tree.comparator;
        let mut ptr = Some(subtree_root);

        while let Some(id) = ptr {
            let n = self.tree.node(id);
            if cmp.less(&n.subtree_max, self.query.lower()) {
                // Prune this subtree rooted at "n" from the search.
                //
                // Every interval in this subtree ends before the query starts.
                break;
            }

            self.stack.push(id);
            ptr = n.left;
        }
    }
}

impl<'a, R, V, C> Iterator for Overlaps<'a, R, V, C>
where
    C: Comparator<R>,
{
    type Item = (&'a Interval<R>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.stack.pop()?;
            let n = self.tree.node(id);

            if self.tree.comparator.greater(n.interval.lower(), self.query.upper()) {
                // This node, its right subtree and every node still on the
                // stack start after the query ends.
                self.stack.clear();
                return None;
            }

            // Push the right subtree to be visited next.
            if let Some(right) = n.right {
                self.push_subtree(right);
            }

            // Yield this node if it overlaps with the query range.
            if self.tree.comparator.overlaps(&n.interval, &self.query) {
                return Some((&n.interval, &n.value));
            }
        }
    }
}

impl<R, V, C> FusedIterator for Overlaps<'_, R, V, C> where C: Comparator<R> {}
