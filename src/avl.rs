use tracing::trace;

use crate::{arena::NodeId, compare::Comparator, IntervalTree};

impl<R, V, C> IntervalTree<R, V, C>
where
    R: Clone,
    C: Comparator<R>,
{
    /// Compute the "balance factor" of the subtree rooted at `id`.
    ///
    /// Returns the subtree height skew, which is a positive number when right
    /// heavy, and a negative number when left heavy.
    pub(crate) fn balance(&self, id: NodeId) -> i16 {
        let n = self.node(id);

        // Correctness: the height is a u8, the maximal value of which fits in
        // an i16 without truncation or sign inversion.
        self.height(n.right) as i16 - self.height(n.left) as i16
    }

    /// Left rotate the subtree rooted at `x` around the pivot point `P`,
    /// returning the pivot (the new subtree root).
    ///
    /// ```text
    ///
    ///      x
    ///     / \                               P
    ///    1   P         Rotate Left        /   \
    ///       / \      --------------->    x     y
    ///      2   y                        / \   / \
    ///         / \                      1   2 3   4
    ///        3   4
    /// ```
    ///
    /// The augmentation of `x` (the node that moved down) and then `P` is
    /// recomputed. Ancestors of `P` are left for [`Self::rebalance`] to
    /// refresh.
    ///
    /// # Panics
    ///
    /// Panics if `x` has no right child (cannot be rotated).
    pub(crate) fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let Some(p) = self.node(x).right else {
            unreachable!("rotate_left on a node without a right child");
        };

        // Move the inner subtree "2" across to x.
        let inner = self.node(p).left;
        self.node_mut(x).right = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(x);
        }

        // Hang P from x's old parent (or make it the root).
        let parent = self.node(x).parent;
        self.replace_child(parent, x, Some(p));
        self.node_mut(p).parent = parent;

        self.node_mut(p).left = Some(x);
        self.node_mut(x).parent = Some(p);

        self.refresh(x);
        self.refresh(p);
        p
    }

    /// Right rotate the subtree rooted at `y` around the pivot point `P`,
    /// returning the pivot (the new subtree root).
    ///
    /// ```text
    ///          y
    ///         / \                           P
    ///        P   4     Rotate Right       /   \
    ///       / \      --------------->    x     y
    ///      x   3                        / \   / \
    ///     / \                          1   2 3   4
    ///    1   2
    /// ```
    ///
    /// The augmentation of `y` (the node that moved down) and then `P` is
    /// recomputed. Ancestors of `P` are left for [`Self::rebalance`] to
    /// refresh.
    ///
    /// # Panics
    ///
    /// Panics if `y` has no left child (cannot be rotated).
    pub(crate) fn rotate_right(&mut self, y: NodeId) -> NodeId {
        let Some(p) = self.node(y).left else {
            unreachable!("rotate_right on a node without a left child");
        };

        // Move the inner subtree "3" across to y.
        let inner = self.node(p).right;
        self.node_mut(y).left = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(y);
        }

        // Hang P from y's old parent (or make it the root).
        let parent = self.node(y).parent;
        self.replace_child(parent, y, Some(p));
        self.node_mut(p).parent = parent;

        self.node_mut(p).right = Some(y);
        self.node_mut(y).parent = Some(p);

        self.refresh(y);
        self.refresh(p);
        p
    }

    /// Restore the AVL invariant on every node from `start` up to the root.
    ///
    /// Every node on the path has its height and subtree max recomputed before
    /// its balance factor is read, and the walk never stops early: a rotation
    /// changes the height of the rotated subtree, which may unbalance (or
    /// shorten) an ancestor further up.
    pub(crate) fn rebalance(&mut self, start: NodeId) {
        let mut current = start;

        loop {
            self.refresh(current);
            let balance = self.balance(current);

            // The node occupying the position "current" held before any
            // rotation.
            let top = if balance < -1 {
                // Left-heavy
                if let Some(left) = self.node(current).left {
                    if self.balance(left) > 0 {
                        trace!(balance, "left-right case, rotating left child left");
                        self.rotate_left(left);
                    }
                }
                trace!(balance, "left-heavy subtree, rotating right");
                self.rotate_right(current)
            } else if balance > 1 {
                // Right-heavy
                if let Some(right) = self.node(current).right {
                    if self.balance(right) < 0 {
                        trace!(balance, "right-left case, rotating right child right");
                        self.rotate_right(right);
                    }
                }
                trace!(balance, "right-heavy subtree, rotating left");
                self.rotate_left(current)
            } else {
                current
            };

            // Invariant: the absolute difference between subtree heights
            // ("balance factor") cannot exceed 1 once visited.
            debug_assert!(self.balance(top).abs() <= 1);

            match self.node(top).parent {
                Some(parent) => current = parent,
                None => {
                    debug_assert_eq!(self.root, Some(top));
                    self.root = Some(top);
                    return;
                }
            }
        }
    }
}
