use crate::{
    arena::{Arena, NodeId},
    compare::Comparator,
    interval::Interval,
    IntervalTree,
};

/// Which child link of a parent a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub(crate) struct Node<R, V> {
    /// Structural back-link used for traversal and rebalancing only.
    pub(crate) parent: Option<NodeId>,

    /// Child links.
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 1, an absent subtree a height of 0.
    ///
    /// A u8 holds a maximum value of 255, far beyond the height of a balanced
    /// tree addressable by a u32 [`NodeId`].
    pub(crate) height: u8,

    /// The maximum upper bound of all intervals for the subtree rooted at this
    /// [`Node`].
    pub(crate) subtree_max: R,

    pub(crate) interval: Interval<R>,
    pub(crate) value: V,
}

impl<R, V> Node<R, V> {
    pub(crate) fn new(interval: Interval<R>, value: V, parent: Option<NodeId>) -> Self
    where
        R: Clone,
    {
        Self {
            subtree_max: interval.upper().clone(),
            interval,
            value,
            parent,
            left: None,
            right: None,
            height: 1,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Explode this [`Node`] into the [`Interval`] and value `V` it contains.
    pub(crate) fn into_entry(self) -> (Interval<R>, V) {
        (self.interval, self.value)
    }
}

impl<R, V, C> IntervalTree<R, V, C> {
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<R, V> {
        self.nodes.get(id)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<R, V> {
        self.nodes.get_mut(id)
    }

    /// The height of the (possibly absent) subtree rooted at `id`.
    pub(crate) fn height(&self, id: Option<NodeId>) -> u8 {
        id.map(|v| self.node(v).height).unwrap_or_default()
    }

    /// Point whichever link referenced `old` (the child link of `parent`, or
    /// the root when `parent` is [`None`]) at `new` instead.
    ///
    /// The back-link of `new` is left for the caller to set.
    pub(crate) fn replace_child(
        &mut self,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let p = self.node_mut(p);
                if p.left == Some(old) {
                    p.left = new;
                } else {
                    debug_assert_eq!(p.right, Some(old));
                    p.right = new;
                }
            }
        }
    }

    /// Free every node of the subtree rooted at `id`, descendants before
    /// their parent, returning the number of nodes released.
    ///
    /// The caller is responsible for unlinking `id` from its parent (or the
    /// root).
    pub(crate) fn free_subtree(&mut self, id: NodeId) -> usize {
        let mut freed = 0;

        // Post-order walk: a node is freed on its second visit, once both
        // children have been released.
        let mut stack = vec![(id, false)];
        while let Some((id, children_done)) = stack.pop() {
            if children_done {
                drop(self.nodes.take(id));
                freed += 1;
                continue;
            }

            stack.push((id, true));
            let n = self.node(id);
            stack.extend(n.right.into_iter().chain(n.left).map(|v| (v, false)));
        }

        freed
    }

    /// Duplicate the whole node graph into a fresh, compact [`Arena`],
    /// preserving the cached height and subtree max of every node and
    /// re-parenting each copy.
    pub(crate) fn clone_nodes(&self) -> (Arena<Node<R, V>>, Option<NodeId>)
    where
        R: Clone,
        V: Clone,
    {
        let mut nodes = Arena::with_capacity(self.nodes.len());
        let Some(root) = self.root else {
            return (nodes, None);
        };

        let mut new_root = None;

        // (source node, parent of the copy, side of the copy in that parent)
        let mut stack = vec![(root, None, Side::Left)];
        while let Some((src, parent, side)) = stack.pop() {
            let n = self.node(src);
            let id = nodes.alloc(Node {
                parent,
                left: None,
                right: None,
                height: n.height,
                subtree_max: n.subtree_max.clone(),
                interval: n.interval.clone(),
                value: n.value.clone(),
            });

            match parent {
                Some(p) => nodes.get_mut(p).set_child(side, Some(id)),
                None => new_root = Some(id),
            }

            if let Some(right) = n.right {
                stack.push((right, Some(id), Side::Right));
            }
            if let Some(left) = n.left {
                stack.push((left, Some(id), Side::Left));
            }
        }

        (nodes, new_root)
    }
}

impl<R, V, C> IntervalTree<R, V, C>
where
    R: Clone,
    C: Comparator<R>,
{
    /// Recompute the height and subtree max of `id` from its children and its
    /// own key, walking up the parent chain for as long as the recomputation
    /// changes something.
    ///
    /// A leaf always propagates to its parent: a freshly linked (or newly
    /// orphaned) leaf carries correct values of its own, but its parent does
    /// not yet account for it.
    pub(crate) fn update(&mut self, id: NodeId) {
        let mut current = Some(id);

        while let Some(id) = current {
            let (height, max) = self.recompute(id);

            let cmp = &self.comparator;
            let n = self.nodes.get_mut(id);

            let changed = n.height != height || !cmp.equal(&n.subtree_max, &max);
            if !changed && !n.is_leaf() {
                return;
            }

            n.height = height;
            n.subtree_max = max;
            current = n.parent;
        }
    }

    /// Recompute the height and subtree max of `id` alone from its children
    /// and its own key, without touching any ancestor.
    pub(crate) fn refresh(&mut self, id: NodeId) {
        let (height, max) = self.recompute(id);
        let n = self.nodes.get_mut(id);
        n.height = height;
        n.subtree_max = max;
    }

    fn recompute(&self, id: NodeId) -> (u8, R) {
        let n = self.node(id);

        let mut height = 1;
        let mut max = n.interval.upper();

        for child in [n.left, n.right].into_iter().flatten() {
            let child = self.node(child);
            height = height.max(child.height + 1);
            max = self.comparator.max_bound(max, &child.subtree_max);
        }

        (height, max.clone())
    }
}
