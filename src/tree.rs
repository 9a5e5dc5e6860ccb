use std::{
    cmp::Ordering,
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    mem,
};

use tracing::trace;

use crate::{
    arena::{Arena, NodeId},
    compare::{Comparator, NaturalOrder},
    cursor::{Cursor, CursorMut},
    error::Error,
    interval::Interval,
    iter::{IntoIter, Iter, Overlaps},
    node::{Node, Side},
};

/// An ordered multimap of [`Interval`] keys to values of type `V`, augmented
/// to answer "which entries overlap X" efficiently.
///
/// The tree is an AVL tree ordered by interval (lower bound, then upper bound)
/// where every node caches the greatest upper bound within its subtree, so
/// that stabbing queries ([`at`], [`overlapping`]) skip every subtree that
/// cannot contain a match.
///
/// Keys need not be unique: inserting an equal key adds another entry,
/// ordered after the existing equal keys at the time of insertion.
///
/// Bounds are ordered by the comparator `C`, [`NaturalOrder`] by default.
///
/// ```
/// use interval_avl::{Interval, IntervalTree};
///
/// let mut t = IntervalTree::new();
/// t.insert((0, 10), "a");
/// t.insert((5, 6), "b");
/// t.insert((20, 30), "c");
///
/// let hits = t.at(6).map(|(_, v)| *v).collect::<Vec<_>>();
/// assert_eq!(hits, ["a", "b"]);
///
/// let hits = t.overlapping((9, 25)).map(|(_, v)| *v).collect::<Vec<_>>();
/// assert_eq!(hits, ["a", "c"]);
/// ```
///
/// [`at`]: IntervalTree::at
/// [`overlapping`]: IntervalTree::overlapping
pub struct IntervalTree<R, V, C = NaturalOrder> {
    pub(crate) nodes: Arena<Node<R, V>>,
    pub(crate) root: Option<NodeId>,
    pub(crate) comparator: C,
}

impl<R, V, C> Default for IntervalTree<R, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<R, V> IntervalTree<R, V> {
    /// Construct an empty tree ordered by the natural order of `R`.
    pub const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            comparator: NaturalOrder,
        }
    }
}

impl<R, V, C> IntervalTree<R, V, C> {
    /// Construct an empty tree ordering bounds with `comparator`.
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            comparator,
        }
    }

    /// The comparator ordering the bounds of this tree.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// The number of entries in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            let freed = self.free_subtree(root);
            trace!(freed, "cleared tree");
        }

        debug_assert!(self.nodes.is_empty());
        self.nodes.clear();
    }

    /// Exchange the contents of `self` and `other` in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Iterate over all `(key, value)` entries in ascending key order.
    ///
    /// The iterator is double ended: `iter().rev()` yields the entries in
    /// descending key order.
    pub fn iter(&self) -> Iter<'_, R, V, C> {
        Iter::new(self)
    }

    /// The entry with the smallest key, if any.
    pub fn first(&self) -> Option<(&Interval<R>, &V)> {
        self.cursor_front().get()
    }

    /// The entry with the largest key, if any.
    pub fn last(&self) -> Option<(&Interval<R>, &V)> {
        self.cursor_back().get()
    }

    /// A cursor at the first entry, or at the end position if the tree is
    /// empty.
    pub fn cursor_front(&self) -> Cursor<'_, R, V, C> {
        Cursor::new(self, self.first_node())
    }

    /// A cursor at the last entry, or at the end position if the tree is
    /// empty.
    pub fn cursor_back(&self) -> Cursor<'_, R, V, C> {
        Cursor::new(self, self.last_node())
    }

    /// A cursor at the end position, past the last entry.
    pub fn cursor_end(&self) -> Cursor<'_, R, V, C> {
        Cursor::new(self, None)
    }

    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, R, V, C> {
        let front = self.first_node();
        CursorMut::new(self, front)
    }

    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, R, V, C> {
        let back = self.last_node();
        CursorMut::new(self, back)
    }
}

impl<R, V, C> IntervalTree<R, V, C>
where
    R: Clone,
    C: Comparator<R>,
{
    /// Insert `value` under `key`, returning a cursor positioned at the new
    /// entry.
    ///
    /// Insertion always succeeds; an entry with an equal key is not replaced.
    ///
    /// ```
    /// use interval_avl::{Interval, IntervalTree};
    ///
    /// let mut t = IntervalTree::new();
    /// let mut cursor = t.insert((0, 1), "value0");
    /// assert_eq!(cursor.key(), Some(&Interval::new(0, 1)));
    ///
    /// // Past the only entry lies the end position.
    /// cursor.move_next();
    /// assert!(cursor.is_end());
    /// ```
    pub fn insert<K>(&mut self, key: K, value: V) -> CursorMut<'_, R, V, C>
    where
        K: Into<Interval<R>>,
    {
        let id = self.insert_node(key.into(), value);
        CursorMut::new(self, Some(id))
    }

    /// Insert the value built by `f` from the key, returning a cursor
    /// positioned at the new entry.
    pub fn insert_with<K, F>(&mut self, key: K, f: F) -> CursorMut<'_, R, V, C>
    where
        K: Into<Interval<R>>,
        F: FnOnce(&Interval<R>) -> V,
    {
        let key = key.into();
        let value = f(&key);
        let id = self.insert_node(key, value);
        CursorMut::new(self, Some(id))
    }

    fn insert_node(&mut self, interval: Interval<R>, value: V) -> NodeId {
        // Descend to the leaf position for the new key. Equal keys sort to the
        // right, after the existing entries.
        let mut parent = None;
        let mut side = Side::Left;
        let mut ptr = self.root;
        while let Some(id) = ptr {
            let n = self.node(id);
            parent = Some(id);

            if self.comparator.key_less(&interval, &n.interval) {
                side = Side::Left;
                ptr = n.left;
            } else {
                side = Side::Right;
                ptr = n.right;
            }
        }

        let id = self.nodes.alloc(Node::new(interval, value, parent));

        match parent {
            None => self.root = Some(id),
            Some(p) => {
                self.node_mut(p).set_child(side, Some(id));
                self.update(id);
                self.rebalance(p);
            }
        }

        id
    }

    /// Unlink and free the node `id`, returning its in-order successor (which
    /// remains valid) and the removed entry.
    pub(crate) fn remove_node(&mut self, id: NodeId) -> (Option<NodeId>, Interval<R>, V) {
        let n = self.node(id);

        // "victim" is the node that is physically unlinked, which has at most
        // one child.
        let (victim, next) = match (n.left, n.right) {
            (Some(_), Some(right)) => {
                // Move the entry of the in-order successor (the minimum of the
                // right subtree, which has no left child) into this node, and
                // unlink the successor's node in its place.
                //
                // This node then holds the successor entry, and is what the
                // caller continues from.
                let successor = self.leftmost(right);
                let (a, b) = self.nodes.get_pair_mut(id, successor);
                mem::swap(&mut a.interval, &mut b.interval);
                mem::swap(&mut a.value, &mut b.value);

                trace!("removing node with two children via its successor");
                (successor, Some(id))
            }
            _ => (id, self.successor(id)),
        };

        let v = self.node(victim);
        debug_assert!(v.left.is_none() || v.right.is_none());

        // Splice the victim out, hanging its only child (if any) from its
        // parent (or making it the root).
        let child = v.left.or(v.right);
        let parent = v.parent;
        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
        self.replace_child(parent, victim, child);

        let (interval, value) = self.nodes.take(victim).into_entry();

        // Rebalancing refreshes the height and subtree max of every node from
        // the splice point to the root, which includes "id" when its entry was
        // replaced by the successor's.
        match parent.or(child) {
            Some(start) => self.rebalance(start),
            None => debug_assert!(self.nodes.is_empty()),
        }

        (next, interval, value)
    }

    /// Remove the first entry (in key order) with a key equal to `key`,
    /// returning its value.
    pub fn remove(&mut self, key: &Interval<R>) -> Option<V> {
        let id = self.find_node(key)?;
        let (_, _, value) = self.remove_node(id);
        Some(value)
    }

    /// Remove every entry with a key equal to `key`, returning the number of
    /// entries removed.
    pub fn remove_all(&mut self, key: &Interval<R>) -> usize {
        let mut ptr = self.find_node(key);
        let mut removed = 0;

        while let Some(id) = ptr {
            let (next, _, _) = self.remove_node(id);
            removed += 1;

            // Equal keys are contiguous in key order.
            ptr = next.filter(|&v| self.comparator.key_equal(&self.node(v).interval, key));
        }

        trace!(removed, "removed all equal keys");
        removed
    }

    /// Remove every entry with a key in the half-open key range
    /// `[from, to)`, returning a cursor at the entry that followed the last
    /// one removed (the end position if none did).
    ///
    /// Nothing is removed when `to` is not greater than `from`, and the
    /// cursor is then placed at the lower bound of `from`.
    ///
    /// ```
    /// # use interval_avl::{Interval, IntervalTree};
    /// let mut t = IntervalTree::from([((1, 2), 'a'), ((3, 4), 'b'), ((5, 6), 'c')]);
    ///
    /// let next = t.remove_range(&Interval::new(1, 2), &Interval::new(5, 6));
    /// assert_eq!(next.value(), Some(&'c'));
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn remove_range(
        &mut self,
        from: &Interval<R>,
        to: &Interval<R>,
    ) -> CursorMut<'_, R, V, C> {
        let start = self.lower_bound_node(from);

        // Node ids are not stable across a two-child removal (the successor's
        // entry moves into the removed node), so count the span first.
        let mut n = 0;
        let mut ptr = start;
        while let Some(id) = ptr {
            if !self.comparator.key_less(&self.node(id).interval, to) {
                break;
            }
            n += 1;
            ptr = self.successor(id);
        }

        let mut ptr = start;
        for _ in 0..n {
            let Some(id) = ptr else { break };
            let (next, _, _) = self.remove_node(id);
            ptr = next;
        }

        trace!(removed = n, "removed key range");
        CursorMut::new(self, ptr)
    }

    /// The first node with a key not less than `key`.
    fn lower_bound_node(&self, key: &Interval<R>) -> Option<NodeId> {
        let mut found = None;
        let mut ptr = self.root;

        while let Some(id) = ptr {
            let n = self.node(id);
            if self.comparator.key_less(&n.interval, key) {
                ptr = n.right;
            } else {
                found = Some(id);
                ptr = n.left;
            }
        }

        found
    }

    /// The first node with a key strictly greater than `key`.
    fn upper_bound_node(&self, key: &Interval<R>) -> Option<NodeId> {
        let mut found = None;
        let mut ptr = self.root;

        while let Some(id) = ptr {
            let n = self.node(id);
            if self.comparator.key_greater(&n.interval, key) {
                found = Some(id);
                ptr = n.left;
            } else {
                ptr = n.right;
            }
        }

        found
    }

    fn find_node(&self, key: &Interval<R>) -> Option<NodeId> {
        self.lower_bound_node(key)
            .filter(|&id| self.comparator.key_equal(&self.node(id).interval, key))
    }

    /// A cursor at the first entry with a key equal to `key`, or at the end
    /// position if there is none.
    pub fn find(&self, key: &Interval<R>) -> Cursor<'_, R, V, C> {
        Cursor::new(self, self.find_node(key))
    }

    pub fn find_mut(&mut self, key: &Interval<R>) -> CursorMut<'_, R, V, C> {
        let id = self.find_node(key);
        CursorMut::new(self, id)
    }

    /// The value of the first entry with a key equal to `key`.
    pub fn get(&self, key: &Interval<R>) -> Option<&V> {
        self.find_node(key).map(|id| &self.node(id).value)
    }

    pub fn get_mut(&mut self, key: &Interval<R>) -> Option<&mut V> {
        let id = self.find_node(key)?;
        Some(&mut self.node_mut(id).value)
    }

    /// Like [`get`](Self::get), but reports an absent key as an [`Error`].
    ///
    /// ```
    /// use interval_avl::{Error, Interval, IntervalTree};
    ///
    /// let t = IntervalTree::from([((1, 2), "a")]);
    /// assert_eq!(t.try_get(&Interval::new(1, 2)), Ok(&"a"));
    /// assert_eq!(t.try_get(&Interval::new(1, 3)), Err(Error::KeyNotFound));
    /// ```
    pub fn try_get(&self, key: &Interval<R>) -> Result<&V, Error> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    pub fn contains_key(&self, key: &Interval<R>) -> bool {
        self.find_node(key).is_some()
    }

    /// A cursor at the first entry with a key not less than `key`, or at the
    /// end position if every key is less.
    pub fn lower_bound(&self, key: &Interval<R>) -> Cursor<'_, R, V, C> {
        Cursor::new(self, self.lower_bound_node(key))
    }

    /// A cursor at the first entry with a key strictly greater than `key`, or
    /// at the end position if no key is greater.
    pub fn upper_bound(&self, key: &Interval<R>) -> Cursor<'_, R, V, C> {
        Cursor::new(self, self.upper_bound_node(key))
    }

    pub fn lower_bound_mut(&mut self, key: &Interval<R>) -> CursorMut<'_, R, V, C> {
        let id = self.lower_bound_node(key);
        CursorMut::new(self, id)
    }

    pub fn upper_bound_mut(&mut self, key: &Interval<R>) -> CursorMut<'_, R, V, C> {
        let id = self.upper_bound_node(key);
        CursorMut::new(self, id)
    }

    /// Iterate over every entry with a key equal to `key`.
    pub fn equal_range(&self, key: &Interval<R>) -> Iter<'_, R, V, C> {
        let front = self.find_node(key);

        let mut back = front;
        let mut len = 0;
        let mut ptr = front;
        while let Some(id) = ptr {
            if !self.comparator.key_equal(&self.node(id).interval, key) {
                break;
            }
            back = Some(id);
            len += 1;
            ptr = self.successor(id);
        }

        Iter::between(self, front, back, len)
    }

    /// The number of entries with a key equal to `key`.
    pub fn count(&self, key: &Interval<R>) -> usize {
        self.equal_range(key).len()
    }

    /// Iterate over every entry whose key contains `point`, in ascending key
    /// order.
    ///
    /// Collect the results, or extend an existing sink with them:
    ///
    /// ```
    /// use interval_avl::IntervalTree;
    ///
    /// let t = IntervalTree::from([((0, 4), 'a'), ((4, 8), 'b'), ((9, 9), 'c')]);
    ///
    /// let mut sink = vec!['z'];
    /// sink.extend(t.at(4).map(|(_, v)| *v));
    /// assert_eq!(sink, ['z', 'a', 'b']);
    /// ```
    pub fn at(&self, point: R) -> Overlaps<'_, R, V, C> {
        Overlaps::new(self, Interval::point(point))
    }

    /// Iterate over every entry whose key overlaps `query`, in ascending key
    /// order.
    pub fn overlapping<K>(&self, query: K) -> Overlaps<'_, R, V, C>
    where
        K: Into<Interval<R>>,
    {
        Overlaps::new(self, query.into())
    }
}

impl<R, V, C> IntervalTree<R, V, C>
where
    R: Clone + Debug,
    C: Comparator<R>,
{
    /// Walk the whole tree and panic if any structural invariant does not
    /// hold.
    ///
    /// The height and subtree max of every node are recomputed from scratch
    /// and compared against the cached values, every balance factor is checked
    /// to be within `-1..=1`, every child must link back to its parent and the
    /// in-order key sequence must be non-decreasing.
    ///
    /// Keys equal to a node may sit in either of its subtrees: rotations
    /// move runs of duplicate keys across the left/right boundary.
    ///
    /// This is O(n) and intended for tests and debugging.
    ///
    /// # Panics
    ///
    /// Panics with a description of the first violated invariant.
    pub fn assert_valid(&self) {
        let Some(root) = self.root else {
            assert!(self.nodes.is_empty(), "no root, but {} nodes", self.nodes.len());
            return;
        };

        let (_, _, count) = self.assert_valid_inner(root, None);
        assert_eq!(count, self.len(), "reachable nodes do not match length");

        let mut prev: Option<&Interval<R>> = None;
        let mut visited = 0;
        for (key, _) in self.iter() {
            if let Some(prev) = prev {
                assert!(
                    self.comparator.key_less_eq(prev, key),
                    "keys out of order: {prev:?} before {key:?}"
                );
            }
            prev = Some(key);
            visited += 1;
        }
        assert_eq!(visited, self.len(), "iteration does not visit every entry");
    }

    /// Returns the recomputed (height, subtree max, node count) of the subtree
    /// rooted at `id`.
    fn assert_valid_inner(&self, id: NodeId, parent: Option<NodeId>) -> (u8, &R, usize) {
        let n = self.node(id);
        let cmp = &self.comparator;

        assert_eq!(n.parent, parent, "broken back-link at {:?}", n.interval);

        let mut max = n.interval.upper();
        let mut count = 1;
        let mut heights = [0_u8; 2];

        for (i, child) in [n.left, n.right].into_iter().enumerate() {
            let Some(child) = child else {
                continue;
            };

            let key = &self.node(child).interval;
            if i == 0 {
                assert!(
                    cmp.key_less_eq(key, &n.interval),
                    "left child {key:?} greater than {:?}",
                    n.interval
                );
            } else {
                assert!(
                    cmp.key_greater_eq(key, &n.interval),
                    "right child {key:?} less than {:?}",
                    n.interval
                );
            }

            let (height, child_max, child_count) = self.assert_valid_inner(child, Some(id));
            heights[i] = height;
            max = cmp.max_bound(max, child_max);
            count += child_count;
        }

        let [left_height, right_height] = heights;
        let height = left_height.max(right_height) + 1;
        assert_eq!(
            n.height, height,
            "expect node with interval {:?} to have height {}, has {}",
            n.interval, height, n.height,
        );

        let balance = right_height as i16 - left_height as i16;
        assert!(
            (-1..=1).contains(&balance),
            "node with interval {:?} has balance factor {balance}",
            n.interval,
        );

        assert!(
            cmp.equal(max, &n.subtree_max),
            "expect node with interval {:?} to have max {:?}, has {:?}",
            n.interval,
            max,
            n.subtree_max,
        );

        (height, max, count)
    }
}

impl<R, V, C> Clone for IntervalTree<R, V, C>
where
    R: Clone,
    V: Clone,
    C: Clone,
{
    /// Deep-copy every entry into an independent tree with the same shape.
    fn clone(&self) -> Self {
        let (nodes, root) = self.clone_nodes();
        Self {
            nodes,
            root,
            comparator: self.comparator.clone(),
        }
    }
}

impl<R, V, C> Debug for IntervalTree<R, V, C>
where
    R: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<R, V, C> PartialEq for IntervalTree<R, V, C>
where
    R: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<R, V, C> Eq for IntervalTree<R, V, C>
where
    R: Eq,
    V: Eq,
{
}

impl<R, V, C> PartialOrd for IntervalTree<R, V, C>
where
    R: PartialOrd,
    V: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<R, V, C> Ord for IntervalTree<R, V, C>
where
    R: Ord,
    V: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<R, V, C> Hash for IntervalTree<R, V, C>
where
    R: Hash,
    V: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for entry in self.iter() {
            entry.hash(state);
        }
    }
}

impl<K, R, V, C> Extend<(K, V)> for IntervalTree<R, V, C>
where
    K: Into<Interval<R>>,
    R: Clone,
    C: Comparator<R>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert_node(key.into(), value);
        }
    }
}

impl<K, R, V, C> FromIterator<(K, V)> for IntervalTree<R, V, C>
where
    K: Into<Interval<R>>,
    R: Clone,
    C: Comparator<R> + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut t = Self::default();
        t.extend(iter);
        t
    }
}

impl<K, R, V, const N: usize> From<[(K, V); N]> for IntervalTree<R, V>
where
    K: Into<Interval<R>>,
    R: Clone + PartialOrd,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<R, V, C> IntoIterator for IntervalTree<R, V, C> {
    type Item = (Interval<R>, V);
    type IntoIter = IntoIter<R, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, R, V, C> IntoIterator for &'a IntervalTree<R, V, C> {
    type Item = (&'a Interval<R>, &'a V);
    type IntoIter = Iter<'a, R, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
