use std::{fmt, ptr};

use crate::{
    arena::NodeId,
    compare::{Comparator, NaturalOrder},
    interval::Interval,
    IntervalTree,
};

impl<R, V, C> IntervalTree<R, V, C> {
    /// The minimum node of the subtree rooted at `id`.
    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    /// The maximum node of the subtree rooted at `id`.
    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    pub(crate) fn first_node(&self) -> Option<NodeId> {
        self.root.map(|v| self.leftmost(v))
    }

    pub(crate) fn last_node(&self) -> Option<NodeId> {
        self.root.map(|v| self.rightmost(v))
    }

    /// The next node in key order, or [`None`] if `id` is the last.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right {
            return Some(self.leftmost(right));
        }

        // Climb until arriving at a parent from its left side.
        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).left == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.node(p).parent;
        }

        None
    }

    /// The previous node in key order, or [`None`] if `id` is the first.
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.node(id).left {
            return Some(self.rightmost(left));
        }

        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).right == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.node(p).parent;
        }

        None
    }

    /// Step forwards from `pos`, wrapping from the end position to the first
    /// entry.
    fn step_next(&self, pos: Option<NodeId>) -> Option<NodeId> {
        match pos {
            Some(id) => self.successor(id),
            None => self.first_node(),
        }
    }

    /// Step backwards from `pos`, wrapping from the end position to the last
    /// entry.
    fn step_prev(&self, pos: Option<NodeId>) -> Option<NodeId> {
        match pos {
            Some(id) => self.predecessor(id),
            None => self.last_node(),
        }
    }
}

/// A read-only position within an [`IntervalTree`].
///
/// A cursor either points at an entry, or at the "end" position which sits
/// past the last entry and before the first: moving forwards from the end
/// yields the first entry, and moving backwards from the end yields the last.
///
/// ```
/// use interval_avl::{Interval, IntervalTree};
///
/// let t = IntervalTree::from([((1, 2), 'a'), ((3, 4), 'b')]);
///
/// let mut c = t.cursor_end();
/// c.move_prev();
/// assert_eq!(c.value(), Some(&'b'));
///
/// c.move_next();
/// assert!(c.is_end());
/// assert_eq!(c.peek_next(), Some((&Interval::new(1, 2), &'a')));
/// ```
pub struct Cursor<'a, R, V, C = NaturalOrder> {
    tree: &'a IntervalTree<R, V, C>,
    current: Option<NodeId>,
}

impl<'a, R, V, C> Cursor<'a, R, V, C> {
    pub(crate) fn new(tree: &'a IntervalTree<R, V, C>, current: Option<NodeId>) -> Self {
        Self { tree, current }
    }

    /// Returns true if this cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// The entry at the cursor position, or [`None`] at the end position.
    pub fn get(&self) -> Option<(&'a Interval<R>, &'a V)> {
        let n = self.tree.node(self.current?);
        Some((&n.interval, &n.value))
    }

    pub fn key(&self) -> Option<&'a Interval<R>> {
        self.get().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.get().map(|(_, v)| v)
    }

    pub fn move_next(&mut self) {
        self.current = self.tree.step_next(self.current);
    }

    pub fn move_prev(&mut self) {
        self.current = self.tree.step_prev(self.current);
    }

    /// The entry [`move_next`](Self::move_next) would move to.
    pub fn peek_next(&self) -> Option<(&'a Interval<R>, &'a V)> {
        let mut c = *self;
        c.move_next();
        c.get()
    }

    /// The entry [`move_prev`](Self::move_prev) would move to.
    pub fn peek_prev(&self) -> Option<(&'a Interval<R>, &'a V)> {
        let mut c = *self;
        c.move_prev();
        c.get()
    }
}

impl<R, V, C> Clone for Cursor<'_, R, V, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, V, C> Copy for Cursor<'_, R, V, C> {}

/// Two cursors are equal if they point at the same position of the same tree.
impl<R, V, C> PartialEq for Cursor<'_, R, V, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<R, V, C> Eq for Cursor<'_, R, V, C> {}

impl<R, V, C> fmt::Debug for Cursor<'_, R, V, C>
where
    R: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

/// A position within an [`IntervalTree`] that permits mutating the value at
/// the cursor, and removing the entry at the cursor.
///
/// Keys are never mutable through a cursor.
pub struct CursorMut<'a, R, V, C = NaturalOrder> {
    tree: &'a mut IntervalTree<R, V, C>,
    current: Option<NodeId>,
}

impl<'a, R, V, C> CursorMut<'a, R, V, C> {
    pub(crate) fn new(tree: &'a mut IntervalTree<R, V, C>, current: Option<NodeId>) -> Self {
        Self { tree, current }
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn get(&self) -> Option<(&Interval<R>, &V)> {
        let n = self.tree.node(self.current?);
        Some((&n.interval, &n.value))
    }

    pub fn key(&self) -> Option<&Interval<R>> {
        self.get().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&V> {
        self.get().map(|(_, v)| v)
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        let id = self.current?;
        Some(&mut self.tree.node_mut(id).value)
    }

    /// Consume the cursor, returning a mutable reference to the value at the
    /// cursor position that lives as long as the tree borrow.
    pub fn into_value_mut(self) -> Option<&'a mut V> {
        let id = self.current?;
        let tree = self.tree;
        Some(&mut tree.node_mut(id).value)
    }

    pub fn move_next(&mut self) {
        self.current = self.tree.step_next(self.current);
    }

    pub fn move_prev(&mut self) {
        self.current = self.tree.step_prev(self.current);
    }

    pub fn peek_next(&self) -> Option<(&Interval<R>, &V)> {
        self.as_cursor().peek_next()
    }

    pub fn peek_prev(&self) -> Option<(&Interval<R>, &V)> {
        self.as_cursor().peek_prev()
    }

    /// A read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, R, V, C> {
        Cursor::new(&*self.tree, self.current)
    }
}

impl<R, V, C> CursorMut<'_, R, V, C>
where
    R: Clone,
    C: Comparator<R>,
{
    /// Remove the entry at the cursor, moving the cursor to the entry that
    /// followed it (or the end position).
    ///
    /// Returns [`None`] and leaves the tree unchanged when the cursor is at the
    /// end position.
    ///
    /// ```
    /// use interval_avl::{Interval, IntervalTree};
    ///
    /// let mut t = IntervalTree::from([((1, 2), 'a'), ((3, 4), 'b'), ((5, 6), 'c')]);
    ///
    /// let mut c = t.find_mut(&Interval::new(3, 4));
    /// assert_eq!(c.remove_current(), Some((Interval::new(3, 4), 'b')));
    /// assert_eq!(c.key(), Some(&Interval::new(5, 6)));
    ///
    /// assert_eq!(t.len(), 2);
    /// ```
    pub fn remove_current(&mut self) -> Option<(Interval<R>, V)> {
        let id = self.current?;
        let (next, interval, value) = self.tree.remove_node(id);
        self.current = next;
        Some((interval, value))
    }
}

impl<R, V, C> fmt::Debug for CursorMut<'_, R, V, C>
where
    R: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.get()).finish()
    }
}
