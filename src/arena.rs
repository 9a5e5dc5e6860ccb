use std::num::NonZeroU32;

/// A stable index of a node slot within an [`Arena`].
///
/// The index is stored off-by-one in a [`NonZeroU32`] so that
/// `Option<NodeId>` is the same size as a `NodeId`, keeping the
/// parent/left/right links of every node compact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub(crate) struct NodeId(NonZeroU32);

impl NodeId {
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "node index {index} exceeds NodeId::MAX");

        // Correctness: index is at most u32::MAX - 1, so index + 1 neither
        // truncates nor saturates.
        Self(NonZeroU32::MIN.saturating_add(index as u32))
    }

    #[inline]
    pub(crate) fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// A pool of `T` addressed by [`NodeId`], reusing freed slots before growing.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<NodeId>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// The number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> NodeId {
        if let Some(id) = self.free.pop() {
            debug_assert!(self.slots[id.to_index()].is_none());
            self.slots[id.to_index()] = Some(element);
            return id;
        }

        assert!(
            self.slots.len() <= NodeId::MAX,
            "arena is at maximum capacity ({})",
            NodeId::MAX
        );

        self.slots.push(Some(element));
        NodeId::from_index(self.slots.len() - 1)
    }

    /// # Panics
    ///
    /// Panics if `id` does not refer to an occupied slot.
    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &T {
        match self.slots.get(id.to_index()) {
            Some(Some(v)) => v,
            _ => panic!("stale or foreign node id {id:?}"),
        }
    }

    /// # Panics
    ///
    /// Panics if `id` does not refer to an occupied slot.
    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut T {
        match self.slots.get_mut(id.to_index()) {
            Some(Some(v)) => v,
            _ => panic!("stale or foreign node id {id:?}"),
        }
    }

    /// Borrow two distinct occupied slots mutably at the same time.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`, or either id is stale.
    pub(crate) fn get_pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut T, &mut T) {
        let (ai, bi) = (a.to_index(), b.to_index());
        assert_ne!(ai, bi, "cannot mutably borrow the same node twice");

        let (lo, hi) = (ai.min(bi), ai.max(bi));
        let (head, tail) = self.slots.split_at_mut(hi);
        let (lo_slot, hi_slot) = match (head[lo].as_mut(), tail[0].as_mut()) {
            (Some(l), Some(h)) => (l, h),
            _ => panic!("stale or foreign node id in pair ({a:?}, {b:?})"),
        };

        if ai < bi {
            (lo_slot, hi_slot)
        } else {
            (hi_slot, lo_slot)
        }
    }

    /// Remove the element at `id`, returning the slot to the free list.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to an occupied slot.
    pub(crate) fn take(&mut self, id: NodeId) -> T {
        let element = match self.slots.get_mut(id.to_index()).and_then(Option::take) {
            Some(v) => v,
            None => panic!("stale or foreign node id {id:?}"),
        };
        self.free.push(id);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
