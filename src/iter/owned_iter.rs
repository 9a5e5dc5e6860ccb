use std::{iter::FusedIterator, vec};

use crate::{interval::Interval, IntervalTree};

/// An iterator of owned `(key, value)` entries in key order, consuming the
/// [`IntervalTree`].
#[derive(Debug)]
pub struct IntoIter<R, V> {
    entries: vec::IntoIter<(Interval<R>, V)>,
}

impl<R, V> IntoIter<R, V> {
    pub(crate) fn new<C>(mut tree: IntervalTree<R, V, C>) -> Self {
        let mut ids = Vec::with_capacity(tree.len());
        let mut ptr = tree.first_node();
        while let Some(id) = ptr {
            ids.push(id);
            ptr = tree.successor(id);
        }

        let entries = ids
            .into_iter()
            .map(|id| tree.nodes.take(id).into_entry())
            .collect::<Vec<_>>();

        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<R, V> Iterator for IntoIter<R, V> {
    type Item = (Interval<R>, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<R, V> DoubleEndedIterator for IntoIter<R, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<R, V> ExactSizeIterator for IntoIter<R, V> {}

impl<R, V> FusedIterator for IntoIter<R, V> {}
