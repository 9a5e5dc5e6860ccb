use std::fmt::Debug;

use proptest::prelude::*;

use crate::{
    arena::NodeId,
    compare::Comparator,
    interval::Interval,
    node::{Node, Side},
    IntervalTree,
};

const BOUND_MAX: usize = 20;

/// Generate arbitrary (potentially inverted!) intervals with bounds from
/// [0..[`BOUND_MAX`]).
pub(crate) fn arbitrary_interval() -> impl Strategy<Value = Interval<usize>> {
    (0..BOUND_MAX, 0..BOUND_MAX).prop_map(|(a, b)| Interval::new(a, b))
}

/// Install a test-writer tracing subscriber, honouring `RUST_LOG`.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Allocate a node and make it the root of an empty tree, without any
/// augmentation or rebalancing.
pub(crate) fn root<V>(t: &mut IntervalTree<usize, V>, interval: (usize, usize), value: V) -> NodeId {
    assert!(t.root.is_none());
    let id = t.nodes.alloc(Node::new(Interval::from(interval), value, None));
    t.root = Some(id);
    id
}

/// Allocate a node and link it as the `side` child of `parent`, without any
/// augmentation or rebalancing.
pub(crate) fn link<V>(
    t: &mut IntervalTree<usize, V>,
    parent: NodeId,
    side: Side,
    interval: (usize, usize),
    value: V,
) -> NodeId {
    let existing = match side {
        Side::Left => t.node(parent).left,
        Side::Right => t.node(parent).right,
    };
    assert!(existing.is_none(), "{side:?} child already linked");

    let id = t
        .nodes
        .alloc(Node::new(Interval::from(interval), value, Some(parent)));
    t.node_mut(parent).set_child(side, Some(id));
    id
}

/// Assert the BST, AVL and interval tree properties of tree nodes, the parent
/// back-links and the element count, ensuring the tree is well-formed.
pub(crate) fn validate_tree_structure<R, V, C>(t: &IntervalTree<R, V, C>)
where
    R: Debug + Clone,
    C: Comparator<R>,
{
    t.assert_valid();
}
