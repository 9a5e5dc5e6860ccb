use std::fmt::{self, Display};

use crate::{compare::NaturalOrder, IntervalTree};

impl<R, V, C> IntervalTree<R, V, C> {
    /// Render the tree structure as a Graphviz digraph.
    ///
    /// Each node is labelled with its key, subtree max and height. Absent
    /// children are drawn as invisible points so left and right children
    /// keep their sides in the rendered layout.
    ///
    /// ```
    /// use interval_avl::IntervalTree;
    ///
    /// let t = IntervalTree::from([((1, 2), ()), ((3, 4), ())]);
    /// let dot = t.dot().to_string();
    /// assert!(dot.starts_with("digraph {"));
    /// ```
    pub fn dot(&self) -> Dot<'_, R, V, C> {
        Dot { tree: self }
    }
}

/// A [`Display`] adaptor printing an [`IntervalTree`] in Graphviz "dot"
/// format, returned by [`IntervalTree::dot()`].
#[derive(Debug)]
pub struct Dot<'a, R, V, C = NaturalOrder> {
    tree: &'a IntervalTree<R, V, C>,
}

impl<R, V, C> Display for Dot<'_, R, V, C>
where
    R: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.tree;

        writeln!(f, "digraph {{")?;

        let mut stack = t.root.into_iter().collect::<Vec<_>>();
        while let Some(id) = stack.pop() {
            let n = t.node(id);
            let name = id.to_index();

            writeln!(
                f,
                "n{name} [label=\"{}\\nmax={} h={}\"];",
                n.interval, n.subtree_max, n.height
            )?;

            for (i, child) in [n.left, n.right].into_iter().enumerate() {
                match child {
                    Some(child) => {
                        writeln!(f, "n{name} -> n{};", child.to_index())?;
                        stack.push(child);
                    }
                    None => {
                        writeln!(f, "null_{name}_{i} [shape=point,style=invis];")?;
                        writeln!(f, "n{name} -> null_{name}_{i} [style=invis];")?;
                    }
                }
            }
        }

        writeln!(f, "}}")
    }
}
