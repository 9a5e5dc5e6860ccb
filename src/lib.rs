//! An augmented AVL interval tree.
//!
//! [`IntervalTree`] is an ordered multimap keyed by closed intervals
//! `[lower, upper]`, ordered by lower bound and then upper bound. Every node
//! caches the greatest upper bound of its subtree, which lets point and
//! interval stabbing queries skip any subtree that cannot contain a match:
//!
//! ```
//! use interval_avl::{Interval, IntervalTree};
//!
//! let mut t = IntervalTree::new();
//! t.insert((1, 5), "first");
//! t.insert((4, 9), "second");
//! t.insert((7, 7), "third");
//!
//! // Every entry containing the point 4.
//! let got = t.at(4).map(|(_, v)| *v).collect::<Vec<_>>();
//! assert_eq!(got, ["first", "second"]);
//!
//! // Every entry overlapping [6, 10].
//! let got = t.overlapping((6, 10)).map(|(k, _)| *k).collect::<Vec<_>>();
//! assert_eq!(got, [Interval::new(4, 9), Interval::new(7, 7)]);
//! ```
//!
//! Entries are addressed by [`Cursor`] and [`CursorMut`] positions, which
//! include a distinguished "end" position, and iterated in key order with
//! [`IntervalTree::iter()`].
//!
//! Bounds are ordered by a [`Comparator`], which defaults to the natural
//! [`PartialOrd`] order of the bound type.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(missing_debug_implementations)]

mod arena;
mod avl;
mod compare;
mod cursor;
#[cfg(feature = "dot")]
mod dot;
mod error;
mod interval;
mod iter;
mod node;
mod tree;

#[cfg(test)]
mod test_utils;

pub use compare::*;
pub use cursor::*;
#[cfg(feature = "dot")]
pub use dot::*;
pub use error::*;
pub use interval::*;
pub use iter::*;
pub use tree::*;

