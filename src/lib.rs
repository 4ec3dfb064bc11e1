//! Ordered binary search trees, plain and self-balancing.
//!
//! [`OrderedTree`] keeps elements in sort order without balancing,
//! [`AvlTree`] keeps it height-balanced and [`RedBlackTree`] keeps it
//! color-balanced. All three implement [`SearchTree`].

mod avl;
mod base;
mod depth;
mod error;
mod iter;
mod ordered;
mod rbtree;
mod stats;
mod tree;
mod vertex;

pub use crate::avl::AvlTree;
pub use crate::depth::Depth;
pub use crate::error::Error;
pub use crate::iter::Iter;
pub use crate::ordered::OrderedTree;
pub use crate::rbtree::{Color, RedBlackTree};
pub use crate::stats::Stats;
pub use crate::tree::SearchTree;
pub use crate::vertex::{VertexId, VertexRef};

#[cfg(test)]
mod ordered_test;
