use std::{cmp::Ordering, fmt};

use rand::Rng;

use crate::error::Error;
use crate::iter::Iter;
use crate::stats::Stats;
use crate::vertex::{VertexId, VertexRef};

/// Uniform interface over [`OrderedTree`](crate::OrderedTree),
/// [`AvlTree`](crate::AvlTree) and [`RedBlackTree`](crate::RedBlackTree).
///
/// Rotation is part of the interface so the three flavours can be
/// driven by the same code, but only the plain ordered tree honours
/// it. Balancing trees always return [`Error::UnsupportedOperation`],
/// a user rotation would desynchronise their height or color
/// bookkeeping from the shape.
pub trait SearchTree<T>
where
    T: Ord,
{
    /// Per-vertex bookkeeping of this flavour.
    type Meta;

    /// Insert `element`. Passing `None` is the absent element and fails
    /// with [`Error::InvalidArgument`], leaving the tree untouched.
    /// Equal elements are kept, the new one goes to the left subtree.
    fn insert<E>(&mut self, element: E) -> Result<VertexId, Error>
    where
        E: Into<Option<T>>;

    /// Delete one occurrence of `element` and return it. If element is
    /// not present, then delete is effectively a no-op.
    fn delete(&mut self, element: &T) -> Option<T>;

    /// Return number of entries in this instance.
    fn len(&self) -> usize;

    fn root(&self) -> Option<VertexRef<'_, T, Self::Meta>>;

    /// Vertex touched by the most recent insert, until it is removed.
    fn last_inserted(&self) -> Option<VertexRef<'_, T, Self::Meta>>;

    /// Resolve a vertex handle.
    fn vertex(&self, id: VertexId) -> Result<VertexRef<'_, T, Self::Meta>, Error>;

    fn rotate_left(&mut self, id: VertexId) -> Result<(), Error>;

    fn rotate_right(&mut self, id: VertexId) -> Result<(), Error>;

    /// Validate every invariant of this flavour, along with links,
    /// sort-order and count. Return full statistics on the tree.
    fn validate(&self) -> Result<Stats, Error>
    where
        T: fmt::Debug;

    /// Check whether this tree is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Search for `element`, first match from the root down.
    fn search(&self, element: &T) -> Option<VertexRef<'_, T, Self::Meta>> {
        let mut node = self.root();
        while let Some(vertex) = node {
            node = match element.cmp(vertex.element()) {
                Ordering::Equal => return Some(vertex),
                Ordering::Less => vertex.left(),
                Ordering::Greater => vertex.right(),
            };
        }
        None
    }

    fn contains(&self, element: &T) -> bool {
        self.search(element).is_some()
    }

    /// Like [`search`](SearchTree::search), for callers that require
    /// the element to be present.
    fn get(&self, element: &T) -> Result<VertexRef<'_, T, Self::Meta>, Error>
    where
        T: fmt::Debug,
    {
        match self.search(element) {
            Some(vertex) => Ok(vertex),
            None => Err(Error::NotFound(format!("element {:?}", element))),
        }
    }

    fn min(&self) -> Option<&T> {
        let mut vertex = self.root()?;
        while let Some(left) = vertex.left() {
            vertex = left;
        }
        Some(vertex.element())
    }

    fn max(&self) -> Option<&T> {
        let mut vertex = self.root()?;
        while let Some(right) = vertex.right() {
            vertex = right;
        }
        Some(vertex.element())
    }

    /// Height of the root, -1 for an empty tree.
    fn depth(&self) -> i32 {
        self.root().map_or(-1, |root| root.height())
    }

    /// Return an in-order iterator over all entries in this instance.
    fn iter(&self) -> Iter<'_, T, Self::Meta> {
        Iter::new(self.root())
    }

    /// Return a random entry from this tree.
    fn random<R: Rng>(&self, rng: &mut R) -> Option<&T> {
        let mut vertex = self.root()?;

        let mut at_depth = rng.gen::<u8>() % 40;
        loop {
            let next = match rng.gen::<u8>() % 2 {
                0 => vertex.left(),
                _ => vertex.right(),
            };
            match next {
                Some(next) if at_depth > 0 => {
                    at_depth -= 1;
                    vertex = next;
                }
                _ => break Some(vertex.element()),
            }
        }
    }
}
