use std::fmt;

use log::debug;

use crate::base::Base;
use crate::error::Error;
use crate::iter::Iter;
use crate::stats::Stats;
use crate::tree::SearchTree;
use crate::vertex::{VertexId, VertexRef};

/// OrderedTree is a plain [binary search tree][bst], no balancing.
/// Every element is greater than or equal to its left descendants and
/// less than or equal to its right descendants.
///
/// Unlike the balancing flavours it honours user rotations.
///
/// [bst]: https://en.wikipedia.org/wiki/Binary_search_tree
#[derive(Clone, Debug)]
pub struct OrderedTree<T> {
    base: Base<T, ()>,
}

/// Different ways to construct a new OrderedTree instance.
impl<T> OrderedTree<T>
where
    T: Ord,
{
    /// Create an empty instance of OrderedTree.
    pub fn new() -> OrderedTree<T> {
        OrderedTree {
            base: Default::default(),
        }
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.base.clear()
    }
}

impl<T> SearchTree<T> for OrderedTree<T>
where
    T: Ord,
{
    type Meta = ();

    fn insert<E>(&mut self, element: E) -> Result<VertexId, Error>
    where
        E: Into<Option<T>>,
    {
        match element.into() {
            Some(element) => Ok(VertexId(self.base.attach(element, ()))),
            None => Err(Error::InvalidArgument("absent element".to_string())),
        }
    }

    fn delete(&mut self, element: &T) -> Option<T> {
        let found = self.base.find(element)?;
        let target = self.base.swap_with_predecessor(found);
        let spliced = self.base.splice(target);
        debug!("delete {:?} via {:?}", found, target);
        Some(spliced.vertex.element)
    }

    #[inline]
    fn len(&self) -> usize {
        self.base.len()
    }

    fn root(&self) -> Option<VertexRef<'_, T, ()>> {
        let root = self.base.root()?;
        Some(VertexRef::new(&self.base, root))
    }

    fn last_inserted(&self) -> Option<VertexRef<'_, T, ()>> {
        let last = self.base.last_inserted()?;
        Some(VertexRef::new(&self.base, last))
    }

    fn vertex(&self, id: VertexId) -> Result<VertexRef<'_, T, ()>, Error> {
        let index = self.base.resolve(id)?;
        Ok(VertexRef::new(&self.base, index))
    }

    /// Rotate left on `id`. If the vertex has no right child this is a
    /// no-op.
    fn rotate_left(&mut self, id: VertexId) -> Result<(), Error> {
        let index = self.base.resolve(id)?;
        self.base.rotate_left(index);
        Ok(())
    }

    /// Rotate right on `id`. If the vertex has no left child this is a
    /// no-op.
    fn rotate_right(&mut self, id: VertexId) -> Result<(), Error> {
        let index = self.base.resolve(id)?;
        self.base.rotate_right(index);
        Ok(())
    }

    fn validate(&self) -> Result<Stats, Error>
    where
        T: fmt::Debug,
    {
        self.base.validate()
    }
}

impl<T> Default for OrderedTree<T>
where
    T: Ord,
{
    fn default() -> Self {
        OrderedTree::new()
    }
}

impl<T> PartialEq for OrderedTree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.base.same_as(&other.base)
    }
}

impl<T> Extend<T> for OrderedTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.base.attach(element, ());
        }
    }
}

impl<T> FromIterator<T> for OrderedTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = OrderedTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T>
where
    T: Ord,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
