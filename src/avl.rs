use std::fmt;

use generational_arena::Index;
use log::{debug, trace};

use crate::base::Base;
use crate::error::Error;
use crate::iter::Iter;
use crate::stats::Stats;
use crate::tree::SearchTree;
use crate::vertex::{Side, VertexId, VertexRef};

/// AvlTree is an ordered tree kept height-balanced, for every vertex
/// the heights of its two subtrees differ by at most one.
///
/// Each vertex stores its height, 0 for a leaf, and an absent subtree
/// counts as -1. After every insert and delete the tree is walked from
/// the mutated vertex up to the root, fixing heights and rotating where
/// the balance factor reaches +2 or -2, guaranteeing O(log n) for
/// insert, delete and search.
#[derive(Clone, Debug)]
pub struct AvlTree<T> {
    base: Base<T, i32>,
}

/// Different ways to construct a new AvlTree instance.
impl<T> AvlTree<T>
where
    T: Ord,
{
    /// Create an empty instance of AvlTree.
    pub fn new() -> AvlTree<T> {
        AvlTree {
            base: Default::default(),
        }
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.base.clear()
    }

    /// Return the stored height of vertex `id`.
    pub fn height(&self, id: VertexId) -> Result<i32, Error> {
        let index = self.base.resolve(id)?;
        Ok(self.base.node(index).meta)
    }

    fn put(&mut self, element: T) -> Index {
        let index = self.base.attach(element, 0);
        self.rebalance(Some(index));
        index
    }
}

/// Rebalancing.
impl<T> AvlTree<T> {
    #[inline]
    fn height_of(&self, index: Option<Index>) -> i32 {
        self.base.meta_or(index, -1)
    }

    fn update_height(&mut self, index: Index) {
        let vertex = self.base.node(index);
        let height = 1 + self.height_of(vertex.left).max(self.height_of(vertex.right));
        self.base.node_mut(index).meta = height;
    }

    fn balance(&self, index: Index) -> i32 {
        let vertex = self.base.node(index);
        self.height_of(vertex.left) - self.height_of(vertex.right)
    }

    /// Rotate and refresh the heights of the two vertices that moved,
    /// lower one first.
    fn rotate(&mut self, index: Index, side: Side) {
        if self.base.rotate(index, side) {
            self.update_height(index);
            if let Some(parent) = self.base.parent(index) {
                self.update_height(parent);
            }
        }
    }

    /// Walk from `node` up to the root, restoring heights and balance
    /// at every level. At most one single or double rotation per level.
    fn rebalance(&mut self, mut node: Option<Index>) {
        while let Some(index) = node {
            self.update_height(index);

            match self.balance(index) {
                -2 => {
                    if let Some(right) = self.base.child(index, Side::Right) {
                        if self.balance(right) == 1 {
                            trace!("rebalance right-left at {:?}", index);
                            self.rotate(right, Side::Right);
                        }
                    }
                    self.rotate(index, Side::Left);
                }
                2 => {
                    if let Some(left) = self.base.child(index, Side::Left) {
                        if self.balance(left) == -1 {
                            trace!("rebalance left-right at {:?}", index);
                            self.rotate(left, Side::Left);
                        }
                    }
                    self.rotate(index, Side::Right);
                }
                _ => (),
            }

            node = self.base.parent(index);
        }
    }

    fn validate_heights(&self) -> Result<(), Error> {
        for (index, vertex) in self.base.vertices() {
            let (left, right) = (self.height_of(vertex.left), self.height_of(vertex.right));
            if vertex.meta != 1 + left.max(right) {
                let err = format!("{:?} stored {} children {}/{}", index, vertex.meta, left, right);
                return Err(Error::StaleHeight(err));
            }
            if (left - right).abs() > 1 {
                let err = format!("{:?} left: {} right: {}", index, left, right);
                return Err(Error::UnbalancedHeights(err));
            }
        }
        Ok(())
    }
}

impl<T> SearchTree<T> for AvlTree<T>
where
    T: Ord,
{
    type Meta = i32;

    fn insert<E>(&mut self, element: E) -> Result<VertexId, Error>
    where
        E: Into<Option<T>>,
    {
        match element.into() {
            Some(element) => Ok(VertexId(self.put(element))),
            None => Err(Error::InvalidArgument("absent element".to_string())),
        }
    }

    fn delete(&mut self, element: &T) -> Option<T> {
        let found = self.base.find(element)?;
        let target = self.base.swap_with_predecessor(found);
        let spliced = self.base.splice(target);
        debug!("delete {:?} via {:?}", found, target);

        self.rebalance(spliced.parent());
        Some(spliced.vertex.element)
    }

    #[inline]
    fn len(&self) -> usize {
        self.base.len()
    }

    fn root(&self) -> Option<VertexRef<'_, T, i32>> {
        let root = self.base.root()?;
        Some(VertexRef::new(&self.base, root))
    }

    fn last_inserted(&self) -> Option<VertexRef<'_, T, i32>> {
        let last = self.base.last_inserted()?;
        Some(VertexRef::new(&self.base, last))
    }

    fn vertex(&self, id: VertexId) -> Result<VertexRef<'_, T, i32>, Error> {
        let index = self.base.resolve(id)?;
        Ok(VertexRef::new(&self.base, index))
    }

    /// Always fails, user rotations would unbalance the tree.
    fn rotate_left(&mut self, _id: VertexId) -> Result<(), Error> {
        let msg = "AVL trees cannot be rotated left by the user";
        Err(Error::UnsupportedOperation(msg.to_string()))
    }

    /// Always fails, user rotations would unbalance the tree.
    fn rotate_right(&mut self, _id: VertexId) -> Result<(), Error> {
        let msg = "AVL trees cannot be rotated right by the user";
        Err(Error::UnsupportedOperation(msg.to_string()))
    }

    /// Validate AVL tree with following rules:
    ///
    /// * Stored height of every vertex is one more than its taller child.
    /// * Heights of the two subtrees differ by at most one.
    /// * Make sure elements are in sorted order.
    fn validate(&self) -> Result<Stats, Error>
    where
        T: fmt::Debug,
    {
        let mut stats = self.base.validate()?;
        self.validate_heights()?;
        stats.set_height(self.height_of(self.base.root()));
        Ok(stats)
    }
}

impl<T> Default for AvlTree<T>
where
    T: Ord,
{
    fn default() -> Self {
        AvlTree::new()
    }
}

impl<T> PartialEq for AvlTree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.base.same_as(&other.base)
    }
}

impl<T> Extend<T> for AvlTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.put(element);
        }
    }
}

impl<T> FromIterator<T> for AvlTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T>
where
    T: Ord,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
