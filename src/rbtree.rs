use std::fmt;

use generational_arena::Index;
use log::{debug, trace};

use crate::base::Base;
use crate::error::Error;
use crate::iter::Iter;
use crate::stats::Stats;
use crate::tree::SearchTree;
use crate::vertex::{Side, Slot, VertexId, VertexRef};

/// Color of a red-black vertex. Absent children count as Black.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// RedBlackTree manage an ordered tree balanced by [red-black][rbt]
/// coloring. The tree always satisfies:
///
/// * Every vertex is Red or Black.
/// * The root is Black.
/// * Every absent child is Black.
/// * A Red vertex has two Black children.
/// * Every path from a vertex to any descendant absent child passes
///   through the same number of Black vertices.
///
/// [rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
#[derive(Clone, Debug)]
pub struct RedBlackTree<T> {
    base: Base<T, Color>,
}

/// Different ways to construct a new RedBlackTree instance.
impl<T> RedBlackTree<T>
where
    T: Ord,
{
    /// Create an empty instance of RedBlackTree.
    pub fn new() -> RedBlackTree<T> {
        RedBlackTree {
            base: Default::default(),
        }
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.base.clear()
    }

    /// Return the color of vertex `id`.
    pub fn color(&self, id: VertexId) -> Result<Color, Error> {
        let index = self.base.resolve(id)?;
        Ok(self.base.node(index).meta)
    }

    fn put(&mut self, element: T) -> Index {
        let index = self.base.attach(element, Color::Red);
        self.fix_insert(index);
        index
    }
}

impl<T> RedBlackTree<T> {
    #[inline]
    fn is_red(&self, index: Option<Index>) -> bool {
        self.base.meta_or(index, Color::Black) == Color::Red
    }

    #[inline]
    fn is_black(&self, index: Option<Index>) -> bool {
        !self.is_red(index)
    }

    #[inline]
    fn set_color(&mut self, index: Index, color: Color) {
        self.base.node_mut(index).meta = color
    }

    #[inline]
    fn paint_black(&mut self, index: Option<Index>) {
        if let Some(index) = index {
            self.set_color(index, Color::Black)
        }
    }

    // `node` is a freshly attached Red vertex, or a grandparent turned
    // Red by a color flip.
    fn fix_insert(&mut self, mut node: Index) {
        loop {
            let (parent, nside) = match self.base.slot_of(node) {
                Slot::Root => {
                    trace!("fix_insert {:?} root", node);
                    self.set_color(node, Color::Black);
                    return;
                }
                Slot::Child(parent, side) => (parent, side),
            };
            if self.is_black(Some(parent)) {
                return;
            }

            let (grand, gside) = match self.base.slot_of(parent) {
                Slot::Child(grand, side) => (grand, side),
                Slot::Root => panic!("fix_insert(): red root, call the programmer"),
            };
            let uncle = self.base.child(grand, gside.flip());
            if self.is_red(uncle) {
                trace!("fix_insert {:?} red uncle", node);
                self.paint_black(uncle);
                self.set_color(parent, Color::Black);
                self.set_color(grand, Color::Red);
                node = grand;
                continue;
            }

            let mut parent = parent;
            if nside != gside {
                trace!("fix_insert {:?} zig-zag", node);
                self.base.rotate(parent, gside);
                std::mem::swap(&mut node, &mut parent);
            }

            trace!("fix_insert {:?} zig-zig", node);
            self.set_color(parent, Color::Black);
            self.set_color(grand, Color::Red);
            self.base.rotate(grand, gside.flip());
            return;
        }
    }

    // `slot` is short of one Black on every path through it. Its
    // occupant, if any, is Black. Cases follow CLRS.
    fn fix_delete(&mut self, mut slot: Slot) {
        loop {
            let (parent, side) = match slot {
                Slot::Root => {
                    self.paint_black(self.base.root());
                    return;
                }
                Slot::Child(parent, side) => (parent, side),
            };

            let mut sibling = match self.base.child(parent, side.flip()) {
                Some(sibling) => sibling,
                None => panic!("fix_delete(): missing sibling, call the programmer"),
            };
            if self.is_red(Some(sibling)) {
                trace!("fix_delete {:?} red sibling", parent);
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.base.rotate(parent, side);
                sibling = match self.base.child(parent, side.flip()) {
                    Some(sibling) => sibling,
                    None => panic!("fix_delete(): missing sibling, call the programmer"),
                };
            }

            let near = self.base.child(sibling, side);
            let mut far = self.base.child(sibling, side.flip());
            if self.is_black(near) && self.is_black(far) {
                self.set_color(sibling, Color::Red);
                if self.is_black(Some(parent)) {
                    trace!("fix_delete {:?} black nephews, move up", parent);
                    slot = self.base.slot_of(parent);
                    continue;
                }
                trace!("fix_delete {:?} black nephews, red parent", parent);
                self.set_color(parent, Color::Black);
                return;
            }

            if self.is_black(far) {
                trace!("fix_delete {:?} near nephew red", parent);
                self.paint_black(near);
                self.set_color(sibling, Color::Red);
                self.base.rotate(sibling, side.flip());
                sibling = match self.base.child(parent, side.flip()) {
                    Some(sibling) => sibling,
                    None => panic!("fix_delete(): missing sibling, call the programmer"),
                };
                far = self.base.child(sibling, side.flip());
            }

            trace!("fix_delete {:?} far nephew red", parent);
            let color = self.base.node(parent).meta;
            self.set_color(sibling, color);
            self.set_color(parent, Color::Black);
            self.paint_black(far);
            self.base.rotate(parent, side);
            return;
        }
    }

    // Return the black-height below `node`, checking that both sides
    // agree and that no Red vertex has a Red child.
    fn validate_tree(&self, node: Option<Index>, fromred: bool) -> Result<usize, Error> {
        let index = match node {
            None => return Ok(1),
            Some(index) => index,
        };
        let red = self.is_red(node);
        if fromred && red {
            return Err(Error::ConsecutiveReds);
        }
        let vertex = self.base.node(index);
        let lblacks = self.validate_tree(vertex.left, red)?;
        let rblacks = self.validate_tree(vertex.right, red)?;
        if lblacks != rblacks {
            let err = format!("{:?} left: {} right: {}", index, lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }
        Ok(if red { lblacks } else { lblacks + 1 })
    }
}

impl<T> SearchTree<T> for RedBlackTree<T>
where
    T: Ord,
{
    type Meta = Color;

    fn insert<E>(&mut self, element: E) -> Result<VertexId, Error>
    where
        E: Into<Option<T>>,
    {
        match element.into() {
            Some(element) => Ok(VertexId(self.put(element))),
            None => Err(Error::InvalidArgument("absent element".to_string())),
        }
    }

    /// Delete `element`. An absent child promoted into the removed
    /// vertex's slot is treated as a virtual Black vertex, the fixup is
    /// told which slot it occupies instead of materialising a node.
    fn delete(&mut self, element: &T) -> Option<T> {
        let found = self.base.find(element)?;
        let target = self.base.swap_with_predecessor(found);
        let spliced = self.base.splice(target);
        debug!("delete {:?} via {:?}", found, target);

        if spliced.vertex.meta == Color::Black {
            if self.is_red(spliced.child) {
                self.paint_black(spliced.child);
            } else {
                self.fix_delete(spliced.slot);
            }
        }
        Some(spliced.vertex.element)
    }

    #[inline]
    fn len(&self) -> usize {
        self.base.len()
    }

    fn root(&self) -> Option<VertexRef<'_, T, Color>> {
        let root = self.base.root()?;
        Some(VertexRef::new(&self.base, root))
    }

    fn last_inserted(&self) -> Option<VertexRef<'_, T, Color>> {
        let last = self.base.last_inserted()?;
        Some(VertexRef::new(&self.base, last))
    }

    fn vertex(&self, id: VertexId) -> Result<VertexRef<'_, T, Color>, Error> {
        let index = self.base.resolve(id)?;
        Ok(VertexRef::new(&self.base, index))
    }

    /// Always fails, user rotations would break the coloring.
    fn rotate_left(&mut self, _id: VertexId) -> Result<(), Error> {
        let msg = "red-black trees cannot be rotated left by the user";
        Err(Error::UnsupportedOperation(msg.to_string()))
    }

    /// Always fails, user rotations would break the coloring.
    fn rotate_right(&mut self, _id: VertexId) -> Result<(), Error> {
        let msg = "red-black trees cannot be rotated right by the user";
        Err(Error::UnsupportedOperation(msg.to_string()))
    }

    /// Validate red-black tree with following rules:
    ///
    /// * Root is Black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Make sure elements are in sorted order.
    fn validate(&self) -> Result<Stats, Error>
    where
        T: fmt::Debug,
    {
        let mut stats = self.base.validate()?;
        let root = self.base.root();
        if self.is_red(root) {
            return Err(Error::RedRoot);
        }
        let blacks = self.validate_tree(root, false)?;
        stats.set_blacks(blacks);
        Ok(stats)
    }
}

impl<T> Default for RedBlackTree<T>
where
    T: Ord,
{
    fn default() -> Self {
        RedBlackTree::new()
    }
}

impl<T> PartialEq for RedBlackTree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.base.same_as(&other.base)
    }
}

impl<T> Extend<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.put(element);
        }
    }
}

impl<T> FromIterator<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a RedBlackTree<T>
where
    T: Ord,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
