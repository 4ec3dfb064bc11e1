use std::{collections::VecDeque, fmt};

use generational_arena::Index;

use crate::base::Base;
use crate::rbtree::Color;

/// Handle to a single vertex in a tree. Handles stay valid until the
/// vertex is removed; after that every API taking the handle returns
/// [`Error::NotFound`](crate::Error::NotFound).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) Index);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Position a vertex occupies: either the root slot or a child slot
/// under `parent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Root,
    Child(Index, Side),
}

/// Vertex corresponds to a single element in the tree. `M` is the
/// bookkeeping carried by the balancing discipline, `()` for plain
/// ordered trees, height for AVL and [`Color`] for red-black.
#[derive(Clone, Debug)]
pub(crate) struct Vertex<T, M> {
    pub(crate) element: T,
    pub(crate) meta: M,
    pub(crate) parent: Option<Index>, // back-reference, never owning
    pub(crate) left: Option<Index>,   // store: left child
    pub(crate) right: Option<Index>,  // store: right child
}

impl<T, M> Vertex<T, M> {
    pub(crate) fn new(element: T, meta: M) -> Vertex<T, M> {
        Vertex {
            element,
            meta,
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Index> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<Index> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Read-only view over a vertex, handed out to renderers and other
/// consumers of tree shape. Never a mutation point.
pub struct VertexRef<'a, T, M> {
    base: &'a Base<T, M>,
    index: Index,
}

impl<'a, T, M> Clone for VertexRef<'a, T, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, M> Copy for VertexRef<'a, T, M> {}

impl<'a, T, M> VertexRef<'a, T, M> {
    pub(crate) fn new(base: &'a Base<T, M>, index: Index) -> VertexRef<'a, T, M> {
        VertexRef { base, index }
    }

    #[inline]
    fn vertex(&self) -> &'a Vertex<T, M> {
        self.base.node(self.index)
    }

    #[inline]
    fn view(&self, index: Option<Index>) -> Option<VertexRef<'a, T, M>> {
        index.map(|index| VertexRef::new(self.base, index))
    }

    /// Return the handle for this vertex.
    #[inline]
    pub fn id(&self) -> VertexId {
        VertexId(self.index)
    }

    #[inline]
    pub fn element(&self) -> &'a T {
        &self.vertex().element
    }

    #[inline]
    pub fn left(&self) -> Option<VertexRef<'a, T, M>> {
        self.view(self.vertex().left)
    }

    #[inline]
    pub fn right(&self) -> Option<VertexRef<'a, T, M>> {
        self.view(self.vertex().right)
    }

    #[inline]
    pub fn parent(&self) -> Option<VertexRef<'a, T, M>> {
        self.view(self.vertex().parent)
    }

    #[inline]
    pub fn has_left(&self) -> bool {
        self.vertex().left.is_some()
    }

    #[inline]
    pub fn has_right(&self) -> bool {
        self.vertex().right.is_some()
    }

    #[inline]
    pub fn has_parent(&self) -> bool {
        self.vertex().parent.is_some()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        !self.has_left() && !self.has_right()
    }

    /// Number of edges from the root down to this vertex.
    pub fn depth(&self) -> usize {
        self.base.depth(self.index)
    }

    /// Number of edges on the longest downward path from this vertex,
    /// 0 for a leaf. Computed level by level, plain ordered trees can
    /// be arbitrarily tall.
    pub fn height(&self) -> i32 {
        let mut level = VecDeque::new();
        level.push_back(self.index);
        let mut height = -1;
        while !level.is_empty() {
            height += 1;
            for _ in 0..level.len() {
                if let Some(index) = level.pop_front() {
                    let vertex = self.base.node(index);
                    level.extend(vertex.left);
                    level.extend(vertex.right);
                }
            }
        }
        height
    }

    #[inline]
    pub(crate) fn meta(&self) -> &'a M {
        &self.vertex().meta
    }
}

impl<'a, T> VertexRef<'a, T, i32> {
    /// AVL balance factor, `height(left) - height(right)`.
    pub fn balance(&self) -> i32 {
        let vertex = self.vertex();
        self.base.meta_or(vertex.left, -1) - self.base.meta_or(vertex.right, -1)
    }
}

impl<'a, T> VertexRef<'a, T, Color> {
    #[inline]
    pub fn color(&self) -> Color {
        *self.meta()
    }
}

impl<'a, T: fmt::Display> fmt::Display for VertexRef<'a, T, ()> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.element())
    }
}

impl<'a, T: fmt::Display> fmt::Display for VertexRef<'a, T, i32> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}/{}", self.element(), self.meta(), self.balance())
    }
}

impl<'a, T: fmt::Display> fmt::Display for VertexRef<'a, T, Color> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.color() {
            Color::Red => write!(f, "R{{{}}}", self.element()),
            Color::Black => write!(f, "B{{{}}}", self.element()),
        }
    }
}

impl<'a, T: fmt::Debug, M: fmt::Debug> fmt::Debug for VertexRef<'a, T, M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("VertexRef")
            .field("id", &self.id())
            .field("element", self.element())
            .field("meta", self.meta())
            .finish()
    }
}
