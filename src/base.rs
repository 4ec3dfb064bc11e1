use std::{cmp::Ordering, fmt, mem};

use generational_arena::{Arena, Index};
use log::{debug, trace};

use crate::depth::Depth;
use crate::error::Error;
use crate::stats::Stats;
use crate::vertex::{Side, Slot, Vertex, VertexId};

/// Base owns the vertex graph shared by every tree flavour. Child links
/// and the root are the only way a vertex stays reachable, the parent
/// link is a plain back-reference that is rewritten whenever the
/// owning link changes.
#[derive(Clone, Debug)]
pub(crate) struct Base<T, M> {
    nodes: Arena<Vertex<T, M>>,
    root: Option<Index>,
    last: Option<Index>, // most recently mutated vertex
    n_count: usize,      // number of entries in the tree.
}

impl<T, M> Default for Base<T, M> {
    fn default() -> Self {
        Base {
            nodes: Arena::new(),
            root: None,
            last: None,
            n_count: 0,
        }
    }
}

/// What is left behind after a vertex is spliced out of the tree.
pub(crate) struct Spliced<T, M> {
    /// Slot the removed vertex used to occupy, now holding `child`.
    pub(crate) slot: Slot,
    /// The promoted child, if any.
    pub(crate) child: Option<Index>,
    pub(crate) vertex: Vertex<T, M>,
}

impl<T, M> Spliced<T, M> {
    /// Former parent of the removed vertex.
    pub(crate) fn parent(&self) -> Option<Index> {
        match self.slot {
            Slot::Root => None,
            Slot::Child(parent, _) => Some(parent),
        }
    }
}

/// Maintenance API.
impl<T, M> Base<T, M> {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.n_count
    }

    #[inline]
    pub(crate) fn root(&self) -> Option<Index> {
        self.root
    }

    #[inline]
    pub(crate) fn last_inserted(&self) -> Option<Index> {
        self.last
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.last = None;
        self.n_count = 0;
    }

    /// Resolve a public handle, stale handles are reported as NotFound.
    pub(crate) fn resolve(&self, id: VertexId) -> Result<Index, Error> {
        if self.nodes.contains(id.0) {
            Ok(id.0)
        } else {
            Err(Error::NotFound(format!("vertex {:?}", id)))
        }
    }

    #[inline]
    pub(crate) fn node(&self, index: Index) -> &Vertex<T, M> {
        &self.nodes[index]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, index: Index) -> &mut Vertex<T, M> {
        &mut self.nodes[index]
    }

    #[inline]
    pub(crate) fn parent(&self, index: Index) -> Option<Index> {
        self.nodes[index].parent
    }

    #[inline]
    pub(crate) fn child(&self, index: Index, side: Side) -> Option<Index> {
        self.nodes[index].child(side)
    }

    /// Return the slot `index` occupies under its parent.
    pub(crate) fn slot_of(&self, index: Index) -> Slot {
        match self.nodes[index].parent {
            None => Slot::Root,
            Some(parent) if self.nodes[parent].left == Some(index) => {
                Slot::Child(parent, Side::Left)
            }
            Some(parent) => Slot::Child(parent, Side::Right),
        }
    }

    /// Point `slot` at `child`, and `child` back at the slot's parent.
    fn set_slot(&mut self, slot: Slot, child: Option<Index>) {
        let parent = match slot {
            Slot::Root => {
                self.root = child;
                None
            }
            Slot::Child(parent, side) => {
                *self.nodes[parent].child_mut(side) = child;
                Some(parent)
            }
        };
        if let Some(child) = child {
            self.nodes[child].parent = parent;
        }
    }

    /// Number of edges from the root down to `index`.
    pub(crate) fn depth(&self, mut index: Index) -> usize {
        let mut depth = 0;
        while let Some(parent) = self.nodes[index].parent {
            depth += 1;
            index = parent;
        }
        depth
    }

    /// Every live vertex, in no particular order.
    pub(crate) fn vertices(&self) -> impl Iterator<Item = (Index, &Vertex<T, M>)> + '_ {
        self.nodes.iter()
    }

    pub(crate) fn max_in(&self, mut index: Index) -> Index {
        while let Some(right) = self.nodes[index].right {
            index = right;
        }
        index
    }
}

impl<T, M> Base<T, M>
where
    M: Copy,
{
    /// Return metadata of `index`, or `default` for an absent vertex.
    #[inline]
    pub(crate) fn meta_or(&self, index: Option<Index>, default: M) -> M {
        index.map_or(default, |index| self.nodes[index].meta)
    }
}

/// Structural operations.
impl<T, M> Base<T, M> {
    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //          left      x             node      xr
    //                   / \            /  \
    //                 xl   xr       left   xl
    //
    // rotate(node, Side::Left) above, rotate(x, Side::Right) is the
    // mirror that undoes it. Metadata is left to the caller.
    pub(crate) fn rotate(&mut self, node: Index, side: Side) -> bool {
        let x = match self.nodes[node].child(side.flip()) {
            Some(x) => x,
            None => return false,
        };
        trace!("rotate {:?} at {:?}", side, node);

        let slot = self.slot_of(node);
        let inner = self.nodes[x].child(side);
        *self.nodes[node].child_mut(side.flip()) = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(node);
        }
        self.set_slot(slot, Some(x));
        *self.nodes[x].child_mut(side) = Some(node);
        self.nodes[node].parent = Some(x);
        true
    }

    #[inline]
    pub(crate) fn rotate_left(&mut self, node: Index) -> bool {
        self.rotate(node, Side::Left)
    }

    #[inline]
    pub(crate) fn rotate_right(&mut self, node: Index) -> bool {
        self.rotate(node, Side::Right)
    }

    /// Remove `index`, which must have at most one child, and promote
    /// that child into its slot.
    pub(crate) fn splice(&mut self, index: Index) -> Spliced<T, M> {
        let (left, right) = (self.nodes[index].left, self.nodes[index].right);
        if left.is_some() && right.is_some() {
            panic!("splice(): vertex has two children, call the programmer");
        }
        let child = left.or(right);
        let slot = self.slot_of(index);
        self.set_slot(slot, child);

        let vertex = match self.nodes.remove(index) {
            Some(vertex) => vertex,
            None => panic!("splice(): dangling vertex, call the programmer"),
        };
        self.n_count -= 1;
        if self.last == Some(index) {
            self.last = None;
        }
        Spliced {
            slot,
            child,
            vertex,
        }
    }
}

/// Ordered operations.
impl<T, M> Base<T, M>
where
    T: Ord,
{
    /// Locate `element`. Equal elements sit in the left subtree, hence
    /// the first match on the way down is the one returned.
    pub(crate) fn find(&self, element: &T) -> Option<Index> {
        let mut node = self.root;
        while let Some(index) = node {
            let vertex = &self.nodes[index];
            node = match element.cmp(&vertex.element) {
                Ordering::Equal => return Some(index),
                Ordering::Less => vertex.left,
                Ordering::Greater => vertex.right,
            };
        }
        None
    }

    /// Add a new vertex at the absent-child position `element` descends
    /// to. Ties go left.
    pub(crate) fn attach(&mut self, element: T, meta: M) -> Index {
        let mut slot = Slot::Root;
        let mut node = self.root;
        while let Some(index) = node {
            let vertex = &self.nodes[index];
            let side = if element <= vertex.element {
                Side::Left
            } else {
                Side::Right
            };
            slot = Slot::Child(index, side);
            node = vertex.child(side);
        }

        let index = self.nodes.insert(Vertex::new(element, meta));
        self.set_slot(slot, Some(index));
        self.last = Some(index);
        self.n_count += 1;
        debug!("attach {:?} at {:?}", index, slot);
        index
    }

    /// If `index` has a left subtree, swap its element with the
    /// in-order predecessor and return the predecessor. The returned
    /// vertex has no right child.
    pub(crate) fn swap_with_predecessor(&mut self, index: Index) -> Index {
        let left = match self.nodes[index].left {
            Some(left) => left,
            None => return index,
        };
        let pred = self.max_in(left);
        if let (Some(a), Some(b)) = self.nodes.get2_mut(index, pred) {
            mem::swap(&mut a.element, &mut b.element);
        }
        pred
    }
}

/// Validation.
impl<T, M> Base<T, M>
where
    T: Ord + fmt::Debug,
{
    /// Validate links, ordering and count. Walks with an explicit stack,
    /// plain ordered trees need not be shallow.
    pub(crate) fn validate(&self) -> Result<Stats, Error> {
        let mut stats = Stats::new(self.n_count, mem::size_of::<Vertex<T, M>>());
        let mut depths = Depth::new();

        let mut reachable = 0;
        if let Some(root) = self.root {
            if let Some(parent) = self.nodes[root].parent {
                let err = format!("root {:?} has parent {:?}", root, parent);
                return Err(Error::BrokenLink(err));
            }
            let mut stack = vec![(root, 0_usize)];
            while let Some((index, depth)) = stack.pop() {
                reachable += 1;
                let vertex = &self.nodes[index];
                if vertex.left.is_none() && vertex.right.is_none() {
                    depths.sample(depth);
                }
                for child in vertex.left.iter().chain(vertex.right.iter()) {
                    let child = *child;
                    if self.nodes[child].parent != Some(index) {
                        let err = format!("{:?} not parent of {:?}", index, child);
                        return Err(Error::BrokenLink(err));
                    }
                    stack.push((child, depth + 1));
                }
            }
        }
        if reachable != self.n_count || reachable != self.nodes.len() {
            return Err(Error::CountMismatch {
                counted: self.n_count,
                reachable,
            });
        }

        let mut prev: Option<&T> = None;
        for element in self.iter_elements() {
            if let Some(prev) = prev {
                if prev > element {
                    let err = format!("{:?} before {:?}", prev, element);
                    return Err(Error::SortError(err));
                }
            }
            prev = Some(element);
        }

        stats.set_depths(depths);
        Ok(stats)
    }

    fn iter_elements(&self) -> impl Iterator<Item = &T> + '_ {
        let mut stack = vec![];
        let mut node = self.root;
        std::iter::from_fn(move || {
            while let Some(index) = node {
                stack.push(index);
                node = self.nodes[index].left;
            }
            let index = stack.pop()?;
            node = self.nodes[index].right;
            Some(&self.nodes[index].element)
        })
    }
}

/// Structural equality, same shape, elements and metadata.
impl<T, M> Base<T, M>
where
    T: PartialEq,
    M: PartialEq,
{
    pub(crate) fn same_as(&self, other: &Base<T, M>) -> bool {
        if self.n_count != other.n_count {
            return false;
        }
        let mut stack = vec![(self.root, other.root)];
        while let Some(pair) = stack.pop() {
            match pair {
                (None, None) => (),
                (Some(a), Some(b)) => {
                    let (a, b) = (&self.nodes[a], &other.nodes[b]);
                    if a.element != b.element || a.meta != b.meta {
                        return false;
                    }
                    stack.push((a.left, b.left));
                    stack.push((a.right, b.right));
                }
                _ => return false,
            }
        }
        true
    }
}
