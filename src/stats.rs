use crate::depth::Depth;

/// Statistics on a validated tree, returned by
/// [`SearchTree::validate`](crate::SearchTree::validate).
#[derive(Default, Debug, Clone)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    height: Option<i32>,
    depths: Option<Depth>,
}

impl Stats {
    pub(crate) fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            height: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    pub(crate) fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    pub(crate) fn set_height(&mut self, height: i32) {
        self.height = Some(height)
    }

    #[inline]
    pub(crate) fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in the tree.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including the link overhead. The overhead is
    /// constant per flavour, the node size varies with element type.
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black vertices from root to any absent child,
    /// red-black trees only.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return the stored height of the root, AVL trees only.
    #[inline]
    pub fn height(&self) -> Option<i32> {
        self.height
    }

    /// Return [`Depth`] statistics, `None` for an empty tree.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}
