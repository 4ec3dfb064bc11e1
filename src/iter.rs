use crate::vertex::VertexRef;

/// In-order iterator over tree elements. Keeps an explicit stack of
/// pending vertices, so it neither recurses nor materialises the whole
/// sequence. Mutating the tree while iterating is prevented by the
/// borrow on the tree.
pub struct Iter<'a, T, M> {
    stack: Vec<VertexRef<'a, T, M>>,
}

impl<'a, T, M> Iter<'a, T, M> {
    pub(crate) fn new(root: Option<VertexRef<'a, T, M>>) -> Iter<'a, T, M> {
        let mut iter = Iter { stack: vec![] };
        iter.push_left(root);
        iter
    }

    fn push_left(&mut self, mut node: Option<VertexRef<'a, T, M>>) {
        while let Some(vertex) = node {
            self.stack.push(vertex);
            node = vertex.left();
        }
    }
}

impl<'a, T, M> Iterator for Iter<'a, T, M> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let vertex = self.stack.pop()?;
        self.push_left(vertex.right());
        Some(vertex.element())
    }
}
