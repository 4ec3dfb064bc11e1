use thiserror::Error as ThisError;

/// Error enumerates over all possible errors that this package
/// shall return.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Absent element passed to insert, or an absent lookup target.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// User invoked rotation on a self-balancing tree.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    /// Element or vertex-handle is not part of the tree.
    #[error("not found: {0}")]
    NotFound(String),
    /// Fatal case, a RED vertex with a RED child.
    #[error("consecutive red vertices")]
    ConsecutiveReds,
    /// Fatal case, root of a red-black tree is RED.
    #[error("red root")]
    RedRoot,
    /// Fatal case, black-height differs between siblings. The String
    /// component of this variant can be used for debugging.
    #[error("unbalanced blacks: {0}")]
    UnbalancedBlacks(String),
    /// Fatal case, AVL balance factor outside {-1, 0, 1}.
    #[error("unbalanced heights: {0}")]
    UnbalancedHeights(String),
    /// Fatal case, stored AVL height disagrees with its children.
    #[error("stale height: {0}")]
    StaleHeight(String),
    /// Fatal case, tree entries are not in sort-order.
    #[error("sort error: {0}")]
    SortError(String),
    /// Fatal case, parent back-reference disagrees with the child link.
    #[error("broken link: {0}")]
    BrokenLink(String),
    /// Fatal case, element count disagrees with reachable vertices.
    #[error("count mismatch: counted {counted}, reachable {reachable}")]
    CountMismatch { counted: usize, reachable: usize },
}
