use std::{error, fmt};

/// Error enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, PartialEq)]
pub enum Error<K> {
    /// Key is not present in the index.
    KeyNotFound,
    /// Returned by slice() API for any step other than 1.
    UnsupportedStep(usize),
    /// Fatal case, root node is red.
    RedRoot,
    /// Fatal case, a red node has a red child.
    ConsecutiveReds,
    /// Fatal case, paths from a node to its leaves carry different number
    /// of black nodes. The String component of this variant can be used
    /// for debugging.
    UnbalancedBlacks(String),
    /// Fatal case, index entries are not in sort-order.
    SortError(K, K),
    /// Fatal case, child and parent links disagree.
    BrokenLink(String),
    /// Fatal case, (counted, reachable) number of entries differ.
    SizeMismatch(usize, usize),
}

impl<K> fmt::Display for Error<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::KeyNotFound => write!(f, "key not found"),
            Error::UnsupportedStep(step) => write!(f, "slice step {} not supported", step),
            Error::RedRoot => write!(f, "root node is red"),
            Error::ConsecutiveReds => write!(f, "consecutive red nodes"),
            Error::UnbalancedBlacks(msg) => write!(f, "unbalanced blacks, {}", msg),
            Error::SortError(a, b) => write!(f, "sort error, {:?} vs {:?}", a, b),
            Error::BrokenLink(msg) => write!(f, "broken link, {}", msg),
            Error::SizeMismatch(n, m) => write!(f, "size mismatch, counted {} reachable {}", n, m),
        }
    }
}

impl<K> error::Error for Error<K> where K: fmt::Debug {}
