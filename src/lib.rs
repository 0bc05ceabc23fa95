//! Red black index with parent links. Supports unique-key insertion,
//! deletion, floor/ceil and neighbor search, full and resumable in-order
//! iteration, and range slicing, all in O(log n) per search or mutation.
//!
//! [`Rbtree`] is the index itself, keyed with an optional value payload,
//! [`TreeMap`] layers key/value semantics on top of it.

mod depth;
mod empty;
mod error;
mod iter;
mod map;
mod node;
mod rbtree;

pub use crate::depth::Depth;
pub use crate::empty::Empty;
pub use crate::error::Error;
pub use crate::iter::{Iter, IterFrom, Range};
pub use crate::map::TreeMap;
pub use crate::node::{Node, NodeId};
pub use crate::rbtree::{Rbtree, Stats};

#[cfg(test)]
mod map_test;
