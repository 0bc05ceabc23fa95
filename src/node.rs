use std::{borrow::Borrow, cmp::Ordering, fmt};

/// Handle to a node inside an [`Rbtree`] instance. Handles stay valid
/// until the node they name is removed from the tree.
///
/// [`Rbtree`]: crate::Rbtree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

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

/// Node corresponds to a single entry in Rbtree instance.
#[derive(Clone)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) black: bool,             // store: black or red
    pub(crate) parent: Option<NodeId>,  // back-link, never owns
    pub(crate) left: Option<NodeId>,    // store: left child
    pub(crate) right: Option<NodeId>,   // store: right child
}

// Primary operations on a single node.
impl<K, V> Node<K, V> {
    // CREATE operation
    pub(crate) fn new(key: K, value: V, black: bool) -> Node<K, V> {
        Node {
            key,
            value,
            black,
            parent: None,
            left: None,
            right: None,
        }
    }

    /// Return the key of this entry.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Return the value of this entry, [`Empty`] for key-only trees.
    ///
    /// [`Empty`]: crate::Empty
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Return whether this node is black.
    #[inline]
    pub fn is_black(&self) -> bool {
        self.black
    }

    /// Return whether this node is red.
    #[inline]
    pub fn is_red(&self) -> bool {
        !self.black
    }

    /// Return the parent's handle, None for root node.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the left child's handle, if any.
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Return the right child's handle, if any.
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Return number of children, 0, 1 or 2.
    pub fn child_count(&self) -> usize {
        self.left.map_or(0, |_| 1) + self.right.map_or(0, |_| 1)
    }

    /// Return whether this node has at least one child.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.child_count() > 0
    }

    /// Compare this node against a raw key, ordering is purely by key.
    #[inline]
    pub fn compare<Q>(&self, key: &Q) -> Ordering
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.key.borrow().cmp(key)
    }

    /// Compare two nodes by their keys.
    #[inline]
    pub fn compare_node(&self, other: &Node<K, V>) -> Ordering
    where
        K: Ord,
    {
        self.key.cmp(&other.key)
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.black = true
    }
}

// key followed by its color, R for red and B for black.
impl<K, V> fmt::Display for Node<K, V>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let color = if self.black { "B" } else { "R" };
        write!(f, "{}{}", self.key, color)
    }
}

impl<K, V> fmt::Debug for Node<K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("black", &self.black)
            .field("parent", &self.parent)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}
