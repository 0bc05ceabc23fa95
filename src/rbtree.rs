use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
    fmt, mem,
    ops::{Bound, RangeBounds},
};

use log::{debug, trace};
use slab::Slab;

use crate::depth::Depth;
use crate::empty::Empty;
use crate::error::Error;
use crate::iter::{Iter, IterFrom, Range};
use crate::node::{Node, NodeId, Side};

/// Rbtree manage a single instance of in-memory index using
/// [red-black][rbtree] tree. Unlike the left-leaning variant, red links
/// can lean either way and every node keeps a link to its parent, which
/// lets iteration resume from any node without walking down from root.
///
/// Nodes are kept in an arena and addressed by [`NodeId`]. The root slot
/// and the left/right slots of each node are the only owners of a node,
/// parent links never own.
///
/// [rbtree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
#[derive(Clone)]
pub struct Rbtree<K, V = Empty> {
    name: String,
    nodes: Slab<Node<K, V>>,
    root: Option<NodeId>,
    n_count: usize, // number of entries in the tree.
}

/// Different ways to construct a new Rbtree instance.
impl<K, V> Rbtree<K, V>
where
    K: Ord,
{
    /// Create an empty instance of Rbtree, identified by `name`.
    /// Applications can choose unique names.
    pub fn new<S>(name: S) -> Rbtree<K, V>
    where
        S: AsRef<str>,
    {
        Rbtree {
            name: name.as_ref().to_string(),
            nodes: Slab::new(),
            root: Default::default(),
            n_count: Default::default(),
        }
    }

    /// Create a new instance of Rbtree tree and load it with entries
    /// from `iter`. Note that iterator should return (key, value) tuples,
    /// for duplicate keys the first entry wins.
    pub fn load_from<S, I>(name: S, iter: I) -> Rbtree<K, V>
    where
        S: AsRef<str>,
        I: Iterator<Item = (K, V)>,
    {
        let mut tree = Rbtree::new(name);
        for (key, value) in iter {
            tree.insert_entry(key, value);
        }
        debug!("loaded {} entries into {:?}", tree.n_count, tree.name);
        tree
    }
}

/// Maintenance API.
impl<K, V> Rbtree<K, V> {
    /// Identify this instance. Applications can choose unique names while
    /// creating Rbtree instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return handle to the root node.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Resolve a node handle, None if the node was removed.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.nodes.get(id.0)
    }

    /// Return quickly with basic statisics, only entries() method is valid
    /// with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<Node<K, V>>())
    }

    #[inline]
    pub(crate) fn at(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    #[inline]
    fn at_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }
}

impl<K> Rbtree<K, Empty>
where
    K: Ord,
{
    /// Insert key into the index. Return the handle of the node holding
    /// `key` and whether it was newly inserted. Inserting a key that is
    /// already present leaves the index untouched.
    pub fn insert(&mut self, key: K) -> (NodeId, bool) {
        let (id, rejected) = self.insert_entry(key, Empty);
        (id, rejected.is_none())
    }
}

/// Write operations on Rbtree instance.
impl<K, V> Rbtree<K, V>
where
    K: Ord,
{
    /// Insert a {key, value} entry. If key is already present, the index
    /// is left untouched and `value` is handed back along with the handle
    /// of the existing node, so that callers can decide how to merge.
    pub fn insert_entry(&mut self, key: K, value: V) -> (NodeId, Option<V>) {
        let mut parent = match self.root {
            None => {
                let id = NodeId(self.nodes.insert(Node::new(key, value, true)));
                self.root = Some(id);
                self.n_count = 1;
                return (id, None);
            }
            Some(root) => root,
        };

        let side = loop {
            let node = self.at(parent);
            let side = match node.compare(&key) {
                Ordering::Greater => Side::Left,
                Ordering::Less => Side::Right,
                Ordering::Equal => return (parent, Some(value)),
            };
            match node.child(side) {
                Some(child) => parent = child,
                None => break side,
            }
        };

        let mut node = Node::new(key, value, false /*red*/);
        node.parent = Some(parent);
        let id = NodeId(self.nodes.insert(node));
        self.at_mut(parent).set_child(side, Some(id));
        self.n_count += 1;
        self.insert_fixup(id);
        (id, None)
    }

    /// Delete key from this instance and return its entry. If key is not
    /// present return [`Error::KeyNotFound`] and leave the index untouched.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<(K, V), Error<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let target = self.locate(key)?;
        let detached = self.remove_node(target);
        let node = self.nodes.remove(detached.0);
        self.n_count -= 1;
        Ok((node.key, node.value))
    }

    /// Return mutable reference to the value held by node `id`.
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut V> {
        self.nodes.get_mut(id.0).map(|node| &mut node.value)
    }
}

/// Read operations on Rbtree instance.
impl<K, V> Rbtree<K, V>
where
    K: Ord,
{
    /// Get the node for key.
    pub fn get<Q>(&self, key: &Q) -> Result<&Node<K, V>, Error<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).map(|id| self.at(id))
    }

    /// Get the handle of the node for key.
    pub fn locate<Q>(&self, key: &Q) -> Result<NodeId, Error<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root;
        while let Some(id) = node {
            let nref = self.at(id);
            node = match nref.compare(key) {
                Ordering::Less => nref.right,
                Ordering::Greater => nref.left,
                Ordering::Equal => return Ok(id),
            };
        }
        Err(Error::KeyNotFound)
    }

    /// Return whether key is present in the index.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).is_ok()
    }

    /// Return the node with lowest key, None if index is empty.
    pub fn first(&self) -> Option<&Node<K, V>> {
        self.first_id().map(|id| self.at(id))
    }

    /// Return the node with highest key, None if index is empty.
    pub fn last(&self) -> Option<&Node<K, V>> {
        self.last_id().map(|id| self.at(id))
    }

    /// For a given key, return its floor and ceil nodes. Floor is the node
    /// with greatest key less than or equal to `key`, ceil is the node with
    /// least key greater than or equal to `key`. Both are the same node
    /// if `key` is present in the index.
    pub fn floor_and_ceil<Q>(&self, key: &Q) -> (Option<&Node<K, V>>, Option<&Node<K, V>>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (floor, ceil) = self.floor_ceil_ids(key);
        (floor.map(|id| self.at(id)), ceil.map(|id| self.at(id)))
    }

    /// For a given key, return its predecessor and successor nodes. Differs
    /// from [`Rbtree::floor_and_ceil`] only when `key` is present: the
    /// node holding `key` itself is never returned.
    pub fn neighbors<Q>(&self, key: &Q) -> (Option<&Node<K, V>>, Option<&Node<K, V>>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (prev, next) = self.neighbor_ids(key);
        (prev.map(|id| self.at(id)), next.map(|id| self.at(id)))
    }

    /// Return an iterator over all entries in ascending order.
    pub fn iter(&self) -> Iter<K, V> {
        Iter::new(self, self.root, Side::Left)
    }

    /// Return an iterator over all entries in descending order.
    pub fn reverse(&self) -> Iter<K, V> {
        Iter::new(self, self.root, Side::Right)
    }

    /// Return an iterator over all keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(Node::key)
    }

    /// Iterate in ascending order starting from node `start`, which
    /// is yielded first.
    pub fn iter_from(&self, start: NodeId) -> IterFrom<K, V> {
        let start = self.node(start).map(|_| start);
        IterFrom::new(self, start, Side::Left)
    }

    /// Iterate in descending order starting from node `start`, which
    /// is yielded first.
    pub fn reverse_from(&self, start: NodeId) -> IterFrom<K, V> {
        let start = self.node(start).map(|_| start);
        IterFrom::new(self, start, Side::Right)
    }

    /// Return nodes from ceil of `start` upto, but excluding, ceil of
    /// `stop`. Missing `start` begins with lowest key, missing `stop` runs
    /// till the highest key. A `stop` at or before `start` gives an empty
    /// result. Only a step of 1 is supported.
    pub fn slice<Q>(
        &self,
        start: Option<&Q>,
        stop: Option<&Q>,
        step: Option<usize>,
    ) -> Result<Vec<&Node<K, V>>, Error<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match step {
            None | Some(1) => (),
            Some(step) => return Err(Error::UnsupportedStep(step)),
        }

        let begin = match start {
            Some(key) => self.floor_ceil_ids(key).1,
            None => self.first_id(),
        };
        let begin = match begin {
            Some(begin) => begin,
            None => return Ok(vec![]),
        };
        let end = stop
            .and_then(|key| self.floor_ceil_ids(key).1)
            .map(|id| &self.at(id).key);

        let iter = IterFrom::new(self, Some(begin), Side::Left);
        Ok(iter
            .take_while(|node| end.map_or(true, |end| node.key.lt(end)))
            .collect())
    }

    /// Range over all entries from low to high, call `rev()` on the
    /// returned iterator to range from high to low.
    pub fn range<Q, R>(&self, range: R) -> Range<K, V>
    where
        K: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ToOwned<Owned = K> + ?Sized,
    {
        let low: Bound<K> = match range.start_bound() {
            Bound::Included(key) => Bound::Included(key.to_owned()),
            Bound::Excluded(key) => Bound::Excluded(key.to_owned()),
            Bound::Unbounded => Bound::Unbounded,
        };
        let high: Bound<K> = match range.end_bound() {
            Bound::Included(key) => Bound::Included(key.to_owned()),
            Bound::Excluded(key) => Bound::Excluded(key.to_owned()),
            Bound::Unbounded => Bound::Unbounded,
        };
        Range::new(self, low, high)
    }

    pub(crate) fn first_id(&self) -> Option<NodeId> {
        self.root.map(|id| self.edge(id, Side::Left))
    }

    pub(crate) fn last_id(&self) -> Option<NodeId> {
        self.root.map(|id| self.edge(id, Side::Right))
    }

    // each right-step records a floor candidate, each left-step a ceil.
    fn floor_ceil_ids<Q>(&self, key: &Q) -> (Option<NodeId>, Option<NodeId>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut node, mut floor, mut ceil) = (self.root, None, None);
        while let Some(id) = node {
            let nref = self.at(id);
            node = match nref.compare(key) {
                Ordering::Less => {
                    floor = Some(id);
                    nref.right
                }
                Ordering::Greater => {
                    ceil = Some(id);
                    nref.left
                }
                Ordering::Equal => return (Some(id), Some(id)),
            };
        }
        (floor, ceil)
    }

    fn neighbor_ids<Q>(&self, key: &Q) -> (Option<NodeId>, Option<NodeId>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut node, mut prev, mut next) = (self.root, None, None);
        while let Some(id) = node {
            let nref = self.at(id);
            node = match nref.compare(key) {
                Ordering::Less => {
                    prev = Some(id);
                    nref.right
                }
                Ordering::Greater => {
                    next = Some(id);
                    nref.left
                }
                Ordering::Equal => {
                    if let Some(left) = nref.left {
                        prev = Some(self.edge(left, Side::Right));
                    }
                    if let Some(right) = nref.right {
                        next = Some(self.edge(right, Side::Left));
                    }
                    break;
                }
            };
        }
        (prev, next)
    }

    // first node at or after `bound`, in ascending order.
    pub(crate) fn lower_id(&self, bound: Bound<&K>) -> Option<NodeId> {
        match bound {
            Bound::Included(key) => self.floor_ceil_ids(key).1,
            Bound::Excluded(key) => self.neighbor_ids(key).1,
            Bound::Unbounded => self.first_id(),
        }
    }

    // first node at or before `bound`, in descending order.
    pub(crate) fn upper_id(&self, bound: Bound<&K>) -> Option<NodeId> {
        match bound {
            Bound::Included(key) => self.floor_ceil_ids(key).0,
            Bound::Excluded(key) => self.neighbor_ids(key).0,
            Bound::Unbounded => self.last_id(),
        }
    }

    // walk down from `id` always taking `side`, return the last node.
    fn edge(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(child) = self.at(id).child(side) {
            id = child
        }
        id
    }
}

/// Validation API.
impl<K, V> Rbtree<K, V>
where
    K: Clone + Ord,
{
    /// Validate red-black tree with following rules:
    ///
    /// * Root node is black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Every child links back to its parent.
    /// * Make sure keys are in sorted order.
    /// * Number of reachable entries match the count.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, Error<K>> {
        if let Some(root) = self.root {
            let node = self.at(root);
            if node.is_red() {
                return Err(Error::RedRoot);
            } else if node.parent.is_some() {
                let msg = format!("root {:?} has parent {:?}", root, node.parent);
                return Err(Error::BrokenLink(msg));
            }
        }

        let mut stats = Stats::new(self.n_count, mem::size_of::<Node<K, V>>());
        stats.set_depths(Depth::new());
        let blacks = self.validate_tree(self.root, None, false, 0, 0, &mut stats)?;
        stats.set_blacks(blacks);

        let mut count = 0;
        let mut prev: Option<&K> = None;
        for node in self.iter() {
            if let Some(prev) = prev {
                if prev.ge(&node.key) {
                    return Err(Error::SortError(prev.clone(), node.key.clone()));
                }
            }
            prev = Some(&node.key);
            count += 1;
        }
        if count != self.n_count {
            return Err(Error::SizeMismatch(self.n_count, count));
        }
        Ok(stats)
    }

    fn validate_tree(
        &self,
        node: Option<NodeId>,
        parent: Option<NodeId>,
        fromred: bool,
        mut nb: usize,
        depth: usize,
        stats: &mut Stats,
    ) -> Result<usize, Error<K>> {
        let id = match node {
            None => {
                if let Some(depths) = stats.depths.as_mut() {
                    depths.sample(depth);
                }
                return Ok(nb);
            }
            Some(id) => id,
        };

        let node = self.at(id);
        if node.parent != parent {
            let msg = format!("{:?} links to {:?} not {:?}", id, node.parent, parent);
            return Err(Error::BrokenLink(msg));
        }
        let red = node.is_red();
        if fromred && red {
            return Err(Error::ConsecutiveReds);
        }
        if !red {
            nb += 1;
        }
        let (left, right) = (node.left, node.right);
        let lblacks = self.validate_tree(left, Some(id), red, nb, depth + 1, stats)?;
        let rblacks = self.validate_tree(right, Some(id), red, nb, depth + 1, stats)?;
        if lblacks != rblacks {
            let err = format!("left: {} right: {}", lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }
        Ok(lblacks)
    }
}

impl<K, V> Rbtree<K, V>
where
    K: Ord,
{
    //--------- insertion fix-up ----------------

    // Resolve a red-red link between `node` and its parent. Recoloring
    // moves the problem two levels up, a rotation ends it.
    fn insert_fixup(&mut self, mut node: NodeId) {
        loop {
            let parent = match self.at(node).parent {
                Some(parent) => parent,
                None => return,
            };
            if self.at(node).is_black() || self.at(parent).is_black() {
                return;
            } else if Some(parent) == self.root {
                return;
            }

            let grand = self.parent_of(parent);
            let parent_side = self.side_of(parent, grand);
            let uncle = self.at(grand).child(parent_side.flip());

            if self.is_red(uncle) {
                trace!("insert fix-up recolor at {:?}", grand);
                if Some(grand) != self.root {
                    self.at_mut(grand).set_red();
                }
                self.at_mut(parent).set_black();
                if let Some(uncle) = uncle {
                    self.at_mut(uncle).set_black();
                }
                node = grand;
                continue;
            }

            let node_side = self.side_of(node, parent);
            trace!("insert fix-up {:?}{:?} at {:?}", node_side, parent_side, grand);
            let top = match (node_side, parent_side) {
                (Side::Left, Side::Left) => {
                    self.rotate_right(parent, grand);
                    parent
                }
                (Side::Right, Side::Right) => {
                    self.rotate_left(parent, grand);
                    parent
                }
                (Side::Left, Side::Right) => {
                    self.rotate_right(node, parent);
                    self.rotate_left(node, grand);
                    node
                }
                (Side::Right, Side::Left) => {
                    self.rotate_left(node, parent);
                    self.rotate_right(node, grand);
                    node
                }
            };
            let (left, right) = {
                let top = self.at_mut(top);
                top.set_black();
                (top.left, top.right)
            };
            for child in [left, right].iter().filter_map(|child| *child) {
                self.at_mut(child).set_red();
            }
            return;
        }
    }

    //--------- deletion ----------------

    // Return the node that got detached from the tree, it holds the
    // entry of `node` which might have travelled there.
    fn remove_node(&mut self, mut node: NodeId) -> NodeId {
        let n = self.at(node);
        if let (Some(_), Some(right)) = (n.left, n.right) {
            // remove the in-order successor instead, but keep its entry.
            let succ = self.edge(right, Side::Left);
            self.swap_cargo(node, succ);
            node = succ;
        }
        self.unlink(node)
    }

    // Unlink a node with one child or less.
    fn unlink(&mut self, node: NodeId) -> NodeId {
        let (black, child) = {
            let n = self.at(node);
            (n.black, n.left.or(n.right))
        };

        if black {
            if Some(node) == self.root {
                self.root = child;
                if let Some(child) = child {
                    let child = self.at_mut(child);
                    child.parent = None;
                    child.set_black();
                }
                return node;
            }
            match child {
                Some(child) if self.at(child).is_red() => {
                    // red child is a leaf, its slot goes away and `node`
                    // stays black holding the child's entry.
                    self.swap_cargo(node, child);
                    let (left, right) = {
                        let c = self.at(child);
                        (c.left, c.right)
                    };
                    self.adopt(node, Side::Left, left);
                    self.adopt(node, Side::Right, right);
                    return child;
                }
                Some(child) => panic!(
                    "unlink(): black {:?} has lone black child {:?}, call the programmer",
                    node, child
                ),
                None => self.remove_fixup(node),
            }
        } else if let Some(child) = child {
            panic!(
                "unlink(): red {:?} has lone child {:?}, call the programmer",
                node, child
            );
        }

        let parent = self.parent_of(node);
        let side = self.side_of(node, parent);
        self.at_mut(parent).set_child(side, None);
        node
    }

    // Resolve the double black at `node`, which is still linked to the
    // tree. The order in which cases are checked matters.
    fn remove_fixup(&mut self, mut node: NodeId) {
        loop {
            if Some(node) == self.root {
                trace!("remove fix-up case 1 at {:?}", node);
                return;
            }

            let parent = self.parent_of(node);
            let side = self.side_of(node, parent);
            let sibling = match self.at(parent).child(side.flip()) {
                Some(sibling) => sibling,
                None => panic!(
                    "remove_fixup(): double black {:?} has no sibling, call the programmer",
                    node
                ),
            };
            let (near, far) = {
                let s = self.at(sibling);
                (s.child(side), s.child(side.flip()))
            };
            let parent_red = self.at(parent).is_red();
            let sibling_red = self.at(sibling).is_red();
            let nephews_black = self.is_black(near) && self.is_black(far);

            if !parent_red && sibling_red {
                trace!("remove fix-up case 2 at {:?}", node);
                self.rotate(sibling, parent, side);
                self.at_mut(parent).set_red();
                self.at_mut(sibling).set_black();
                continue;
            } else if !parent_red && !sibling_red && nephews_black {
                trace!("remove fix-up case 3 at {:?}", node);
                self.at_mut(sibling).set_red();
                node = parent;
                continue;
            } else if parent_red && !sibling_red && nephews_black {
                trace!("remove fix-up case 4 at {:?}", node);
                self.at_mut(parent).set_black();
                self.at_mut(sibling).set_red();
                return;
            } else if sibling_red {
                panic!(
                    "remove_fixup(): red {:?} under red {:?}, call the programmer",
                    sibling, parent
                );
            }

            let mut sibling = sibling;
            match near {
                Some(near) if self.at(near).is_red() && self.is_black(far) => {
                    trace!("remove fix-up case 5 at {:?}", node);
                    self.rotate(near, sibling, side.flip());
                    self.at_mut(near).set_black();
                    self.at_mut(sibling).set_red();
                    sibling = near;
                }
                _ => (),
            }

            trace!("remove fix-up case 6 at {:?}", node);
            if self.is_black(self.at(sibling).child(side.flip())) {
                panic!(
                    "remove_fixup(): far child of {:?} is not red, call the programmer",
                    sibling
                );
            }
            let black = self.at(parent).black;
            self.rotate(sibling, parent, side);
            let (left, right) = {
                let s = self.at_mut(sibling);
                s.black = black;
                (s.left, s.right)
            };
            for child in [left, right].iter().filter_map(|child| *child) {
                self.at_mut(child).set_black();
            }
            return;
        }
    }

    //--------- rotation routines ----------------

    //              (i)                       (i)
    //               |                         |
    //               b                         a
    //              / \                       / \
    //             /   \                     /   \
    //            x     a                   b    ar
    //                 / \                 / \
    //               al   ar              x   al
    //
    fn rotate_left(&mut self, a: NodeId, b: NodeId) {
        self.rotate(a, b, Side::Left)
    }

    //              (i)                       (i)
    //               |                         |
    //               b                         a
    //              / \                       / \
    //             /   \                     /   \
    //            a     x                   al    b
    //           / \                             / \
    //         al   ar                         ar   x
    //
    fn rotate_right(&mut self, a: NodeId, b: NodeId) {
        self.rotate(a, b, Side::Right)
    }

    // `a` takes the slot of its parent `b`, and `b` goes down to `a`'s
    // `down` side. Colors are left to the caller.
    fn rotate(&mut self, a: NodeId, b: NodeId, down: Side) {
        let up = down.flip();
        if self.at(b).child(up) != Some(a) {
            panic!(
                "rotate(): {:?} is not {:?} child of {:?}, call the programmer",
                a, up, b
            );
        }
        trace!("rotate {:?} over {:?} towards {:?}", a, b, down);
        let grand = self.at(b).parent;
        self.replace_child(grand, b, a);
        let inner = self.at(a).child(down);
        self.at_mut(a).set_child(down, Some(b));
        self.at_mut(b).parent = Some(a);
        self.adopt(b, up, inner);
    }

    //--------- link and cargo helpers ----------------

    // link `new` into the slot held by `old` under `parent`, None parent
    // being the root slot.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        self.at_mut(new).parent = parent;
        match parent {
            None => self.root = Some(new),
            Some(parent) => {
                let side = self.side_of(old, parent);
                self.at_mut(parent).set_child(side, Some(new));
            }
        }
    }

    fn adopt(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        self.at_mut(parent).set_child(side, child);
        if let Some(child) = child {
            self.at_mut(child).parent = Some(parent);
        }
    }

    // exchange key and value between two nodes, structure and color stay.
    fn swap_cargo(&mut self, a: NodeId, b: NodeId) {
        match self.nodes.get2_mut(a.0, b.0) {
            Some((x, y)) => {
                mem::swap(&mut x.key, &mut y.key);
                mem::swap(&mut x.value, &mut y.value);
            }
            None => panic!(
                "swap_cargo(): invalid pair {:?} {:?}, call the programmer",
                a, b
            ),
        }
    }

    fn side_of(&self, child: NodeId, parent: NodeId) -> Side {
        let p = self.at(parent);
        if p.left == Some(child) {
            Side::Left
        } else if p.right == Some(child) {
            Side::Right
        } else {
            panic!(
                "side_of(): {:?} is not a child of {:?}, call the programmer",
                child, parent
            )
        }
    }

    fn parent_of(&self, id: NodeId) -> NodeId {
        match self.at(id).parent {
            Some(parent) => parent,
            None => panic!("parent_of(): {:?} has no parent, call the programmer", id),
        }
    }

    #[inline]
    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.map_or(false, |id| self.at(id).is_red())
    }

    #[inline]
    fn is_black(&self, id: Option<NodeId>) -> bool {
        !self.is_red(id)
    }
}

#[cfg(test)]
impl<K, V> Rbtree<K, V>
where
    K: Ord,
{
    // link a node as is, without any balancing. Used to set up shapes.
    pub(crate) fn attach(
        &mut self,
        parent: Option<NodeId>,
        side: Side,
        key: K,
        value: V,
        black: bool,
    ) -> NodeId {
        let id = NodeId(self.nodes.insert(Node::new(key, value, black)));
        match parent {
            None => self.root = Some(id),
            Some(parent) => self.adopt(parent, side, Some(id)),
        }
        self.n_count += 1;
        id
    }
}

// in-order nodes, separated by space.
impl<K, V> fmt::Display for Rbtree<K, V>
where
    K: Ord + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let nodes: Vec<String> = self.iter().map(|node| node.to_string()).collect();
        write!(f, "{}", nodes.join(" "))
    }
}

/// Statistics on [`Rbtree`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`Rbtree::stats`] method.
/// * To get full statisics via [`Rbtree::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`Rbtree`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for `Rbtree<k,V>`. Although
    /// the node overhead is constant, the node size varies based on
    /// key and value types. EG:
    ///
    /// ```
    /// use rbtree_index::Rbtree;
    /// let tree: Rbtree<u64, u64> = Rbtree::new("myinstance");
    ///
    /// // size of key: 8 bytes
    /// // size of value: 8 bytes
    /// // overhead, color and three links, is 56 bytes
    /// assert_eq!(tree.stats().node_size(), 72);
    /// ```
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black nodes from root to leaf, on both left
    /// and right child.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics.
    pub fn depths(&self) -> Option<Depth> {
        match self.depths.as_ref() {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}
