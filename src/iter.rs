use std::{
    cmp::{Ord, Ordering},
    ops::Bound,
};

use crate::node::{Node, NodeId, Side};
use crate::rbtree::Rbtree;

/// In-order walk over a sub-tree, ascending or descending, using an
/// explicit stack. Returned by [`Rbtree::iter`] and [`Rbtree::reverse`].
pub struct Iter<'a, K, V> {
    tree: &'a Rbtree<K, V>,
    stack: Vec<NodeId>,
    cur: Option<NodeId>,
    first: Side, // Left for ascending order
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(tree: &'a Rbtree<K, V>, root: Option<NodeId>, first: Side) -> Self {
        Iter {
            tree,
            stack: vec![],
            cur: root,
            first,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.cur {
            self.stack.push(id);
            self.cur = self.tree.at(id).child(self.first);
        }
        let node = self.tree.at(self.stack.pop()?);
        self.cur = node.child(self.first.flip());
        Some(node)
    }
}

/// Resumable in-order walk, starting from an arbitrary node and climbing
/// the parent links. Returned by [`Rbtree::iter_from`] and
/// [`Rbtree::reverse_from`].
///
/// Yields the start node, then the sub-tree on its far side, then climbs
/// to the parent and repeats, skipping ancestors that fall behind the
/// start node. Costs O(log n + k) for k nodes.
pub struct IterFrom<'a, K, V> {
    tree: &'a Rbtree<K, V>,
    start: Option<&'a K>,
    cursor: Option<NodeId>,
    sub: Option<Iter<'a, K, V>>,
    first: Side,
}

impl<'a, K, V> IterFrom<'a, K, V> {
    pub(crate) fn new(tree: &'a Rbtree<K, V>, start: Option<NodeId>, first: Side) -> Self {
        IterFrom {
            tree,
            start: start.map(|id| &tree.at(id).key),
            cursor: start,
            sub: None,
            first,
        }
    }
}

impl<'a, K, V> Iterator for IterFrom<'a, K, V>
where
    K: Ord,
{
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(sub) = self.sub.as_mut() {
                match sub.next() {
                    item @ Some(_) => return item,
                    None => self.sub = None,
                }
            }

            let (id, start) = (self.cursor?, self.start?);
            let node = self.tree.at(id);
            self.cursor = node.parent;
            let ahead = match (self.first, node.key.cmp(start)) {
                (Side::Left, Ordering::Less) => false,
                (Side::Right, Ordering::Greater) => false,
                _ => true,
            };
            if ahead {
                let far = node.child(self.first.flip());
                self.sub = Some(Iter::new(self.tree, far, self.first));
                return Some(node);
            }
        }
    }
}

/// Lazy range over [`Rbtree`] entries, returned by [`Rbtree::range`].
pub struct Range<'a, K, V> {
    tree: &'a Rbtree<K, V>,
    low: Bound<K>,
    high: Bound<K>,
    walk: IterFrom<'a, K, V>,
    descending: bool,
    done: bool,
}

impl<'a, K, V> Range<'a, K, V>
where
    K: Ord,
{
    pub(crate) fn new(tree: &'a Rbtree<K, V>, low: Bound<K>, high: Bound<K>) -> Self {
        let begin = tree.lower_id(as_ref(&low));
        Range {
            tree,
            low,
            high,
            walk: IterFrom::new(tree, begin, Side::Left),
            descending: false,
            done: false,
        }
    }

    /// Range over the same bounds, from high to low. Always restarts from
    /// the high end.
    pub fn rev(self) -> Range<'a, K, V> {
        let end = self.tree.upper_id(as_ref(&self.high));
        Range {
            tree: self.tree,
            walk: IterFrom::new(self.tree, end, Side::Right),
            low: self.low,
            high: self.high,
            descending: true,
            done: false,
        }
    }

    fn within(&self, key: &K) -> bool {
        if self.descending {
            match &self.low {
                Bound::Unbounded => true,
                Bound::Included(qow) => key.ge(qow),
                Bound::Excluded(qow) => key.gt(qow),
            }
        } else {
            match &self.high {
                Bound::Unbounded => true,
                Bound::Included(qigh) => key.le(qigh),
                Bound::Excluded(qigh) => key.lt(qigh),
            }
        }
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V>
where
    K: Ord,
{
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.walk.next() {
            Some(node) if self.within(&node.key) => Some(node),
            _ => {
                self.done = true;
                None
            }
        }
    }
}

fn as_ref<K>(bound: &Bound<K>) -> Bound<&K> {
    match bound {
        Bound::Included(key) => Bound::Included(key),
        Bound::Excluded(key) => Bound::Excluded(key),
        Bound::Unbounded => Bound::Unbounded,
    }
}
