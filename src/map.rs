use std::{borrow::Borrow, ops::Deref};

use crate::error::Error;
use crate::node::{Node, NodeId};
use crate::rbtree::Rbtree;

/// TreeMap is a sorted dictionary layered on [`Rbtree`], keys are unique
/// and entries are kept in key order.
///
/// Re-inserting a key goes through an accumulator, which by default lets
/// the new value overwrite the old one. Calling the accumulator is cheaper
/// than a get followed by set, the index is walked only once. A default
/// factory can also be configured, to serve missing keys from
/// [`TreeMap::get_or_default`].
///
/// All read-only queries of [`Rbtree`] are available through `Deref`.
pub struct TreeMap<K, V> {
    tree: Rbtree<K, V>,
    acc: Box<dyn Fn(&V, V) -> V>,
    default: Option<Box<dyn Fn() -> V>>,
}

impl<K, V> TreeMap<K, V>
where
    K: Ord,
{
    /// Create an empty map, identified by `name`.
    pub fn new<S>(name: S) -> TreeMap<K, V>
    where
        S: AsRef<str>,
    {
        TreeMap {
            tree: Rbtree::new(name),
            acc: Box::new(|_old, new| new),
            default: None,
        }
    }

    /// Use `acc` to merge values on duplicate keys. It is called with the
    /// value already in the map and the value being inserted, and returns
    /// the value to keep.
    pub fn with_accumulator<F>(mut self, acc: F) -> TreeMap<K, V>
    where
        F: Fn(&V, V) -> V + 'static,
    {
        self.acc = Box::new(acc);
        self
    }

    /// Use `factory` to make values for missing keys, refer to
    /// [`TreeMap::get_or_default`].
    pub fn with_default<F>(mut self, factory: F) -> TreeMap<K, V>
    where
        F: Fn() -> V + 'static,
    {
        self.default = Some(Box::new(factory));
        self
    }

    /// Insert all entries from `iter`, duplicate keys are merged using
    /// the accumulator.
    pub fn load<I>(&mut self, iter: I)
    where
        I: Iterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }

    /// Set value for key. Return the handle of the node holding `key` and
    /// whether `key` was newly inserted, when it was not the accumulator
    /// decides the value retained.
    pub fn insert(&mut self, key: K, value: V) -> (NodeId, bool) {
        let (id, rejected) = self.tree.insert_entry(key, value);
        match rejected {
            None => (id, true),
            Some(value) => {
                if let Some(old) = self.tree.value_mut(id) {
                    *old = (self.acc)(old, value);
                }
                (id, false)
            }
        }
    }

    /// Delete key and return its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, Error<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key).map(|(_, value)| value)
    }

    /// Get the value for key.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, Error<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key).map(Node::value)
    }

    /// Return a mutable reference to the value for key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.tree.locate(key)?;
        self.tree.value_mut(id).ok_or(Error::KeyNotFound)
    }

    /// Get the value for key, for missing key return a value made by the
    /// default factory. Fails with [`Error::KeyNotFound`] only when no
    /// factory is configured.
    pub fn get_or_default<Q>(&self, key: &Q) -> Result<V, Error<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Clone,
    {
        match (self.tree.get(key), &self.default) {
            (Ok(node), _) => Ok(node.value().clone()),
            (Err(_), Some(factory)) => Ok(factory()),
            (Err(err), None) => Err(err),
        }
    }

    /// Return an iterator over all values in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.tree.iter().map(Node::value)
    }

    /// Return an iterator over all (key, value) pairs in key order.
    pub fn items(&self) -> impl Iterator<Item = (&K, &V)> {
        self.tree.iter().map(|node| (node.key(), node.value()))
    }

    /// Return the underlying index, consuming the map.
    pub fn into_tree(self) -> Rbtree<K, V> {
        self.tree
    }
}

impl<K, V> Deref for TreeMap<K, V> {
    type Target = Rbtree<K, V>;

    fn deref(&self) -> &Rbtree<K, V> {
        &self.tree
    }
}
