/// Payload for indexing keys without values, like ``Rbtree<K, Empty>``,
/// which is also the default for [`Rbtree`].
///
/// [`Rbtree`]: crate::Rbtree
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Empty;
