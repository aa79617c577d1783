use crate::arena::DEFAULT_CHUNK_SIZE;
use crate::avl_tree::node::Balance;
use crate::avl_tree::tree::{self, AvlTree};
use crate::bst::{Iter, NodeRef, Order};
use crate::error::Result;
use log::debug;
use std::iter::FromIterator;

/// An ordered set implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one.
///
/// # Examples
/// ```
/// use balanced_trees::avl_tree::AvlSet;
/// use balanced_trees::bst::Order;
///
/// let mut set = AvlSet::new();
/// set.insert(10);
/// set.insert(20);
/// set.insert(30);
///
/// assert_eq!(set.root().map(|node| *node.key()), Some(20));
/// assert_eq!(set.show(Order::In), vec![&10, &20, &30]);
///
/// let node = set.search(&10).unwrap();
/// assert_eq!(node.data().height(), 1);
/// assert_eq!(node.to_string(), "10 (height: 1, balance: 0)");
///
/// assert!(set.remove(&20));
/// assert!(!set.remove(&20));
/// ```
pub struct AvlSet<T> {
    tree: AvlTree<T>,
}

impl<T> AvlSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `AvlSet<T>`.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `AvlSet<T>` whose node arena grows `chunk_size` nodes at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        AvlSet {
            tree: AvlTree::new(chunk_size),
        }
    }

    /// Inserts a key into the set and rebalances. If the key already exists in the set, the set
    /// is left untouched and `false` is returned.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        let inserted = tree::insert(&mut self.tree, key);
        if !inserted {
            debug!("ignoring insertion of a key that is already present");
        }
        inserted
    }

    /// Removes a key from the set and rebalances. Returns `false` if the key was not present.
    pub fn remove(&mut self, key: &T) -> bool {
        let removed = tree::remove(&mut self.tree, key).is_some();
        if !removed {
            debug!("ignoring removal of a key that is not present");
        }
        removed
    }

    /// Returns the node holding `key`, or `None` if the key is not present. The node exposes its
    /// height and balance factor through `data()`.
    pub fn search(&self, key: &T) -> Option<NodeRef<'_, T, Balance>> {
        self.tree.search(key).map(|handle| self.tree.node_ref(handle))
    }

    /// Checks if a key exists in the set.
    pub fn contains(&self, key: &T) -> bool {
        self.tree.contains(key)
    }

    /// Returns the keys of the set in the requested traversal order.
    pub fn show(&self, order: Order) -> Vec<&T> {
        self.tree.traverse(order)
    }

    /// Returns the keys of the set in the traversal order named by `kind`, one of `"pre"`, `"in"`
    /// or `"post"`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `kind` names no traversal.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::avl_tree::AvlSet;
    /// use balanced_trees::Error;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.show_str("pre"), Ok(vec![&1]));
    /// assert!(match set.show_str("mid") {
    ///     Err(Error::InvalidArgument(_)) => true,
    ///     _ => false,
    /// });
    /// ```
    pub fn show_str(&self, kind: &str) -> Result<Vec<&T>> {
        let order = kind.parse::<Order>()?;
        Ok(self.show(order))
    }

    /// Returns the root node of the tree, or `None` if the set is empty.
    pub fn root(&self) -> Option<NodeRef<'_, T, Balance>> {
        self.tree.root().map(|handle| self.tree.node_ref(handle))
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all values.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the height of the tree: zero when empty, one for a single node.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        self.tree.min()
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Returns `true` if every node's balance factor is within one and every stored height,
    /// parent link and key order is consistent.
    pub fn is_balanced(&self) -> bool {
        tree::is_balanced(&self.tree)
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(3);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, Balance> {
        self.tree.iter()
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, Balance>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for AvlSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for AvlSet<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> FromIterator<T> for AvlSet<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::AvlSet;
    use crate::bst::Order;

    #[test]
    fn test_len_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert!(set.is_empty());
        assert!(set.is_balanced());
    }

    #[test]
    fn test_min_max_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_search_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert!(set.search(&99).is_none());
    }

    #[test]
    fn test_insert_replace() {
        let mut set = AvlSet::new();
        assert!(set.insert(5));
        let before = set.show(Order::Pre).into_iter().cloned().collect::<Vec<u32>>();
        assert!(!set.insert(5));
        assert_eq!(set.show(Order::Pre), before.iter().collect::<Vec<&u32>>());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_single_left_rotation() {
        let set: AvlSet<u32> = vec![10, 20, 30].into_iter().collect();
        assert_eq!(set.root().map(|node| *node.key()), Some(20));
        assert_eq!(set.show(Order::In), vec![&10, &20, &30]);
        assert_eq!(set.show(Order::Pre), vec![&20, &10, &30]);
        assert_eq!(set.show(Order::Post), vec![&10, &30, &20]);
    }

    #[test]
    fn test_node_details() {
        let set: AvlSet<u32> = vec![2, 1, 3, 4].into_iter().collect();
        let root = set.root().unwrap();
        assert_eq!(root.data().height(), 3);
        assert_eq!(root.data().balance_factor(), -1);
        assert_eq!(root.to_string(), "2 (height: 3, balance: -1)");
        assert_eq!(root.right().map(|node| *node.key()), Some(3));
        assert_eq!(root.successor().map(|node| *node.key()), Some(3));
        assert_eq!(root.predecessor().map(|node| *node.key()), Some(1));
    }

    #[test]
    fn test_remove_all() {
        let mut set: AvlSet<u32> = (0..64).collect();
        for key in (0..64).rev() {
            assert!(set.remove(&key));
            assert!(set.is_balanced());
        }
        assert!(set.is_empty());
        assert!(set.root().is_none());
    }

    #[test]
    fn test_height_sorted_input() {
        let set: AvlSet<u32> = (0..1023).collect();
        assert_eq!(set.height(), 10);
        assert!(set.is_balanced());
    }

    #[test]
    fn test_iter() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!((&set).into_iter().len(), 3);
    }
}
