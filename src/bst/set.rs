use crate::arena::DEFAULT_CHUNK_SIZE;
use crate::bst::order::Order;
use crate::bst::tree::{Iter, NodeRef, Tree};
use crate::error::Result;
use log::debug;
use std::iter::FromIterator;

/// An ordered set implemented using an unbalanced binary search tree.
///
/// Keys are attached as leaves in arrival order and never rotated, so the shape of the tree (and
/// the cost of every operation) depends on insertion order. `AvlSet` and `RedBlackSet` add
/// balancing on top of the same operations.
///
/// # Examples
/// ```
/// use balanced_trees::bst::{BstSet, Order};
///
/// let mut set = BstSet::new();
/// set.insert(2);
/// set.insert(1);
/// set.insert(3);
///
/// assert_eq!(set.show(Order::Pre), vec![&2, &1, &3]);
/// assert_eq!(set.show_str("post").unwrap(), vec![&1, &3, &2]);
/// assert!(set.show_str("mid").is_err());
/// ```
pub struct BstSet<T> {
    tree: Tree<T, ()>,
}

impl<T> BstSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `BstSet<T>`.
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `BstSet<T>` whose node arena grows `chunk_size` nodes at a time.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        BstSet {
            tree: Tree::new(chunk_size),
        }
    }

    /// Inserts a key into the set. Returns `false` and leaves the set untouched if the key is
    /// already present.
    pub fn insert(&mut self, key: T) -> bool {
        let inserted = self.tree.raw_insert(key).is_some();
        if !inserted {
            debug!("ignoring insertion of a key that is already present");
        }
        inserted
    }

    /// Removes a key from the set. Returns `false` if the key was not present.
    pub fn remove(&mut self, key: &T) -> bool {
        let removed = self.tree.raw_delete(key).is_some();
        if !removed {
            debug!("ignoring removal of a key that is not present");
        }
        removed
    }

    /// Returns the node holding `key`, or `None` if the key is not present.
    pub fn search(&self, key: &T) -> Option<NodeRef<'_, T, ()>> {
        self.tree.search(key).map(|handle| self.tree.node_ref(handle))
    }

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
    pub fn show_str(&self, kind: &str) -> Result<Vec<&T>> {
        let order = kind.parse::<Order>()?;
        Ok(self.show(order))
    }

    /// Returns the root node of the tree, or `None` if the set is empty.
    pub fn root(&self) -> Option<NodeRef<'_, T, ()>> {
        self.tree.root().map(|handle| self.tree.node_ref(handle))
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn min(&self) -> Option<&T> {
        self.tree.min()
    }

    pub fn max(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Checks parent links, key order and the node count of the underlying tree.
    pub fn is_consistent(&self) -> bool {
        self.tree.is_consistent()
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    pub fn iter(&self) -> Iter<'_, T, ()> {
        self.tree.iter()
    }
}

impl<'a, T> IntoIterator for &'a BstSet<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for BstSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for BstSet<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> FromIterator<T> for BstSet<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = BstSet::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::BstSet;
    use crate::bst::Order;

    #[test]
    fn test_len_empty() {
        let set: BstSet<u32> = BstSet::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert_eq!(set.height(), 0);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = BstSet::new();
        assert!(set.insert(5));
        assert!(!set.insert(5));
        assert_eq!(set.len(), 1);
        assert_eq!(set.show(Order::Pre), vec![&5]);
    }

    #[test]
    fn test_remove_missing() {
        let mut set: BstSet<u32> = vec![2, 1].into_iter().collect();
        assert!(!set.remove(&3));
        assert!(set.remove(&2));
        assert_eq!(set.show(Order::In), vec![&1]);
    }

    #[test]
    fn test_sorted_input_degenerates() {
        let set: BstSet<u32> = (0..10).collect();
        assert_eq!(set.height(), 10);
        assert!(set.is_consistent());
    }

    #[test]
    fn test_search() {
        let set: BstSet<u32> = vec![4, 2, 6].into_iter().collect();
        assert_eq!(set.search(&2).map(|node| *node.key()), Some(2));
        assert!(set.search(&5).is_none());
        assert_eq!(set.root().map(|node| *node.key()), Some(4));
    }

    #[test]
    fn test_show_str() {
        let set: BstSet<u32> = vec![2, 1, 3].into_iter().collect();
        assert_eq!(set.show_str("in").unwrap(), vec![&1, &2, &3]);
        assert!(set.show_str("mid").is_err());
    }

    #[test]
    fn test_iter() {
        let set: BstSet<u32> = vec![1, 5, 3].into_iter().collect();
        assert_eq!((&set).into_iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
    }

    #[test]
    fn test_clear() {
        let mut set: BstSet<u32> = (0..5).collect();
        set.clear();
        assert!(set.is_empty());
        assert!(set.insert(1));
        assert_eq!(set.len(), 1);
    }
}
