use crate::arena::DEFAULT_CHUNK_SIZE;
use crate::bst::{Iter, NodeRef, Order};
use crate::error::Result;
use crate::red_black_tree::node::Coloring;
use crate::red_black_tree::tree::{self, RedBlackTree};
use log::debug;
use std::iter::FromIterator;

/// An ordered set implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black,
/// keeps the root black, never lets a red node have a red child and puts the same number of black
/// nodes on every path from the root to an empty subtree. The longest path is therefore at most
/// twice as long as the shortest.
///
/// # Examples
/// ```
/// use balanced_trees::bst::Order;
/// use balanced_trees::red_black_tree::{Color, RedBlackSet};
///
/// let mut set = RedBlackSet::new();
/// for key in &[10, 20, 30, 40, 50, 25] {
///     set.insert(*key);
/// }
///
/// assert!(set.validate_properties());
/// assert_eq!(set.show(Order::Pre), vec![&20, &10, &40, &30, &25, &50]);
///
/// let node = set.search(&40).unwrap();
/// assert_eq!(node.data().color(), Color::Red);
/// assert_eq!(node.to_string(), "40 (red, black height: 1)");
///
/// assert!(set.remove(&20));
/// assert!(set.validate_properties());
/// ```
pub struct RedBlackSet<T> {
    tree: RedBlackTree<T>,
}

impl<T> RedBlackSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackSet<T>`.
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackSet<T>` whose node arena grows `chunk_size` nodes at a
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackSet {
            tree: RedBlackTree::new(chunk_size),
        }
    }

    /// Inserts a key into the set and restores the coloring invariants. If the key already exists
    /// in the set, the set is left untouched and `false` is returned.
    pub fn insert(&mut self, key: T) -> bool {
        let inserted = tree::insert(&mut self.tree, key);
        if !inserted {
            debug!("ignoring insertion of a key that is already present");
        }
        inserted
    }

    /// Removes a key from the set and restores the coloring invariants. Returns `false` if the key
    /// was not present.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::red_black_tree::RedBlackSet;
    ///
    /// let mut set: RedBlackSet<u32> = (1..=7).collect();
    /// for key in 1..=3 {
    ///     assert!(set.remove(&key));
    ///     assert!(set.validate_properties());
    /// }
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove(&mut self, key: &T) -> bool {
        let removed = tree::remove(&mut self.tree, key).is_some();
        if !removed {
            debug!("ignoring removal of a key that is not present");
        }
        removed
    }

    /// Returns the node holding `key`, or `None` if the key is not present. The node exposes its
    /// color and black-height through `data()`.
    pub fn search(&self, key: &T) -> Option<NodeRef<'_, T, Coloring>> {
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
    pub fn show_str(&self, kind: &str) -> Result<Vec<&T>> {
        let order = kind.parse::<Order>()?;
        Ok(self.show(order))
    }

    /// Recomputes every red black property from scratch and returns `true` if all of them hold.
    pub fn validate_properties(&self) -> bool {
        tree::validate(&self.tree)
    }

    /// Returns the root node of the tree, or `None` if the set is empty.
    pub fn root(&self) -> Option<NodeRef<'_, T, Coloring>> {
        self.tree.root().map(|handle| self.tree.node_ref(handle))
    }

    /// Returns the black-height of the root: zero when empty.
    pub fn black_height(&self) -> usize {
        self.root()
            .and_then(|root| root.data().black_height())
            .unwrap_or(0)
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

    /// Checks parent links, key order, the node count and that every stored black-height matches
    /// the colors below it.
    pub fn is_consistent(&self) -> bool {
        self.tree.is_consistent()
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    pub fn iter(&self) -> Iter<'_, T, Coloring> {
        self.tree.iter()
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, Coloring>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for RedBlackSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> FromIterator<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = RedBlackSet::new();
        set.extend(iter);
        set
    }
}
