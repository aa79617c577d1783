use crate::arena::{Handle, TypedArena};
use crate::bst::node::{Augment, Node, Side};
use crate::bst::order::Order;
use log::trace;
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

/// What a raw deletion physically unlinked from the tree.
pub struct Removal<A> {
    /// Parent of the unlinked node; `None` if the root was unlinked.
    pub anchor: Option<Handle>,
    /// The slot of `anchor` that held the unlinked node.
    pub side: Option<Side>,
    /// The subtree spliced into the vacated slot.
    pub child: Option<Handle>,
    /// Bookkeeping the unlinked node carried.
    pub data: A,
}

/// An unbalanced binary search tree whose nodes live in an arena.
///
/// Balancing disciplines are layered on top of the raw operations: they inspect the node returned
/// by `raw_insert` or the `Removal` returned by `raw_delete` and restore their own invariants with
/// `rotate` and `refresh`.
pub struct Tree<T, A> {
    arena: TypedArena<Node<T, A>>,
    root: Option<Handle>,
}

impl<T, A> Tree<T, A> {
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            arena: TypedArena::new(chunk_size),
            root: None,
        }
    }

    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Returns which slot of its parent `handle` occupies, or `None` for the root.
    pub fn side_of(&self, handle: Handle) -> Option<Side> {
        self[handle].parent.map(|parent| {
            if self[parent].left == Some(handle) {
                Side::Left
            } else {
                Side::Right
            }
        })
    }

    // Points the slot of `parent` that held `old` (or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                if self[parent].left == Some(old) {
                    self[parent].left = new;
                } else {
                    self[parent].right = new;
                }
            },
        }
    }

    pub fn min_from(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self[handle].left {
            handle = left;
        }
        handle
    }

    pub fn max_from(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self[handle].right {
            handle = right;
        }
        handle
    }

    /// Returns the node that follows `handle` in in-order.
    pub fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self[handle].right {
            return Some(self.min_from(right));
        }
        let mut curr = handle;
        while let Some(parent) = self[curr].parent {
            if self[parent].left == Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    /// Returns the node that precedes `handle` in in-order.
    pub fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self[handle].left {
            return Some(self.max_from(left));
        }
        let mut curr = handle;
        while let Some(parent) = self[curr].parent {
            if self[parent].right == Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Handle, usize)> = self.root.into_iter().map(|root| (root, 1)).collect();
        while let Some((handle, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self[handle];
            stack.extend(node.left.into_iter().chain(node.right).map(|child| (child, depth + 1)));
        }
        max_depth
    }

    pub fn pre_order(&self) -> Vec<&T> {
        let mut ret = Vec::with_capacity(self.len());
        let mut stack: Vec<Handle> = self.root.into_iter().collect();
        while let Some(handle) = stack.pop() {
            let node = &self[handle];
            ret.push(&node.key);
            stack.extend(node.right);
            stack.extend(node.left);
        }
        ret
    }

    pub fn in_order_handles(&self) -> Vec<Handle> {
        let mut ret = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut curr = self.root;
        loop {
            while let Some(handle) = curr {
                stack.push(handle);
                curr = self[handle].left;
            }
            match stack.pop() {
                Some(handle) => {
                    ret.push(handle);
                    curr = self[handle].right;
                },
                None => break,
            }
        }
        ret
    }

    pub fn in_order(&self) -> Vec<&T> {
        self.in_order_handles()
            .into_iter()
            .map(|handle| &self[handle].key)
            .collect()
    }

    pub fn post_order(&self) -> Vec<&T> {
        // node, right, left reversed is left, right, node
        let mut ret = Vec::with_capacity(self.len());
        let mut stack: Vec<Handle> = self.root.into_iter().collect();
        while let Some(handle) = stack.pop() {
            let node = &self[handle];
            ret.push(&node.key);
            stack.extend(node.left);
            stack.extend(node.right);
        }
        ret.reverse();
        ret
    }

    pub fn traverse(&self, order: Order) -> Vec<&T> {
        match order {
            Order::Pre => self.pre_order(),
            Order::In => self.in_order(),
            Order::Post => self.post_order(),
        }
    }

    pub fn node_ref(&self, handle: Handle) -> NodeRef<'_, T, A> {
        NodeRef { tree: self, handle }
    }

    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter {
            tree: self,
            next: self.root.map(|root| self.min_from(root)),
            remaining: self.len(),
        }
    }
}

impl<T, A> Tree<T, A>
where
    A: Augment,
{
    /// Recomputes the bookkeeping of `handle` from its children.
    pub fn refresh(&mut self, handle: Handle) {
        let left = self[handle].left.map(|left| self[left].data);
        let right = self[handle].right.map(|right| self[right].data);
        self[handle].data.refresh(left.as_ref(), right.as_ref());
    }

    /// Rotates `pivot` down towards `direction`; its child on the opposite side takes its place.
    ///
    /// # Panics
    ///
    /// Panics if `pivot` has no child on the opposite side of `direction`.
    pub fn rotate(&mut self, pivot: Handle, direction: Side) {
        let rising_side = direction.opposite();
        let new_parent = self[pivot]
            .child(rising_side)
            .expect("Expected rotation pivot to have a child to rotate up.");
        let moved = self[new_parent].child(direction);
        let grandparent = self[pivot].parent;

        *self[pivot].child_mut(rising_side) = moved;
        if let Some(moved) = moved {
            self[moved].parent = Some(pivot);
        }

        *self[new_parent].child_mut(direction) = Some(pivot);
        self[pivot].parent = Some(new_parent);

        self[new_parent].parent = grandparent;
        self.replace_child(grandparent, pivot, Some(new_parent));

        self.refresh(pivot);
        self.refresh(new_parent);
        trace!("rotated {:?} {:?} under {:?}", pivot, direction, new_parent);
    }

    pub fn rotate_left(&mut self, pivot: Handle) {
        self.rotate(pivot, Side::Left);
    }

    pub fn rotate_right(&mut self, pivot: Handle) {
        self.rotate(pivot, Side::Right);
    }

    // precondition: `handle` has at most one child
    fn unlink(&mut self, handle: Handle) -> (T, Removal<A>) {
        let parent = self[handle].parent;
        let side = self.side_of(handle);
        let child = {
            let node = &self[handle];
            assert!(
                node.left.is_none() || node.right.is_none(),
                "Expected unlinked node to have at most one child.",
            );
            node.left.or(node.right)
        };

        self.replace_child(parent, handle, child);
        if let Some(child) = child {
            self[child].parent = parent;
        }

        let Node { key, data, .. } = self.arena.free(handle);
        let removal = Removal {
            anchor: parent,
            side,
            child,
            data,
        };
        (key, removal)
    }
}

impl<T, A> Tree<T, A>
where
    T: Ord,
{
    pub fn search(&self, key: &T) -> Option<Handle> {
        let mut curr = self.root;
        while let Some(handle) = curr {
            curr = match key.cmp(&self[handle].key) {
                Ordering::Less => self[handle].left,
                Ordering::Greater => self[handle].right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    pub fn contains(&self, key: &T) -> bool {
        self.search(key).is_some()
    }

    pub fn min(&self) -> Option<&T> {
        self.root.map(|root| &self[self.min_from(root)].key)
    }

    pub fn max(&self) -> Option<&T> {
        self.root.map(|root| &self[self.max_from(root)].key)
    }
}

impl<T, A> Tree<T, A>
where
    T: Ord,
    A: Augment,
{
    /// Attaches `key` as a new leaf and returns it, or returns `None` if `key` is already present.
    pub fn raw_insert(&mut self, key: T) -> Option<Handle> {
        if self.contains(&key) {
            return None;
        }

        let mut parent = None;
        let mut side = Side::Left;
        let mut curr = self.root;
        while let Some(handle) = curr {
            parent = Some(handle);
            side = if key < self[handle].key {
                Side::Left
            } else {
                Side::Right
            };
            curr = self[handle].child(side);
        }

        let handle = self.arena.allocate(Node::new(key, parent));
        match parent {
            None => self.root = Some(handle),
            Some(parent) => *self[parent].child_mut(side) = Some(handle),
        }
        Some(handle)
    }

    /// Removes `key` and returns it along with a record of the node that was physically unlinked.
    ///
    /// A node with two children keeps its place: its in-order successor is unlinked instead and
    /// the successor's key moves into it.
    pub fn raw_delete(&mut self, key: &T) -> Option<(T, Removal<A>)> {
        let target = self.search(key)?;
        let node = &self[target];
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let successor = self.min_from(right);
                let (successor_key, removal) = self.unlink(successor);
                let key = mem::replace(&mut self[target].key, successor_key);
                Some((key, removal))
            },
            _ => Some(self.unlink(target)),
        }
    }
}

impl<T, A> Tree<T, A>
where
    T: Ord,
    A: Augment + PartialEq,
{
    /// Checks back-links, key order, the node count and that every node's stored bookkeeping
    /// matches what its children imply.
    pub fn is_consistent(&self) -> bool {
        if let Some(root) = self.root {
            if self[root].parent.is_some() {
                return false;
            }
        }

        let mut count = 0;
        let mut stack: Vec<Handle> = self.root.into_iter().collect();
        while let Some(handle) = stack.pop() {
            count += 1;
            let node = &self[handle];
            for child in node.left.into_iter().chain(node.right) {
                if self[child].parent != Some(handle) {
                    return false;
                }
                stack.push(child);
            }

            let mut expected = node.data;
            let left = node.left.map(|left| self[left].data);
            let right = node.right.map(|right| self[right].data);
            expected.refresh(left.as_ref(), right.as_ref());
            if expected != node.data {
                return false;
            }
        }

        let keys = self.in_order();
        count == self.len() && keys.windows(2).all(|pair| pair[0] < pair[1])
    }
}

impl<T, A> Index<Handle> for Tree<T, A> {
    type Output = Node<T, A>;

    fn index(&self, handle: Handle) -> &Self::Output {
        &self.arena[handle]
    }
}

impl<T, A> IndexMut<Handle> for Tree<T, A> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        &mut self.arena[handle]
    }
}

/// A read-only view of a node in a tree.
///
/// Displaying a node shows its key followed by the bookkeeping of its balancing discipline.
pub struct NodeRef<'a, T, A> {
    tree: &'a Tree<T, A>,
    handle: Handle,
}

impl<'a, T, A> NodeRef<'a, T, A> {
    fn node(&self) -> &'a Node<T, A> {
        let tree: &'a Tree<T, A> = self.tree;
        &tree[self.handle]
    }

    pub fn key(&self) -> &'a T {
        &self.node().key
    }

    /// Returns the bookkeeping the balancing discipline keeps for this node.
    pub fn data(&self) -> &'a A {
        &self.node().data
    }

    pub fn left(&self) -> Option<NodeRef<'a, T, A>> {
        self.node().left.map(|handle| self.tree.node_ref(handle))
    }

    pub fn right(&self) -> Option<NodeRef<'a, T, A>> {
        self.node().right.map(|handle| self.tree.node_ref(handle))
    }

    pub fn parent(&self) -> Option<NodeRef<'a, T, A>> {
        self.node().parent.map(|handle| self.tree.node_ref(handle))
    }

    /// Returns the node holding the next larger key.
    pub fn successor(&self) -> Option<NodeRef<'a, T, A>> {
        self.tree.successor(self.handle).map(|handle| self.tree.node_ref(handle))
    }

    /// Returns the node holding the next smaller key.
    pub fn predecessor(&self) -> Option<NodeRef<'a, T, A>> {
        self.tree.predecessor(self.handle).map(|handle| self.tree.node_ref(handle))
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }
}

impl<'a, T, A> Clone for NodeRef<'a, T, A> {
    fn clone(&self) -> Self {
        NodeRef {
            tree: self.tree,
            handle: self.handle,
        }
    }
}

impl<'a, T, A> Copy for NodeRef<'a, T, A> {}

impl<'a, T, A> fmt::Display for NodeRef<'a, T, A>
where
    T: fmt::Display,
    A: Augment,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())?;
        self.data().fmt_details(f)
    }
}

impl<'a, T, A> fmt::Debug for NodeRef<'a, T, A>
where
    T: fmt::Debug,
    A: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("data", self.data())
            .finish()
    }
}

/// An iterator over the keys of a tree in ascending order.
pub struct Iter<'a, T, A> {
    tree: &'a Tree<T, A>,
    next: Option<Handle>,
    remaining: usize,
}

impl<'a, T, A> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let handle = self.next?;
        self.next = tree.successor(handle);
        self.remaining -= 1;
        Some(&tree[handle].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, A> ExactSizeIterator for Iter<'a, T, A> {}
