use crate::arena::Handle;
use std::fmt;

/// Per-node bookkeeping that a balancing discipline attaches to every node of a tree.
///
/// The engine calls `refresh` on a node whenever its children change shape (after every rotation
/// and whenever a balancer walks a path upwards), passing the bookkeeping of the node's current
/// children. `None` stands for an empty subtree.
pub trait Augment: Copy {
    /// Returns the bookkeeping of a freshly inserted leaf.
    fn leaf() -> Self;

    /// Recomputes this node's bookkeeping from its children.
    fn refresh(&mut self, left: Option<&Self>, right: Option<&Self>);

    /// Writes a short diagnostic suffix shown after the key when a node is displayed.
    fn fmt_details(&self, _f: &mut fmt::Formatter) -> fmt::Result {
        Ok(())
    }
}

impl Augment for () {
    fn leaf() -> Self {}

    fn refresh(&mut self, _left: Option<&Self>, _right: Option<&Self>) {}
}

/// One of the two child slots of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A struct representing an internal node of a binary search tree.
///
/// `left` and `right` are the owning links of the tree structure; `parent` is a plain back-link
/// that is never used to decide reachability.
pub struct Node<T, A> {
    pub key: T,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
    pub parent: Option<Handle>,
    pub data: A,
}

impl<T, A> Node<T, A>
where
    A: Augment,
{
    pub fn new(key: T, parent: Option<Handle>) -> Self {
        Node {
            key,
            left: None,
            right: None,
            parent,
            data: A::leaf(),
        }
    }
}

impl<T, A> Node<T, A> {
    pub fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut Option<Handle> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, Side};

    #[test]
    fn test_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }

    #[test]
    fn test_new_node_is_leaf() {
        let node: Node<u32, ()> = Node::new(3, None);
        assert!(node.is_leaf());
        assert_eq!(node.child(Side::Left), None);
        assert_eq!(node.parent, None);
    }
}
