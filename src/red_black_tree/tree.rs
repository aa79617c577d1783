use crate::arena::Handle;
use crate::bst::tree::{Removal, Tree};
use crate::bst::Side;
use crate::red_black_tree::node::{Color, Coloring};
use log::debug;
use std::collections::HashSet;

pub type RedBlackTree<T> = Tree<T, Coloring>;

pub fn is_red<T>(tree: &RedBlackTree<T>, node: Option<Handle>) -> bool {
    node.map_or(false, |node| tree[node].data.is_red())
}

// A fix-up in progress. Every node that is recolored or used as a rotation pivot is recorded, and
// `finish` recomputes the black-heights of those nodes and their ancestors.
struct Fixup<'a, T> {
    tree: &'a mut RedBlackTree<T>,
    touched: Vec<Handle>,
}

impl<'a, T> Fixup<'a, T> {
    fn new(tree: &'a mut RedBlackTree<T>) -> Self {
        Fixup {
            tree,
            touched: Vec::new(),
        }
    }

    fn is_red(&self, node: Option<Handle>) -> bool {
        is_red(self.tree, node)
    }

    fn paint(&mut self, node: Handle, color: Color) {
        self.tree[node].data.color = color;
        self.touched.push(node);
    }

    fn rotate(&mut self, pivot: Handle, direction: Side) {
        self.tree.rotate(pivot, direction);
        self.touched.push(pivot);
    }

    fn after_insert(&mut self, mut node: Handle) {
        while let Some(parent) = self.tree[node].parent {
            if !self.is_red(Some(parent)) {
                break;
            }

            let grandparent = self.tree[parent]
                .parent
                .expect("Expected red node to have a parent.");
            let parent_side = self
                .tree
                .side_of(parent)
                .expect("Expected red node to have a parent.");
            let uncle = self.tree[grandparent].child(parent_side.opposite());

            if let Some(uncle) = uncle.filter(|&uncle| self.tree[uncle].data.is_red()) {
                debug!("insert fix-up: red uncle, recoloring below {:?}", grandparent);
                self.paint(parent, Color::Black);
                self.paint(uncle, Color::Black);
                self.paint(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.tree.side_of(node) != Some(parent_side) {
                debug!("insert fix-up: straightening zig-zag at {:?}", parent);
                self.rotate(parent, parent_side);
                parent = node;
            }

            debug!("insert fix-up: black uncle, rotating at {:?}", grandparent);
            self.paint(parent, Color::Black);
            self.paint(grandparent, Color::Red);
            self.rotate(grandparent, parent_side.opposite());
            break;
        }
    }

    // The subtree in the `side` slot of `parent` (possibly empty) is one black node short of its
    // sibling.
    fn after_remove(&mut self, mut parent: Handle, mut side: Side) {
        loop {
            let mut sibling = self.tree[parent]
                .child(side.opposite())
                .expect("Expected black-deficient subtree to have a sibling.");

            if self.is_red(Some(sibling)) {
                debug!("remove fix-up: red sibling, rotating at {:?}", parent);
                self.paint(sibling, Color::Black);
                self.paint(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.tree[parent]
                    .child(side.opposite())
                    .expect("Expected red sibling to have black children.");
            }

            let near = self.tree[sibling].child(side);
            let far = self.tree[sibling].child(side.opposite());

            if !self.is_red(near) && !self.is_red(far) {
                debug!("remove fix-up: black nephews, moving deficiency above {:?}", parent);
                self.paint(sibling, Color::Red);
                let grandparent = self.tree[parent].parent;
                match grandparent {
                    Some(grandparent) if !self.is_red(Some(parent)) => {
                        side = self
                            .tree
                            .side_of(parent)
                            .expect("Expected non-root node to have a side.");
                        parent = grandparent;
                    },
                    _ => {
                        self.paint(parent, Color::Black);
                        return;
                    },
                }
                continue;
            }

            if !self.is_red(far) {
                debug!("remove fix-up: red near nephew, rotating at {:?}", sibling);
                let near = near.expect("Expected red near nephew.");
                self.paint(near, Color::Black);
                self.paint(sibling, Color::Red);
                self.rotate(sibling, side.opposite());
                sibling = near;
            }

            debug!("remove fix-up: red far nephew, rotating at {:?}", parent);
            let parent_color = self.tree[parent].data.color();
            self.paint(sibling, parent_color);
            self.paint(parent, Color::Black);
            if let Some(far) = self.tree[sibling].child(side.opposite()) {
                self.paint(far, Color::Black);
            }
            self.rotate(parent, side);
            return;
        }
    }

    // The touched nodes and their ancestors form a subtree hanging from the root. Refreshing it in
    // post-order visits each of its nodes once, after all of its touched descendants.
    fn finish(self) {
        let Fixup { tree, touched } = self;
        let root = match tree.root() {
            Some(root) => root,
            None => return,
        };
        tree[root].data.color = Color::Black;

        let mut stale = HashSet::new();
        stale.insert(root);
        for node in touched {
            let mut current = Some(node);
            while let Some(node) = current {
                if !stale.insert(node) {
                    break;
                }
                current = tree[node].parent;
            }
        }

        let mut stack = vec![(root, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                tree.refresh(node);
                continue;
            }
            stack.push((node, true));
            for child in tree[node].left.into_iter().chain(tree[node].right) {
                if stale.contains(&child) {
                    stack.push((child, false));
                }
            }
        }
    }
}

pub fn insert<T>(tree: &mut RedBlackTree<T>, key: T) -> bool
where
    T: Ord,
{
    match tree.raw_insert(key) {
        Some(node) => {
            let mut fixup = Fixup::new(tree);
            fixup.after_insert(node);
            fixup.finish();
            true
        },
        None => false,
    }
}

pub fn remove<T>(tree: &mut RedBlackTree<T>, key: &T) -> Option<T>
where
    T: Ord,
{
    let (key, removal) = tree.raw_delete(key)?;
    let Removal {
        anchor,
        side,
        child,
        data,
    } = removal;

    let mut fixup = Fixup::new(tree);
    if let Some(anchor) = anchor {
        fixup.touched.push(anchor);
    }

    if data.color() == Color::Black {
        match (child, anchor, side) {
            (Some(child), _, _) if fixup.is_red(Some(child)) => fixup.paint(child, Color::Black),
            (_, Some(anchor), Some(side)) => fixup.after_remove(anchor, side),
            _ => {},
        }
    }

    fixup.finish();
    Some(key)
}

fn has_red_violation<T>(tree: &RedBlackTree<T>, node: Option<Handle>) -> bool {
    match node {
        None => false,
        Some(node) => {
            let current = &tree[node];
            (current.data.is_red() && (is_red(tree, current.left) || is_red(tree, current.right)))
                || has_red_violation(tree, current.left)
                || has_red_violation(tree, current.right)
        },
    }
}

fn black_height<T>(tree: &RedBlackTree<T>, node: Option<Handle>) -> Option<usize> {
    match node {
        None => Some(0),
        Some(node) => {
            let left_height = black_height(tree, tree[node].left)?;
            let right_height = black_height(tree, tree[node].right)?;
            if left_height != right_height {
                return None;
            }
            Some(left_height + if tree[node].data.is_red() { 0 } else { 1 })
        },
    }
}

/// Returns `true` if the root is black, no red node has a red child and every path from the root
/// to an empty subtree crosses the same number of black nodes.
pub fn validate<T>(tree: &RedBlackTree<T>) -> bool {
    let root = match tree.root() {
        Some(root) => root,
        None => return true,
    };
    !tree[root].data.is_red()
        && !has_red_violation(tree, Some(root))
        && black_height(tree, Some(root)).is_some()
}
