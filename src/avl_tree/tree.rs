use crate::arena::Handle;
use crate::avl_tree::node::Balance;
use crate::bst::tree::Tree;
use log::debug;

pub type AvlTree<T> = Tree<T, Balance>;

// Walks from `start` to the root, refreshing heights and rotating wherever a node has become
// unbalanced. A single (or double) rotation fixes a node; the walk continues from whichever node
// ends up above it.
fn rebalance<T>(tree: &mut AvlTree<T>, start: Handle) {
    let mut curr = Some(start);
    while let Some(node) = curr {
        tree.refresh(node);
        let balance_factor = tree[node].data.balance_factor();

        if balance_factor > 1 {
            let child = tree[node].left.expect("Expected left-heavy node to have a left child.");
            if tree[child].data.balance_factor() < 0 {
                debug!("rebalancing left-right case at {:?}", node);
                tree.rotate_left(child);
            } else {
                debug!("rebalancing left-left case at {:?}", node);
            }
            tree.rotate_right(node);
        } else if balance_factor < -1 {
            let child = tree[node].right.expect("Expected right-heavy node to have a right child.");
            if tree[child].data.balance_factor() > 0 {
                debug!("rebalancing right-left case at {:?}", node);
                tree.rotate_right(child);
            } else {
                debug!("rebalancing right-right case at {:?}", node);
            }
            tree.rotate_left(node);
        }

        curr = tree[node].parent;
    }
}

pub fn insert<T>(tree: &mut AvlTree<T>, key: T) -> bool
where
    T: Ord,
{
    match tree.raw_insert(key) {
        Some(node) => {
            rebalance(tree, node);
            true
        },
        None => false,
    }
}

pub fn remove<T>(tree: &mut AvlTree<T>, key: &T) -> Option<T>
where
    T: Ord,
{
    let (key, removal) = tree.raw_delete(key)?;
    if let Some(anchor) = removal.anchor {
        rebalance(tree, anchor);
    }
    Some(key)
}

/// Returns `true` if every node is balanced and the tree is otherwise consistent.
pub fn is_balanced<T>(tree: &AvlTree<T>) -> bool
where
    T: Ord,
{
    tree.is_consistent()
        && tree
            .in_order_handles()
            .into_iter()
            .all(|handle| tree[handle].data.balance_factor().abs() <= 1)
}

#[cfg(test)]
mod tests {
    use super::{insert, is_balanced, remove, AvlTree};

    fn tree_from(keys: &[u32]) -> AvlTree<u32> {
        let mut tree = AvlTree::new(8);
        for key in keys {
            insert(&mut tree, *key);
            assert!(is_balanced(&tree));
        }
        tree
    }

    #[test]
    fn test_left_left() {
        let tree = tree_from(&[3, 2, 1]);
        assert_eq!(tree.pre_order(), vec![&2, &1, &3]);
    }

    #[test]
    fn test_right_right() {
        let tree = tree_from(&[10, 20, 30]);
        assert_eq!(tree.pre_order(), vec![&20, &10, &30]);
        assert_eq!(tree.in_order(), vec![&10, &20, &30]);
    }

    #[test]
    fn test_left_right() {
        let tree = tree_from(&[3, 1, 2]);
        assert_eq!(tree.pre_order(), vec![&2, &1, &3]);
    }

    #[test]
    fn test_right_left() {
        let tree = tree_from(&[1, 3, 2]);
        assert_eq!(tree.pre_order(), vec![&2, &1, &3]);
    }

    #[test]
    fn test_remove_rebalances_from_anchor() {
        //     3          3        2
        //    / \        /        / \
        //   2   4  ->  2    ->  1   3
        //  /          /
        // 1          1
        let mut tree = tree_from(&[3, 2, 4, 1]);
        assert_eq!(remove(&mut tree, &4), Some(4));
        assert_eq!(tree.pre_order(), vec![&2, &1, &3]);
        assert!(is_balanced(&tree));
    }

    #[test]
    fn test_remove_two_children_rebalances_at_successor_parent() {
        let mut tree = tree_from(&[5, 2, 8, 1, 3, 7, 9, 4]);
        assert_eq!(remove(&mut tree, &5), Some(5));
        assert_eq!(tree.root().map(|root| tree[root].key), Some(7));
        assert!(is_balanced(&tree));
        assert_eq!(remove(&mut tree, &7), Some(7));
        assert!(is_balanced(&tree));
        assert_eq!(tree.in_order(), vec![&1, &2, &3, &4, &8, &9]);
    }

    #[test]
    fn test_remove_missing() {
        let mut tree = tree_from(&[1, 2]);
        assert_eq!(remove(&mut tree, &3), None);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_heights_after_cascade() {
        let tree = tree_from(&(1..=15).collect::<Vec<u32>>());
        let root = tree.root().unwrap();
        assert_eq!(tree[root].key, 8);
        assert_eq!(tree[root].data.height(), 4);
        assert_eq!(tree[root].data.balance_factor(), 0);
    }
}
