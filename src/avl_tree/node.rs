use crate::bst::Augment;
use std::cmp;
use std::fmt;

/// The height bookkeeping an avl tree keeps for every node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Balance {
    height: usize,
    balance_factor: isize,
}

impl Balance {
    /// Returns the number of nodes on the longest path from this node down to a leaf.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the height of the left subtree minus the height of the right subtree.
    pub fn balance_factor(&self) -> isize {
        self.balance_factor
    }
}

impl Augment for Balance {
    fn leaf() -> Self {
        Balance {
            height: 1,
            balance_factor: 0,
        }
    }

    fn refresh(&mut self, left: Option<&Self>, right: Option<&Self>) {
        let left_height = left.map_or(0, |left| left.height);
        let right_height = right.map_or(0, |right| right.height);
        self.height = cmp::max(left_height, right_height) + 1;
        self.balance_factor = left_height as isize - right_height as isize;
    }

    fn fmt_details(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, " (height: {}, balance: {})", self.height, self.balance_factor)
    }
}
