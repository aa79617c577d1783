//! Unbalanced binary search tree shared by every balancing discipline in this crate.
//!
//! Nodes live in an arena and are linked by handles: `left` and `right` describe the tree
//! structure while `parent` is a plain back-link. A discipline attaches its own per-node
//! bookkeeping through the `Augment` trait and restores its invariants after the raw insertion and
//! deletion with rotations.

mod node;
mod order;
mod set;
pub(crate) mod tree;

pub use self::node::{Augment, Side};
pub use self::order::Order;
pub use self::set::BstSet;
pub use self::tree::{Iter, NodeRef};
