//! Ordered key sets backed by binary search trees.
//!
//! `bst::BstSet` is the unbalanced foundation; `avl_tree::AvlSet` and
//! `red_black_tree::RedBlackSet` rebalance it after every insertion and removal. All three share
//! one engine that keeps nodes in a `arena::TypedArena` and links them with handles.
//!
//! # Examples
//!
//! ```
//! use balanced_trees::avl_tree::AvlSet;
//! use balanced_trees::bst::Order;
//!
//! let mut set = AvlSet::new();
//! set.insert(3);
//! set.insert(1);
//! set.insert(2);
//!
//! assert_eq!(set.show(Order::Pre), vec![&2, &1, &3]);
//! assert!(set.show_str("sideways").is_err());
//! ```

pub mod arena;
pub mod avl_tree;
pub mod bst;
mod error;
pub mod red_black_tree;

pub use crate::error::{Error, Result};
