use crate::error::{Error, Result};
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The order in which a traversal visits the nodes of a tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    Pre,
    /// Left subtree, then node, then right subtree. Yields keys in ascending order.
    In,
    /// Left subtree, then right subtree, then node.
    Post,
}

impl Order {
    pub const ALL: [Order; 3] = [Order::Pre, Order::In, Order::Post];

    pub fn as_str(self) -> &'static str {
        match self {
            Order::Pre => "pre",
            Order::In => "in",
            Order::Post => "post",
        }
    }
}

impl FromStr for Order {
    type Err = Error;

    /// Parses one of `"pre"`, `"in"` or `"post"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::bst::Order;
    /// use balanced_trees::Error;
    ///
    /// assert_eq!("in".parse::<Order>(), Ok(Order::In));
    /// assert!(match "mid".parse::<Order>() {
    ///     Err(Error::InvalidArgument(_)) => true,
    ///     _ => false,
    /// });
    /// ```
    fn from_str(kind: &str) -> Result<Self> {
        match kind {
            "pre" => Ok(Order::Pre),
            "in" => Ok(Order::In),
            "post" => Ok(Order::Post),
            _ => Err(Error::InvalidArgument(format!(
                "unknown traversal `{}`, expected one of `pre`, `in` or `post`",
                kind,
            ))),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
