use crate::bst::Augment;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// The color bookkeeping a red black tree keeps for every node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Coloring {
    pub(crate) color: Color,
    black_height: Option<usize>,
}

impl Coloring {
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Returns the number of black nodes on every path from this node down to an empty subtree,
    /// this node included, or `None` if the paths disagree.
    pub fn black_height(&self) -> Option<usize> {
        self.black_height
    }
}

impl Augment for Coloring {
    fn leaf() -> Self {
        Coloring {
            color: Color::Red,
            black_height: Some(0),
        }
    }

    fn refresh(&mut self, left: Option<&Self>, right: Option<&Self>) {
        let left_height = left.map_or(Some(0), |left| left.black_height);
        let right_height = right.map_or(Some(0), |right| right.black_height);
        self.black_height = match (left_height, right_height) {
            (Some(left_height), Some(right_height)) if left_height == right_height => {
                Some(left_height + if self.is_red() { 0 } else { 1 })
            },
            _ => None,
        };
    }

    fn fmt_details(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.black_height {
            Some(black_height) => write!(f, " ({}, black height: {})", self.color, black_height),
            None => write!(f, " ({}, black height: invalid)", self.color),
        }
    }
}
