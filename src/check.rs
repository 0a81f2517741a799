use std::cmp;

use thiserror::Error;

use crate::node::{height, Link};
use crate::tree::Tree;

/// A violated tree invariant, as reported by [`Tree::check_consistency`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("key ordering violated")]
    OutOfOrder,
    #[error("stored height {stored} differs from computed height {computed}")]
    StaleHeight { stored: usize, computed: usize },
    #[error("subtree heights {left} and {right} differ by more than one")]
    Unbalanced { left: usize, right: usize },
    #[error("counted {counted} nodes, but {recorded} are recorded")]
    LengthMismatch { counted: usize, recorded: usize },
}

impl<K: Ord> Tree<K> {
    /// Walks the whole tree and verifies key ordering, stored heights, the AVL
    /// condition and the recorded number of keys.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let counted = check_subtree(&self.root, None, None)?;
        if counted != self.num_nodes {
            return Err(ConsistencyError::LengthMismatch {
                counted,
                recorded: self.num_nodes,
            });
        }
        Ok(())
    }
}

// Keys of the subtree must lie strictly between `lower` and `upper`.
fn check_subtree<K: Ord>(
    link: &Link<K>,
    lower: Option<&K>,
    upper: Option<&K>,
) -> Result<usize, ConsistencyError> {
    let Some(node) = link else {
        return Ok(0);
    };
    if lower.is_some_and(|lower| node.key <= *lower) || upper.is_some_and(|upper| node.key >= *upper)
    {
        return Err(ConsistencyError::OutOfOrder);
    }

    let left_count = check_subtree(&node.left, lower, Some(&node.key))?;
    let right_count = check_subtree(&node.right, Some(&node.key), upper)?;

    let left = height(&node.left);
    let right = height(&node.right);
    let computed = 1 + cmp::max(left, right);
    if node.height != computed {
        return Err(ConsistencyError::StaleHeight {
            stored: node.height,
            computed,
        });
    }
    if left.abs_diff(right) > 1 {
        return Err(ConsistencyError::Unbalanced { left, right });
    }

    Ok(left_count + right_count + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn three_keys() -> Tree<i32> {
        let mut tree = Tree::new();
        for key in [2, 1, 3] {
            tree.insert(key);
        }
        tree
    }

    #[test]
    fn test_consistent() {
        assert_eq!(Tree::<i32>::new().check_consistency(), Ok(()));
        assert_eq!(three_keys().check_consistency(), Ok(()));
    }

    #[test]
    fn test_out_of_order() {
        let mut tree = three_keys();
        tree.root.as_mut().unwrap().key = 0;
        assert_eq!(tree.check_consistency(), Err(ConsistencyError::OutOfOrder));
    }

    #[test]
    fn test_out_of_order_below_grandparent() {
        //     4
        //    /
        //   2
        //    \
        //     5   (greater than the root)
        let mut tree = Tree::new();
        for key in [4, 2, 6, 3] {
            tree.insert(key);
        }
        let root = tree.root.as_mut().unwrap();
        root.left.as_mut().unwrap().right.as_mut().unwrap().key = 5;
        assert_eq!(tree.check_consistency(), Err(ConsistencyError::OutOfOrder));
    }

    #[test]
    fn test_stale_height() {
        let mut tree = three_keys();
        tree.root.as_mut().unwrap().height = 5;
        assert_eq!(
            tree.check_consistency(),
            Err(ConsistencyError::StaleHeight {
                stored: 5,
                computed: 2
            })
        );
    }

    #[test]
    fn test_unbalanced() {
        // 1
        //  \
        //   2
        //    \
        //     3
        let mut middle = Node::leaf(2);
        middle.right = Some(Node::leaf(3));
        middle.update_height();
        let mut root = Node::leaf(1);
        root.right = Some(middle);
        root.update_height();

        let mut tree = Tree::new();
        tree.root = Some(root);
        tree.num_nodes = 3;
        assert_eq!(
            tree.check_consistency(),
            Err(ConsistencyError::Unbalanced { left: 0, right: 2 })
        );
    }

    #[test]
    fn test_length_mismatch() {
        let mut tree = three_keys();
        tree.num_nodes = 4;
        let err = tree.check_consistency().unwrap_err();
        assert_eq!(
            err,
            ConsistencyError::LengthMismatch {
                counted: 3,
                recorded: 4
            }
        );
        assert_eq!(err.to_string(), "counted 3 nodes, but 4 are recorded");
    }
}
