use tracing::trace;

use crate::node::{balance, Link, Node};

/// Selects how a right-heavy node decides between a single and a double rotation.
///
/// Left-heavy nodes are handled identically by both rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RebalanceRule {
    /// A right-heavy node whose right child is left-heavy is resolved with a
    /// double rotation (right-left case). Keeps every node balanced.
    #[default]
    Standard,
    /// A right-heavy node probes its *left* child: if that child is left-heavy
    /// it is rotated right before the node is rotated left.
    ///
    /// This reproduces a known-faulty rebalancing scheme. Ordering and stored
    /// heights stay correct, but a right-left insertion such as `1, 3, 2`
    /// leaves the tree out of balance.
    LeftProbe,
}

/// Promotes the left child of `node` to subtree root.
/// Returns `node` unchanged if it has no left child.
pub(crate) fn rotate_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut left) = node.left.take() else {
        return node;
    };
    node.left = left.right.take();
    // Old root first: the new root's height depends on it
    node.update_height();
    left.right = Some(node);
    left.update_height();
    left
}

/// Promotes the right child of `node` to subtree root.
/// Returns `node` unchanged if it has no right child.
pub(crate) fn rotate_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut right) = node.right.take() else {
        return node;
    };
    node.right = right.left.take();
    node.update_height();
    right.left = Some(node);
    right.update_height();
    right
}

/// Restores the AVL condition at `node`, whose subtrees are already balanced
/// and whose height is current. Returns the new subtree root.
pub(crate) fn rebalance<K>(mut node: Box<Node<K>>, rule: RebalanceRule) -> Box<Node<K>> {
    let factor = node.balance();
    if factor > 1 {
        if balance(&node.left) < 0 {
            trace!(factor, "left-right case, double rotation");
            node.left = node.left.take().map(rotate_left);
        } else {
            trace!(factor, "left-left case, single rotation");
        }
        return rotate_right(node);
    }
    if factor < -1 {
        match rule {
            RebalanceRule::Standard => {
                if balance(&node.right) > 0 {
                    trace!(factor, "right-left case, double rotation");
                    node.right = node.right.take().map(rotate_right);
                } else {
                    trace!(factor, "right-right case, single rotation");
                }
            }
            RebalanceRule::LeftProbe => {
                if balance(&node.left) > 0 {
                    trace!(factor, "right-heavy, left child pre-rotated");
                    node.left = node.left.take().map(rotate_right);
                } else {
                    trace!(factor, "right-heavy, single rotation");
                }
            }
        }
        return rotate_left(node);
    }
    node
}

/// Refreshes the height of the node behind `slot` and rebalances it in place.
pub(crate) fn restore<K>(slot: &mut Link<K>, rule: RebalanceRule) {
    if let Some(mut node) = slot.take() {
        node.update_height();
        *slot = Some(rebalance(node, rule));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(keys: &[i32]) -> Box<Node<i32>> {
        // Left-leaning chain: keys[0] is the root, each next key its left child
        let mut link: Link<i32> = None;
        for key in keys.iter().rev() {
            let mut node = Node::leaf(*key);
            node.left = link;
            node.update_height();
            link = Some(node);
        }
        link.unwrap()
    }

    #[test]
    fn test_rotate_right() {
        let root = rotate_right(chain(&[3, 2, 1]));
        assert_eq!(root.key, 2);
        assert_eq!(root.height, 2);
        assert_eq!(root.left.as_ref().unwrap().key, 1);
        assert_eq!(root.right.as_ref().unwrap().key, 3);
        assert_eq!(root.right.as_ref().unwrap().height, 1);
    }

    #[test]
    fn test_rotate_without_child_is_noop() {
        let leaf = rotate_right(Node::leaf(7));
        assert_eq!(leaf.key, 7);
        assert_eq!(leaf.height, 1);

        let root = rotate_left(chain(&[2, 1]));
        assert_eq!(root.key, 2);
        assert_eq!(root.height, 2);
        assert!(root.right.is_none());
    }

    #[test]
    fn test_rotate_left_moves_inner_subtree() {
        //   1          3
        //    \        /
        //     3  ->  1
        //    /        \
        //   2          2
        let mut root = Node::leaf(1);
        let mut right = Node::leaf(3);
        right.left = Some(Node::leaf(2));
        right.update_height();
        root.right = Some(right);
        root.update_height();

        let root = rotate_left(root);
        assert_eq!(root.key, 3);
        let left = root.left.as_ref().unwrap();
        assert_eq!(left.key, 1);
        assert_eq!(left.right.as_ref().unwrap().key, 2);
        assert_eq!(left.height, 2);
        assert_eq!(root.height, 3);
    }

    #[test]
    fn test_rebalance_balanced_node_is_unchanged() {
        let mut root = Node::leaf(2);
        root.left = Some(Node::leaf(1));
        root.update_height();
        let root = rebalance(root, RebalanceRule::Standard);
        assert_eq!(root.key, 2);
        assert_eq!(root.height, 2);
    }
}
