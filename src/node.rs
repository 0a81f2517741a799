use std::cmp;

pub(crate) type Link<K> = Option<Box<Node<K>>>;

pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
    pub(crate) height: usize,
}

impl<K> Node<K> {
    /// Creates a detached leaf node of height 1.
    pub(crate) fn leaf(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// Recomputes the height from the stored heights of both children.
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    pub(crate) fn balance(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Releases every node of the subtree in post order.
    /// Returns the number of released nodes.
    pub(crate) fn release(link: &mut Link<K>) -> usize {
        match link.take() {
            None => 0,
            Some(mut node) => {
                let released = Self::release(&mut node.left) + Self::release(&mut node.right);
                drop(node);
                released + 1
            }
        }
    }
}

/// Height of the subtree behind the link, 0 for an absent subtree.
pub(crate) fn height<K>(link: &Link<K>) -> usize {
    match link {
        None => 0,
        Some(node) => node.height,
    }
}

/// Balance factor: left subtree height minus right subtree height.
pub(crate) fn balance<K>(link: &Link<K>) -> isize {
    match link {
        None => 0,
        Some(node) => node.balance(),
    }
}
