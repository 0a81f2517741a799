use std::cmp::Ordering;
use std::mem;

use tracing::{debug, trace};

use crate::balance::{restore, RebalanceRule};
use crate::node::{Link, Node};

/// An ordered dictionary of unique keys, kept height balanced as an AVL tree.
pub struct Tree<K: Ord> {
    pub(crate) root: Link<K>,
    pub(crate) num_nodes: usize,
    rule: RebalanceRule,
}

impl<K: Ord> Tree<K> {
    /// Creates an empty tree using the standard rebalancing rule.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self::with_rule(RebalanceRule::Standard)
    }

    /// Creates an empty tree that rebalances according to `rule`.
    pub fn with_rule(rule: RebalanceRule) -> Self {
        Self {
            root: None,
            num_nodes: 0,
            rule,
        }
    }

    /// Returns the rebalancing rule of this tree.
    pub fn rule(&self) -> RebalanceRule {
        self.rule
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single key.
    pub fn height(&self) -> usize {
        match &self.root {
            None => 0,
            Some(root) => root.height,
        }
    }

    /// Clears the tree, deallocating all nodes.
    pub fn clear(&mut self) {
        let released = Node::release(&mut self.root);
        if released > 0 {
            debug!(released, "cleared tree");
        }
        self.num_nodes = 0;
    }

    /// Returns a reference to the stored key that is equal to the given key.
    pub fn find(&self, key: &K) -> Option<&K> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(&node.key),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Returns true if the tree contains the given key.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Inserts a key into the tree.
    /// Returns false, leaving the tree unchanged, if an equal key is already present.
    pub fn insert(&mut self, key: K) -> bool {
        let inserted = insert_at(&mut self.root, key, self.rule);
        if inserted {
            self.num_nodes += 1;
            self.verify();
        }
        inserted
    }

    /// Removes a key from the tree.
    /// Returns whether the key was previously in the tree.
    pub fn remove(&mut self, key: &K) -> bool {
        let removed = remove_at(&mut self.root, key, self.rule);
        if removed {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
            self.verify();
        }
        removed
    }

    #[cfg(feature = "consistency_check")]
    fn verify(&self) {
        // The left-probe rule is allowed to leave nodes out of balance
        if self.rule == RebalanceRule::Standard {
            if let Err(err) = self.check_consistency() {
                panic!("inconsistent tree: {err}");
            }
        }
    }

    #[cfg(not(feature = "consistency_check"))]
    fn verify(&self) {}

    #[cfg(test)]
    pub(crate) fn inorder(&self) -> Vec<&K> {
        fn walk<'a, K>(link: &'a Link<K>, keys: &mut Vec<&'a K>) {
            if let Some(node) = link {
                walk(&node.left, keys);
                keys.push(&node.key);
                walk(&node.right, keys);
            }
        }
        let mut keys = Vec::with_capacity(self.num_nodes);
        walk(&self.root, &mut keys);
        keys
    }
}

impl<K: Ord> Drop for Tree<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Ord> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_at<K: Ord>(slot: &mut Link<K>, key: K, rule: RebalanceRule) -> bool {
    let inserted = match slot {
        None => {
            *slot = Some(Node::leaf(key));
            return true;
        }
        Some(node) => match key.cmp(&node.key) {
            Ordering::Less => insert_at(&mut node.left, key, rule),
            Ordering::Greater => insert_at(&mut node.right, key, rule),
            Ordering::Equal => false,
        },
    };
    if inserted {
        restore(slot, rule);
    }
    inserted
}

fn remove_at<K: Ord>(slot: &mut Link<K>, key: &K, rule: RebalanceRule) -> bool {
    let Some(node) = slot.as_mut() else {
        return false;
    };
    let removed = match key.cmp(&node.key) {
        Ordering::Less => remove_at(&mut node.left, key, rule),
        Ordering::Greater => remove_at(&mut node.right, key, rule),
        Ordering::Equal => {
            if node.left.is_some() && node.right.is_some() {
                trace!("removing node with two children");
                if let Some(successor) = take_min(&mut node.right, rule) {
                    node.key = successor;
                }
            } else {
                trace!(leaf = node.height == 1, "removing node with at most one child");
                splice(slot);
            }
            true
        }
    };
    if removed {
        restore(slot, rule);
    }
    removed
}

/// Detaches the smallest node of the subtree and returns its key.
fn take_min<K>(slot: &mut Link<K>, rule: RebalanceRule) -> Option<K> {
    let node = slot.as_mut()?;
    let min = if node.left.is_some() {
        take_min(&mut node.left, rule)
    } else {
        splice(slot)
    };
    restore(slot, rule);
    min
}

/// Detaches the node behind `slot`, which must have at most one child, and
/// returns its key. A surviving child moves its content into the slot and its
/// own allocation is released, so the parent's link stays untouched.
fn splice<K>(slot: &mut Link<K>) -> Option<K> {
    let node = slot.as_mut()?;
    debug_assert!(node.left.is_none() || node.right.is_none());
    match node.left.take().or_else(|| node.right.take()) {
        None => slot.take().map(|leaf| leaf.key),
        Some(child) => Some(mem::replace(&mut **node, *child).key),
    }
}
