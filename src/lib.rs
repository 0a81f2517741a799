//! An ordered dictionary of unique keys implemented with an AVL tree.
//!
//! Every insertion and removal restores the AVL condition on the way back up
//! from the modified position, so the heights of the two subtrees of any node
//! differ by at most one and lookups, insertions and removals take
//! logarithmic time.
//!
//! ```
//! use avl_dict::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.find(&4), Some(&4));
//! assert!(!tree.insert(4));
//!
//! tree.remove(&5);
//! assert!(tree.find(&5).is_none());
//! assert_eq!(tree.len(), 6);
//! assert!(tree.check_consistency().is_ok());
//! ```
//!
//! Enable the `consistency_check` feature to verify all invariants after every
//! modification. Rebalancing decisions are emitted as `tracing` events at
//! trace level.

mod balance;
mod check;
mod node;
mod tree;

pub use balance::RebalanceRule;
pub use check::ConsistencyError;
pub use tree::Tree;
