//! Weight-balanced order-statistic trees and the collections built on them.
//!
//! The centrepiece is [`WBTree`], a binary search tree that keeps every node's
//! left and right subtree populations cached and uses them twice over: to keep
//! the tree weight-balanced (no subtree may outweigh its sibling by more than a
//! fixed factor) and to answer rank questions in O(log n):
//!
//! - [`count_less_than`](WBTree::count_less_than) / [`count_greater_than`](WBTree::count_greater_than)
//! - [`next_less_than`](WBTree::next_less_than) / [`next_greater_than`](WBTree::next_greater_than)
//! - [`get_by_rank`](WBTree::get_by_rank) / [`rank_of`](WBTree::rank_of), and indexing by [`Rank`]
//! - [`random_item_with`](WBTree::random_item_with) - uniform sampling using subtree counts as weights
//!
//! # Example
//!
//! ```
//! use wabi_toolkit::{Rank, WBTree};
//!
//! let mut tree = WBTree::new();
//! for item in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(item).unwrap();
//! }
//!
//! assert_eq!(tree.min(), Ok(&1));
//! assert_eq!(tree.max(), Ok(&9));
//! assert_eq!(tree.count_less_than(&7), 4);
//! assert_eq!(tree.next_greater_than(&4), Some(&5));
//! assert_eq!(tree[Rank(3)], 5);
//!
//! let sorted: Vec<_> = tree.iter().copied().collect();
//! assert_eq!(sorted, [1, 3, 4, 5, 7, 8, 9]);
//! ```
//!
//! # Collections
//!
//! - [`PriorityQueue`] - a double-ended priority queue over a `WBTree`.
//! - [`WeightedRandom`] - weighted sampling over the cumulative weight line.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`.
//! - **`std`** (default) - Adds sampling helpers that use the thread-local RNG.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod priority_queue;
pub mod wb_tree;
pub mod weighted_random;

pub use error::{Error, Result};
pub use order_statistic::Rank;
pub use priority_queue::PriorityQueue;
pub use wb_tree::{DepthFirstOrder, Keyed, WBTree};
pub use weighted_random::WeightedRandom;
