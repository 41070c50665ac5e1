mod arena;
mod balance;
mod handle;
mod node;
mod query;
mod raw_wb_tree;
mod rotation;
mod size;
mod traversal;

pub(crate) use node::Side;
pub(crate) use raw_wb_tree::RawWBTree;
pub(crate) use traversal::{LevelOrder, PostOrder, PreOrder, Sorted};
