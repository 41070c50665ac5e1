use thiserror::Error;

/// Errors reported by the collections in this crate.
///
/// Every error is raised synchronously at the point of violation and leaves
/// the collection exactly as it was before the call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// An argument broke the operation's contract, e.g. unsorted input to
    /// [`WBTree::from_sorted`](crate::WBTree::from_sorted) or a zero weight.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// An item comparing equal to the inserted one is already stored.
    #[error("an equal item is already present")]
    DuplicateItem,
    /// No stored item compares equal to the requested one.
    #[error("item not found")]
    ItemNotFound,
    /// The operation needs at least one stored item.
    #[error("collection is empty")]
    EmptyCollection,
}

/// A `Result` defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
