//! Errors returned by [`OrderedTree`][crate::OrderedTree] operations whose preconditions the caller
//! can violate.
//!
//! Missing keys and duplicate inserts are expected outcomes and are reported through `Option` and
//! `bool` return values instead.

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An operation that needs at least one node was called on an empty tree.
    #[error("`{op}` called on an empty tree")]
    EmptyTree {
        /// Name of the operation, e.g. `"min"`.
        op: &'static str,
    },
}
