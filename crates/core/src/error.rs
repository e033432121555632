use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur when building or evaluating nodes.
#[derive(Debug, Error)]
pub enum Error {
    /// A vector length, or a pair of wired dimensions, disagree.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A selection range does not fit inside its input.
    #[error("invalid selection {start}..={end} of an input with length {len}")]
    InvalidSelection {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    /// A type-erased context was handed to a node that did not produce it.
    #[error("solver context does not belong to this node")]
    ContextMismatch,

    /// A leaf node failed to solve its problem or to differentiate it.
    #[error("leaf solve failed: {0}")]
    LeafSolve(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    /// Wraps a leaf node's own error as a [`Error::LeafSolve`].
    pub fn leaf<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::LeafSolve(Box::new(err))
    }
}
