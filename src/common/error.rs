use thiserror::Error;

/// Errors raised by the graph model, the priority queue, and the path finder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Arguments that can never be valid, e.g. mismatched collection lengths
    /// or coordinates of different dimensionality.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested item is not present in the priority queue.
    #[error("item not found in priority queue")]
    ItemNotFound,

    /// The operation is not valid for the current configuration.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A node could not be reached within the search budget.
    #[error("not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, PathError>;
