/// Error taxonomy shared across the crate
pub mod error;

/// Graph model traits any concrete graph must implement
pub mod traits;

pub use error::{PathError, Result};
pub use traits::{Edge, Graph, Node, SearchContext};
