/// Provides the budgeted best-first path tree builder.
///
/// You most likely want to start with [PathFinder](crate::algorithms::path_finder::PathFinder)
/// and one of the grids in [graphs](crate::graphs).
pub mod path_finder;

pub use path_finder::{PathFinder, PathSearchResults, SearchTree};
