/// Provides common definitions used across the crate
pub mod common;

/// Provides the data structures backing the search
pub mod data_structures;

/// Provides individual algorithm implementations
pub mod algorithms;

/// Provides concrete graphs, starting with 2D lattices
pub mod graphs;

/// Provides helper methods to simplify using algorithms
pub mod utils;
