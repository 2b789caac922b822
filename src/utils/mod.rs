/// Destination steering terms for positional edges
pub mod heuristics;

/// Helpers for working with reconstructed paths
pub mod pathing;

pub use heuristics::DestinationBias;
