/// Coordinate-vector nodes and Euclidean edges
pub mod positional;

/// Unbounded 2D lattice with optional diagonal connectivity
pub mod rectangular;

/// Region-bounded lattice with optional toroidal wrap
pub mod limited;

pub use limited::{AxisRegion, LimitedRectangularGrid};
pub use positional::{PositionalEdge, PositionalNode, MAX_DECIMAL_PLACES};
pub use rectangular::RectangularGrid;
