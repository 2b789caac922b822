use serde::{Deserialize, Serialize};

use crate::common::error::Result;
use crate::graphs::positional::PositionalNode;

/// Steering term added to a positional edge's cost when the search has a destination.
///
/// The term is evaluated at every edge's end node and summed along the path,
/// so the larger it is relative to edge lengths, the greedier the search.
/// It never touches the search cost, which keeps the budget a plain distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationBias {
    /// No steering; the cost is the edge length alone.
    None,
    /// Euclidean distance from the edge end to the destination.
    Distance,
    /// Squared Euclidean distance from the edge end to the destination.
    #[default]
    SquaredDistance,
}

impl DestinationBias {
    /// The bias for arriving at `node` while heading for `destination`.
    ///
    /// Returns an error if the nodes have different dimensionality.
    ///
    /// # Examples
    /// ```rust
    /// use pathtree::graphs::PositionalNode;
    /// use pathtree::utils::heuristics::DestinationBias;
    ///
    /// let node = PositionalNode::new_2d(1.0, 1.0, 2);
    /// let goal = PositionalNode::new_2d(4.0, 5.0, 2);
    /// assert_eq!(DestinationBias::Distance.evaluate(&node, &goal).unwrap(), 5.0);
    /// assert_eq!(DestinationBias::SquaredDistance.evaluate(&node, &goal).unwrap(), 25.0);
    /// ```
    pub fn evaluate(&self, node: &PositionalNode, destination: &PositionalNode) -> Result<f64> {
        match self {
            DestinationBias::None => Ok(0.0),
            DestinationBias::Distance => node.distance_to(destination),
            DestinationBias::SquaredDistance => node.squared_distance_to(destination),
        }
    }
}
