use log::warn;
use serde::{Deserialize, Serialize};

use crate::common::error::{PathError, Result};
use crate::common::traits::Graph;
use crate::graphs::positional::{PositionalEdge, PositionalNode, MAX_DECIMAL_PLACES};
use crate::utils::heuristics::DestinationBias;

const ORTHOGONAL_STEPS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// An unbounded lattice over the first two coordinates of [PositionalNode]s.
///
/// Each node connects to its 4 orthogonal neighbors, or to all 8 surrounding
/// neighbors when diagonals are included, one spacing step away on each axis.
/// A node never connects to itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RectangularGridSettings")]
pub struct RectangularGrid {
    spacing_x: f64,
    spacing_y: f64,
    include_diagonals: bool,
    decimal_places: u32,
    bias: DestinationBias,
}

#[derive(Deserialize)]
struct RectangularGridSettings {
    spacing_x: f64,
    spacing_y: f64,
    #[serde(default)]
    include_diagonals: bool,
    decimal_places: u32,
    #[serde(default)]
    bias: DestinationBias,
}

impl TryFrom<RectangularGridSettings> for RectangularGrid {
    type Error = PathError;

    fn try_from(settings: RectangularGridSettings) -> Result<Self> {
        Ok(Self::new(
            settings.spacing_x,
            settings.spacing_y,
            settings.include_diagonals,
            settings.decimal_places,
        )?
        .with_bias(settings.bias))
    }
}

impl Default for RectangularGrid {
    fn default() -> Self {
        Self {
            spacing_x: 1.0,
            spacing_y: 1.0,
            include_diagonals: false,
            decimal_places: 2,
            bias: DestinationBias::default(),
        }
    }
}

impl RectangularGrid {
    /// Creates a grid with the default [DestinationBias].
    ///
    /// Returns an error if either spacing is not a positive, finite number, or
    /// if `decimal_places` exceeds [MAX_DECIMAL_PLACES].
    pub fn new(spacing_x: f64, spacing_y: f64, include_diagonals: bool, decimal_places: u32) -> Result<Self> {
        for (axis, spacing) in [("x", spacing_x), ("y", spacing_y)] {
            if !(spacing.is_finite() && spacing > 0.0) {
                warn!("rejecting grid spacing {} on the {} axis", spacing, axis);
                return Err(PathError::InvalidArgument(format!(
                    "grid spacing on the {} axis must be positive and finite, got {}",
                    axis, spacing
                )));
            }
        }

        if decimal_places > MAX_DECIMAL_PLACES {
            warn!("rejecting {} decimal places for grid nodes", decimal_places);
            return Err(PathError::InvalidArgument(format!(
                "grid nodes can be rounded to at most {} decimal places, got {}",
                MAX_DECIMAL_PLACES, decimal_places
            )));
        }

        Ok(Self {
            spacing_x,
            spacing_y,
            include_diagonals,
            decimal_places,
            bias: DestinationBias::default(),
        })
    }

    /// Replaces the steering term used by this grid's edges.
    pub fn with_bias(mut self, bias: DestinationBias) -> Self {
        self.bias = bias;
        self
    }

    pub fn spacing_x(&self) -> f64 {
        self.spacing_x
    }

    pub fn spacing_y(&self) -> f64 {
        self.spacing_y
    }

    pub fn include_diagonals(&self) -> bool {
        self.include_diagonals
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    pub fn bias(&self) -> DestinationBias {
        self.bias
    }

    /// Builds a node at `(x, y)` rounded the way this grid rounds.
    pub fn node(&self, x: f64, y: f64) -> PositionalNode {
        PositionalNode::new_2d(x, y, self.decimal_places)
    }

    /// Lattice steps, in whole spacing units, taken from every node.
    fn steps(&self) -> Vec<(i64, i64)> {
        if !self.include_diagonals {
            return ORTHOGONAL_STEPS.to_vec();
        }

        let mut steps = Vec::with_capacity(8);
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                steps.push((dx, dy));
            }
        }
        steps
    }

    /// The node `(dx, dy)` lattice steps away from `node`.
    pub(crate) fn step(&self, node: &PositionalNode, dx: i64, dy: i64) -> Result<PositionalNode> {
        node.translated(&[dx as f64 * self.spacing_x, dy as f64 * self.spacing_y])
    }
}

fn require_planar(node: &PositionalNode) -> Result<()> {
    if node.dimensions() < 2 {
        return Err(PathError::InvalidArgument(format!(
            "grid nodes need at least 2 coordinates, got {}",
            node.dimensions()
        )));
    }
    Ok(())
}

/// Offsets on the square ring `radius` steps out from the origin, radius 0 being the origin itself.
fn ring_offsets(radius: i64) -> Vec<(i64, i64)> {
    if radius == 0 {
        return vec![(0, 0)];
    }

    let mut offsets = Vec::with_capacity(8 * radius as usize);
    for dx in -radius..=radius {
        offsets.push((dx, -radius));
        offsets.push((dx, radius));
    }
    for dy in (-radius + 1)..radius {
        offsets.push((-radius, dy));
        offsets.push((radius, dy));
    }
    offsets
}

impl Graph for RectangularGrid {
    type Node = PositionalNode;
    type Edge = PositionalEdge;

    fn connections(&self, node: &PositionalNode) -> Result<Vec<PositionalEdge>> {
        require_planar(node)?;

        self.steps()
            .into_iter()
            .map(|(dx, dy)| {
                let end = self.step(node, dx, dy)?;
                PositionalEdge::new(node.clone(), end, self.bias)
            })
            .collect()
    }

    /// Walks outward in square rings around `node`; the sequence never ends.
    ///
    /// # Examples
    /// ```rust
    /// use pathtree::common::Graph;
    /// use pathtree::graphs::RectangularGrid;
    ///
    /// let grid = RectangularGrid::default();
    /// let origin = grid.node(0.0, 0.0);
    /// let first_ring: Vec<_> = grid.all_nodes(&origin).take(9).collect();
    /// assert_eq!(first_ring[0], origin);
    /// assert!(first_ring.contains(&grid.node(-1.0, 1.0)));
    /// ```
    fn all_nodes<'a>(&'a self, node: &PositionalNode) -> Box<dyn Iterator<Item = PositionalNode> + 'a> {
        let origin = node.clone();
        Box::new((0i64..).flat_map(move |radius| {
            let origin = origin.clone();
            ring_offsets(radius)
                .into_iter()
                .filter_map(move |(dx, dy)| self.step(&origin, dx, dy).ok())
        }))
    }

    fn edge_between(&self, start: &PositionalNode, end: &PositionalNode) -> Result<PositionalEdge> {
        PositionalEdge::new(start.clone(), end.clone(), self.bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::traits::Edge;
    use std::collections::HashSet;

    fn ends(grid: &RectangularGrid, node: &PositionalNode) -> Vec<PositionalNode> {
        grid.connections(node)
            .unwrap()
            .into_iter()
            .map(|edge| edge.end().clone())
            .collect()
    }

    #[test]
    fn orthogonal_grid_yields_four_neighbors() {
        let grid = RectangularGrid::new(1.0, 1.0, false, 2).unwrap();
        let found: HashSet<_> = ends(&grid, &grid.node(0.0, 0.0)).into_iter().collect();
        let expected: HashSet<_> = [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)]
            .into_iter()
            .map(|(x, y)| grid.node(x, y))
            .collect();

        assert_eq!(found, expected);
    }

    #[test]
    fn diagonal_grid_yields_eight_neighbors_without_self() {
        let grid = RectangularGrid::new(2.0, 0.5, true, 2).unwrap();
        let origin = grid.node(1.0, 1.0);
        let found = ends(&grid, &origin);

        assert_eq!(found.len(), 8);
        assert!(!found.contains(&origin));
        assert!(found.contains(&grid.node(3.0, 1.5)));
        assert!(found.contains(&grid.node(-1.0, 0.5)));
        assert_eq!(found.iter().collect::<HashSet<_>>().len(), 8);
    }

    #[test]
    fn diagonal_edges_are_longer() {
        let grid = RectangularGrid::new(3.0, 4.0, true, 2).unwrap();
        let lengths: Vec<f64> = grid
            .connections(&grid.node(0.0, 0.0))
            .unwrap()
            .iter()
            .map(|edge| edge.length())
            .collect();

        assert!(lengths.contains(&5.0));
        assert!(lengths.contains(&3.0));
        assert!(lengths.contains(&4.0));
    }

    #[test]
    fn connections_are_deterministic() {
        let grid = RectangularGrid::new(1.0, 1.0, true, 2).unwrap();
        let node = grid.node(5.0, -2.0);
        assert_eq!(ends(&grid, &node), ends(&grid, &node));
    }

    #[test]
    fn invalid_spacing_is_rejected() {
        assert!(RectangularGrid::new(0.0, 1.0, false, 2).is_err());
        assert!(RectangularGrid::new(1.0, -1.0, false, 2).is_err());
        assert!(RectangularGrid::new(f64::NAN, 1.0, false, 2).is_err());
    }

    #[test]
    fn excess_decimal_places_are_rejected() {
        assert!(RectangularGrid::new(1.0, 1.0, false, MAX_DECIMAL_PLACES).is_ok());
        assert!(matches!(
            RectangularGrid::new(1.0, 1.0, false, 400),
            Err(PathError::InvalidArgument(_))
        ));

        let bad = serde_json::from_str::<RectangularGrid>(r#"{"spacing_x":1,"spacing_y":1,"decimal_places":16}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn one_dimensional_nodes_are_rejected() {
        let grid = RectangularGrid::default();
        assert!(grid.connections(&PositionalNode::new(vec![0.0], 2)).is_err());
    }

    #[test]
    fn all_nodes_walks_rings_and_restarts() {
        let grid = RectangularGrid::default();
        let origin = grid.node(0.0, 0.0);

        let first: Vec<_> = grid.all_nodes(&origin).take(25).collect();
        let unique: HashSet<_> = first.iter().cloned().collect();
        assert_eq!(unique.len(), 25);
        for x in -2..=2 {
            for y in -2..=2 {
                assert!(unique.contains(&grid.node(x as f64, y as f64)));
            }
        }

        let again: Vec<_> = grid.all_nodes(&origin).take(25).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn loads_from_settings() {
        let grid: RectangularGrid =
            serde_json::from_str(r#"{"spacing_x":0.5,"spacing_y":0.5,"decimal_places":3}"#).unwrap();
        assert_eq!(grid.spacing_x(), 0.5);
        assert!(!grid.include_diagonals());
        assert_eq!(grid.bias(), DestinationBias::SquaredDistance);

        let bad = serde_json::from_str::<RectangularGrid>(r#"{"spacing_x":0,"spacing_y":1,"decimal_places":3}"#);
        assert!(bad.is_err());
    }
}
