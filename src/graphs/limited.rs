use log::warn;
use serde::{Deserialize, Serialize};

use crate::common::error::{PathError, Result};
use crate::common::traits::{Edge, Graph};
use crate::graphs::positional::{round_to, PositionalEdge, PositionalNode};
use crate::graphs::rectangular::RectangularGrid;

/// A half-open coordinate interval `[min, max)` along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AxisBounds")]
pub struct AxisRegion {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct AxisBounds {
    min: f64,
    max: f64,
}

impl TryFrom<AxisBounds> for AxisRegion {
    type Error = PathError;

    fn try_from(bounds: AxisBounds) -> Result<Self> {
        Self::new(bounds.min, bounds.max)
    }
}

impl AxisRegion {
    /// Returns an error unless both bounds are finite and `min < max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            warn!("rejecting axis region [{}, {})", min, max);
            return Err(PathError::InvalidArgument(format!(
                "axis region needs finite bounds with min < max, got [{}, {})",
                min, max
            )));
        }

        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value < self.max
    }

    /// Folds `value` back into the region as if the axis were a circle.
    pub fn wrap(&self, value: f64) -> f64 {
        self.min + (value - self.min).rem_euclid(self.max - self.min)
    }

    /// Whole steps of `spacing` from `origin` that may land inside the region.
    ///
    /// The range is padded by one step on each side; callers filter the
    /// rounded results with [contains](AxisRegion::contains).
    fn step_range(&self, origin: f64, spacing: f64) -> std::ops::RangeInclusive<i64> {
        let first = ((self.min - origin) / spacing).ceil() as i64;
        let last = ((self.max - origin) / spacing).ceil() as i64 - 1;
        (first - 1)..=(last + 1)
    }
}

/// A [RectangularGrid] confined to a rectangular region.
///
/// Steps that leave the region along an axis are wrapped to the opposite side
/// when wrapping is on for that axis, and dropped otherwise. Wrapping happens
/// only when the grid is `wrapped` at all and the axis flag is set.
///
/// A wrapped edge keeps the length of the step that produced it, not the
/// straight-line distance across the region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitedRectangularGrid {
    grid: RectangularGrid,
    wrapped: bool,
    wrap_x: bool,
    wrap_y: bool,
    region_x: AxisRegion,
    region_y: AxisRegion,
}

impl LimitedRectangularGrid {
    pub fn new(
        grid: RectangularGrid,
        wrapped: bool,
        wrap_x: bool,
        wrap_y: bool,
        region_x: AxisRegion,
        region_y: AxisRegion,
    ) -> Self {
        Self {
            grid,
            wrapped,
            wrap_x,
            wrap_y,
            region_x,
            region_y,
        }
    }

    pub fn grid(&self) -> &RectangularGrid {
        &self.grid
    }

    pub fn wraps_x(&self) -> bool {
        self.wrapped && self.wrap_x
    }

    pub fn wraps_y(&self) -> bool {
        self.wrapped && self.wrap_y
    }

    /// Whether the first two coordinates of `node` lie inside the region.
    pub fn contains(&self, node: &PositionalNode) -> bool {
        match (node.coordinate(0), node.coordinate(1)) {
            (Some(x), Some(y)) => self.region_x.contains(x) && self.region_y.contains(y),
            _ => false,
        }
    }

    /// Brings `value` into `region`, or `None` if it is outside and the axis doesn't wrap.
    fn confine(&self, value: f64, region: AxisRegion, wraps: bool) -> Option<f64> {
        if region.contains(value) {
            Some(value)
        } else if wraps {
            let wrapped = round_to(region.wrap(value), self.grid.decimal_places());
            // Rounding can push a value just below max onto max itself.
            Some(if region.contains(wrapped) { wrapped } else { region.min() })
        } else {
            None
        }
    }

    /// The edge as it exists inside the region, if it survives at all.
    fn confine_edge(&self, edge: PositionalEdge) -> Result<Option<PositionalEdge>> {
        let end = edge.end();
        let (Some(x), Some(y)) = (end.coordinate(0), end.coordinate(1)) else {
            return Ok(None);
        };

        let Some(cx) = self.confine(x, self.region_x, self.wraps_x()) else {
            return Ok(None);
        };
        let Some(cy) = self.confine(y, self.region_y, self.wraps_y()) else {
            return Ok(None);
        };

        if cx == x && cy == y {
            return Ok(Some(edge));
        }

        let mut coordinates = end.coordinates().to_vec();
        coordinates[0] = cx;
        coordinates[1] = cy;
        let wrapped_end = PositionalNode::new(coordinates, end.decimal_places());

        PositionalEdge::with_length(edge.start().clone(), wrapped_end, edge.length(), edge.bias()).map(Some)
    }
}

impl Graph for LimitedRectangularGrid {
    type Node = PositionalNode;
    type Edge = PositionalEdge;

    fn connections(&self, node: &PositionalNode) -> Result<Vec<PositionalEdge>> {
        let mut confined: Vec<PositionalEdge> = Vec::new();

        for edge in self.grid.connections(node)? {
            let Some(edge) = self.confine_edge(edge)? else {
                continue;
            };

            // Narrow wrapping regions can fold two steps onto one node, or back onto the start.
            if edge.end() == node || confined.iter().any(|e| e.end() == edge.end()) {
                continue;
            }

            confined.push(edge);
        }

        Ok(confined)
    }

    /// Every lattice point aligned with `node` that lies inside the region, row by row.
    fn all_nodes<'a>(&'a self, node: &PositionalNode) -> Box<dyn Iterator<Item = PositionalNode> + 'a> {
        let origin = node.clone();
        let (Some(x), Some(y)) = (origin.coordinate(0), origin.coordinate(1)) else {
            return Box::new(std::iter::empty());
        };
        let columns = self.region_x.step_range(x, self.grid.spacing_x());
        let rows = self.region_y.step_range(y, self.grid.spacing_y());

        Box::new(rows.flat_map(move |dy| {
            let origin = origin.clone();
            columns
                .clone()
                .filter_map(move |dx| self.grid.step(&origin, dx, dy).ok())
                .filter(move |candidate| self.contains(candidate))
        }))
    }

    fn edge_between(&self, start: &PositionalNode, end: &PositionalNode) -> Result<PositionalEdge> {
        self.grid.edge_between(start, end)
    }
}
