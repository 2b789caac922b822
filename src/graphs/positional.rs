use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::common::error::{PathError, Result};
use crate::common::traits::{Edge, SearchContext};
use crate::utils::heuristics::DestinationBias;

/// The most decimal places an f64 coordinate can meaningfully be rounded to.
pub const MAX_DECIMAL_PLACES: u32 = 15;

/// A graph node identified by a coordinate vector.
///
/// Every coordinate is rounded to `decimal_places` when the node is built, so
/// positions reached through different float arithmetic still compare and hash
/// equal. Equality is exact on the rounded values; the number of decimal places
/// itself takes no part in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "NodeCoordinates")]
pub struct PositionalNode {
    coordinates: Vec<f64>,
    decimal_places: u32,
}

#[derive(Deserialize)]
struct NodeCoordinates {
    coordinates: Vec<f64>,
    decimal_places: u32,
}

impl From<NodeCoordinates> for PositionalNode {
    fn from(raw: NodeCoordinates) -> Self {
        Self::new(raw.coordinates, raw.decimal_places)
    }
}

impl PositionalNode {
    /// Creates a node, rounding every coordinate to `decimal_places`.
    ///
    /// `decimal_places` is capped at [MAX_DECIMAL_PLACES].
    ///
    /// # Examples
    /// ```rust
    /// use pathtree::graphs::PositionalNode;
    ///
    /// let a = PositionalNode::new(vec![0.100001], 3);
    /// let b = PositionalNode::new(vec![0.1], 3);
    /// assert_eq!(a, b);
    /// ```
    pub fn new(coordinates: impl Into<Vec<f64>>, decimal_places: u32) -> Self {
        let decimal_places = decimal_places.min(MAX_DECIMAL_PLACES);
        let mut coordinates = coordinates.into();
        for c in coordinates.iter_mut() {
            *c = round_to(*c, decimal_places);
        }

        Self {
            coordinates,
            decimal_places,
        }
    }

    /// Shorthand for a two-dimensional node.
    pub fn new_2d(x: f64, y: f64, decimal_places: u32) -> Self {
        Self::new(vec![x, y], decimal_places)
    }

    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    pub fn coordinate(&self, axis: usize) -> Option<f64> {
        self.coordinates.get(axis).copied()
    }

    pub fn dimensions(&self) -> usize {
        self.coordinates.len()
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Returns a new node shifted by `delta`, one entry per leading axis.
    ///
    /// Axes past the end of `delta` are left unchanged.
    pub fn translated(&self, delta: &[f64]) -> Result<Self> {
        if delta.len() > self.dimensions() {
            return Err(dimension_mismatch(self.dimensions(), delta.len()));
        }

        let mut coordinates = self.coordinates.clone();
        for (c, d) in coordinates.iter_mut().zip(delta) {
            *c += d;
        }

        Ok(Self::new(coordinates, self.decimal_places))
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Returns an error if the nodes have different dimensionality.
    pub fn squared_distance_to(&self, other: &Self) -> Result<f64> {
        if self.dimensions() != other.dimensions() {
            return Err(dimension_mismatch(self.dimensions(), other.dimensions()));
        }

        Ok(self
            .coordinates
            .iter()
            .zip(&other.coordinates)
            .map(|(a, b)| (a - b) * (a - b))
            .sum())
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Self) -> Result<f64> {
        self.squared_distance_to(other).map(f64::sqrt)
    }
}

impl PartialEq for PositionalNode {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates.len() == other.coordinates.len()
            && self
                .coordinates
                .iter()
                .zip(&other.coordinates)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for PositionalNode {}

impl Hash for PositionalNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coordinates.len().hash(state);
        for c in &self.coordinates {
            c.to_bits().hash(state);
        }
    }
}

/// Rounds to `decimal_places`, folding -0.0 into 0.0 so both hash alike.
///
/// Values too large to scale are already integral and come back unchanged.
pub(crate) fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10f64.powi(decimal_places.min(MAX_DECIMAL_PLACES) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value + 0.0;
    }
    scaled.round() / factor + 0.0
}

fn dimension_mismatch(expected: usize, found: usize) -> PathError {
    PathError::InvalidArgument(format!(
        "coordinate dimensionality mismatch: {} vs {}",
        expected, found
    ))
}

/// A directed edge between two positional nodes.
///
/// The search cost is the edge length. The cost is the same length plus the
/// [DestinationBias] of the end node when the search has a destination, so the
/// bias accumulates along a path.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalEdge {
    start: PositionalNode,
    end: PositionalNode,
    length: f64,
    bias: DestinationBias,
}

impl PositionalEdge {
    /// Creates an edge whose length is the Euclidean distance between its endpoints.
    pub fn new(start: PositionalNode, end: PositionalNode, bias: DestinationBias) -> Result<Self> {
        let length = start.distance_to(&end)?;
        Ok(Self {
            start,
            end,
            length,
            bias,
        })
    }

    /// Creates an edge with an explicit length.
    ///
    /// Used when the end node was moved after stepping, e.g. wrapped around a
    /// region boundary, and the straight-line distance no longer reflects the step.
    pub fn with_length(
        start: PositionalNode,
        end: PositionalNode,
        length: f64,
        bias: DestinationBias,
    ) -> Result<Self> {
        if start.dimensions() != end.dimensions() {
            return Err(dimension_mismatch(start.dimensions(), end.dimensions()));
        }

        Ok(Self {
            start,
            end,
            length,
            bias,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn bias(&self) -> DestinationBias {
        self.bias
    }
}

impl Edge<PositionalNode> for PositionalEdge {
    fn start(&self) -> &PositionalNode {
        &self.start
    }

    fn end(&self) -> &PositionalNode {
        &self.end
    }

    fn cost(&self, ctx: &SearchContext<'_, PositionalNode>) -> Result<f64> {
        match ctx.destination() {
            Some(destination) => Ok(self.length + self.bias.evaluate(&self.end, destination)?),
            None => Ok(self.length),
        }
    }

    fn search_cost(&self, _ctx: &SearchContext<'_, PositionalNode>) -> Result<f64> {
        Ok(self.length)
    }
}
