use std::fmt::Debug;
use std::hash::Hash;

use crate::common::error::Result;

/// A simple trait encapsulating what other traits are needed
/// for a type to be usable as a graph node.
///
/// Two nodes describing the same location or state must compare equal
/// and hash equal; all frontier and visited-set bookkeeping relies on it.
pub trait Node: Eq + Hash + Clone + Debug {}
impl<T> Node for T where T: Eq + Hash + Clone + Debug {}

/// The search a cost is being evaluated for.
///
/// Edges never hold a reference to the finder evaluating them; everything
/// a cost function may depend on is passed in here instead.
#[derive(Debug)]
pub struct SearchContext<'a, N> {
    start: &'a N,
    destination: Option<&'a N>,
}

// Only references are held, so copying never needs `N: Clone`.
impl<N> Clone for SearchContext<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for SearchContext<'_, N> {}

impl<'a, N> SearchContext<'a, N> {
    pub fn new(start: &'a N, destination: Option<&'a N>) -> Self {
        Self { start, destination }
    }

    /// The node the search tree is rooted at.
    pub fn start(&self) -> &'a N {
        self.start
    }

    /// The node the search is steering towards, if any.
    pub fn destination(&self) -> Option<&'a N> {
        self.destination
    }

    /// Whether the search has a specific destination.
    pub fn has_destination(&self) -> bool {
        self.destination.is_some()
    }
}

/// A directed connection between two nodes.
///
/// An edge has two independent costs:
/// - [cost](Edge::cost) orders the frontier and sums to the path cost. It may
///   be biased towards the destination.
/// - [search_cost](Edge::search_cost) sums to the value checked against the
///   search budget. It must not depend on the destination, so the exploration
///   radius is not skewed by the bias.
pub trait Edge<N> {
    fn start(&self) -> &N;

    fn end(&self) -> &N;

    fn cost(&self, ctx: &SearchContext<'_, N>) -> Result<f64>;

    fn search_cost(&self, ctx: &SearchContext<'_, N>) -> Result<f64>;
}

/// A weighted graph queried one node at a time.
pub trait Graph {
    type Node: Node;
    type Edge: Edge<Self::Node>;

    /// Outgoing edges of `node`.
    ///
    /// Must be deterministic for a fixed graph and node, and must never
    /// return two edges ending at the same node.
    fn connections(&self, node: &Self::Node) -> Result<Vec<Self::Edge>>;

    /// Lazily enumerates every node reachable from `node` by repeated stepping.
    ///
    /// The sequence may be infinite, so callers must bound it themselves
    /// (e.g. with [Iterator::take]). Every call starts a fresh enumeration.
    fn all_nodes<'a>(&'a self, node: &Self::Node) -> Box<dyn Iterator<Item = Self::Node> + 'a>;

    /// Builds an edge between two arbitrary nodes, whether or not they are adjacent.
    ///
    /// Used to price a hop from a frontier node straight to the destination.
    fn edge_between(&self, start: &Self::Node, end: &Self::Node) -> Result<Self::Edge>;
}
