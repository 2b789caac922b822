// https://en.wikipedia.org/wiki/Best-first_search

use std::collections::{HashMap, HashSet};

use log::{debug, trace, warn};

use crate::common::error::{PathError, Result};
use crate::common::traits::{Edge, Graph, Node, SearchContext};
use crate::data_structures::IndexedPriorityQueue;

/// A frontier entry: `node` was discovered by expanding `from`.
///
/// The start node is the only entry without a predecessor.
#[derive(Debug, Clone, PartialEq)]
struct Pending<N> {
    from: Option<N>,
    node: N,
}

/// Everything one call to [PathFinder::calculate_path_tree] discovered.
///
/// Each call returns a fresh tree owned by the caller, so a finder can serve
/// any number of searches without sharing state between them.
#[derive(Debug, Clone)]
pub struct SearchTree<N: Node> {
    start: N,
    destination: Option<N>,
    considered: HashSet<N>,
    path_ends: Vec<N>,
    cost_to: HashMap<N, f64>,
    search_cost_to: HashMap<N, f64>,
    end_to_start: HashMap<N, N>,
    expansions: u64,
    reached_destination: bool,
}

impl<N: Node> SearchTree<N> {
    fn new(start: N, destination: Option<N>) -> Self {
        Self {
            start,
            destination,
            considered: HashSet::new(),
            path_ends: Vec::new(),
            cost_to: HashMap::new(),
            search_cost_to: HashMap::new(),
            end_to_start: HashMap::new(),
            expansions: 0,
            reached_destination: false,
        }
    }

    fn admit(&mut self, node: N, cost: f64, search_cost: f64) {
        self.considered.insert(node.clone());
        self.cost_to.insert(node.clone(), cost);
        self.search_cost_to.insert(node, search_cost);
    }

    pub fn start(&self) -> &N {
        &self.start
    }

    pub fn destination(&self) -> Option<&N> {
        self.destination.as_ref()
    }

    /// Nodes admitted to the frontier at least once, the start included.
    pub fn considered(&self) -> &HashSet<N> {
        &self.considered
    }

    /// Expanded nodes that had unexplored neighbors, none of them within budget.
    ///
    /// Only recorded when the search has a destination; these are the
    /// candidates for a substitute destination.
    pub fn path_ends(&self) -> &[N] {
        &self.path_ends
    }

    /// Predecessor of every expanded node other than the start.
    pub fn end_to_start(&self) -> &HashMap<N, N> {
        &self.end_to_start
    }

    /// Accumulated cost at which `node` was first admitted.
    pub fn cost_to(&self, node: &N) -> Option<f64> {
        self.cost_to.get(node).copied()
    }

    /// Accumulated search cost at which `node` was first admitted.
    pub fn search_cost_to(&self, node: &N) -> Option<f64> {
        self.search_cost_to.get(node).copied()
    }

    /// The number of frontier entries popped while building the tree
    pub fn expansions(&self) -> u64 {
        self.expansions
    }

    /// Whether the destination was popped before the search stopped
    pub fn reached_destination(&self) -> bool {
        self.reached_destination
    }

    /// The path from the start to the destination, both included.
    ///
    /// Returns an error if the tree was built without a destination, or if
    /// the destination was not reached within the budget.
    pub fn path(&self) -> Result<Vec<N>> {
        let destination = self.destination.as_ref().ok_or_else(|| {
            PathError::InvalidState("no destination was set for this search".to_string())
        })?;

        self.path_to(destination)
    }

    /// The path from the start to any expanded node, both included.
    pub fn path_to(&self, node: &N) -> Result<Vec<N>> {
        let mut path = vec![node.clone()];
        let mut current = node;

        while *current != self.start {
            let parent = self.end_to_start.get(current).ok_or_else(|| {
                PathError::NotFound("node was not reached within the search budget".to_string())
            })?;
            path.push(parent.clone());
            current = parent;
        }

        path.reverse();
        Ok(path)
    }
}

/// The outcome of [PathFinder::path_or_nearest].
#[derive(Debug, Clone, PartialEq)]
pub struct PathSearchResults<N> {
    ops_used: u64,
    cost: f64,
    incomplete: bool,
    path: Vec<N>,
}

impl<N> PathSearchResults<N> {
    /// The number of frontier entries expanded by the search
    pub fn ops(&self) -> u64 {
        self.ops_used
    }

    /// The accumulated cost of the last node on the path
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Whether the path stops at a substitute instead of the destination
    pub fn incomplete(&self) -> bool {
        self.incomplete
    }

    /// The path from the start node to the destination or its substitute
    pub fn path(&self) -> &[N] {
        &self.path
    }
}

/// Budgeted best-first search over a [Graph].
///
/// The frontier is ordered by accumulated edge [cost](Edge::cost); the search
/// stops once the destination is popped, once a popped node has used up
/// `max_search_cost` of accumulated [search cost](Edge::search_cost), or once
/// the frontier is empty.
///
/// A node's predecessor is whichever expanded node discovered it first; a
/// cheaper route found later never replaces it. With a destination bias this
/// is a greedy search, not a shortest-path one.
///
/// # Example
/// ```rust
/// use pathtree::algorithms::PathFinder;
/// use pathtree::graphs::RectangularGrid;
///
/// let grid = RectangularGrid::new(1.0, 1.0, false, 2).unwrap();
/// let start = grid.node(0.0, 0.0);
/// let goal = grid.node(4.0, 4.0);
///
/// let finder = PathFinder::new(grid, start).with_destination(goal);
/// let tree = finder.calculate_path_tree(8.0).unwrap();
///
/// if tree.reached_destination() {
///     let path = tree.path().unwrap();
///     println!("Path: {:?}", path);
/// } else {
///     println!("Destination not reached, {} nodes considered", tree.considered().len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PathFinder<G: Graph> {
    graph: G,
    start: G::Node,
    end: Option<G::Node>,
}

impl<G: Graph> PathFinder<G> {
    /// Creates a finder rooted at `start` with no destination.
    pub fn new(graph: G, start: G::Node) -> Self {
        Self {
            graph,
            start,
            end: None,
        }
    }

    pub fn with_destination(mut self, end: G::Node) -> Self {
        self.end = Some(end);
        self
    }

    pub fn start(&self) -> &G::Node {
        &self.start
    }

    pub fn set_start(&mut self, start: G::Node) {
        self.start = start;
    }

    pub fn end(&self) -> Option<&G::Node> {
        self.end.as_ref()
    }

    pub fn set_end(&mut self, end: Option<G::Node>) {
        self.end = end;
    }

    pub fn has_specific_end(&self) -> bool {
        self.end.is_some()
    }

    /// Builds the search tree from the start node, spending at most `max_search_cost`.
    ///
    /// Returns an error if `max_search_cost` is NaN, or if the graph fails to
    /// produce connections or costs.
    pub fn calculate_path_tree(&self, max_search_cost: f64) -> Result<SearchTree<G::Node>> {
        // NaN compares false against every search cost and would lift the budget.
        if max_search_cost.is_nan() {
            warn!("rejecting NaN search budget");
            return Err(PathError::InvalidArgument(
                "search budget must be a number, got NaN".to_string(),
            ));
        }

        debug!(
            "building path tree from {:?} towards {:?} with search budget {}",
            self.start, self.end, max_search_cost
        );

        let ctx = SearchContext::new(&self.start, self.end.as_ref());
        let mut tree = SearchTree::new(self.start.clone(), self.end.clone());
        let mut frontier = IndexedPriorityQueue::new(true);

        tree.admit(self.start.clone(), 0.0, 0.0);
        frontier.push(
            Pending {
                from: None,
                node: self.start.clone(),
            },
            0.0,
        );

        while let Some((Pending { from, node: closest }, _)) = frontier.pop() {
            tree.expansions += 1;

            if let Some(from) = from {
                tree.end_to_start.entry(closest.clone()).or_insert(from);
            }

            if self.end.as_ref() == Some(&closest) {
                tree.reached_destination = true;
                break;
            }

            let reached_cost = tree.cost_to(&closest).unwrap_or(0.0);
            let reached_search_cost = tree.search_cost_to(&closest).unwrap_or(0.0);
            if reached_search_cost >= max_search_cost {
                break;
            }

            let mut goes_on = false;
            let mut no_branches = true;

            for edge in self.graph.connections(&closest)? {
                let next = edge.end();
                if tree.considered.contains(next) {
                    continue;
                }
                goes_on = true;

                let search_cost = reached_search_cost + edge.search_cost(&ctx)?;
                if search_cost > max_search_cost {
                    continue;
                }

                let cost = reached_cost + edge.cost(&ctx)?;
                tree.admit(next.clone(), cost, search_cost);
                frontier.push(
                    Pending {
                        from: Some(closest.clone()),
                        node: next.clone(),
                    },
                    cost,
                );
                no_branches = false;
            }

            trace!(
                "expanded {:?} at cost {} (search cost {}), frontier size {}",
                closest,
                reached_cost,
                reached_search_cost,
                frontier.len()
            );

            if goes_on && no_branches && ctx.has_destination() {
                tree.path_ends.push(closest);
            }
        }

        debug!(
            "path tree done: {} nodes considered, {} expansions, destination reached: {}",
            tree.considered.len(),
            tree.expansions,
            tree.reached_destination
        );

        Ok(tree)
    }

    /// Builds a tree and returns the path from the start to the destination.
    ///
    /// Returns an error if no destination is set or it is out of reach of `max_search_cost`.
    pub fn find_path(&self, max_search_cost: f64) -> Result<Vec<G::Node>> {
        if !self.has_specific_end() {
            return Err(PathError::InvalidState(
                "no destination was set for this search".to_string(),
            ));
        }

        self.calculate_path_tree(max_search_cost)?.path()
    }

    /// The path end of `tree` that is cheapest to hop from straight to the destination.
    ///
    /// Returns an error if `tree` has no destination or recorded no path ends.
    pub fn nearest_path_end(&self, tree: &SearchTree<G::Node>) -> Result<G::Node> {
        let destination = tree.destination().ok_or_else(|| {
            PathError::InvalidState("no destination was set for this search".to_string())
        })?;
        let ctx = SearchContext::new(tree.start(), Some(destination));

        let mut nearest: Option<(&G::Node, f64)> = None;
        for candidate in tree.path_ends() {
            let cost = self.graph.edge_between(candidate, destination)?.cost(&ctx)?;
            if nearest.map_or(true, |(_, best)| cost < best) {
                nearest = Some((candidate, cost));
            }
        }

        nearest
            .map(|(node, _)| node.clone())
            .ok_or_else(|| PathError::InvalidState("search recorded no path ends".to_string()))
    }

    /// The path to the destination if `tree` reached it, otherwise to its [nearest path end](PathFinder::nearest_path_end).
    pub fn path_or_nearest(&self, tree: &SearchTree<G::Node>) -> Result<PathSearchResults<G::Node>> {
        let (target, incomplete) = if tree.reached_destination() {
            let destination = tree.destination().cloned().ok_or_else(|| {
                PathError::InvalidState("no destination was set for this search".to_string())
            })?;
            (destination, false)
        } else {
            (self.nearest_path_end(tree)?, true)
        };

        let path = tree.path_to(&target)?;
        Ok(PathSearchResults {
            ops_used: tree.expansions(),
            cost: tree.cost_to(&target).unwrap_or(0.0),
            incomplete,
            path,
        })
    }
}
