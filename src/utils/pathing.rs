use crate::common::error::Result;
use crate::common::traits::{Edge, Graph, SearchContext};

/// Utility function for following a path one node at a time.
///
/// If `current` is on the path, returns the node after it. If it is not on
/// the path, returns the first node of the path so the caller can move
/// towards it.
///
/// Returns None if `current` is the final node of the path, or if the path is empty.
///
/// # Examples
/// ```rust
/// use pathtree::utils::pathing::next_step;
///
/// let path = [1, 2, 3];
/// assert_eq!(next_step(&2, &path), Some(&3));
/// assert_eq!(next_step(&3, &path), None);
/// assert_eq!(next_step(&7, &path), Some(&1));
/// ```
pub fn next_step<'a, N: PartialEq>(current: &N, path: &'a [N]) -> Option<&'a N> {
    match path.iter().position(|node| node == current) {
        Some(index) => path.get(index + 1),
        None => path.first(),
    }
}

/// Total search cost of walking `path` on `graph`, without any destination bias.
///
/// Each step is priced by the graph's own edge between the two nodes, so a
/// step that wraps around a [LimitedRectangularGrid](crate::graphs::LimitedRectangularGrid)
/// counts as one step, not as the distance across the region. Steps between
/// nodes that aren't adjacent fall back to [Graph::edge_between].
///
/// Returns an error if the graph can't produce an edge for a step.
pub fn path_length<G: Graph>(graph: &G, path: &[G::Node]) -> Result<f64> {
    let Some(first) = path.first() else {
        return Ok(0.0);
    };
    let ctx = SearchContext::new(first, None);

    let mut total = 0.0;
    for pair in path.windows(2) {
        let step = match graph
            .connections(&pair[0])?
            .into_iter()
            .find(|edge| edge.end() == &pair[1])
        {
            Some(edge) => edge,
            None => graph.edge_between(&pair[0], &pair[1])?,
        };
        total += step.search_cost(&ctx)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::{AxisRegion, LimitedRectangularGrid, PositionalNode, RectangularGrid};

    #[test]
    fn next_step_on_empty_path_is_none() {
        let path: [u8; 0] = [];
        assert_eq!(next_step(&1, &path), None);
    }

    #[test]
    fn path_length_sums_steps() {
        let grid = RectangularGrid::default();
        let path = [grid.node(0.0, 0.0), grid.node(3.0, 4.0), grid.node(3.0, 5.0)];
        assert_eq!(path_length(&grid, &path), Ok(6.0));
        assert_eq!(path_length(&grid, &path[..1]), Ok(0.0));
        assert_eq!(path_length(&grid, &[]), Ok(0.0));
    }

    #[test]
    fn path_length_counts_wrapped_steps_once() {
        let grid = LimitedRectangularGrid::new(
            RectangularGrid::default(),
            true,
            true,
            false,
            AxisRegion::new(0.0, 5.0).unwrap(),
            AxisRegion::new(0.0, 5.0).unwrap(),
        );
        let path = [grid.grid().node(0.0, 2.0), grid.grid().node(4.0, 2.0), grid.grid().node(4.0, 3.0)];
        assert_eq!(path_length(&grid, &path), Ok(2.0));
    }

    #[test]
    fn path_length_rejects_mixed_dimensions() {
        let grid = RectangularGrid::default();
        let path = [grid.node(0.0, 0.0), PositionalNode::new(vec![1.0], 2)];
        assert!(path_length(&grid, &path).is_err());
    }
}
