//! Weighted road network.

use std::collections::HashMap;

use crate::distance::TravelTimeOracle;
use crate::error::GraphError;
use crate::models::{NodeId, Point};

use super::astar;

/// A directed road segment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Edge {
    pub(crate) to: usize,
    pub(crate) travel_time: f64,
}

/// Road network with node coordinates and timed edges.
///
/// Edge traversal time is `length / speed_limit`. The fastest speed limit
/// seen is kept to turn straight-line distances into optimistic travel
/// times for the A* heuristic. That estimate stays admissible as long as no
/// edge is shorter than the straight-line distance between its endpoints.
///
/// # Examples
///
/// ```
/// use u_dispatch::graph::Graph;
///
/// let mut g = Graph::new();
/// g.add_node("A", 0.0, 0.0).unwrap();
/// g.add_node("B", 3.0, 4.0).unwrap();
/// g.add_edge("A", "B", 10.0, 2.0, true).unwrap();
///
/// let path = g.shortest_path(&"A".into(), &"B".into()).unwrap();
/// assert!((path.travel_time() - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    ids: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    points: Vec<Point>,
    adjacency: Vec<Vec<Edge>>,
    num_edges: usize,
    max_speed: f64,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node at the given coordinates.
    pub fn add_node(&mut self, id: impl Into<NodeId>, x: f64, y: f64) -> Result<(), GraphError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.index.insert(id.clone(), self.ids.len());
        self.ids.push(id);
        self.points.push(Point::new(x, y));
        self.adjacency.push(Vec::new());
        Ok(())
    }

    /// Adds a road from `from` to `to`, and the reverse one if `bidirectional`.
    ///
    /// `length` must be finite and non-negative, `speed_limit` finite and
    /// strictly positive.
    pub fn add_edge(
        &mut self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        length: f64,
        speed_limit: f64,
        bidirectional: bool,
    ) -> Result<(), GraphError> {
        let from = from.into();
        let to = to.into();
        let a = self.slot(&from)?;
        let b = self.slot(&to)?;

        let valid = length.is_finite()
            && length >= 0.0
            && speed_limit.is_finite()
            && speed_limit > 0.0;
        if !valid {
            return Err(GraphError::InvalidEdge {
                from,
                to,
                length,
                speed_limit,
            });
        }

        let travel_time = length / speed_limit;
        self.adjacency[a].push(Edge { to: b, travel_time });
        self.num_edges += 1;
        if bidirectional {
            self.adjacency[b].push(Edge { to: a, travel_time });
            self.num_edges += 1;
        }
        self.max_speed = self.max_speed.max(speed_limit);
        Ok(())
    }

    /// Returns `true` if the node exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.ids.len()
    }

    /// Number of directed edges (a bidirectional road counts twice).
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Coordinates of a node.
    pub fn position(&self, id: &NodeId) -> Option<Point> {
        self.index.get(id).map(|&i| self.points[i])
    }

    /// Fastest speed limit over all edges, `None` for an edgeless graph.
    pub fn max_speed(&self) -> Option<f64> {
        (self.max_speed > 0.0).then_some(self.max_speed)
    }

    /// Finds the minimum travel-time path from `src` to `dst`.
    ///
    /// Equal endpoints yield a single-node path of zero time without search.
    /// Both nodes must exist.
    pub fn shortest_path(&self, src: &NodeId, dst: &NodeId) -> Result<PathResult, GraphError> {
        let s = self.slot(src)?;
        let t = self.slot(dst)?;
        if s == t {
            return Ok(PathResult::Reachable(ShortestPath {
                nodes: vec![src.clone()],
                travel_time: 0.0,
            }));
        }

        Ok(match astar::search(self, s, t) {
            Some((path, travel_time)) => PathResult::Reachable(ShortestPath {
                nodes: path.into_iter().map(|i| self.ids[i].clone()).collect(),
                travel_time,
            }),
            None => PathResult::Unreachable,
        })
    }

    fn slot(&self, id: &NodeId) -> Result<usize, GraphError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(id.clone()))
    }

    pub(crate) fn edges(&self, node: usize) -> &[Edge] {
        &self.adjacency[node]
    }

    pub(crate) fn point(&self, node: usize) -> Point {
        self.points[node]
    }

    pub(crate) fn heuristic_speed(&self) -> f64 {
        self.max_speed
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }
}

impl TravelTimeOracle for Graph {
    fn travel_time(&self, from: &NodeId, to: &NodeId) -> f64 {
        match self.shortest_path(from, to) {
            Ok(result) => result.travel_time(),
            Err(_) => f64::INFINITY,
        }
    }

    fn contains_node(&self, node: &NodeId) -> bool {
        self.contains(node)
    }
}

/// A minimum travel-time path.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Visited nodes, source first and destination last.
    pub nodes: Vec<NodeId>,
    /// Sum of edge traversal times along `nodes`.
    pub travel_time: f64,
}

/// Outcome of a single-pair shortest-path query.
#[derive(Debug, Clone, PartialEq)]
pub enum PathResult {
    /// A path exists.
    Reachable(ShortestPath),
    /// No path connects the two nodes.
    Unreachable,
}

impl PathResult {
    /// Travel time of the path, `f64::INFINITY` if unreachable.
    pub fn travel_time(&self) -> f64 {
        match self {
            PathResult::Reachable(path) => path.travel_time,
            PathResult::Unreachable => f64::INFINITY,
        }
    }

    /// Returns `true` if a path was found.
    pub fn is_reachable(&self) -> bool {
        matches!(self, PathResult::Reachable(_))
    }

    /// The path, if any.
    pub fn path(&self) -> Option<&ShortestPath> {
        match self {
            PathResult::Reachable(path) => Some(path),
            PathResult::Unreachable => None,
        }
    }
}
