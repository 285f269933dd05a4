//! Road network and single-pair shortest travel times.
//!
//! [`Graph`] stores nodes with coordinates and edges with a length and a
//! speed limit. [`Graph::shortest_path`] runs A* with a straight-line
//! heuristic and reports [`PathResult::Unreachable`] instead of failing when
//! no path exists.

mod astar;
mod network;

pub use network::{Graph, PathResult, ShortestPath};
