//! Nearest-neighbor stop sequencing.
//!
//! Orders an unordered group of requests greedily: starting from the depot,
//! always visit the closest unvisited request next.
//!
//! # Complexity
//!
//! O(n²) oracle queries where n = number of stops.

use crate::distance::TravelTimeOracle;
use crate::models::{DeliveryRequest, NodeId};

/// Orders `stops` by repeatedly picking the nearest unvisited one.
///
/// Ties keep the earlier stop in the input. When every remaining stop is
/// unreachable from the current position, the first remaining one is taken.
///
/// # Examples
///
/// ```
/// use u_dispatch::constructive::nearest_neighbor_order;
/// use u_dispatch::graph::Graph;
/// use u_dispatch::models::DeliveryRequest;
///
/// let mut g = Graph::new();
/// for (id, x) in [("D", 0.0), ("A", 1.0), ("B", 2.0), ("C", 3.0)] {
///     g.add_node(id, x, 0.0).unwrap();
/// }
/// g.add_edge("D", "A", 1.0, 1.0, true).unwrap();
/// g.add_edge("A", "B", 1.0, 1.0, true).unwrap();
/// g.add_edge("B", "C", 1.0, 1.0, true).unwrap();
///
/// let far = DeliveryRequest::new("far", "C");
/// let near = DeliveryRequest::new("near", "A");
/// let mid = DeliveryRequest::new("mid", "B");
/// let order = nearest_neighbor_order(&g, &"D".into(), &[&far, &near, &mid]);
/// let ids: Vec<&str> = order.iter().map(|r| r.id()).collect();
/// assert_eq!(ids, vec!["near", "mid", "far"]);
/// ```
pub fn nearest_neighbor_order<'r, O: TravelTimeOracle + ?Sized>(
    oracle: &O,
    depot: &NodeId,
    stops: &[&'r DeliveryRequest],
) -> Vec<&'r DeliveryRequest> {
    let mut remaining = stops.to_vec();
    let mut order = Vec::with_capacity(remaining.len());
    let mut current = depot;

    while !remaining.is_empty() {
        let mut best_idx = 0;
        let mut best_time = f64::INFINITY;
        for (i, request) in remaining.iter().enumerate() {
            let t = oracle.travel_time(current, request.node());
            if t < best_time {
                best_time = t;
                best_idx = i;
            }
        }

        let chosen = remaining.remove(best_idx);
        current = chosen.node();
        order.push(chosen);
    }

    order
}
