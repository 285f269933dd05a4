//! Pairwise travel-time cache over the depot and request destinations.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::{DeliveryRequest, NodeId};

use super::{DistanceMatrix, TravelTimeOracle};

/// Symmetric travel-time table covering `{depot} ∪ {request nodes}`.
///
/// Each unordered pair is queried once from the underlying oracle and the
/// result is stored for both directions, so `get(a, b) == get(b, a)` even on
/// a directed network. Pairs outside the covered set are unreachable.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::{DistanceCache, TravelTimeOracle};
/// use u_dispatch::graph::Graph;
/// use u_dispatch::models::DeliveryRequest;
///
/// let mut g = Graph::new();
/// g.add_node("D", 0.0, 0.0).unwrap();
/// g.add_node("A", 1.0, 0.0).unwrap();
/// g.add_edge("D", "A", 2.0, 1.0, true).unwrap();
///
/// let requests = vec![DeliveryRequest::new("R1", "A")];
/// let cache = DistanceCache::build(&g, &"D".into(), &requests);
/// assert_eq!(cache.len(), 2);
/// assert_eq!(cache.travel_time(&"A".into(), &"D".into()), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceCache {
    index: HashMap<NodeId, usize>,
    nodes: Vec<NodeId>,
    times: DistanceMatrix,
}

impl DistanceCache {
    /// Queries `oracle` for every unordered pair of covered nodes.
    pub fn build<O: TravelTimeOracle + ?Sized>(
        oracle: &O,
        depot: &NodeId,
        requests: &[DeliveryRequest],
    ) -> Self {
        let mut index = HashMap::new();
        let mut nodes = Vec::new();
        for node in std::iter::once(depot).chain(requests.iter().map(|r| r.node())) {
            if !index.contains_key(node) {
                index.insert(node.clone(), nodes.len());
                nodes.push(node.clone());
            }
        }

        let n = nodes.len();
        let mut times = DistanceMatrix::new(n);
        let mut unreachable = 0usize;
        for i in 0..n {
            for j in (i + 1)..n {
                let t = oracle.travel_time(&nodes[i], &nodes[j]);
                if t.is_infinite() {
                    unreachable += 1;
                }
                times.set_symmetric(i, j, t);
            }
        }

        if unreachable > 0 {
            warn!("{unreachable} node pairs are unreachable in the distance cache");
        }
        debug!(nodes = n, pairs = n * n.saturating_sub(1) / 2, "Built distance cache");

        Self {
            index,
            nodes,
            times,
        }
    }

    /// Cached time between two covered nodes.
    pub fn get(&self, a: &NodeId, b: &NodeId) -> Option<f64> {
        let i = *self.index.get(a)?;
        let j = *self.index.get(b)?;
        Some(self.times.get(i, j))
    }

    /// Covered nodes, depot first.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of distinct covered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no node is covered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Underlying matrix, indexed in [`nodes`](Self::nodes) order.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.times
    }
}

impl TravelTimeOracle for DistanceCache {
    fn travel_time(&self, from: &NodeId, to: &NodeId) -> f64 {
        self.get(from, to).unwrap_or(f64::INFINITY)
    }

    fn contains_node(&self, node: &NodeId) -> bool {
        self.index.contains_key(node)
    }
}
