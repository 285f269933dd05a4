//! A* search over travel times.
//!
//! # Heuristic
//!
//! Straight-line distance to the target divided by the fastest speed limit
//! of the network, i.e. the time needed if the whole remaining way could be
//! driven in a straight line at top speed.
//!
//! # Determinism
//!
//! Frontier entries with equal priority pop in insertion order, so the
//! expansion order only depends on node and edge insertion order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::network::Graph;

#[derive(Debug, Clone, Copy)]
struct Frontier {
    estimate: f64,
    cost: f64,
    seq: u64,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // BinaryHeap is a max-heap: lowest estimate first, then oldest entry.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Returns the node path and its travel time, or `None` if `target` is
/// unreachable from `source`.
pub(super) fn search(graph: &Graph, source: usize, target: usize) -> Option<(Vec<usize>, f64)> {
    let n = graph.len();
    let speed = graph.heuristic_speed();
    let goal = graph.point(target);
    let heuristic = |node: usize| {
        if speed > 0.0 {
            graph.point(node).distance_to(&goal) / speed
        } else {
            0.0
        }
    };

    let mut best = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;

    best[source] = 0.0;
    heap.push(Frontier {
        estimate: heuristic(source),
        cost: 0.0,
        seq,
        node: source,
    });

    while let Some(Frontier { cost, node, .. }) = heap.pop() {
        if node == target {
            return Some((reconstruct(&parent, target), cost));
        }
        // Stale entry: a cheaper way to `node` was pushed later.
        if cost > best[node] {
            continue;
        }

        for edge in graph.edges(node) {
            let next_cost = cost + edge.travel_time;
            if next_cost < best[edge.to] {
                best[edge.to] = next_cost;
                parent[edge.to] = Some(node);
                seq += 1;
                heap.push(Frontier {
                    estimate: next_cost + heuristic(edge.to),
                    cost: next_cost,
                    seq,
                    node: edge.to,
                });
            }
        }
    }

    None
}

fn reconstruct(parent: &[Option<usize>], target: usize) -> Vec<usize> {
    let mut path = vec![target];
    let mut current = target;
    while let Some(prev) = parent[current] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
