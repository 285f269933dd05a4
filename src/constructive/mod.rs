//! Constructive heuristics for building dispatch plans.
//!
//! - [`cheapest_insertion`]: Greedy cheapest tail-append over all
//!   (request, vehicle) pairs, O(n² m) route evaluations
//! - [`nearest_neighbor_order`]: Greedy nearest-neighbor sequencing of an
//!   unordered stop group, O(n²)

mod cheapest_insertion;
mod nearest_neighbor;

pub(crate) use cheapest_insertion::check_nodes;
pub use cheapest_insertion::{cheapest_insertion, PlanCost};
pub use nearest_neighbor::nearest_neighbor_order;
