//! # u-dispatch
//!
//! Capacity-aware dispatch of delivery requests to a vehicle fleet on a
//! weighted road network. Vehicles return to the depot to reload whenever
//! the next stop no longer fits.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (NodeId, Vehicle, DeliveryRequest, VehicleRoute, Plan)
//! - [`graph`]: Road network and A* shortest travel times
//! - [`distance`]: Travel-time oracle trait and pairwise caches
//! - [`evaluation`]: Multi-trip route cost simulation
//! - [`constructive`]: Greedy cheapest insertion and nearest-neighbor sequencing
//! - [`local_search`]: Monte Carlo grouping search minimizing makespan
//! - [`error`]: Graph and planning errors

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod graph;
pub mod local_search;
pub mod models;

pub use error::{GraphError, PlanningError};
