//! Domain model types for fleet dispatch.
//!
//! Provides node identifiers and coordinates, vehicles with per-trip
//! capacity, delivery requests with demands, and plans made of per-vehicle
//! ordered stop lists.

mod node;
mod plan;
mod request;
mod route;
mod vehicle;

pub use node::{NodeId, Point};
pub use plan::Plan;
pub use request::{DeliveryRequest, DEFAULT_DEMAND};
pub use route::VehicleRoute;
pub use vehicle::Vehicle;
