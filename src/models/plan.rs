//! Complete dispatch plans.

use serde::{Deserialize, Serialize};

use super::{DeliveryRequest, NodeId, VehicleRoute};

/// Routes for the whole fleet, sharing a single depot.
///
/// Routes are kept in fleet order. Every input request appears in exactly
/// one route.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{DeliveryRequest, Plan, VehicleRoute};
///
/// let plan = Plan::new(
///     "FH_M",
///     vec![
///         VehicleRoute::with_stops("V1", vec![DeliveryRequest::new("R1", "C_MID")]),
///         VehicleRoute::new("V2"),
///     ],
/// );
/// assert_eq!(plan.num_served(), 1);
/// assert!(plan.route("V2").expect("route exists").is_empty());
/// assert!(plan.route("V3").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    depot: NodeId,
    routes: Vec<VehicleRoute>,
}

impl Plan {
    /// Creates a plan from per-vehicle routes.
    pub fn new(depot: impl Into<NodeId>, routes: Vec<VehicleRoute>) -> Self {
        Self {
            depot: depot.into(),
            routes,
        }
    }

    /// Depot shared by all vehicles.
    pub fn depot(&self) -> &NodeId {
        &self.depot
    }

    /// Routes in fleet order.
    pub fn routes(&self) -> &[VehicleRoute] {
        &self.routes
    }

    /// Route of the given vehicle, if it belongs to the fleet.
    pub fn route(&self, vehicle_id: &str) -> Option<&VehicleRoute> {
        self.routes.iter().find(|r| r.vehicle_id() == vehicle_id)
    }

    /// Number of vehicles with at least one stop.
    pub fn num_used_vehicles(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Total number of requests served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// All served requests, route by route.
    pub fn served(&self) -> impl Iterator<Item = &DeliveryRequest> {
        self.routes.iter().flat_map(|r| r.stops())
    }
}
