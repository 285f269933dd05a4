//! Per-vehicle stop lists.

use serde::{Deserialize, Serialize};

use super::DeliveryRequest;

/// Ordered requests assigned to a single vehicle, in visitation order.
///
/// Depot returns are implicit: they are inserted by the evaluator whenever
/// the next stop does not fit in the remaining capacity.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{DeliveryRequest, VehicleRoute};
///
/// let mut route = VehicleRoute::new("V1");
/// route.push(DeliveryRequest::new("R1", "C_PARK").with_demand(3));
/// route.push(DeliveryRequest::new("R2", "PARK_N"));
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.total_demand(), 4);
/// assert_eq!(route.request_ids(), vec!["R1", "R2"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRoute {
    vehicle_id: String,
    stops: Vec<DeliveryRequest>,
}

impl VehicleRoute {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: impl Into<String>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            stops: Vec::new(),
        }
    }

    /// Creates a route with the given stops.
    pub fn with_stops(vehicle_id: impl Into<String>, stops: Vec<DeliveryRequest>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            stops,
        }
    }

    /// Appends a stop to the end of this route.
    pub fn push(&mut self, request: DeliveryRequest) {
        self.stops.push(request);
    }

    /// Vehicle serving this route.
    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    /// Stops in visitation order.
    pub fn stops(&self) -> &[DeliveryRequest] {
        &self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the vehicle has nothing to deliver.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Request IDs in visitation order.
    pub fn request_ids(&self) -> Vec<&str> {
        self.stops.iter().map(|r| r.id()).collect()
    }

    /// Sum of the demands of all stops (across every trip).
    pub fn total_demand(&self) -> i32 {
        self.stops.iter().map(|r| r.demand()).sum()
    }
}
