//! Vehicle type with a start position and a per-trip capacity.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// A vehicle of the fleet.
///
/// `capacity` is the largest total demand the vehicle carries between two
/// depot visits. A vehicle with non-positive capacity is unusable: every route
/// assigned to it costs `f64::INFINITY`.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{NodeId, Vehicle};
///
/// let v = Vehicle::new("V1", "FH_M", 10);
/// assert_eq!(v.id(), "V1");
/// assert_eq!(v.start(), &NodeId::from("FH_M"));
/// assert_eq!(v.capacity(), 10);
/// assert!(v.is_usable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: String,
    start: NodeId,
    capacity: i32,
}

impl Vehicle {
    /// Creates a vehicle parked at `start`.
    pub fn new(id: impl Into<String>, start: impl Into<NodeId>, capacity: i32) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            capacity,
        }
    }

    /// Vehicle ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Node the vehicle starts from.
    pub fn start(&self) -> &NodeId {
        &self.start
    }

    /// Maximum demand carried per trip.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Returns `true` if the vehicle can load anything at all.
    pub fn is_usable(&self) -> bool {
        self.capacity > 0
    }

    /// Returns `true` if a request of the given demand fits in one trip.
    pub fn can_carry(&self, demand: i32) -> bool {
        self.capacity >= demand
    }
}
