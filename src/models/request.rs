//! Delivery request type.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// Demand assigned to a request when none is given.
pub const DEFAULT_DEMAND: i32 = 1;

/// A delivery to a single destination node.
///
/// Demand is fixed at construction: [`DeliveryRequest::new`] applies
/// [`DEFAULT_DEMAND`], [`DeliveryRequest::with_demand`] overrides it.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::DeliveryRequest;
///
/// let r = DeliveryRequest::new("R1", "KRUPP_N");
/// assert_eq!(r.demand(), 1);
///
/// let heavy = DeliveryRequest::new("R2", "PARK_N").with_demand(4);
/// assert_eq!(heavy.demand(), 4);
/// assert_eq!(heavy.node().as_str(), "PARK_N");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRequest {
    id: String,
    node: NodeId,
    #[serde(default = "default_demand")]
    demand: i32,
}

fn default_demand() -> i32 {
    DEFAULT_DEMAND
}

impl DeliveryRequest {
    /// Creates a request with the default demand of 1.
    pub fn new(id: impl Into<String>, node: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            node: node.into(),
            demand: DEFAULT_DEMAND,
        }
    }

    /// Sets the demand of this request.
    pub fn with_demand(mut self, demand: i32) -> Self {
        self.demand = demand;
        self
    }

    /// Request ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Destination node.
    pub fn node(&self) -> &NodeId {
        &self.node
    }

    /// Capacity consumed by serving this request.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Returns `true` if the demand is strictly positive.
    pub fn has_valid_demand(&self) -> bool {
        self.demand > 0
    }
}
