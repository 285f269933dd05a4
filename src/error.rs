//! Error types for graph construction and planning.

use crate::models::NodeId;

/// Errors raised while building or querying a [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Node referenced but never added.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Node added twice.
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    /// Edge with a negative length or a non-positive speed limit.
    #[error("invalid edge {from} -> {to}: length {length}, speed limit {speed_limit}")]
    InvalidEdge {
        /// Edge tail.
        from: NodeId,
        /// Edge head.
        to: NodeId,
        /// Physical length.
        length: f64,
        /// Speed limit.
        speed_limit: f64,
    },
}

/// Fatal planning failures.
///
/// Unreachable legs and malformed capacities are not errors: they surface as
/// infinite route costs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanningError {
    /// No vehicle in the fleet can carry the request in a single trip.
    #[error("request {request_id} has demand {demand}, but no vehicle can carry it in a single trip")]
    InfeasibleRequest {
        /// Offending request.
        request_id: String,
        /// Its demand.
        demand: i32,
    },

    /// Request with zero or negative demand.
    #[error("request {request_id} has non-positive demand {demand}")]
    InvalidDemand {
        /// Offending request.
        request_id: String,
        /// Its demand.
        demand: i32,
    },

    /// Depot, vehicle start or request destination missing from the network.
    #[error("node {0} is not part of the road network")]
    UnknownNode(NodeId),

    /// Requests were given but there is no vehicle to serve them.
    #[error("fleet is empty but {requests} requests must be served")]
    EmptyFleet {
        /// Number of requests left unserved.
        requests: usize,
    },

    /// Greedy construction found no finite-cost pairing although every
    /// request passed the capacity precondition.
    #[error("cannot build feasible greedy plan: {remaining} requests have no finite-cost vehicle")]
    NoFeasibleAssignment {
        /// Requests still unassigned when construction stalled.
        remaining: usize,
    },
}

pub(crate) type Result<T> = core::result::Result<T, PlanningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infeasible_request_message() {
        let e = PlanningError::InfeasibleRequest {
            request_id: "R7".into(),
            demand: 12,
        };
        assert_eq!(
            e.to_string(),
            "request R7 has demand 12, but no vehicle can carry it in a single trip"
        );
    }

    #[test]
    fn test_unknown_node_message() {
        let e = GraphError::UnknownNode(NodeId::from("FH_W"));
        assert_eq!(e.to_string(), "unknown node FH_W");
    }
}
