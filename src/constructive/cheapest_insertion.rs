//! Greedy cheapest-append construction.
//!
//! # Algorithm
//!
//! While requests remain, try appending every remaining request to the tail
//! of every vehicle that can carry it, cost the whole resulting route from
//! scratch with [`RouteEvaluator`], and commit the cheapest pair. Earlier
//! insertions are never revisited and stops are never inserted mid-route.
//!
//! # Complexity
//!
//! O(n² × m) route evaluations where n = requests, m = vehicles, each
//! costing O(n) oracle queries.

use std::iter;

use serde::Serialize;
use tracing::{debug, trace};

use crate::distance::TravelTimeOracle;
use crate::error::{PlanningError, Result};
use crate::evaluation::RouteEvaluator;
use crate::models::{DeliveryRequest, NodeId, Plan, Vehicle, VehicleRoute};

/// A plan along with the summed route time of the fleet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanCost {
    /// The constructed plan.
    pub plan: Plan,
    /// Sum of every vehicle's route time, each from its own start node and
    /// ending at the depot.
    pub total_time: f64,
}

/// Builds a plan with the greedy cheapest-append heuristic.
///
/// Every request is checked up front: its demand must be positive and at
/// least one vehicle must be able to carry it in a single trip. Vehicles,
/// depot and destinations must all be known to the oracle. Ties keep the
/// first pair found, iterating requests in input order, then vehicles in
/// fleet order.
///
/// # Errors
///
/// - [`PlanningError::InvalidDemand`] / [`PlanningError::InfeasibleRequest`]
///   when a request fails the upfront check.
/// - [`PlanningError::UnknownNode`] for nodes missing from the oracle.
/// - [`PlanningError::NoFeasibleAssignment`] when no remaining pair has a
///   finite cost (e.g. a disconnected destination).
///
/// # Examples
///
/// ```
/// use u_dispatch::constructive::cheapest_insertion;
/// use u_dispatch::graph::Graph;
/// use u_dispatch::models::{DeliveryRequest, Vehicle};
///
/// let mut g = Graph::new();
/// g.add_node("D", 0.0, 0.0).unwrap();
/// g.add_node("A", 1.0, 0.0).unwrap();
/// g.add_node("B", 0.0, 1.0).unwrap();
/// g.add_edge("D", "A", 1.0, 1.0, true).unwrap();
/// g.add_edge("D", "B", 1.0, 1.0, true).unwrap();
///
/// let vehicles = vec![Vehicle::new("V1", "D", 5), Vehicle::new("V2", "D", 5)];
/// let requests = vec![DeliveryRequest::new("R1", "A"), DeliveryRequest::new("R2", "B")];
///
/// let result = cheapest_insertion(&g, &"D".into(), &vehicles, &requests).unwrap();
/// assert_eq!(result.plan.num_served(), 2);
/// assert_eq!(result.total_time, 4.0);
/// ```
pub fn cheapest_insertion<O: TravelTimeOracle + ?Sized>(
    oracle: &O,
    depot: &NodeId,
    vehicles: &[Vehicle],
    requests: &[DeliveryRequest],
) -> Result<PlanCost> {
    check_requests(vehicles, requests)?;
    check_nodes(oracle, depot, vehicles, requests)?;
    debug!(
        vehicles = vehicles.len(),
        requests = requests.len(),
        "Starting cheapest insertion"
    );

    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); vehicles.len()];
    if requests.is_empty() {
        return Ok(PlanCost {
            plan: build_plan(depot, vehicles, requests, &routes),
            total_time: 0.0,
        });
    }

    let evaluator = RouteEvaluator::new(oracle, depot);
    let mut remaining: Vec<usize> = (0..requests.len()).collect();

    while !remaining.is_empty() {
        // (position in `remaining`, vehicle index, route cost)
        let mut best: Option<(usize, usize, f64)> = None;

        for (pos, &ri) in remaining.iter().enumerate() {
            let request = &requests[ri];
            for (vi, vehicle) in vehicles.iter().enumerate() {
                if !vehicle.can_carry(request.demand()) {
                    continue;
                }
                let stops = routes[vi]
                    .iter()
                    .map(|&i| &requests[i])
                    .chain(iter::once(request));
                let cost = evaluator.vehicle_cost(vehicle, stops);
                if !cost.is_finite() {
                    continue;
                }
                match best {
                    Some((_, _, c)) if c <= cost => {}
                    _ => best = Some((pos, vi, cost)),
                }
            }
        }

        let Some((pos, vi, cost)) = best else {
            return Err(PlanningError::NoFeasibleAssignment {
                remaining: remaining.len(),
            });
        };
        let ri = remaining.remove(pos);
        trace!(
            request = requests[ri].id(),
            vehicle = vehicles[vi].id(),
            cost,
            "Appended request"
        );
        routes[vi].push(ri);
    }

    let total_time: f64 = vehicles
        .iter()
        .zip(&routes)
        .map(|(vehicle, route)| {
            evaluator.vehicle_cost(vehicle, route.iter().map(|&i| &requests[i]))
        })
        .sum();
    debug!(total_time, "Finished cheapest insertion");

    Ok(PlanCost {
        plan: build_plan(depot, vehicles, requests, &routes),
        total_time,
    })
}

fn check_requests(vehicles: &[Vehicle], requests: &[DeliveryRequest]) -> Result<()> {
    for request in requests {
        let demand = request.demand();
        if !request.has_valid_demand() {
            return Err(PlanningError::InvalidDemand {
                request_id: request.id().to_string(),
                demand,
            });
        }
        if !vehicles.iter().any(|v| v.can_carry(demand)) {
            return Err(PlanningError::InfeasibleRequest {
                request_id: request.id().to_string(),
                demand,
            });
        }
    }
    Ok(())
}

/// Rejects depot, vehicle starts or destinations unknown to the oracle.
pub(crate) fn check_nodes<O: TravelTimeOracle + ?Sized>(
    oracle: &O,
    depot: &NodeId,
    vehicles: &[Vehicle],
    requests: &[DeliveryRequest],
) -> Result<()> {
    let nodes = iter::once(depot)
        .chain(vehicles.iter().map(|v| v.start()))
        .chain(requests.iter().map(|r| r.node()));
    for node in nodes {
        if !oracle.contains_node(node) {
            return Err(PlanningError::UnknownNode(node.clone()));
        }
    }
    Ok(())
}

fn build_plan(
    depot: &NodeId,
    vehicles: &[Vehicle],
    requests: &[DeliveryRequest],
    routes: &[Vec<usize>],
) -> Plan {
    let routes = vehicles
        .iter()
        .zip(routes)
        .map(|(vehicle, route)| {
            VehicleRoute::with_stops(
                vehicle.id(),
                route.iter().map(|&i| requests[i].clone()).collect(),
            )
        })
        .collect();
    Plan::new(depot.clone(), routes)
}
