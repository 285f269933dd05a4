//! Capacity-aware route simulation.

use serde::Serialize;

use crate::distance::TravelTimeOracle;
use crate::models::{DeliveryRequest, NodeId, Vehicle};

/// Why a leg was driven.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LegKind {
    /// Drive to a stop and deliver the request with this ID.
    Delivery(String),
    /// Implicit depot return because the next stop did not fit.
    Reload,
    /// Final return to the depot after the last stop.
    Return,
}

/// One driven leg of a simulated route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    /// Departure node.
    pub from: NodeId,
    /// Arrival node.
    pub to: NodeId,
    /// Travel time of this leg.
    pub travel_time: f64,
    /// Purpose of the leg.
    pub kind: LegKind,
}

/// Full trace of a feasible route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    /// Legs in driving order.
    pub legs: Vec<Leg>,
    /// Number of trips (contiguous stop runs between depot visits).
    pub trips: usize,
    /// Sum of all leg times.
    pub total_time: f64,
}

/// Borrowed leg purpose handed to the simulation callback.
enum Step<'r> {
    Delivery(&'r DeliveryRequest),
    Reload,
    Return,
}

/// Simulates a vehicle driving an ordered stop list with depot reloads.
///
/// Remaining capacity starts full. Before a stop whose demand exceeds what
/// is left, the vehicle drives back to the depot (unless already there) and
/// reloads to full capacity. These reloads are implicit and never appear in
/// the input order.
///
/// A stop larger than the full capacity is still delivered after a reload,
/// and the next stop always triggers another one.
///
/// Infeasible routes cost `f64::INFINITY`:
/// - non-positive vehicle capacity,
/// - a stop with non-positive demand,
/// - any required leg the oracle reports as unreachable.
///
/// # Examples
///
/// ```
/// use u_dispatch::evaluation::RouteEvaluator;
/// use u_dispatch::graph::Graph;
/// use u_dispatch::models::DeliveryRequest;
///
/// let mut g = Graph::new();
/// g.add_node("D", 0.0, 0.0).unwrap();
/// g.add_node("A", 1.0, 0.0).unwrap();
/// g.add_edge("D", "A", 3.0, 1.0, true).unwrap();
///
/// let depot = "D".into();
/// let stops = vec![
///     DeliveryRequest::new("R1", "A").with_demand(2),
///     DeliveryRequest::new("R2", "A").with_demand(2),
/// ];
/// let eval = RouteEvaluator::new(&g, &depot);
/// // Capacity 3: D -> A, reload A -> D, D -> A, return A -> D.
/// assert_eq!(eval.route_cost(&depot, 3, &stops, true), 12.0);
/// assert_eq!(eval.route_cost(&depot, 4, &stops, true), 6.0);
/// ```
pub struct RouteEvaluator<'a, O: ?Sized> {
    oracle: &'a O,
    depot: &'a NodeId,
}

impl<'a, O: TravelTimeOracle + ?Sized> RouteEvaluator<'a, O> {
    /// Creates an evaluator over the given oracle and depot.
    pub fn new(oracle: &'a O, depot: &'a NodeId) -> Self {
        Self { oracle, depot }
    }

    /// Depot used for reloads and the final return.
    pub fn depot(&self) -> &NodeId {
        self.depot
    }

    /// Total travel time of the route, `f64::INFINITY` if infeasible.
    pub fn route_cost<'r, I>(
        &self,
        start: &NodeId,
        capacity: i32,
        stops: I,
        return_to_depot: bool,
    ) -> f64
    where
        I: IntoIterator<Item = &'r DeliveryRequest>,
    {
        self.simulate(start, capacity, stops, return_to_depot, |_, _, _, _| {})
    }

    /// Cost of a full vehicle tour: from its start node, ending at the depot.
    pub fn vehicle_cost<'r, I>(&self, vehicle: &Vehicle, stops: I) -> f64
    where
        I: IntoIterator<Item = &'r DeliveryRequest>,
    {
        self.route_cost(vehicle.start(), vehicle.capacity(), stops, true)
    }

    /// Leg-by-leg trace of the route, `None` if infeasible.
    pub fn schedule<'r, I>(
        &self,
        start: &NodeId,
        capacity: i32,
        stops: I,
        return_to_depot: bool,
    ) -> Option<Schedule>
    where
        I: IntoIterator<Item = &'r DeliveryRequest>,
    {
        let mut legs = Vec::new();
        let total_time = self.simulate(
            start,
            capacity,
            stops,
            return_to_depot,
            |from, to, travel_time, step| {
                let kind = match step {
                    Step::Delivery(request) => LegKind::Delivery(request.id().to_string()),
                    Step::Reload => LegKind::Reload,
                    Step::Return => LegKind::Return,
                };
                legs.push(Leg {
                    from: from.clone(),
                    to: to.clone(),
                    travel_time,
                    kind,
                })
            },
        );
        if total_time.is_infinite() {
            return None;
        }

        let deliveries = legs
            .iter()
            .filter(|l| matches!(l.kind, LegKind::Delivery(_)))
            .count();
        let reloads = legs.iter().filter(|l| l.kind == LegKind::Reload).count();
        let trips = if deliveries == 0 { 0 } else { reloads + 1 };
        Some(Schedule {
            legs,
            trips,
            total_time,
        })
    }

    fn simulate<'r, I, F>(
        &self,
        start: &NodeId,
        capacity: i32,
        stops: I,
        return_to_depot: bool,
        mut on_leg: F,
    ) -> f64
    where
        I: IntoIterator<Item = &'r DeliveryRequest>,
        F: FnMut(&NodeId, &NodeId, f64, Step<'r>),
    {
        if capacity <= 0 {
            return f64::INFINITY;
        }

        let depot = self.depot;
        let mut current = start;
        let mut total = 0.0;
        let mut capacity_left = capacity;

        for request in stops {
            let demand = request.demand();
            if demand <= 0 {
                return f64::INFINITY;
            }

            if capacity_left < demand {
                if current != depot {
                    let t = self.oracle.travel_time(current, depot);
                    if t.is_infinite() {
                        return f64::INFINITY;
                    }
                    on_leg(current, depot, t, Step::Reload);
                    total += t;
                    current = depot;
                }
                capacity_left = capacity;
            }

            let t = self.oracle.travel_time(current, request.node());
            if t.is_infinite() {
                return f64::INFINITY;
            }
            on_leg(current, request.node(), t, Step::Delivery(request));
            total += t;
            current = request.node();
            capacity_left -= demand;
        }

        if return_to_depot && current != depot {
            let t = self.oracle.travel_time(current, depot);
            if t.is_infinite() {
                return f64::INFINITY;
            }
            on_leg(current, depot, t, Step::Return);
            total += t;
        }

        total
    }
}
