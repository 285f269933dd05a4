//! Monte Carlo grouping search.
//!
//! # Algorithm
//!
//! 1. Cache travel times between the depot and every request destination.
//! 2. Start from a uniformly random grouping.
//! 3. For a fixed number of iterations apply [`random_move`] and accept the
//!    candidate if its makespan is not worse than the current one. Equal
//!    candidates are accepted, so the search drifts along plateaus.
//! 4. Rebuild the plan from the best grouping seen, ordering every group by
//!    nearest neighbor.
//!
//! All evaluation after step 1 uses the cache only. There is no temperature
//! and no restart.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::constructive::{check_nodes, nearest_neighbor_order};
use crate::distance::{DistanceCache, TravelTimeOracle};
use crate::error::{PlanningError, Result};
use crate::models::{DeliveryRequest, NodeId, Plan, Vehicle, VehicleRoute};

use super::grouping::{makespan, random_move, Grouping};

/// Iteration budget used by [`GroupingConfig::default`].
pub const DEFAULT_ITERATIONS: usize = 2000;

/// Configuration of the Monte Carlo grouping search.
///
/// # Examples
///
/// ```
/// use u_dispatch::local_search::GroupingConfig;
///
/// let config = GroupingConfig::default();
/// assert_eq!(config.iterations, 2000);
///
/// let quick = GroupingConfig::default().with_iterations(100);
/// assert_eq!(quick.iterations, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Number of random moves tried.
    pub iterations: usize,
}

impl GroupingConfig {
    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Outcome of [`monte_carlo_grouping`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupingResult {
    /// Plan rebuilt from the best grouping.
    pub plan: Plan,
    /// Makespan of the best grouping. Infinite when no feasible grouping was
    /// found within the budget.
    pub makespan_estimate: f64,
    /// `(iteration, best makespan)` each time the best strictly improved,
    /// starting with the initial grouping at iteration 0.
    pub improvements: Vec<(usize, f64)>,
}

/// Optimizes which vehicle serves which requests, minimizing makespan.
///
/// All vehicles are assumed to start at the depot: route times are measured
/// depot to depot. Randomness comes only from `rng`, so a seeded generator
/// reproduces the same plan.
///
/// An empty request list returns empty routes and a zero makespan without
/// touching the oracle. Demands are not validated: a request larger than
/// every capacity is delivered through reloads, while a non-positive demand
/// or an unreachable destination keeps the makespan infinite.
///
/// The oracle is queried only while building the [`DistanceCache`], once
/// per unordered pair of the depot and distinct destinations.
///
/// # Errors
///
/// - [`PlanningError::EmptyFleet`] when requests exist but no vehicle does.
/// - [`PlanningError::UnknownNode`] for nodes missing from the oracle.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_dispatch::graph::Graph;
/// use u_dispatch::local_search::{monte_carlo_grouping, GroupingConfig};
/// use u_dispatch::models::{DeliveryRequest, Vehicle};
///
/// let mut g = Graph::new();
/// g.add_node("W", -1.0, 0.0).unwrap();
/// g.add_node("D", 0.0, 0.0).unwrap();
/// g.add_node("E", 1.0, 0.0).unwrap();
/// g.add_edge("W", "D", 1.0, 1.0, true).unwrap();
/// g.add_edge("D", "E", 1.0, 1.0, true).unwrap();
///
/// let vehicles = vec![Vehicle::new("V1", "D", 5), Vehicle::new("V2", "D", 5)];
/// let requests = vec![DeliveryRequest::new("R1", "W"), DeliveryRequest::new("R2", "E")];
/// let config = GroupingConfig::default().with_iterations(50);
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let result =
///     monte_carlo_grouping(&g, &"D".into(), &vehicles, &requests, &config, &mut rng).unwrap();
/// assert_eq!(result.plan.num_served(), 2);
/// assert_eq!(result.makespan_estimate, 2.0);
/// ```
pub fn monte_carlo_grouping<O, R>(
    oracle: &O,
    depot: &NodeId,
    vehicles: &[Vehicle],
    requests: &[DeliveryRequest],
    config: &GroupingConfig,
    rng: &mut R,
) -> Result<GroupingResult>
where
    O: TravelTimeOracle + ?Sized,
    R: Rng + ?Sized,
{
    if requests.is_empty() {
        let routes = vehicles.iter().map(|v| VehicleRoute::new(v.id())).collect();
        return Ok(GroupingResult {
            plan: Plan::new(depot.clone(), routes),
            makespan_estimate: 0.0,
            improvements: Vec::new(),
        });
    }
    if vehicles.is_empty() {
        return Err(PlanningError::EmptyFleet {
            requests: requests.len(),
        });
    }
    check_nodes(oracle, depot, vehicles, requests)?;
    debug!(
        vehicles = vehicles.len(),
        requests = requests.len(),
        iterations = config.iterations,
        "Starting Monte Carlo grouping"
    );

    let cache = DistanceCache::build(oracle, depot, requests);
    let objective = |grouping: &Grouping| makespan(&cache, depot, vehicles, requests, grouping);

    let mut current = Grouping::random(vehicles.len(), requests.len(), rng);
    let mut current_cost = objective(&current);
    let mut best = current.clone();
    let mut best_cost = current_cost;
    let mut improvements = vec![(0, best_cost)];

    for iteration in 1..=config.iterations {
        let candidate = random_move(&current, rng);
        let candidate_cost = objective(&candidate);
        if candidate_cost > current_cost {
            continue;
        }

        current = candidate;
        current_cost = candidate_cost;
        if current_cost < best_cost {
            best = current.clone();
            best_cost = current_cost;
            improvements.push((iteration, best_cost));
            trace!(iteration, makespan = best_cost, "New best grouping");
        }
    }

    if best_cost.is_infinite() {
        warn!("No feasible grouping found in {} iterations", config.iterations);
    }
    debug!(
        makespan = best_cost,
        improvements = improvements.len(),
        "Finished Monte Carlo grouping"
    );

    let routes = vehicles
        .iter()
        .zip(best.groups())
        .map(|(vehicle, group)| {
            let stops: Vec<&DeliveryRequest> = group.iter().map(|&i| &requests[i]).collect();
            let ordered = nearest_neighbor_order(&cache, depot, &stops)
                .into_iter()
                .cloned()
                .collect();
            VehicleRoute::with_stops(vehicle.id(), ordered)
        })
        .collect();

    Ok(GroupingResult {
        plan: Plan::new(depot.clone(), routes),
        makespan_estimate: best_cost,
        improvements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::RouteEvaluator;
    use crate::graph::Graph;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    /// Star around depot D: N, S, E, W each 5 away, X isolated.
    fn star() -> (Graph, NodeId) {
        let mut g = Graph::new();
        g.add_node("D", 0.0, 0.0).expect("new node");
        for (id, x, y) in [("N", 0.0, 5.0), ("S", 0.0, -5.0), ("E", 5.0, 0.0), ("W", -5.0, 0.0)] {
            g.add_node(id, x, y).expect("new node");
            g.add_edge("D", id, 5.0, 1.0, true).expect("valid edge");
        }
        g.add_node("X", 50.0, 50.0).expect("new node");
        (g, NodeId::from("D"))
    }

    struct Counting<'a> {
        graph: &'a Graph,
        calls: Cell<usize>,
    }

    impl TravelTimeOracle for Counting<'_> {
        fn travel_time(&self, from: &NodeId, to: &NodeId) -> f64 {
            self.calls.set(self.calls.get() + 1);
            self.graph.travel_time(from, to)
        }

        fn contains_node(&self, node: &NodeId) -> bool {
            self.graph.contains(node)
        }
    }

    fn unit_requests(nodes: &[&str]) -> Vec<DeliveryRequest> {
        nodes
            .iter()
            .enumerate()
            .map(|(i, n)| DeliveryRequest::new(format!("R{}", i + 1), *n))
            .collect()
    }

    fn served_ids(plan: &Plan) -> Vec<String> {
        let mut ids: Vec<String> = plan.served().map(|r| r.id().to_string()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_config_default() {
        assert_eq!(GroupingConfig::default().iterations, DEFAULT_ITERATIONS);
        let parsed: GroupingConfig = serde_json::from_str("{}").expect("valid json");
        assert_eq!(parsed, GroupingConfig::default());
        let parsed: GroupingConfig =
            serde_json::from_str(r#"{"iterations": 10}"#).expect("valid json");
        assert_eq!(parsed.iterations, 10);
    }

    #[test]
    fn test_empty_requests() {
        let (g, depot) = star();
        let counting = Counting {
            graph: &g,
            calls: Cell::new(0),
        };
        let vehicles = vec![Vehicle::new("V1", "D", 4), Vehicle::new("V2", "D", 4)];
        let mut rng = StdRng::seed_from_u64(0);
        let result = monte_carlo_grouping(
            &counting,
            &depot,
            &vehicles,
            &[],
            &GroupingConfig::default(),
            &mut rng,
        )
        .expect("trivial");
        assert_eq!(result.makespan_estimate, 0.0);
        assert_eq!(result.plan.routes().len(), 2);
        assert!(result.plan.routes().iter().all(|r| r.is_empty()));
        assert_eq!(counting.calls.get(), 0);
    }

    #[test]
    fn test_oracle_only_queried_for_cache() {
        let (g, depot) = star();
        let counting = Counting {
            graph: &g,
            calls: Cell::new(0),
        };
        let vehicles = vec![Vehicle::new("V1", "D", 2), Vehicle::new("V2", "D", 2)];
        // Three distinct destinations, N visited twice.
        let requests = unit_requests(&["N", "S", "E", "N"]);
        let mut rng = StdRng::seed_from_u64(13);
        let result = monte_carlo_grouping(
            &counting,
            &depot,
            &vehicles,
            &requests,
            &GroupingConfig::default(),
            &mut rng,
        )
        .expect("valid input");
        assert!(result.makespan_estimate.is_finite());
        // (k + 1) * k / 2 pairs over depot plus k = 3 destinations
        assert_eq!(counting.calls.get(), 6);
    }

    #[test]
    fn test_oversized_request_is_costed_with_reloads() {
        let (g, depot) = star();
        let vehicles = vec![Vehicle::new("V1", "D", 4)];
        let requests = vec![
            DeliveryRequest::new("R1", "N").with_demand(10),
            DeliveryRequest::new("R2", "S"),
        ];
        let config = GroupingConfig::default().with_iterations(10);
        let mut rng = StdRng::seed_from_u64(3);
        let result =
            monte_carlo_grouping(&g, &depot, &vehicles, &requests, &config, &mut rng)
                .expect("not validated by this planner");
        // D-N 5, reload N-D 5, D-S 5, S-D 5
        assert_eq!(result.makespan_estimate, 20.0);
        assert_eq!(result.plan.num_served(), 2);
    }

    #[test]
    fn test_two_vehicles_unit_demands() {
        let (g, depot) = star();
        let vehicles = vec![Vehicle::new("V1", "D", 4), Vehicle::new("V2", "D", 4)];
        let requests = unit_requests(&["N", "S", "E", "W"]);
        let config = GroupingConfig::default().with_iterations(200);
        let mut rng = StdRng::seed_from_u64(11);
        let result =
            monte_carlo_grouping(&g, &depot, &vehicles, &requests, &config, &mut rng)
                .expect("valid input");
        assert!(result.makespan_estimate.is_finite());
        assert_eq!(served_ids(&result.plan), vec!["R1", "R2", "R3", "R4"]);
        // Best split serves two arms per vehicle: 5 + 10 + 5 = 20
        assert_eq!(result.makespan_estimate, 20.0);
    }

    #[test]
    fn test_makespan_matches_plan() {
        let (g, depot) = star();
        let vehicles = vec![Vehicle::new("V1", "D", 2), Vehicle::new("V2", "D", 3)];
        let requests = unit_requests(&["N", "S", "E", "W", "N"]);
        let config = GroupingConfig::default().with_iterations(300);
        let mut rng = StdRng::seed_from_u64(5);
        let result =
            monte_carlo_grouping(&g, &depot, &vehicles, &requests, &config, &mut rng)
                .expect("valid input");

        let eval = RouteEvaluator::new(&g, &depot);
        let recomputed = vehicles
            .iter()
            .map(|v| {
                let route = result.plan.route(v.id()).expect("fleet vehicle");
                eval.route_cost(&depot, v.capacity(), route.stops(), true)
            })
            .fold(0.0f64, f64::max);
        assert_eq!(result.makespan_estimate, recomputed);
    }

    #[test]
    fn test_improvements_strictly_decrease() {
        let (g, depot) = star();
        let vehicles = vec![
            Vehicle::new("V1", "D", 2),
            Vehicle::new("V2", "D", 2),
            Vehicle::new("V3", "D", 2),
        ];
        let requests = unit_requests(&["N", "S", "E", "W", "N", "S", "E"]);
        let config = GroupingConfig::default().with_iterations(500);
        let mut rng = StdRng::seed_from_u64(21);
        let result =
            monte_carlo_grouping(&g, &depot, &vehicles, &requests, &config, &mut rng)
                .expect("valid input");

        assert_eq!(result.improvements[0].0, 0);
        for pair in result.improvements.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[1].1 < pair[0].1);
        }
        let last = result.improvements.last().expect("initial entry");
        assert_eq!(last.1, result.makespan_estimate);
    }

    #[test]
    fn test_same_seed_same_plan() {
        let (g, depot) = star();
        let vehicles = vec![Vehicle::new("V1", "D", 3), Vehicle::new("V2", "D", 3)];
        let requests = unit_requests(&["N", "S", "E", "W", "E"]);
        let config = GroupingConfig::default().with_iterations(100);
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            monte_carlo_grouping(&g, &depot, &vehicles, &requests, &config, &mut rng)
                .expect("valid input")
        };
        assert_eq!(run(8), run(8));
    }

    #[test]
    fn test_single_vehicle() {
        let (g, depot) = star();
        let vehicles = vec![Vehicle::new("V1", "D", 10)];
        let requests = unit_requests(&["N", "S", "E"]);
        let config = GroupingConfig::default().with_iterations(20);
        let mut rng = StdRng::seed_from_u64(2);
        let result =
            monte_carlo_grouping(&g, &depot, &vehicles, &requests, &config, &mut rng)
                .expect("valid input");
        // D-N-D-S-D-E-D through the hub: 6 legs of 5
        assert_eq!(result.makespan_estimate, 30.0);
        assert_eq!(result.improvements.len(), 1);
        assert_eq!(result.plan.route("V1").expect("fleet vehicle").len(), 3);
    }

    #[test]
    fn test_unusable_vehicle_keeps_infinite() {
        let (g, depot) = star();
        let vehicles = vec![Vehicle::new("V1", "D", 4), Vehicle::new("V2", "D", 0)];
        let requests = unit_requests(&["N", "S"]);
        let config = GroupingConfig::default().with_iterations(50);
        let mut rng = StdRng::seed_from_u64(4);
        let result =
            monte_carlo_grouping(&g, &depot, &vehicles, &requests, &config, &mut rng)
                .expect("still a valid outcome");
        assert!(result.makespan_estimate.is_infinite());
        assert_eq!(served_ids(&result.plan), vec!["R1", "R2"]);
    }

    #[test]
    fn test_unreachable_request_keeps_infinite() {
        let (g, depot) = star();
        let vehicles = vec![Vehicle::new("V1", "D", 4), Vehicle::new("V2", "D", 4)];
        let requests = unit_requests(&["N", "X"]);
        let config = GroupingConfig::default().with_iterations(50);
        let mut rng = StdRng::seed_from_u64(4);
        let result =
            monte_carlo_grouping(&g, &depot, &vehicles, &requests, &config, &mut rng)
                .expect("still a valid outcome");
        assert!(result.makespan_estimate.is_infinite());
        assert_eq!(result.plan.num_served(), 2);
    }

    #[test]
    fn test_empty_fleet() {
        let (g, depot) = star();
        let requests = unit_requests(&["N"]);
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(
            monte_carlo_grouping(
                &g,
                &depot,
                &[],
                &requests,
                &GroupingConfig::default(),
                &mut rng
            ),
            Err(PlanningError::EmptyFleet { requests: 1 })
        );
    }

    #[test]
    fn test_unknown_node() {
        let (g, depot) = star();
        let vehicles = vec![Vehicle::new("V1", "D", 4)];
        let requests = unit_requests(&["Q"]);
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(
            monte_carlo_grouping(
                &g,
                &depot,
                &vehicles,
                &requests,
                &GroupingConfig::default(),
                &mut rng
            ),
            Err(PlanningError::UnknownNode("Q".into()))
        );
    }
}
