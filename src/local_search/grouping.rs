//! Request-to-vehicle groupings and their objective.
//!
//! A [`Grouping`] only records which vehicle serves which requests. Visit
//! order is not part of the state: [`makespan`] derives it with the
//! nearest-neighbor heuristic every time a grouping is evaluated.

use rand::Rng;

use crate::constructive::nearest_neighbor_order;
use crate::distance::TravelTimeOracle;
use crate::evaluation::RouteEvaluator;
use crate::models::{DeliveryRequest, NodeId, Vehicle};

/// Unordered request groups, one per vehicle, holding request indices.
///
/// # Examples
///
/// ```
/// use u_dispatch::local_search::Grouping;
///
/// let g = Grouping::from_groups(vec![vec![0, 2], vec![1]]);
/// assert_eq!(g.num_vehicles(), 2);
/// assert_eq!(g.num_assigned(), 3);
/// assert_eq!(g.group(0), &[0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping {
    groups: Vec<Vec<usize>>,
}

impl Grouping {
    /// Creates a grouping with `num_vehicles` empty groups.
    pub fn new(num_vehicles: usize) -> Self {
        Self {
            groups: vec![Vec::new(); num_vehicles],
        }
    }

    /// Creates a grouping from explicit groups.
    pub fn from_groups(groups: Vec<Vec<usize>>) -> Self {
        Self { groups }
    }

    /// Assigns each of `num_requests` requests to a uniformly random vehicle,
    /// independently of the others.
    ///
    /// # Panics
    ///
    /// Panics if `num_vehicles` is zero while `num_requests` is not.
    pub fn random<R: Rng + ?Sized>(num_vehicles: usize, num_requests: usize, rng: &mut R) -> Self {
        let mut grouping = Self::new(num_vehicles);
        for request in 0..num_requests {
            let v = rng.random_range(0..num_vehicles as u64) as usize;
            grouping.groups[v].push(request);
        }
        grouping
    }

    /// Groups in fleet order.
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Requests of one vehicle.
    pub fn group(&self, vehicle: usize) -> &[usize] {
        &self.groups[vehicle]
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.groups.len()
    }

    /// Total number of assigned requests.
    pub fn num_assigned(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }
}

/// Moves one random request to another random vehicle.
///
/// The donor is drawn uniformly among vehicles with at least one request,
/// the request uniformly within the donor, and the receiver uniformly among
/// the other vehicles. With a single vehicle the move changes nothing.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_dispatch::local_search::{random_move, Grouping};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let g = Grouping::from_groups(vec![vec![0, 1, 2], vec![]]);
/// let moved = random_move(&g, &mut rng);
/// assert_eq!(moved.group(0).len(), 2);
/// assert_eq!(moved.group(1).len(), 1);
/// ```
pub fn random_move<R: Rng + ?Sized>(grouping: &Grouping, rng: &mut R) -> Grouping {
    let mut next = grouping.clone();
    let donors: Vec<usize> = (0..next.num_vehicles())
        .filter(|&v| !next.groups[v].is_empty())
        .collect();
    if donors.is_empty() {
        return next;
    }

    let from = donors[rng.random_range(0..donors.len() as u64) as usize];
    let pos = rng.random_range(0..next.groups[from].len() as u64) as usize;
    let request = next.groups[from].remove(pos);

    let n = next.num_vehicles();
    if n == 1 {
        next.groups[from].insert(pos, request);
        return next;
    }

    let mut to = rng.random_range(0..(n - 1) as u64) as usize;
    if to >= from {
        to += 1;
    }
    next.groups[to].push(request);
    next
}

/// Longest single-vehicle route time over the fleet.
///
/// Each group is sequenced from the depot with [`nearest_neighbor_order`]
/// and costed by [`RouteEvaluator`], starting and ending at the depot. Any
/// vehicle with non-positive capacity makes the objective infinite, even
/// with an empty group. Empty groups contribute zero.
pub fn makespan<O: TravelTimeOracle + ?Sized>(
    oracle: &O,
    depot: &NodeId,
    vehicles: &[Vehicle],
    requests: &[DeliveryRequest],
    grouping: &Grouping,
) -> f64 {
    let evaluator = RouteEvaluator::new(oracle, depot);
    let mut makespan = 0.0f64;

    for (vehicle, group) in vehicles.iter().zip(grouping.groups()) {
        if !vehicle.is_usable() {
            return f64::INFINITY;
        }
        if group.is_empty() {
            continue;
        }
        let stops: Vec<&DeliveryRequest> = group.iter().map(|&i| &requests[i]).collect();
        let order = nearest_neighbor_order(oracle, depot, &stops);
        let cost = evaluator.route_cost(depot, vehicle.capacity(), order.iter().copied(), true);
        makespan = makespan.max(cost);
    }

    makespan
}
