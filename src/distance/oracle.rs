//! Travel-time oracle trait.

use crate::models::NodeId;

/// Source of point-to-point travel times.
///
/// Implemented by [`Graph`](crate::graph::Graph) (live A* search) and by
/// [`DistanceCache`](super::DistanceCache) (precomputed lookups). Route
/// evaluation and both planners only talk to this trait.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::TravelTimeOracle;
/// use u_dispatch::models::NodeId;
///
/// /// Every pair of distinct nodes is one time unit apart.
/// struct Unit;
///
/// impl TravelTimeOracle for Unit {
///     fn travel_time(&self, from: &NodeId, to: &NodeId) -> f64 {
///         if from == to { 0.0 } else { 1.0 }
///     }
/// }
///
/// assert_eq!(Unit.travel_time(&"a".into(), &"b".into()), 1.0);
/// assert!(Unit.contains_node(&"anything".into()));
/// ```
pub trait TravelTimeOracle {
    /// Minimum travel time from `from` to `to`.
    ///
    /// Returns `f64::INFINITY` if `to` cannot be reached.
    fn travel_time(&self, from: &NodeId, to: &NodeId) -> f64;

    /// Returns `true` if the oracle knows the node.
    ///
    /// Defaults to `true`.
    fn contains_node(&self, _node: &NodeId) -> bool {
        true
    }
}

impl<T: TravelTimeOracle + ?Sized> TravelTimeOracle for &T {
    fn travel_time(&self, from: &NodeId, to: &NodeId) -> f64 {
        (**self).travel_time(from, to)
    }

    fn contains_node(&self, node: &NodeId) -> bool {
        (**self).contains_node(node)
    }
}
