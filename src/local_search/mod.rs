//! Local search over request-to-vehicle assignments.
//!
//! - [`Grouping`] / [`random_move`] / [`makespan`]: Grouping state, random
//!   reassignment move, makespan objective with nearest-neighbor sequencing
//! - [`monte_carlo_grouping`]: Plateau-permissive hill climbing over
//!   groupings with a cached travel-time table

mod grouping;
mod monte_carlo;

pub use grouping::{makespan, random_move, Grouping};
pub use monte_carlo::{monte_carlo_grouping, GroupingConfig, GroupingResult, DEFAULT_ITERATIONS};
