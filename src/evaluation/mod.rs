//! Route cost evaluation with multi-trip capacity resets.

mod evaluator;

pub use evaluator::{Leg, LegKind, RouteEvaluator, Schedule};
