//! Travel-time oracles and caches.

mod cache;
mod matrix;
mod oracle;

pub use cache::DistanceCache;
pub use matrix::DistanceMatrix;
pub use oracle::TravelTimeOracle;
