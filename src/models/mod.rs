//! Domain model types for waste-collection routing.
//!
//! Provides the core abstractions: per-customer demands, the collection
//! vehicle and its capacity policy, a validated problem instance,
//! depot-anchored routes, and the solution handed to renderers.

mod demand;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use demand::Demands;
pub use problem::CollectionProblem;
pub use route::Route;
pub use solution::{MergeStats, Solution, Violation, ViolationType};
pub use vehicle::{OversizedDemand, Vehicle};
