//! Constructive heuristics for building collection routes.
//!
//! - [`compute_savings`] — pairwise savings, sorted once, O(n² log n)
//! - [`RouteSet`] — disjoint depot-anchored routes with merge bookkeeping
//! - [`MergeController`] — single greedy pass over the savings list
//! - [`clarke_wright_savings`] — Clarke-Wright savings algorithm (1964), end to end

mod clarke_wright;
mod route_set;
mod savings;

pub use clarke_wright::{clarke_wright_savings, MergeController};
pub use route_set::{Endpoint, MergeCheck, PartitionError, RouteSet, Splice};
pub use savings::{compute_savings, Saving};
