//! # waste-routing
//!
//! Capacitated routing for waste collection: a depot, collection points
//! with quantities to pick up, and a travel-cost matrix are turned into
//! vehicle routes with the Clarke-Wright savings heuristic.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Demands, Vehicle, CollectionProblem, Route, Solution)
//! - [`distance`] — Travel-cost matrix
//! - [`evaluation`] — Solution invariant checking and cost evaluation
//! - [`constructive`] — Savings estimation, route set, and merge controller
//! - [`error`] — Error taxonomy
//!
//! ## Example
//!
//! ```
//! use waste_routing::constructive::clarke_wright_savings;
//! use waste_routing::distance::DistanceMatrix;
//! use waste_routing::models::{CollectionProblem, Demands, Vehicle};
//!
//! let dm = DistanceMatrix::from_rows(vec![
//!     vec![0.0, 10.0, 20.0, 30.0],
//!     vec![10.0, 0.0, 15.0, 25.0],
//!     vec![20.0, 15.0, 0.0, 18.0],
//!     vec![30.0, 25.0, 18.0, 0.0],
//! ])?;
//! let demands = Demands::from_pairs([(1, 2.0), (2, 3.0), (3, 1.0)]);
//! let problem = CollectionProblem::new(dm, demands, Vehicle::new(5.0))?;
//!
//! let solution = clarke_wright_savings(&problem)?;
//! for route in solution.routes() {
//!     assert_eq!(route.nodes().first(), Some(&0));
//!     assert_eq!(route.nodes().last(), Some(&0));
//! }
//! # Ok::<(), waste_routing::RoutingError>(())
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod models;

pub use error::{RoutingError, RoutingResult};
