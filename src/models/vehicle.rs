//! Vehicle configuration: capacity, depot and oversized-demand policy.

use serde::{Deserialize, Serialize};

/// What to do with a customer whose demand alone exceeds vehicle capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversizedDemand {
    /// Fail with [`crate::RoutingError::CapacityExceeded`] when the problem
    /// is assembled.
    #[default]
    Reject,
    /// Serve the customer on its own route. The route never merges and is
    /// reported as a capacity violation.
    DedicatedRoute,
}

/// The collection vehicle shared by every route (homogeneous fleet,
/// unlimited count).
///
/// # Examples
///
/// ```
/// use waste_routing::models::{OversizedDemand, Vehicle};
///
/// let v = Vehicle::new(5.0).with_depot(2);
/// assert_eq!(v.capacity(), 5.0);
/// assert_eq!(v.depot(), 2);
/// assert_eq!(v.oversized(), OversizedDemand::Reject);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    capacity: f64,
    #[serde(default)]
    depot: usize,
    #[serde(default)]
    oversized: OversizedDemand,
}

impl Vehicle {
    /// Creates a vehicle with the given capacity.
    ///
    /// Default: depot 0, oversized demands rejected.
    pub fn new(capacity: f64) -> Self {
        Self {
            capacity,
            depot: 0,
            oversized: OversizedDemand::Reject,
        }
    }

    /// Sets the depot node (start and end of every route).
    pub fn with_depot(mut self, depot: usize) -> Self {
        self.depot = depot;
        self
    }

    /// Sets the oversized-demand policy.
    pub fn with_oversized(mut self, policy: OversizedDemand) -> Self {
        self.oversized = policy;
        self
    }

    /// Maximum load per route.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Depot node.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Oversized-demand policy.
    pub fn oversized(&self) -> OversizedDemand {
        self.oversized
    }
}
