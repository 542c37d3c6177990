//! Error types.

use std::fmt;

/// An error raised while assembling or solving a collection problem.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// Malformed input: non-square matrix, out-of-range depot, bad capacity
    /// or demand.
    InvalidInput(String),
    /// A single customer's demand exceeds the vehicle capacity.
    CapacityExceeded {
        /// Offending customer.
        node: usize,
        /// Its demand.
        demand: f64,
        /// Vehicle capacity.
        capacity: f64,
    },
    /// A node the route set does not hold.
    UnknownNode(usize),
}

/// A type alias for results with [`RoutingError`].
pub type RoutingResult<T> = Result<T, RoutingError>;

impl RoutingError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::CapacityExceeded {
                node,
                demand,
                capacity,
            } => write!(
                f,
                "demand {demand} of node {node} exceeds vehicle capacity {capacity}"
            ),
            Self::UnknownNode(node) => write!(f, "node {node} is not part of any route"),
        }
    }
}

impl std::error::Error for RoutingError {}
