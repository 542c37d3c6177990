//! Depot-anchored route type.

use serde::Serialize;

use crate::distance::DistanceMatrix;

/// An ordered tour `[depot, c1, ..., ck, depot]` served by one vehicle,
/// together with the total quantity it collects.
///
/// Routes are built by the constructive heuristics and always hold at
/// least one customer.
///
/// # Examples
///
/// ```
/// use waste_routing::models::Route;
///
/// let route = Route::from_customers(0, vec![2, 3], 4.0);
/// assert_eq!(route.nodes(), &[0, 2, 3, 0]);
/// assert_eq!(route.customers(), &[2, 3]);
/// assert_eq!(route.first_customer(), 2);
/// assert_eq!(route.last_customer(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    nodes: Vec<usize>,
    load: f64,
}

impl Route {
    /// Wraps a customer sequence with the depot on both ends.
    ///
    /// # Panics
    ///
    /// Panics if `customers` is empty.
    pub fn from_customers(depot: usize, customers: Vec<usize>, load: f64) -> Self {
        assert!(!customers.is_empty(), "a route needs at least one customer");
        let mut nodes = Vec::with_capacity(customers.len() + 2);
        nodes.push(depot);
        nodes.extend(customers);
        nodes.push(depot);
        Self { nodes, load }
    }

    /// Trivial round trip `[depot, customer, depot]`.
    pub fn singleton(depot: usize, customer: usize, load: f64) -> Self {
        Self::from_customers(depot, vec![customer], load)
    }

    /// Full node sequence, depot included at both ends.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Customer sequence without the depot anchors.
    pub fn customers(&self) -> &[usize] {
        &self.nodes[1..self.nodes.len() - 1]
    }

    /// Depot node anchoring this route.
    pub fn depot(&self) -> usize {
        self.nodes[0]
    }

    /// Customer visited right after leaving the depot.
    pub fn first_customer(&self) -> usize {
        self.nodes[1]
    }

    /// Customer visited right before returning to the depot.
    pub fn last_customer(&self) -> usize {
        self.nodes[self.nodes.len() - 2]
    }

    /// Number of customers on this route.
    pub fn len(&self) -> usize {
        self.nodes.len() - 2
    }

    /// Always `false`: a route carries at least one customer.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total quantity collected along the route.
    pub fn load(&self) -> f64 {
        self.load
    }

    /// Sum of edge costs along the route.
    pub fn cost(&self, distances: &DistanceMatrix) -> f64 {
        distances.route_cost(&self.nodes)
    }
}
