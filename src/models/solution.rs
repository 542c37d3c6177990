//! Solution, merge statistics and violation types.

use serde::Serialize;

use super::Route;

/// A type of invariant violation found in a solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViolationType {
    /// Route load above vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: f64,
        /// Vehicle capacity.
        capacity: f64,
    },
    /// Route does not start and end at the depot, or visits it in between.
    NotDepotAnchored {
        /// Route index.
        route_index: usize,
    },
    /// Route has no customer.
    EmptyRoute {
        /// Route index.
        route_index: usize,
    },
    /// Stored route load differs from the sum of its customers' demands.
    LoadMismatch {
        /// Route index.
        route_index: usize,
        /// Load stored on the route.
        recorded: f64,
        /// Sum of member demands.
        expected: f64,
    },
    /// Customer served by no route.
    CustomerMissing {
        /// Customer node.
        node: usize,
    },
    /// Customer served more than once.
    CustomerDuplicated {
        /// Customer node.
        node: usize,
    },
    /// Node outside the problem.
    UnknownNode {
        /// Route index.
        route_index: usize,
        /// Offending node.
        node: usize,
    },
}

/// An invariant violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Counters collected during a single savings pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Savings examined.
    pub examined: usize,
    /// Merges committed.
    pub merged: usize,
    /// Skipped: both customers already on the same route.
    pub same_route: usize,
    /// Skipped: a customer sits in the interior of its route.
    pub not_endpoint: usize,
    /// Skipped: combined load above capacity.
    pub over_capacity: usize,
    /// Skipped: joining would lengthen the tour.
    pub negative: usize,
}

impl MergeStats {
    /// Savings examined but not merged.
    pub fn skipped(&self) -> usize {
        self.same_route + self.not_endpoint + self.over_capacity + self.negative
    }
}

/// Routes produced by a constructive heuristic together with their cost.
///
/// Route order carries no meaning.
///
/// # Examples
///
/// ```
/// use waste_routing::models::{MergeStats, Route, Solution};
///
/// let routes = vec![Route::singleton(0, 1, 2.0), Route::from_customers(0, vec![2, 3], 4.0)];
/// let sol = Solution::new(routes, 88.0, 120.0, MergeStats::default());
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 3);
/// assert!((sol.savings() - 32.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    routes: Vec<Route>,
    total_cost: f64,
    baseline_cost: f64,
    stats: MergeStats,
}

impl Solution {
    /// Creates a solution.
    pub fn new(routes: Vec<Route>, total_cost: f64, baseline_cost: f64, stats: MergeStats) -> Self {
        Self {
            routes,
            total_cost,
            baseline_cost,
            stats,
        }
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of customers served.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Sum of consecutive-edge costs over every route.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Cost of serving every customer on its own round trip.
    pub fn baseline_cost(&self) -> f64 {
        self.baseline_cost
    }

    /// Cost saved compared to the one-route-per-customer baseline.
    pub fn savings(&self) -> f64 {
        self.baseline_cost - self.total_cost
    }

    /// Counters from the merge pass.
    pub fn stats(&self) -> &MergeStats {
        &self.stats
    }

    /// Index of the route serving `node`, if any.
    pub fn route_index_of(&self, node: usize) -> Option<usize> {
        self.routes
            .iter()
            .position(|r| r.customers().contains(&node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Solution {
        let routes = vec![
            Route::singleton(0, 1, 2.0),
            Route::from_customers(0, vec![2, 3], 4.0),
        ];
        let stats = MergeStats {
            examined: 3,
            merged: 1,
            same_route: 0,
            not_endpoint: 0,
            over_capacity: 2,
            negative: 0,
        };
        Solution::new(routes, 88.0, 120.0, stats)
    }

    #[test]
    fn test_solution_accessors() {
        let sol = sample();
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.total_cost(), 88.0);
        assert_eq!(sol.baseline_cost(), 120.0);
        assert_eq!(sol.stats().skipped(), 2);
        assert_eq!(sol.route_index_of(3), Some(1));
        assert_eq!(sol.route_index_of(0), None);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample()).expect("serializable");
        assert_eq!(json["total_cost"], 88.0);
        assert_eq!(json["routes"][1]["nodes"], serde_json::json!([0, 2, 3, 0]));
        assert_eq!(json["routes"][1]["load"], 4.0);
        assert_eq!(json["stats"]["merged"], 1);
    }

    #[test]
    fn test_violation_types() {
        let v = Violation::new(ViolationType::CapacityExceeded {
            route_index: 0,
            load: 7.0,
            capacity: 5.0,
        });
        assert!(matches!(
            v.kind,
            ViolationType::CapacityExceeded { route_index: 0, .. }
        ));
    }
}
