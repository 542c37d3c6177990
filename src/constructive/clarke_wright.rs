//! Clarke-Wright savings algorithm.
//!
//! # Algorithm
//!
//! The savings algorithm (Clarke & Wright, 1964) starts with each customer
//! on its own route (depot → customer → depot). Savings
//!
//! ```text
//! s(i, j) = d(0, i) + d(0, j) - d(i, j)
//! ```
//!
//! are scanned once in decreasing order; two routes are joined at `i` and
//! `j` when both are route endpoints, the routes differ, and the combined
//! load fits the vehicle. By default negative savings are not committed,
//! which departs from the textbook procedure (it merges whenever the
//! routes allow it) but keeps the result at or below the
//! one-route-per-customer baseline on a symmetric matrix. See
//! [`MergeController::with_negative_savings`].
//!
//! # Complexity
//!
//! O(n² log n) where n = number of customers (dominated by sorting savings).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use log::{debug, info, trace, warn};

use super::route_set::{MergeCheck, RouteSet};
use super::savings::{compute_savings, Saving};
use crate::distance::DistanceMatrix;
use crate::error::RoutingResult;
use crate::evaluation::SolutionEvaluator;
use crate::models::{CollectionProblem, MergeStats, Route, Solution};

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Single-pass merge driver over a sorted savings list.
///
/// Each saving is tested against the current [`RouteSet`] and committed if
/// feasible; nothing is revisited.
pub struct MergeController<'a> {
    distances: &'a DistanceMatrix,
    negative_savings: bool,
}

impl<'a> MergeController<'a> {
    /// Creates a controller costing routes with `distances`.
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self {
            distances,
            negative_savings: false,
        }
    }

    /// Sets whether savings below zero are merged like any other.
    ///
    /// Off by default. Turning it on gives the textbook Clarke-Wright
    /// behaviour: fewer routes, at the price of a total cost that can
    /// exceed the baseline.
    pub fn with_negative_savings(mut self, enabled: bool) -> Self {
        self.negative_savings = enabled;
        self
    }

    /// Consumes `savings` in order, merging `route_set` wherever feasible.
    /// Savings below zero are skipped (and counted in
    /// [`MergeStats::negative`]) unless
    /// [`with_negative_savings`](Self::with_negative_savings) is set.
    ///
    /// Fails with [`crate::RoutingError::UnknownNode`] if a saving names a
    /// node the route set does not hold.
    pub fn run(&self, savings: &[Saving], mut route_set: RouteSet) -> RoutingResult<Solution> {
        let baseline_cost = self.total_cost(route_set.routes());
        let mut stats = MergeStats::default();

        for saving in savings {
            stats.examined += 1;
            if saving.value < 0.0 && !self.negative_savings {
                stats.negative += 1;
                trace!("skipped {} and {}: negative saving", saving.i, saving.j);
                continue;
            }
            let check = route_set.check_merge(saving.i, saving.j)?;
            match check {
                MergeCheck::Feasible(_) => {
                    let splice = route_set.merge(saving.i, saving.j);
                    stats.merged += 1;
                    debug!(
                        "merged {} and {} ({splice:?}, saving {:.3}), {} routes left",
                        saving.i,
                        saving.j,
                        saving.value,
                        route_set.len()
                    );
                    continue;
                }
                MergeCheck::SameRoute => stats.same_route += 1,
                MergeCheck::NotEndpoint(_) => stats.not_endpoint += 1,
                MergeCheck::OverCapacity { .. } => stats.over_capacity += 1,
            }
            trace!("skipped {} and {}: {check:?}", saving.i, saving.j);
        }

        let routes = route_set.into_routes();
        let total_cost = self.total_cost(&routes);
        Ok(Solution::new(routes, total_cost, baseline_cost, stats))
    }

    fn total_cost(&self, routes: &[Route]) -> f64 {
        routes.iter().map(|r| r.cost(self.distances)).sum()
    }
}

/// Constructs routes for a collection problem with the Clarke-Wright
/// savings algorithm.
///
/// Starts with one route per customer, then merges routes in order of
/// decreasing savings while respecting vehicle capacity. The finished
/// solution is re-evaluated; violations (only possible for dedicated
/// oversized routes) are logged as warnings.
///
/// # Examples
///
/// ```
/// use waste_routing::distance::DistanceMatrix;
/// use waste_routing::models::{CollectionProblem, Demands, Vehicle};
/// use waste_routing::constructive::clarke_wright_savings;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 20.0, 30.0],
///     vec![10.0, 0.0, 15.0, 25.0],
///     vec![20.0, 15.0, 0.0, 18.0],
///     vec![30.0, 25.0, 18.0, 0.0],
/// ])
/// .unwrap();
/// let demands = Demands::from_pairs([(1, 2.0), (2, 3.0), (3, 1.0)]);
/// let problem = CollectionProblem::new(dm, demands, Vehicle::new(5.0)).unwrap();
///
/// let solution = clarke_wright_savings(&problem).unwrap();
/// assert_eq!(solution.num_routes(), 2);
/// assert!((solution.total_cost() - 88.0).abs() < 1e-10);
/// ```
pub fn clarke_wright_savings(problem: &CollectionProblem) -> RoutingResult<Solution> {
    let savings = compute_savings(problem.distances(), problem.depot())?;
    if !problem.distances().is_symmetric(SYMMETRY_TOLERANCE) {
        warn!(
            "clarke-wright: asymmetric distances, reversed routes may cost more than the baseline"
        );
    }
    let route_set = RouteSet::new(problem);
    info!(
        "clarke-wright: {} customers, {} savings, capacity {}",
        problem.num_customers(),
        savings.len(),
        problem.capacity()
    );

    let solution = MergeController::new(problem.distances()).run(&savings, route_set)?;

    let (_, violations) = SolutionEvaluator::new(problem).evaluate(&solution);
    for violation in &violations {
        warn!("clarke-wright: {:?}", violation.kind);
    }

    info!(
        "clarke-wright: {} routes, cost {:.3} (baseline {:.3}), {} merges, {} skipped",
        solution.num_routes(),
        solution.total_cost(),
        solution.baseline_cost(),
        solution.stats().merged,
        solution.stats().skipped()
    );
    Ok(solution)
}
