//! Solution evaluator that re-derives cost and checks route invariants.

use crate::models::{CollectionProblem, Route, Solution, Violation, ViolationType};

const LOAD_TOLERANCE: f64 = 1e-9;

/// Evaluates finished solutions against a problem: depot anchoring,
/// capacity, load bookkeeping, and the partition of customers over routes.
///
/// # Examples
///
/// ```
/// use waste_routing::distance::DistanceMatrix;
/// use waste_routing::models::{CollectionProblem, Demands, Vehicle};
/// use waste_routing::constructive::clarke_wright_savings;
/// use waste_routing::evaluation::SolutionEvaluator;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 20.0],
///     vec![10.0, 0.0, 15.0],
///     vec![20.0, 15.0, 0.0],
/// ])
/// .unwrap();
/// let demands = Demands::from_pairs([(1, 2.0), (2, 2.0)]);
/// let problem = CollectionProblem::new(dm, demands, Vehicle::new(5.0)).unwrap();
///
/// let solution = clarke_wright_savings(&problem).unwrap();
/// let (cost, violations) = SolutionEvaluator::new(&problem).evaluate(&solution);
/// assert!(violations.is_empty());
/// assert!((cost - solution.total_cost()).abs() < 1e-10);
/// ```
pub struct SolutionEvaluator<'a> {
    problem: &'a CollectionProblem,
}

impl<'a> SolutionEvaluator<'a> {
    /// Creates a new evaluator for the given problem.
    pub fn new(problem: &'a CollectionProblem) -> Self {
        Self { problem }
    }

    /// Cost and violations of a single route; `route_index` is used to tag
    /// the violations.
    pub fn evaluate_route(&self, route_index: usize, route: &Route) -> (f64, Vec<Violation>) {
        let mut violations = Vec::new();
        let depot = self.problem.depot();
        let nodes = route.nodes();

        if let Some(&node) = nodes.iter().find(|&&n| !self.problem.distances().contains(n)) {
            violations.push(Violation::new(ViolationType::UnknownNode { route_index, node }));
            return (0.0, violations);
        }

        let anchored = nodes.len() >= 2
            && nodes[0] == depot
            && nodes[nodes.len() - 1] == depot
            && !nodes[1..nodes.len() - 1].contains(&depot);
        if !anchored {
            violations.push(Violation::new(ViolationType::NotDepotAnchored { route_index }));
        }
        if nodes.len() <= 2 {
            violations.push(Violation::new(ViolationType::EmptyRoute { route_index }));
        }

        let expected: f64 = nodes.iter().map(|&n| self.problem.demand(n)).sum();
        if (expected - route.load()).abs() > LOAD_TOLERANCE {
            violations.push(Violation::new(ViolationType::LoadMismatch {
                route_index,
                recorded: route.load(),
                expected,
            }));
        }

        let capacity = self.problem.capacity();
        if expected > capacity + LOAD_TOLERANCE {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index,
                load: expected,
                capacity,
            }));
        }

        (self.problem.distances().route_cost(nodes), violations)
    }

    /// Evaluates an entire solution, returning `(total_cost, violations)`.
    ///
    /// A feasible solution has an empty violations list.
    pub fn evaluate(&self, solution: &Solution) -> (f64, Vec<Violation>) {
        let mut total_cost = 0.0;
        let mut all_violations = Vec::new();
        let size = self.problem.distances().size();
        let mut visits = vec![0usize; size];

        for (idx, route) in solution.routes().iter().enumerate() {
            let (cost, mut violations) = self.evaluate_route(idx, route);
            total_cost += cost;
            all_violations.append(&mut violations);

            for &node in route.nodes() {
                if self.problem.is_customer(node) {
                    visits[node] += 1;
                }
            }
        }

        for node in self.problem.customers() {
            match visits[node] {
                0 => all_violations.push(Violation::new(ViolationType::CustomerMissing { node })),
                1 => {}
                _ => all_violations.push(Violation::new(ViolationType::CustomerDuplicated { node })),
            }
        }

        (total_cost, all_violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::{Demands, MergeStats, OversizedDemand, Vehicle};

    fn setup(vehicle: Vehicle) -> CollectionProblem {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 20.0, 30.0],
            vec![10.0, 0.0, 15.0, 25.0],
            vec![20.0, 15.0, 0.0, 18.0],
            vec![30.0, 25.0, 18.0, 0.0],
        ])
        .expect("valid");
        let demands = Demands::from_pairs([(1, 2.0), (2, 3.0), (3, 1.0)]);
        CollectionProblem::new(dm, demands, vehicle).expect("valid")
    }

    fn solution(routes: Vec<Route>) -> Solution {
        Solution::new(routes, 0.0, 0.0, MergeStats::default())
    }

    #[test]
    fn test_feasible() {
        let problem = setup(Vehicle::new(5.0));
        let eval = SolutionEvaluator::new(&problem);
        let sol = solution(vec![
            Route::singleton(0, 1, 2.0),
            Route::from_customers(0, vec![2, 3], 4.0),
        ]);
        let (cost, violations) = eval.evaluate(&sol);
        assert!(violations.is_empty());
        assert!((cost - 88.0).abs() < 1e-10);
    }

    #[test]
    fn test_capacity_violated() {
        let problem = setup(Vehicle::new(5.0));
        let eval = SolutionEvaluator::new(&problem);
        let (_, violations) =
            eval.evaluate_route(0, &Route::from_customers(0, vec![1, 2, 3], 6.0));
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded { load, capacity, .. } if load == 6.0 && capacity == 5.0
        ));
    }

    #[test]
    fn test_capacity_boundary_with_rounding() {
        // 0.1 + 0.2 + 0.3 sums to just above 0.6 in node order.
        let data = (0..16usize).map(|k| (k / 4).abs_diff(k % 4) as f64).collect();
        let dm = DistanceMatrix::from_data(4, data).expect("valid");
        let demands = Demands::from_pairs([(1, 0.1), (2, 0.2), (3, 0.3)]);
        let problem = CollectionProblem::new(dm, demands, Vehicle::new(0.6)).expect("valid");
        let sol = crate::constructive::clarke_wright_savings(&problem).expect("solvable");
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].nodes(), &[0, 1, 2, 3, 0]);

        let (_, violations) = SolutionEvaluator::new(&problem).evaluate(&sol);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_load_mismatch() {
        let problem = setup(Vehicle::new(5.0));
        let eval = SolutionEvaluator::new(&problem);
        let (_, violations) = eval.evaluate_route(2, &Route::singleton(0, 2, 1.0));
        assert!(matches!(
            violations[0].kind,
            ViolationType::LoadMismatch { route_index: 2, .. }
        ));
    }

    #[test]
    fn test_wrong_depot() {
        let problem = setup(Vehicle::new(5.0));
        let eval = SolutionEvaluator::new(&problem);
        let (_, violations) = eval.evaluate_route(0, &Route::singleton(3, 1, 2.0));
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationType::NotDepotAnchored { route_index: 0 }));
    }

    #[test]
    fn test_unknown_node() {
        let problem = setup(Vehicle::new(5.0));
        let eval = SolutionEvaluator::new(&problem);
        let (cost, violations) = eval.evaluate_route(1, &Route::singleton(0, 7, 0.0));
        assert_eq!(cost, 0.0);
        assert_eq!(
            violations[0].kind,
            ViolationType::UnknownNode {
                route_index: 1,
                node: 7
            }
        );
    }

    #[test]
    fn test_partition_violations() {
        let problem = setup(Vehicle::new(10.0));
        let eval = SolutionEvaluator::new(&problem);
        let sol = solution(vec![
            Route::from_customers(0, vec![1, 2], 5.0),
            Route::singleton(0, 2, 3.0),
        ]);
        let (_, violations) = eval.evaluate(&sol);
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationType::CustomerDuplicated { node: 2 }));
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationType::CustomerMissing { node: 3 }));
    }

    #[test]
    fn test_dedicated_oversized_route_reported() {
        let dm = DistanceMatrix::from_rows(vec![vec![0.0, 4.0], vec![4.0, 0.0]]).expect("valid");
        let vehicle = Vehicle::new(5.0).with_oversized(OversizedDemand::DedicatedRoute);
        let problem =
            CollectionProblem::new(dm, Demands::from_pairs([(1, 9.0)]), vehicle).expect("valid");
        let eval = SolutionEvaluator::new(&problem);
        let (cost, violations) = eval.evaluate(&solution(vec![Route::singleton(0, 1, 9.0)]));
        assert!((cost - 8.0).abs() < 1e-10);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded { .. }
        ));
    }
}
