//! Validated collection problem.

use log::warn;

use super::{Demands, OversizedDemand, Vehicle};
use crate::distance::DistanceMatrix;
use crate::error::{RoutingError, RoutingResult};

/// A waste-collection problem instance: travel costs, quantities to pick
/// up, and the vehicle serving every route.
///
/// All input checks happen in [`CollectionProblem::new`], so solvers can
/// rely on a consistent instance.
///
/// # Examples
///
/// ```
/// use waste_routing::distance::DistanceMatrix;
/// use waste_routing::models::{CollectionProblem, Demands, Vehicle};
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 4.0, 6.0],
///     vec![4.0, 0.0, 3.0],
///     vec![6.0, 3.0, 0.0],
/// ])
/// .unwrap();
/// let demands = Demands::from_pairs([(1, 2.0), (2, 1.0)]);
/// let problem = CollectionProblem::new(dm, demands, Vehicle::new(5.0)).unwrap();
/// assert_eq!(problem.customers().collect::<Vec<_>>(), vec![1, 2]);
/// assert_eq!(problem.num_customers(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CollectionProblem {
    distances: DistanceMatrix,
    demands: Demands,
    vehicle: Vehicle,
}

impl CollectionProblem {
    /// Assembles and validates a problem.
    ///
    /// Fails with [`RoutingError::InvalidInput`] when the depot is outside
    /// the matrix, the capacity is not a positive finite value, or a demand
    /// refers to an unknown node or is negative/non-finite. Fails with
    /// [`RoutingError::CapacityExceeded`] when a single demand exceeds the
    /// capacity and the vehicle's policy is [`OversizedDemand::Reject`].
    /// A demand given for the depot is ignored.
    pub fn new(
        distances: DistanceMatrix,
        demands: Demands,
        vehicle: Vehicle,
    ) -> RoutingResult<Self> {
        let depot = vehicle.depot();
        if !distances.contains(depot) {
            return Err(RoutingError::invalid(format!(
                "depot {depot} is outside the {n}x{n} distance matrix",
                n = distances.size()
            )));
        }

        let capacity = vehicle.capacity();
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(RoutingError::invalid(format!(
                "vehicle capacity {capacity} must be a positive finite value"
            )));
        }

        let mut entries: Vec<(usize, f64)> = demands.iter().collect();
        entries.sort_by_key(|&(node, _)| node);

        for (node, demand) in entries {
            if !distances.contains(node) {
                return Err(RoutingError::invalid(format!(
                    "demand given for node {node}, which is outside the distance matrix"
                )));
            }
            if node == depot {
                continue;
            }
            if !demand.is_finite() || demand < 0.0 {
                return Err(RoutingError::invalid(format!(
                    "demand {demand} of node {node} must be a finite non-negative value"
                )));
            }
            if demand > capacity {
                match vehicle.oversized() {
                    OversizedDemand::Reject => {
                        return Err(RoutingError::CapacityExceeded {
                            node,
                            demand,
                            capacity,
                        });
                    }
                    OversizedDemand::DedicatedRoute => {
                        warn!(
                            "node {node} demand {demand} exceeds capacity {capacity}, serving it on a dedicated route"
                        );
                    }
                }
            }
        }

        Ok(Self {
            distances,
            demands,
            vehicle,
        })
    }

    /// Travel costs between nodes.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Depot node.
    pub fn depot(&self) -> usize {
        self.vehicle.depot()
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> f64 {
        self.vehicle.capacity()
    }

    /// Demand of `node`; the depot always has demand zero.
    pub fn demand(&self, node: usize) -> f64 {
        if node == self.depot() {
            0.0
        } else {
            self.demands.get(node)
        }
    }

    /// Customer nodes in ascending order (every node except the depot).
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        let depot = self.depot();
        (0..self.distances.size()).filter(move |&node| node != depot)
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.distances.size() - 1
    }

    /// Returns `true` if `node` is a customer of this problem.
    pub fn is_customer(&self, node: usize) -> bool {
        self.distances.contains(node) && node != self.depot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 20.0, 30.0],
            vec![10.0, 0.0, 15.0, 25.0],
            vec![20.0, 15.0, 0.0, 18.0],
            vec![30.0, 25.0, 18.0, 0.0],
        ])
        .expect("valid matrix")
    }

    fn demands() -> Demands {
        Demands::from_pairs([(1, 2.0), (2, 3.0), (3, 1.0)])
    }

    #[test]
    fn test_valid_problem() {
        let p = CollectionProblem::new(matrix(), demands(), Vehicle::new(5.0)).expect("valid");
        assert_eq!(p.depot(), 0);
        assert_eq!(p.num_customers(), 3);
        assert_eq!(p.customers().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(p.demand(2), 3.0);
        assert!(p.is_customer(3));
        assert!(!p.is_customer(0));
        assert!(!p.is_customer(4));
    }

    #[test]
    fn test_custom_depot() {
        let p = CollectionProblem::new(matrix(), Demands::new(), Vehicle::new(5.0).with_depot(2))
            .expect("valid");
        assert_eq!(p.customers().collect::<Vec<_>>(), vec![0, 1, 3]);
    }

    #[test]
    fn test_depot_out_of_range() {
        let err = CollectionProblem::new(matrix(), demands(), Vehicle::new(5.0).with_depot(4))
            .unwrap_err();
        assert!(matches!(err, RoutingError::InvalidInput(_)));
    }

    #[test]
    fn test_bad_capacity() {
        for capacity in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = CollectionProblem::new(matrix(), demands(), Vehicle::new(capacity))
                .unwrap_err();
            assert!(matches!(err, RoutingError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_bad_demands() {
        let unknown = Demands::from_pairs([(1, 1.0), (9, 1.0)]);
        assert!(matches!(
            CollectionProblem::new(matrix(), unknown, Vehicle::new(5.0)),
            Err(RoutingError::InvalidInput(_))
        ));

        let negative = Demands::from_pairs([(1, -1.0)]);
        assert!(matches!(
            CollectionProblem::new(matrix(), negative, Vehicle::new(5.0)),
            Err(RoutingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_depot_demand_ignored() {
        let d = Demands::from_pairs([(0, 100.0), (1, 1.0)]);
        let p = CollectionProblem::new(matrix(), d, Vehicle::new(5.0)).expect("valid");
        assert_eq!(p.demand(0), 0.0);
    }

    #[test]
    fn test_oversized_rejected() {
        let d = Demands::from_pairs([(1, 2.0), (2, 6.0)]);
        let err = CollectionProblem::new(matrix(), d, Vehicle::new(5.0)).unwrap_err();
        assert_eq!(
            err,
            RoutingError::CapacityExceeded {
                node: 2,
                demand: 6.0,
                capacity: 5.0,
            }
        );
    }

    #[test]
    fn test_oversized_dedicated_route() {
        let d = Demands::from_pairs([(1, 2.0), (2, 6.0)]);
        let vehicle = Vehicle::new(5.0).with_oversized(OversizedDemand::DedicatedRoute);
        let p = CollectionProblem::new(matrix(), d, vehicle).expect("allowed by policy");
        assert_eq!(p.demand(2), 6.0);
    }
}
