//! Mutable set of disjoint depot-anchored routes.
//!
//! Routes live in a dense array of slots; a node-indexed table maps every
//! customer to the slot currently holding it. Merging two routes keeps the
//! slot of the first one and removes the other by swapping the last slot
//! into its place, so every node whose slot changes is re-indexed.

use std::fmt;

use crate::error::{RoutingError, RoutingResult};
use crate::models::{CollectionProblem, Route};

/// Where a customer sits within its route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Right after the depot.
    Start,
    /// Right before the depot.
    End,
    /// Only customer on the route: both first and last.
    Both,
}

/// How two routes are joined.
///
/// With `ci` / `cj` the customer sequences of the routes holding `i` / `j`:
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Splice {
    /// `i` last, `j` first: `ci ++ cj`.
    Append,
    /// `i` first, `j` last: `cj ++ ci`.
    Prepend,
    /// Both first: `reverse(ci) ++ cj`.
    ReverseFirst,
    /// Both last: `ci ++ reverse(cj)`.
    ReverseSecond,
}

impl Splice {
    /// Picks the splice joining `i` and `j` at their route ends.
    ///
    /// Single-customer routes are both first and last; joining end-to-start
    /// is preferred, then start-to-end, then the reversing cases.
    pub fn between(i: Endpoint, j: Endpoint) -> Self {
        use Endpoint::*;
        match (i, j) {
            (End | Both, Start | Both) => Splice::Append,
            (Start, End) | (Start, Both) | (Both, End) => Splice::Prepend,
            (Start, Start) => Splice::ReverseFirst,
            (End, End) => Splice::ReverseSecond,
        }
    }

    fn join(self, mut ci: Vec<usize>, mut cj: Vec<usize>) -> Vec<usize> {
        match self {
            Splice::Append => {
                ci.append(&mut cj);
                ci
            }
            Splice::Prepend => {
                cj.append(&mut ci);
                cj
            }
            Splice::ReverseFirst => {
                ci.reverse();
                ci.append(&mut cj);
                ci
            }
            Splice::ReverseSecond => {
                cj.reverse();
                ci.append(&mut cj);
                ci
            }
        }
    }
}

/// Outcome of a merge feasibility test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MergeCheck {
    /// The routes can be joined with the given splice.
    Feasible(Splice),
    /// Both customers already share a route.
    SameRoute,
    /// The node is interior to its route.
    NotEndpoint(usize),
    /// Joined load would exceed capacity.
    OverCapacity {
        /// Combined load of both routes.
        load: f64,
        /// Vehicle capacity.
        capacity: f64,
    },
}

impl MergeCheck {
    /// Returns `true` for [`MergeCheck::Feasible`].
    pub fn is_feasible(&self) -> bool {
        matches!(self, MergeCheck::Feasible(_))
    }
}

/// Disjoint routes covering every customer exactly once.
///
/// # Examples
///
/// ```
/// use waste_routing::distance::DistanceMatrix;
/// use waste_routing::models::{CollectionProblem, Demands, Vehicle};
/// use waste_routing::constructive::RouteSet;
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
/// let mut routes = RouteSet::new(&problem);
/// assert_eq!(routes.len(), 3);
/// assert!(routes.can_merge(2, 3).unwrap());
/// routes.merge(2, 3);
/// assert_eq!(routes.len(), 2);
/// assert_eq!(routes.route_of(2).unwrap(), routes.route_of(3).unwrap());
/// assert!(!routes.can_merge(1, 2).unwrap()); // 2 + 4 > 5
/// ```
#[derive(Debug, Clone)]
pub struct RouteSet {
    depot: usize,
    capacity: f64,
    routes: Vec<Route>,
    slot_of: Vec<Option<usize>>,
}

impl RouteSet {
    /// One trivial round trip per customer, in node order.
    pub fn new(problem: &CollectionProblem) -> Self {
        let depot = problem.depot();
        let mut slot_of = vec![None; problem.distances().size()];
        let routes: Vec<Route> = problem
            .customers()
            .enumerate()
            .map(|(slot, customer)| {
                slot_of[customer] = Some(slot);
                Route::singleton(depot, customer, problem.demand(customer))
            })
            .collect();

        Self {
            depot,
            capacity: problem.capacity(),
            routes,
            slot_of,
        }
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if there are no routes (a depot-only problem).
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Current routes, indexed by slot.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Consumes the set, returning its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Slot of the route holding `node`.
    ///
    /// Fails with [`RoutingError::UnknownNode`] for the depot or any node
    /// outside the problem.
    pub fn route_of(&self, node: usize) -> RoutingResult<usize> {
        self.slot_of
            .get(node)
            .copied()
            .flatten()
            .ok_or(RoutingError::UnknownNode(node))
    }

    /// Position of `node` in its route, or `None` if it is interior.
    pub fn endpoint(&self, node: usize) -> RoutingResult<Option<Endpoint>> {
        let route = &self.routes[self.route_of(node)?];
        let first = route.first_customer() == node;
        let last = route.last_customer() == node;
        Ok(match (first, last) {
            (true, true) => Some(Endpoint::Both),
            (true, false) => Some(Endpoint::Start),
            (false, true) => Some(Endpoint::End),
            (false, false) => None,
        })
    }

    /// Returns `true` if `node` is adjacent to the depot in its route.
    pub fn is_endpoint(&self, node: usize) -> RoutingResult<bool> {
        Ok(self.endpoint(node)?.is_some())
    }

    /// Tests whether the routes holding `i` and `j` can be joined at `i`
    /// and `j`. Never mutates the set.
    pub fn check_merge(&self, i: usize, j: usize) -> RoutingResult<MergeCheck> {
        Ok(self.plan(i, j)?.2)
    }

    fn plan(&self, i: usize, j: usize) -> RoutingResult<(usize, usize, MergeCheck)> {
        let ri = self.route_of(i)?;
        let rj = self.route_of(j)?;
        if ri == rj {
            return Ok((ri, rj, MergeCheck::SameRoute));
        }

        let Some(ei) = self.endpoint(i)? else {
            return Ok((ri, rj, MergeCheck::NotEndpoint(i)));
        };
        let Some(ej) = self.endpoint(j)? else {
            return Ok((ri, rj, MergeCheck::NotEndpoint(j)));
        };

        let load = self.routes[ri].load() + self.routes[rj].load();
        if load > self.capacity {
            let check = MergeCheck::OverCapacity {
                load,
                capacity: self.capacity,
            };
            return Ok((ri, rj, check));
        }

        Ok((ri, rj, MergeCheck::Feasible(Splice::between(ei, ej))))
    }

    /// Returns `true` if [`RouteSet::check_merge`] finds the pair feasible.
    pub fn can_merge(&self, i: usize, j: usize) -> RoutingResult<bool> {
        Ok(self.check_merge(i, j)?.is_feasible())
    }

    /// Joins the routes holding `i` and `j`, returning the splice used.
    ///
    /// The merged route takes the slot of `i`'s route; `j`'s slot is
    /// filled by the last route.
    ///
    /// # Panics
    ///
    /// Panics if the pair is not feasible: callers must check
    /// [`RouteSet::can_merge`] first.
    pub fn merge(&mut self, i: usize, j: usize) -> Splice {
        let (ri, rj, splice) = match self.plan(i, j) {
            Ok((ri, rj, MergeCheck::Feasible(splice))) => (ri, rj, splice),
            other => panic!("merge({i}, {j}) on an infeasible pair: {other:?}"),
        };

        let load = self.routes[ri].load() + self.routes[rj].load();
        let ci = self.routes[ri].customers().to_vec();
        let cj = self.routes[rj].customers().to_vec();
        self.routes[ri] = Route::from_customers(self.depot, splice.join(ci, cj), load);
        self.reindex(ri);

        self.routes.swap_remove(rj);
        if rj < self.routes.len() {
            self.reindex(rj);
        }

        debug_assert!(self.check_partition().is_ok());
        splice
    }

    fn reindex(&mut self, slot: usize) {
        for &node in self.routes[slot].customers() {
            self.slot_of[node] = Some(slot);
        }
    }

    /// Verifies that every customer is on exactly one route, that the
    /// node-to-slot table agrees with the routes, and that routes are
    /// depot-anchored. Reports the first inconsistency found.
    pub fn check_partition(&self) -> Result<(), PartitionError> {
        let mut seen = vec![false; self.slot_of.len()];
        for (slot, route) in self.routes.iter().enumerate() {
            let nodes = route.nodes();
            if nodes.len() < 3 || nodes[0] != self.depot || nodes[nodes.len() - 1] != self.depot {
                return Err(PartitionError::NotAnchored { slot });
            }
            for &node in route.customers() {
                if node == self.depot {
                    return Err(PartitionError::DepotMidRoute { slot });
                }
                if std::mem::replace(&mut seen[node], true) {
                    return Err(PartitionError::Duplicated { node });
                }
                if self.slot_of[node] != Some(slot) {
                    return Err(PartitionError::Misindexed {
                        node,
                        slot,
                        indexed: self.slot_of[node],
                    });
                }
            }
        }
        for (node, slot) in self.slot_of.iter().enumerate() {
            if slot.is_some() && !seen[node] {
                return Err(PartitionError::Orphaned { node });
            }
        }
        Ok(())
    }
}

/// An inconsistency found by [`RouteSet::check_partition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionError {
    /// Route does not start and end at the depot, or has no customer.
    NotAnchored {
        /// Slot of the route.
        slot: usize,
    },
    /// Route visits the depot between its anchors.
    DepotMidRoute {
        /// Slot of the route.
        slot: usize,
    },
    /// Customer appears on more than one route.
    Duplicated {
        /// Customer node.
        node: usize,
    },
    /// Customer's indexed slot differs from the route holding it.
    Misindexed {
        /// Customer node.
        node: usize,
        /// Slot of the route holding it.
        slot: usize,
        /// Slot recorded in the index.
        indexed: Option<usize>,
    },
    /// Customer indexed to a slot but on no route.
    Orphaned {
        /// Customer node.
        node: usize,
    },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnchored { slot } => write!(f, "route {slot} is not depot-anchored"),
            Self::DepotMidRoute { slot } => write!(f, "route {slot} visits the depot mid-route"),
            Self::Duplicated { node } => write!(f, "node {node} appears on more than one route"),
            Self::Misindexed {
                node,
                slot,
                indexed,
            } => write!(f, "node {node} is on route {slot} but indexed to {indexed:?}"),
            Self::Orphaned { node } => write!(f, "node {node} is indexed but on no route"),
        }
    }
}

impl std::error::Error for PartitionError {}
