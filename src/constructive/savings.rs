//! Savings estimation for the Clarke-Wright heuristic.
//!
//! For every unordered pair of customers `(i, j)`:
//!
//! ```text
//! s(i, j) = d(depot, i) + d(depot, j) - d(i, j)
//! ```
//!
//! is the cost saved by serving both on one tour instead of two round trips.

use rayon::prelude::*;
use serde::Serialize;

use crate::distance::DistanceMatrix;
use crate::error::{RoutingError, RoutingResult};

/// Customer count from which savings rows are computed on the rayon pool.
const PARALLEL_THRESHOLD: usize = 256;

/// The saving of serving customers `i` and `j` on a shared route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Saving {
    /// Cost saved.
    pub value: f64,
    /// First customer; precedes `j` in node order.
    pub i: usize,
    /// Second customer.
    pub j: usize,
}

/// Computes every customer-pair saving, sorted by decreasing value.
///
/// Each unordered pair of distinct customers appears once as `(i, j)` with
/// `i < j`, giving `C(n - 1, 2)` entries for an `n`-node matrix. Negative
/// savings are kept. Equal values keep node-pair order, so repeated calls
/// yield the same sequence.
///
/// Fails with [`RoutingError::InvalidInput`] if `depot` is outside the
/// matrix.
///
/// # Examples
///
/// ```
/// use waste_routing::distance::DistanceMatrix;
/// use waste_routing::constructive::compute_savings;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 20.0, 30.0],
///     vec![10.0, 0.0, 15.0, 25.0],
///     vec![20.0, 15.0, 0.0, 18.0],
///     vec![30.0, 25.0, 18.0, 0.0],
/// ])
/// .unwrap();
/// let savings = compute_savings(&dm, 0).unwrap();
/// assert_eq!(savings.len(), 3);
/// assert_eq!((savings[0].i, savings[0].j), (2, 3));
/// assert!((savings[0].value - 32.0).abs() < 1e-10);
/// ```
pub fn compute_savings(distances: &DistanceMatrix, depot: usize) -> RoutingResult<Vec<Saving>> {
    if !distances.contains(depot) {
        return Err(RoutingError::invalid(format!(
            "depot {depot} is outside the {n}x{n} distance matrix",
            n = distances.size()
        )));
    }

    let mut savings = if distances.size() > PARALLEL_THRESHOLD {
        savings_parallel(distances, depot)
    } else {
        savings_sequential(distances, depot)
    };

    // Stable: ties keep pair order.
    savings.sort_by(|a, b| b.value.total_cmp(&a.value));
    Ok(savings)
}

fn savings_row(distances: &DistanceMatrix, depot: usize, i: usize) -> Vec<Saving> {
    ((i + 1)..distances.size())
        .filter(|&j| j != depot)
        .map(|j| Saving {
            value: distances.get(depot, i) + distances.get(depot, j) - distances.get(i, j),
            i,
            j,
        })
        .collect()
}

fn savings_sequential(distances: &DistanceMatrix, depot: usize) -> Vec<Saving> {
    (0..distances.size())
        .filter(|&i| i != depot)
        .flat_map(|i| savings_row(distances, depot, i))
        .collect()
}

fn savings_parallel(distances: &DistanceMatrix, depot: usize) -> Vec<Saving> {
    let rows: Vec<Vec<Saving>> = (0..distances.size())
        .into_par_iter()
        .filter(|&i| i != depot)
        .map(|i| savings_row(distances, depot, i))
        .collect();
    rows.concat()
}
