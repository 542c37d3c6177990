//! Dense travel-cost matrix.

use crate::error::{RoutingError, RoutingResult};

/// A dense n×n travel-cost matrix stored in row-major order.
///
/// Every entry is a finite, non-negative cost. Symmetry is not required:
/// `get(a, b)` and `get(b, a)` may differ (one-way streets).
///
/// # Examples
///
/// ```
/// use waste_routing::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 20.0],
///     vec![10.0, 0.0, 15.0],
///     vec![20.0, 15.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.size(), 3);
/// assert!((dm.get(1, 2) - 15.0).abs() < 1e-10);
/// assert!((dm.route_cost(&[0, 1, 2, 0]) - 45.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix from explicit rows.
    ///
    /// Fails with [`RoutingError::InvalidInput`] if the matrix is empty,
    /// any row length differs from the row count, or an entry is negative
    /// or non-finite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> RoutingResult<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(RoutingError::invalid("distance matrix is empty"));
        }
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(RoutingError::invalid(format!(
                    "distance matrix is not square: row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Self::from_data(size, data)
    }

    /// Creates a matrix from a flat row-major buffer of `size * size` costs.
    pub fn from_data(size: usize, data: Vec<f64>) -> RoutingResult<Self> {
        if size == 0 {
            return Err(RoutingError::invalid("distance matrix is empty"));
        }
        if data.len() != size * size {
            return Err(RoutingError::invalid(format!(
                "distance matrix has {} entries, expected {size}x{size}",
                data.len()
            )));
        }
        if let Some(pos) = data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            return Err(RoutingError::invalid(format!(
                "cost ({}, {}) = {} is not a finite non-negative value",
                pos / size,
                pos % size,
                data[pos]
            )));
        }
        Ok(Self { data, size })
    }

    /// Returns the cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of nodes (depot included) in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `node` is a valid index into this matrix.
    pub fn contains(&self, node: usize) -> bool {
        node < self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Sum of consecutive-edge costs along `nodes`.
    ///
    /// Sequences shorter than two nodes cost nothing.
    pub fn route_cost(&self, nodes: &[usize]) -> f64 {
        nodes.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 20.0, 30.0],
            vec![10.0, 0.0, 15.0, 25.0],
            vec![20.0, 15.0, 0.0, 18.0],
            vec![30.0, 25.0, 18.0, 0.0],
        ])
        .expect("valid matrix")
    }

    #[test]
    fn test_from_rows() {
        let dm = sample();
        assert_eq!(dm.size(), 4);
        assert_eq!(dm.get(2, 3), 18.0);
        assert_eq!(dm.get(3, 0), 30.0);
        assert!(dm.contains(3));
        assert!(!dm.contains(4));
    }

    #[test]
    fn test_from_rows_not_square() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, RoutingError::InvalidInput(_)));

        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 2.0]])
            .unwrap_err();
        assert!(matches!(err, RoutingError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(DistanceMatrix::from_rows(vec![]).is_err());
        assert!(DistanceMatrix::from_data(0, vec![]).is_err());
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_err());
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, -1.0, 1.0, 0.0]).is_err());
        assert!(DistanceMatrix::from_data(2, vec![0.0, f64::NAN, 1.0, 0.0]).is_err());
        assert!(DistanceMatrix::from_data(2, vec![0.0, f64::INFINITY, 1.0, 0.0]).is_err());
    }

    #[test]
    fn test_symmetric() {
        assert!(sample().is_symmetric(1e-10));
        let dm = DistanceMatrix::from_data(2, vec![0.0, 10.0, 15.0, 0.0]).expect("valid");
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_route_cost() {
        let dm = sample();
        assert!((dm.route_cost(&[0, 1, 0]) - 20.0).abs() < 1e-10);
        assert!((dm.route_cost(&[0, 2, 3, 0]) - 68.0).abs() < 1e-10);
        assert_eq!(dm.route_cost(&[0]), 0.0);
        assert_eq!(dm.route_cost(&[]), 0.0);
    }

    #[test]
    fn test_route_cost_asymmetric() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 10.0, 15.0, 0.0]).expect("valid");
        assert!((dm.route_cost(&[0, 1, 0]) - 25.0).abs() < 1e-10);
    }
}
