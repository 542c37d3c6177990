//! Quantities to collect at each customer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Quantity to pick up per customer node.
///
/// Nodes without an entry have demand zero.
///
/// # Examples
///
/// ```
/// use waste_routing::models::Demands;
///
/// let demands = Demands::from_pairs([(1, 2.0), (2, 3.0)]);
/// assert_eq!(demands.get(2), 3.0);
/// assert_eq!(demands.get(9), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Demands {
    quantities: HashMap<usize, f64>,
}

impl Demands {
    /// Creates an empty demand mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mapping from `(node, quantity)` pairs. Later pairs win.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, f64)>) -> Self {
        Self {
            quantities: pairs.into_iter().collect(),
        }
    }

    /// Builds a mapping from a dense slice where `quantities[node]` is the
    /// demand of `node`.
    pub fn from_dense(quantities: &[f64]) -> Self {
        Self::from_pairs(quantities.iter().copied().enumerate())
    }

    /// Sets the quantity for `node`.
    pub fn insert(&mut self, node: usize, quantity: f64) {
        self.quantities.insert(node, quantity);
    }

    /// Demand of `node`, zero when absent.
    pub fn get(&self, node: usize) -> f64 {
        self.quantities.get(&node).copied().unwrap_or(0.0)
    }

    /// Iterates over explicit `(node, quantity)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.quantities.iter().map(|(&node, &q)| (node, q))
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Returns `true` if no entry was given.
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

impl FromIterator<(usize, f64)> for Demands {
    fn from_iter<T: IntoIterator<Item = (usize, f64)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_zero() {
        let d = Demands::new();
        assert!(d.is_empty());
        assert_eq!(d.get(0), 0.0);
        assert_eq!(d.get(42), 0.0);
    }

    #[test]
    fn test_from_dense() {
        let d = Demands::from_dense(&[0.0, 2.0, 3.0, 1.0]);
        assert_eq!(d.len(), 4);
        assert_eq!(d.get(1), 2.0);
        assert_eq!(d.get(3), 1.0);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut d: Demands = [(1, 2.0)].into_iter().collect();
        d.insert(1, 4.5);
        assert_eq!(d.get(1), 4.5);
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn test_deserialize_map() {
        let d: Demands = serde_json::from_str(r#"{"1": 2.0, "3": 1.5}"#).expect("valid json");
        assert_eq!(d.get(1), 2.0);
        assert_eq!(d.get(3), 1.5);
        assert_eq!(d.get(2), 0.0);
    }
}
