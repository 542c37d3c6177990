//! Travel-cost matrices.
//!
//! Provides a validated dense cost matrix for routing problems.

mod matrix;

pub use matrix::DistanceMatrix;
