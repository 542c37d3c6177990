//! Solution evaluation.
//!
//! Re-checks finished solutions against the problem they were built for.

mod evaluator;

pub use evaluator::SolutionEvaluator;
