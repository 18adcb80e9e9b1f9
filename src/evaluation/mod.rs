//! Solution pricing and feasibility checking.

mod evaluator;

pub use evaluator::CostEvaluator;
