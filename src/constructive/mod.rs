//! Constructive heuristics for building complete CARP solutions.
//!
//! - [`grasp`] — Greedy randomized construction with a restricted candidate list
//! - [`trivial_solution`] — One vehicle per required edge

mod grasp;
mod trivial;

pub use grasp::{grasp, DEFAULT_ALPHA};
pub use trivial::trivial_solution;
