//! # carp-routing
//!
//! Capacitated arc routing: models, constructive heuristics, local search and
//! a four-phase metaheuristic (GRASP, giant-tour split, perturbation, deep
//! ejection chain) run under per-phase time budgets.
//!
//! ## Modules
//!
//! - [`models`] — Graph, instance, route, solution and output plan
//! - [`distance`] — Shortest-path distance matrix
//! - [`evaluation`] — Cost evaluation and feasibility checking
//! - [`constructive`] — Constructive heuristics (GRASP, trivial)
//! - [`local_search`] — 2-opt, relocate, random relocation, ejection chain
//! - [`giant`] — Randomized giant tour and split
//! - [`solver`] — Phase orchestration, configuration and acceptance rule
//! - [`bounds`] — Best-known costs of the `gdb` benchmark set
//! - [`io`] — Instance reader and report writer

pub mod bounds;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod giant;
pub mod io;
pub mod local_search;
pub mod models;
pub mod solver;

pub use error::{CarpError, Result};
