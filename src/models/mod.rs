//! Domain model types for capacitated arc routing.
//!
//! Provides the road graph, the validated instance with its required edges,
//! routes as depot-to-depot vertex sequences, solutions as shared route sets,
//! and the sanitized plan handed to report writers.

mod graph;
mod instance;
mod plan;
mod route;
mod solution;

pub use graph::Graph;
pub use instance::{Instance, InstanceBuilder, RequiredEdge};
pub use plan::{sanitize, Plan, PlannedRoute};
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
