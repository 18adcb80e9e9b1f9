//! Error type shared by instance validation, solving and the text adapters.

use thiserror::Error;

/// Errors raised by the routing core and its adapters.
///
/// Exhausting a phase time budget is never an error; the best solution found
/// so far is carried forward instead.
#[derive(Debug, Error)]
pub enum CarpError {
    /// A required edge can never fit in a single vehicle.
    #[error("required edge {edge} ({u}, {v}) has demand {demand} above capacity {capacity}")]
    DemandExceedsCapacity {
        /// Index of the required edge.
        edge: usize,
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
        /// Demand of the edge.
        demand: i32,
        /// Vehicle capacity.
        capacity: i32,
    },

    /// A required edge was declared with zero or negative demand.
    #[error("required edge ({u}, {v}) has non-positive demand {demand}")]
    NonPositiveDemand {
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
        /// Declared demand.
        demand: i32,
    },

    /// A vertex id outside `1..=num_vertices`.
    #[error("vertex {vertex} is outside 1..={num_vertices}")]
    InvalidVertex {
        /// Offending vertex id.
        vertex: usize,
        /// Number of vertices in the graph.
        num_vertices: usize,
    },

    /// Vehicle capacity must be positive.
    #[error("capacity must be positive, got {0}")]
    InvalidCapacity(i32),

    /// The known bound must be a positive finite number.
    #[error("known bound must be positive and finite, got {0}")]
    InvalidBound(f64),

    /// A solver parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A required-edge endpoint cannot be reached from the depot.
    #[error("vertex {vertex} is unreachable from depot {depot}")]
    Unreachable {
        /// The unreachable endpoint.
        vertex: usize,
        /// Depot vertex.
        depot: usize,
    },

    /// A route could not be made to start and end at the depot.
    #[error("route {index} is malformed: {vertices:?}")]
    MalformedRoute {
        /// 1-based route number in the plan.
        index: usize,
        /// Vertex sequence after repair.
        vertices: Vec<usize>,
    },

    /// A line of the instance text could not be read.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A mandatory header field is absent from the instance text.
    #[error("missing field {0}")]
    MissingField(&'static str),

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, CarpError>;
