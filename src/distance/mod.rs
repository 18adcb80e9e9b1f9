//! Shortest-path distances over the road graph.
//!
//! Provides Dijkstra single-source search and the dense all-pairs matrix
//! built from it.

mod matrix;
mod shortest_path;

pub use matrix::DistanceMatrix;
pub use shortest_path::dijkstra;
