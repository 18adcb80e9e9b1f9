//! Undirected weighted road graph.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::error::{CarpError, Result};

/// Undirected graph over vertices `1..=n` with a symmetric cost mapping.
///
/// Adding an edge always sets both directions, so `cost(u, v) == cost(v, u)`
/// holds for every stored pair. Parallel edges keep the cheaper cost.
///
/// # Examples
///
/// ```
/// use carp_routing::models::Graph;
///
/// let mut g = Graph::new(3);
/// g.add_edge(1, 2, 4.0).unwrap();
/// assert_eq!(g.cost(2, 1), Some(4.0));
/// assert_eq!(g.cost(1, 3), None);
/// assert!(g.add_edge(1, 9, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    // Slot 0 is unused so vertex ids index directly.
    adjacency: Vec<BTreeMap<usize, f64>>,
    num_edges: usize,
}

impl Graph {
    /// Creates a graph with `num_vertices` isolated vertices.
    pub fn new(num_vertices: usize) -> Self {
        Self {
            adjacency: vec![BTreeMap::new(); num_vertices + 1],
            num_edges: 0,
        }
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len().saturating_sub(1)
    }

    /// Number of distinct undirected edges.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Vertex ids in ascending order.
    pub fn vertices(&self) -> RangeInclusive<usize> {
        1..=self.num_vertices()
    }

    /// Returns `true` if `v` is a valid vertex id.
    pub fn contains(&self, v: usize) -> bool {
        v >= 1 && v <= self.num_vertices()
    }

    /// Adds the undirected edge `{u, v}` with the given cost.
    pub fn add_edge(&mut self, u: usize, v: usize, cost: f64) -> Result<()> {
        for vertex in [u, v] {
            if !self.contains(vertex) {
                return Err(CarpError::InvalidVertex {
                    vertex,
                    num_vertices: self.num_vertices(),
                });
            }
        }

        match self.adjacency[u].get(&v) {
            Some(&existing) if existing <= cost => return Ok(()),
            Some(_) => {}
            None => self.num_edges += 1,
        }
        self.adjacency[u].insert(v, cost);
        self.adjacency[v].insert(u, cost);
        Ok(())
    }

    /// Direct edge cost between `u` and `v`, if they are adjacent.
    pub fn cost(&self, u: usize, v: usize) -> Option<f64> {
        self.adjacency.get(u).and_then(|adj| adj.get(&v)).copied()
    }

    /// Neighbors of `u` with the connecting edge cost, in ascending id order.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.adjacency[u].iter().map(|(&v, &c)| (v, c))
    }
}
