//! Problem instance: graph, required edges, capacity, depot and distances.

use crate::distance::DistanceMatrix;
use crate::error::{CarpError, Result};

use super::Graph;

/// An edge that must be serviced by exactly one route.
///
/// # Examples
///
/// ```
/// use carp_routing::models::RequiredEdge;
///
/// let e = RequiredEdge::new(1, 2, 3.0, 5);
/// assert_eq!(e.endpoints(), (1, 2));
/// assert!(e.connects(2, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequiredEdge {
    /// First endpoint (the entry vertex in stored orientation).
    pub u: usize,
    /// Second endpoint.
    pub v: usize,
    /// Traversal cost.
    pub cost: f64,
    /// Demand collected when serving the edge.
    pub demand: i32,
}

impl RequiredEdge {
    /// Creates a required edge.
    pub fn new(u: usize, v: usize, cost: f64, demand: i32) -> Self {
        Self { u, v, cost, demand }
    }

    /// Endpoints in stored orientation.
    pub fn endpoints(&self) -> (usize, usize) {
        (self.u, self.v)
    }

    /// Returns `true` if this edge joins `a` and `b` in either direction.
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.u == a && self.v == b) || (self.u == b && self.v == a)
    }
}

/// A validated CARP instance.
///
/// Built through [`InstanceBuilder`], which checks every required edge
/// against the capacity and computes the all-pairs distance matrix. Once
/// built, the instance is read-only for every solver component.
///
/// # Examples
///
/// ```
/// use carp_routing::models::InstanceBuilder;
///
/// let inst = InstanceBuilder::new("toy", 3, 1, 10)
///     .required_edge(1, 2, 2.0, 4)
///     .edge(2, 3, 1.0)
///     .required_edge(3, 1, 2.0, 4)
///     .build()
///     .unwrap();
/// assert_eq!(inst.num_required(), 2);
/// assert_eq!(inst.demand(2, 1), Some(4));
/// assert_eq!(inst.distance(1, 3), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    name: String,
    graph: Graph,
    depot: usize,
    capacity: i32,
    required: Vec<RequiredEdge>,
    // Dense ordered-pair lookup into `required`, both directions filled.
    pair_index: Vec<Option<usize>>,
    distances: DistanceMatrix,
}

impl Instance {
    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying road graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.graph.num_vertices()
    }

    /// Depot vertex.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Vehicle capacity `Q`.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// All required edges, indexed by their position.
    pub fn required_edges(&self) -> &[RequiredEdge] {
        &self.required
    }

    /// Number of required edges.
    pub fn num_required(&self) -> usize {
        self.required.len()
    }

    /// Index of the required edge joining `u` and `v` in either direction.
    #[inline]
    pub fn edge_index(&self, u: usize, v: usize) -> Option<usize> {
        let size = self.distances.size();
        if u >= size || v >= size {
            return None;
        }
        self.pair_index[u * size + v]
    }

    /// Demand of the required edge joining `u` and `v`.
    pub fn demand(&self, u: usize, v: usize) -> Option<i32> {
        self.edge_index(u, v).map(|e| self.required[e].demand)
    }

    /// Service cost of the required edge joining `u` and `v`.
    pub fn service_cost(&self, u: usize, v: usize) -> Option<f64> {
        self.edge_index(u, v).map(|e| self.required[e].cost)
    }

    /// Shortest-path distance between two vertices.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// The all-pairs distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Sum of all required-edge demands.
    pub fn total_demand(&self) -> i32 {
        self.required.iter().map(|e| e.demand).sum()
    }

    /// Sum of all required-edge service costs. No plan can cost less.
    pub fn total_service_cost(&self) -> f64 {
        self.required.iter().map(|e| e.cost).sum()
    }
}

/// Step-by-step constructor for [`Instance`].
///
/// Edge errors are deferred to [`build`](InstanceBuilder::build) so the
/// builder can be chained.
#[derive(Debug, Clone)]
pub struct InstanceBuilder {
    name: String,
    num_vertices: usize,
    depot: usize,
    capacity: i32,
    required: Vec<RequiredEdge>,
    deadhead: Vec<(usize, usize, f64)>,
}

impl InstanceBuilder {
    /// Starts an instance with the given header values.
    pub fn new(name: impl Into<String>, num_vertices: usize, depot: usize, capacity: i32) -> Self {
        Self {
            name: name.into(),
            num_vertices,
            depot,
            capacity,
            required: Vec::new(),
            deadhead: Vec::new(),
        }
    }

    /// Adds a required edge.
    pub fn required_edge(mut self, u: usize, v: usize, cost: f64, demand: i32) -> Self {
        self.required.push(RequiredEdge::new(u, v, cost, demand));
        self
    }

    /// Adds a non-required edge, usable only for deadheading.
    pub fn edge(mut self, u: usize, v: usize, cost: f64) -> Self {
        self.deadhead.push((u, v, cost));
        self
    }

    /// Validates the data and computes shortest distances.
    ///
    /// # Errors
    ///
    /// - [`CarpError::InvalidCapacity`] if capacity is not positive.
    /// - [`CarpError::InvalidVertex`] for any out-of-range vertex or depot.
    /// - [`CarpError::NonPositiveDemand`] for a required edge without demand.
    /// - [`CarpError::DemandExceedsCapacity`] if one edge can never fit.
    /// - [`CarpError::Unreachable`] if a required endpoint cannot be reached
    ///   from the depot.
    pub fn build(self) -> Result<Instance> {
        if self.capacity <= 0 {
            return Err(CarpError::InvalidCapacity(self.capacity));
        }

        let mut graph = Graph::new(self.num_vertices);
        if !graph.contains(self.depot) {
            return Err(CarpError::InvalidVertex {
                vertex: self.depot,
                num_vertices: self.num_vertices,
            });
        }

        for (idx, e) in self.required.iter().enumerate() {
            if e.demand <= 0 {
                return Err(CarpError::NonPositiveDemand {
                    u: e.u,
                    v: e.v,
                    demand: e.demand,
                });
            }
            if e.demand > self.capacity {
                return Err(CarpError::DemandExceedsCapacity {
                    edge: idx,
                    u: e.u,
                    v: e.v,
                    demand: e.demand,
                    capacity: self.capacity,
                });
            }
            graph.add_edge(e.u, e.v, e.cost)?;
        }
        for &(u, v, cost) in &self.deadhead {
            graph.add_edge(u, v, cost)?;
        }

        let distances = DistanceMatrix::from_graph(&graph);
        for e in &self.required {
            for vertex in [e.u, e.v] {
                if !distances.is_reachable(self.depot, vertex) {
                    return Err(CarpError::Unreachable {
                        vertex,
                        depot: self.depot,
                    });
                }
            }
        }

        let size = distances.size();
        let mut pair_index = vec![None; size * size];
        for (idx, e) in self.required.iter().enumerate() {
            pair_index[e.u * size + e.v] = Some(idx);
            pair_index[e.v * size + e.u] = Some(idx);
        }

        Ok(Instance {
            name: self.name,
            graph,
            depot: self.depot,
            capacity: self.capacity,
            required: self.required,
            pair_index,
            distances,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_vertex() -> InstanceBuilder {
        InstanceBuilder::new("five", 5, 1, 5)
            .required_edge(1, 2, 2.0, 3)
            .required_edge(3, 4, 2.0, 4)
            .edge(2, 3, 1.0)
            .edge(4, 5, 1.0)
            .edge(5, 1, 1.0)
    }

    #[test]
    fn test_build_valid() {
        let inst = five_vertex().build().expect("valid");
        assert_eq!(inst.name(), "five");
        assert_eq!(inst.num_vertices(), 5);
        assert_eq!(inst.depot(), 1);
        assert_eq!(inst.capacity(), 5);
        assert_eq!(inst.total_demand(), 7);
        assert!((inst.total_service_cost() - 4.0).abs() < 1e-10);
        // 1→5→4 = 2
        assert!((inst.distance(1, 4) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_pair_lookup_both_directions() {
        let inst = five_vertex().build().expect("valid");
        assert_eq!(inst.edge_index(1, 2), Some(0));
        assert_eq!(inst.edge_index(2, 1), Some(0));
        assert_eq!(inst.edge_index(4, 3), Some(1));
        assert_eq!(inst.edge_index(2, 3), None);
        assert_eq!(inst.edge_index(99, 1), None);
        assert_eq!(inst.demand(4, 3), Some(4));
        assert_eq!(inst.service_cost(2, 1), Some(2.0));
    }

    #[test]
    fn test_demand_exceeds_capacity() {
        let err = five_vertex()
            .required_edge(2, 5, 1.0, 6)
            .build()
            .expect_err("demand 6 > capacity 5");
        assert!(matches!(
            err,
            CarpError::DemandExceedsCapacity {
                edge: 2,
                demand: 6,
                capacity: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_unreachable_endpoint() {
        let err = InstanceBuilder::new("split", 4, 1, 10)
            .required_edge(1, 2, 1.0, 1)
            .required_edge(3, 4, 1.0, 1)
            .build()
            .expect_err("3 and 4 are disconnected from the depot");
        assert!(matches!(err, CarpError::Unreachable { vertex: 3, depot: 1 }));
    }

    #[test]
    fn test_non_positive_demand() {
        let err = InstanceBuilder::new("zero", 2, 1, 10)
            .required_edge(1, 2, 1.0, 0)
            .build()
            .expect_err("zero demand");
        assert!(matches!(err, CarpError::NonPositiveDemand { demand: 0, .. }));
    }

    #[test]
    fn test_invalid_depot_and_capacity() {
        assert!(matches!(
            InstanceBuilder::new("d", 2, 3, 10).build(),
            Err(CarpError::InvalidVertex { vertex: 3, .. })
        ));
        assert!(matches!(
            InstanceBuilder::new("q", 2, 1, 0).build(),
            Err(CarpError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_required_edge_connects() {
        let e = RequiredEdge::new(3, 7, 1.0, 2);
        assert!(e.connects(3, 7));
        assert!(e.connects(7, 3));
        assert!(!e.connects(3, 3));
    }
}
