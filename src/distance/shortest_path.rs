//! Single-source shortest paths.
//!
//! # Algorithm
//!
//! Dijkstra with a binary heap and lazy deletion: stale heap entries whose
//! key exceeds the settled distance are skipped on pop.
//!
//! # Complexity
//!
//! O(E log V) per source.
//!
//! # Reference
//!
//! Dijkstra, E.W. (1959). "A note on two problems in connexion with graphs",
//! *Numerische Mathematik* 1, 269-271.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::models::Graph;

/// Heap entry ordered so that the smallest distance pops first.
#[derive(Debug, Clone, Copy, PartialEq)]
struct State {
    dist: f64,
    vertex: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Returns shortest distances from `source` to every vertex id in
/// `0..=num_vertices`. Unreachable vertices (and the unused slot 0) are
/// `f64::INFINITY`.
///
/// # Examples
///
/// ```
/// use carp_routing::models::Graph;
/// use carp_routing::distance::dijkstra;
///
/// let mut g = Graph::new(3);
/// g.add_edge(1, 2, 2.0).unwrap();
/// g.add_edge(2, 3, 2.0).unwrap();
/// g.add_edge(1, 3, 7.0).unwrap();
/// let d = dijkstra(&g, 1);
/// assert_eq!(d[3], 4.0);
/// ```
pub fn dijkstra(graph: &Graph, source: usize) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; graph.num_vertices() + 1];
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    heap.push(State {
        dist: 0.0,
        vertex: source,
    });

    while let Some(State { dist: d, vertex: u }) = heap.pop() {
        if d > dist[u] {
            continue;
        }
        for (v, cost) in graph.neighbors(u) {
            let nd = d + cost;
            if nd < dist[v] {
                dist[v] = nd;
                heap.push(State { dist: nd, vertex: v });
            }
        }
    }

    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dijkstra_chain() {
        let mut g = Graph::new(4);
        g.add_edge(1, 2, 1.0).expect("valid");
        g.add_edge(2, 3, 2.0).expect("valid");
        g.add_edge(3, 4, 3.0).expect("valid");
        let d = dijkstra(&g, 1);
        assert_eq!(d[1], 0.0);
        assert_eq!(d[2], 1.0);
        assert_eq!(d[3], 3.0);
        assert_eq!(d[4], 6.0);
    }

    #[test]
    fn test_dijkstra_takes_detour() {
        let mut g = Graph::new(3);
        g.add_edge(1, 3, 10.0).expect("valid");
        g.add_edge(1, 2, 3.0).expect("valid");
        g.add_edge(2, 3, 3.0).expect("valid");
        let d = dijkstra(&g, 3);
        assert_eq!(d[1], 6.0);
    }

    #[test]
    fn test_dijkstra_disconnected() {
        let mut g = Graph::new(4);
        g.add_edge(1, 2, 1.0).expect("valid");
        g.add_edge(3, 4, 1.0).expect("valid");
        let d = dijkstra(&g, 1);
        assert_eq!(d[2], 1.0);
        assert!(d[3].is_infinite());
        assert!(d[0].is_infinite());
    }

    #[test]
    fn test_heap_pops_smallest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(State { dist: 5.0, vertex: 1 });
        heap.push(State { dist: 1.0, vertex: 2 });
        heap.push(State { dist: 3.0, vertex: 3 });
        assert_eq!(heap.pop().map(|s| s.vertex), Some(2));
        assert_eq!(heap.pop().map(|s| s.vertex), Some(3));
    }
}
