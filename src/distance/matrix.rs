//! Dense shortest-distance matrix.

use crate::models::Graph;

use super::shortest_path::dijkstra;

/// A dense n×n distance matrix stored in row-major order.
///
/// Rows and columns are indexed by vertex id. Vertex ids start at 1, so row
/// and column 0 are allocated but never read by the solver. Unreachable pairs
/// hold `f64::INFINITY`.
///
/// # Examples
///
/// ```
/// use carp_routing::models::Graph;
/// use carp_routing::distance::DistanceMatrix;
///
/// let mut graph = Graph::new(3);
/// graph.add_edge(1, 2, 4.0).unwrap();
/// graph.add_edge(2, 3, 5.0).unwrap();
/// let dm = DistanceMatrix::from_graph(&graph);
/// assert_eq!(dm.get(1, 3), 9.0);
/// assert_eq!(dm.get(3, 3), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes all-pairs shortest distances by running Dijkstra from every
    /// vertex of the graph.
    ///
    /// Cost is O(V · E · log V) overall.
    pub fn from_graph(graph: &Graph) -> Self {
        let size = graph.num_vertices() + 1;
        let mut dm = Self {
            data: vec![f64::INFINITY; size * size],
            size,
        };
        for source in graph.vertices() {
            let row = dijkstra(graph, source);
            let start = source * size;
            dm.data[start..start + size].copy_from_slice(&row);
        }
        dm
    }

    /// Returns the distance from vertex `from` to vertex `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of rows (and columns) in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `to` can be reached from `from`.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_finite()
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    ///
    /// Pairs that are unreachable in both directions count as symmetric.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a.is_infinite() && b.is_infinite() {
                    continue;
                }
                if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` if `d(i, k) <= d(i, j) + d(j, k)` for all finite
    /// triples over the given vertex range.
    pub fn satisfies_triangle_inequality(
        &self,
        vertices: std::ops::RangeInclusive<usize>,
        tol: f64,
    ) -> bool {
        for i in vertices.clone() {
            for j in vertices.clone() {
                for k in vertices.clone() {
                    let via = self.get(i, j) + self.get(j, k);
                    if via.is_finite() && self.get(i, k) > via + tol {
                        return false;
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_with_diagonal() -> Graph {
        // 1 - 2
        // |   |
        // 4 - 3, plus a long diagonal 1-3
        let mut g = Graph::new(4);
        g.add_edge(1, 2, 1.0).expect("valid");
        g.add_edge(2, 3, 1.0).expect("valid");
        g.add_edge(3, 4, 1.0).expect("valid");
        g.add_edge(4, 1, 1.0).expect("valid");
        g.add_edge(1, 3, 5.0).expect("valid");
        g
    }

    #[test]
    fn test_from_graph_prefers_shorter_path() {
        let dm = DistanceMatrix::from_graph(&square_with_diagonal());
        assert_eq!(dm.size(), 5);
        assert!((dm.get(1, 3) - 2.0).abs() < 1e-10);
        assert!((dm.get(2, 4) - 2.0).abs() < 1e-10);
        assert_eq!(dm.get(4, 4), 0.0);
    }

    #[test]
    fn test_from_graph_symmetric_and_triangle() {
        let dm = DistanceMatrix::from_graph(&square_with_diagonal());
        assert!(dm.is_symmetric(1e-10));
        assert!(dm.satisfies_triangle_inequality(1..=4, 1e-10));
    }

    #[test]
    fn test_unreachable_is_infinite() {
        let mut g = Graph::new(3);
        g.add_edge(1, 2, 3.0).expect("valid");
        let dm = DistanceMatrix::from_graph(&g);
        assert!(dm.is_reachable(1, 2));
        assert!(!dm.is_reachable(1, 3));
        assert_eq!(dm.get(3, 1), f64::INFINITY);
        assert!(dm.is_symmetric(1e-10));
    }
}
