//! Depot-to-depot route serving an ordered list of required edges.

/// A closed walk from the depot back to the depot.
///
/// Stored as the vertex sequence `[depot, u1, v1, u2, v2, ..., depot]`. The
/// pair at positions `(2k + 1, 2k + 2)` is the k-th served edge, in the
/// direction it is traversed; every other consecutive pair is a deadhead leg
/// priced by shortest path. The load is cached and kept in sync by the
/// mutating methods.
///
/// # Examples
///
/// ```
/// use carp_routing::models::Route;
///
/// let mut route = Route::new(1);
/// route.push_service(2, 3, 4);
/// route.push_service(5, 6, 1);
/// assert_eq!(route.vertices(), &[1, 2, 3, 5, 6, 1]);
/// assert_eq!(route.service(1), (5, 6));
/// assert_eq!(route.load(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    vertices: Vec<usize>,
    load: i32,
}

impl Route {
    /// Creates an empty route `[depot, depot]`.
    pub fn new(depot: usize) -> Self {
        Self {
            vertices: vec![depot, depot],
            load: 0,
        }
    }

    /// Depot at both ends of this route.
    pub fn depot(&self) -> usize {
        self.vertices[0]
    }

    /// Full vertex sequence including both depot visits.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Total demand served by this route.
    pub fn load(&self) -> i32 {
        self.load
    }

    /// Number of required edges served.
    pub fn num_services(&self) -> usize {
        (self.vertices.len() - 2) / 2
    }

    /// Returns `true` if this route serves nothing.
    pub fn is_empty(&self) -> bool {
        self.num_services() == 0
    }

    /// The k-th served edge as `(entry, exit)`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= num_services()`.
    pub fn service(&self, k: usize) -> (usize, usize) {
        (self.vertices[2 * k + 1], self.vertices[2 * k + 2])
    }

    /// Served edges in visit order, as `(entry, exit)` pairs.
    pub fn services(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.vertices[1..self.vertices.len() - 1]
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
    }

    /// Returns `true` if `demand` more still fits under `capacity`.
    ///
    /// Compared against the remaining room so that loads near `i32::MAX`
    /// cannot overflow.
    pub fn fits(&self, demand: i32, capacity: i32) -> bool {
        demand <= capacity - self.load
    }

    /// Vertex where the route leaves its last service (the depot if empty).
    pub fn last_exit(&self) -> usize {
        self.vertices[self.vertices.len() - 2]
    }

    /// Appends a served edge just before the closing depot.
    pub fn push_service(&mut self, entry: usize, exit: usize, demand: i32) {
        let at = self.vertices.len() - 1;
        self.vertices.splice(at..at, [entry, exit]);
        self.load += demand;
    }

    /// Removes the k-th served edge and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `k >= num_services()`.
    pub fn remove_service(&mut self, k: usize, demand: i32) -> (usize, usize) {
        let served = self.service(k);
        self.vertices.drain(2 * k + 1..=2 * k + 2);
        self.load -= demand;
        served
    }

    /// Reverses the block of served edges `i..=j`: their order flips and each
    /// one is traversed in the opposite direction.
    pub fn reverse_services(&mut self, i: usize, j: usize) {
        debug_assert!(i <= j && j < self.num_services());
        self.vertices[2 * i + 1..=2 * j + 2].reverse();
    }
}
