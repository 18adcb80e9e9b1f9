//! Giant tours: one capacity-free sequence over every required edge.
//!
//! The randomized builder walks from the depot, each time sorting the
//! unserved edges by the shortest distance to their entry vertex and picking
//! uniformly among the `k` nearest. Capacity is ignored; [`split`](super::split)
//! restores feasibility afterwards.

use rand::Rng;

use crate::models::Instance;

/// Number of nearest candidates sampled when none is configured.
pub const DEFAULT_TOP_K: usize = 3;

/// A giant tour: every required edge once, as `(entry, exit)` pairs in visit
/// order.
///
/// # Examples
///
/// ```
/// use carp_routing::giant::GiantTour;
///
/// let tour = GiantTour::new(vec![(3, 4), (1, 2)]);
/// assert_eq!(tour.services(), &[(3, 4), (1, 2)]);
/// assert_eq!(tour.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GiantTour {
    services: Vec<(usize, usize)>,
}

impl GiantTour {
    /// Creates a giant tour from a sequence of served edges.
    pub fn new(services: Vec<(usize, usize)>) -> Self {
        Self { services }
    }

    /// Returns the served edges in order.
    pub fn services(&self) -> &[(usize, usize)] {
        &self.services
    }

    /// Returns the number of served edges in this tour.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns true if the tour serves nothing.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Builds a giant tour by randomized nearest-edge selection.
///
/// `top_k = 1` gives the deterministic nearest-neighbor tour (ties broken by
/// required-edge order).
///
/// # Examples
///
/// ```
/// use carp_routing::models::InstanceBuilder;
/// use carp_routing::giant::randomized_giant_tour;
/// use rand::SeedableRng;
///
/// let inst = InstanceBuilder::new("toy", 4, 1, 2)
///     .required_edge(3, 4, 1.0, 1)
///     .required_edge(1, 2, 1.0, 1)
///     .required_edge(2, 3, 1.0, 1)
///     .build()
///     .unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let tour = randomized_giant_tour(&inst, 1, &mut rng);
/// assert_eq!(tour.services(), &[(1, 2), (2, 3), (3, 4)]);
/// ```
pub fn randomized_giant_tour<R: Rng>(instance: &Instance, top_k: usize, rng: &mut R) -> GiantTour {
    let edges = instance.required_edges();
    let mut unserved: Vec<usize> = (0..edges.len()).collect();
    let mut services = Vec::with_capacity(edges.len());
    let mut candidates: Vec<(f64, usize)> = Vec::with_capacity(edges.len());
    let mut current = instance.depot();

    while !unserved.is_empty() {
        candidates.clear();
        candidates.extend(
            unserved
                .iter()
                .enumerate()
                .map(|(slot, &e)| (instance.distance(current, edges[e].u), slot)),
        );
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        let k = top_k.clamp(1, candidates.len());
        let pick = rng.random_range(0..k as u64) as usize;
        let e = unserved.remove(candidates[pick].1);
        services.push(edges[e].endpoints());
        current = edges[e].v;
    }

    GiantTour::new(services)
}
