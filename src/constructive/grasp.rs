//! Greedy randomized route construction (GRASP).
//!
//! Builds routes one at a time. From the current end vertex, every unserved
//! required edge that still fits in the vehicle is a candidate, keyed by the
//! shortest distance to its entry vertex. Candidates within
//! `dmin + α · (dmax − dmin)` form the restricted candidate list (RCL); one is
//! drawn uniformly and appended. When nothing fits, the route returns to the
//! depot and a new one starts.
//!
//! # Complexity
//!
//! O(m² log m) where m = number of required edges.
//!
//! # Reference
//!
//! Feo, T.A. & Resende, M.G.C. (1995). "Greedy randomized adaptive search
//! procedures", *Journal of Global Optimization* 6, 109-133.

use rand::Rng;

use crate::models::{Instance, Route, Solution};

/// RCL width used when none is configured.
pub const DEFAULT_ALPHA: f64 = 0.15;

/// Constructs a feasible solution with the GRASP restricted-candidate rule.
///
/// `alpha = 0` is pure greedy (ties broken at random), `alpha = 1` picks any
/// feasible candidate.
///
/// # Examples
///
/// ```
/// use carp_routing::models::InstanceBuilder;
/// use carp_routing::constructive::grasp;
/// use rand::SeedableRng;
///
/// let inst = InstanceBuilder::new("toy", 4, 1, 10)
///     .required_edge(1, 2, 1.0, 4)
///     .required_edge(2, 3, 1.0, 4)
///     .required_edge(3, 4, 1.0, 4)
///     .build()
///     .unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let sol = grasp(&inst, 0.15, &mut rng);
/// assert_eq!(sol.num_served(), 3);
/// assert_eq!(sol.num_routes(), 2);
/// ```
pub fn grasp<R: Rng>(instance: &Instance, alpha: f64, rng: &mut R) -> Solution {
    let edges = instance.required_edges();
    let depot = instance.depot();
    let capacity = instance.capacity();

    let mut unserved: Vec<usize> = (0..edges.len()).collect();
    let mut solution = Solution::new();
    let mut candidates: Vec<(f64, usize)> = Vec::with_capacity(edges.len());

    while !unserved.is_empty() {
        let mut route = Route::new(depot);
        let mut current = depot;

        loop {
            candidates.clear();
            candidates.extend(
                unserved
                    .iter()
                    .enumerate()
                    .filter(|&(_, &e)| route.fits(edges[e].demand, capacity))
                    .map(|(slot, &e)| (instance.distance(current, edges[e].u), slot)),
            );
            if candidates.is_empty() {
                break;
            }

            candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
            let d_min = candidates[0].0;
            let d_max = candidates[candidates.len() - 1].0;
            let threshold = d_min + alpha * (d_max - d_min);
            let rcl_len = candidates.partition_point(|c| c.0 <= threshold);

            let pick = rng.random_range(0..rcl_len as u64) as usize;
            let slot = candidates[pick].1;
            let e = unserved.remove(slot);
            let edge = &edges[e];
            route.push_service(edge.u, edge.v, edge.demand);
            current = edge.v;
        }

        solution.add_route(route);
    }

    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::CostEvaluator;
    use crate::models::InstanceBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line_instance(capacity: i32) -> Instance {
        // Path 1-2-3-4-5 where every edge is required with demand 2.
        InstanceBuilder::new("line", 5, 1, capacity)
            .required_edge(1, 2, 1.0, 2)
            .required_edge(2, 3, 1.0, 2)
            .required_edge(3, 4, 1.0, 2)
            .required_edge(4, 5, 1.0, 2)
            .build()
            .expect("valid")
    }

    #[test]
    fn test_grasp_serves_everything() {
        let inst = line_instance(4);
        let mut rng = StdRng::seed_from_u64(7);
        let sol = grasp(&inst, DEFAULT_ALPHA, &mut rng);
        assert!(CostEvaluator::new(&inst).is_feasible(&sol));
        assert_eq!(sol.num_routes(), 2);
    }

    #[test]
    fn test_grasp_greedy_follows_nearest() {
        let inst = line_instance(100);
        let mut rng = StdRng::seed_from_u64(1);
        let sol = grasp(&inst, 0.0, &mut rng);
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.route(0).vertices(), &[1, 1, 2, 2, 3, 3, 4, 4, 5, 1]);
        assert_eq!(sol.route(0).load(), 8);
    }

    #[test]
    fn test_grasp_respects_capacity() {
        let inst = line_instance(3);
        let mut rng = StdRng::seed_from_u64(3);
        let sol = grasp(&inst, 1.0, &mut rng);
        assert_eq!(sol.num_routes(), 4);
        for route in sol.routes() {
            assert!(route.load() <= 3);
        }
    }

    #[test]
    fn test_grasp_no_required_edges() {
        let inst = InstanceBuilder::new("empty", 2, 1, 5)
            .edge(1, 2, 1.0)
            .build()
            .expect("valid");
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(grasp(&inst, DEFAULT_ALPHA, &mut rng).num_routes(), 0);
    }

    #[test]
    fn test_grasp_same_seed_same_solution() {
        let inst = line_instance(4);
        let a = grasp(&inst, 0.5, &mut StdRng::seed_from_u64(11));
        let b = grasp(&inst, 0.5, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    fn heavy_pair() -> Instance {
        InstanceBuilder::new("heavy", 3, 1, 2_000_000_000)
            .required_edge(1, 2, 1.0, 1_500_000_000)
            .required_edge(2, 3, 1.0, 1_500_000_000)
            .build()
            .expect("valid")
    }

    #[test]
    fn test_grasp_capacity_near_i32_max() {
        let inst = heavy_pair();
        let mut rng = StdRng::seed_from_u64(4);
        let sol = grasp(&inst, DEFAULT_ALPHA, &mut rng);
        assert_eq!(sol.num_routes(), 2);
        assert!(CostEvaluator::new(&inst).is_feasible(&sol));
    }
}
