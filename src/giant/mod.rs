//! Giant-tour construction and optimal splitting.
//!
//! - [`GiantTour`] — Capacity-free sequence of every required edge
//! - [`randomized_giant_tour`] — Randomized top-k nearest-edge builder
//! - [`split`] — Exact DP partition into capacity-feasible routes
//! - [`giant_split`] — Builder, split and one 2-opt pass in one call

mod split;
mod tour;

pub use split::{split, SplitResult};
pub use tour::{randomized_giant_tour, GiantTour, DEFAULT_TOP_K};

use rand::Rng;

use crate::local_search::two_opt;
use crate::models::{Instance, Solution};

/// Builds a randomized giant tour, splits it and runs one 2-opt pass over
/// the resulting routes.
pub fn giant_split<R: Rng>(instance: &Instance, top_k: usize, rng: &mut R) -> Solution {
    let tour = randomized_giant_tour(instance, top_k, rng);
    let solution = split(&tour, instance).into_solution();
    two_opt(&solution, instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::CostEvaluator;
    use crate::models::InstanceBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_giant_split_feasible() {
        let inst = InstanceBuilder::new("ring", 6, 1, 5)
            .required_edge(1, 2, 2.0, 2)
            .required_edge(2, 3, 2.0, 2)
            .required_edge(3, 4, 2.0, 2)
            .required_edge(4, 5, 2.0, 2)
            .required_edge(5, 6, 2.0, 2)
            .required_edge(6, 1, 2.0, 2)
            .build()
            .expect("valid");
        let eval = CostEvaluator::new(&inst);
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..10 {
            let sol = giant_split(&inst, DEFAULT_TOP_K, &mut rng);
            assert!(eval.is_feasible(&sol));
            assert!(sol.num_routes() >= 3);
        }
    }
}
