//! Ejection chain: alternating local search and random relocations.
//!
//! # Algorithm
//!
//! Repeats `depth` rounds of: one 2-opt pass, relocate to its local optimum,
//! one random single-edge relocation. Both the local optimum and the
//! relocated solution are best-so-far candidates; either replaces the best
//! only when strictly cheaper. Each round starts again from the best seen,
//! so an ejection survives into the next round only if it paid off.
//!
//! Depth 1 serves as light repair right after construction, depth 3 as the
//! deep search of the final phase.
//!
//! # Reference
//!
//! Glover, F. (1996). "Ejection chains, reference structures and alternating
//! path methods for traveling salesman problems", *Discrete Applied
//! Mathematics* 65, 223-253.

use rand::Rng;

use crate::evaluation::CostEvaluator;
use crate::models::{Instance, Solution};

use super::{random_relocation, relocate, two_opt, EPS};

/// Runs an ejection chain of the given depth from `solution`.
///
/// # Examples
///
/// ```
/// use carp_routing::models::InstanceBuilder;
/// use carp_routing::constructive::trivial_solution;
/// use carp_routing::evaluation::CostEvaluator;
/// use carp_routing::local_search::ejection_chain;
/// use rand::SeedableRng;
///
/// let inst = InstanceBuilder::new("toy", 4, 1, 10)
///     .required_edge(1, 2, 1.0, 1)
///     .required_edge(2, 3, 1.0, 1)
///     .required_edge(3, 4, 1.0, 1)
///     .build()
///     .unwrap();
/// let start = trivial_solution(&inst);
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let best = ejection_chain(&start, &inst, 3, &mut rng);
/// let eval = CostEvaluator::new(&inst);
/// assert!(eval.total_cost(&best) <= eval.total_cost(&start));
/// assert!(eval.is_feasible(&best));
/// ```
pub fn ejection_chain<R: Rng>(
    solution: &Solution,
    instance: &Instance,
    depth: usize,
    rng: &mut R,
) -> Solution {
    let eval = CostEvaluator::new(instance);
    let mut best = solution.clone();
    let mut best_cost = eval.total_cost(&best);

    let observe = |candidate: &Solution, best: &mut Solution, best_cost: &mut f64| {
        let cost = eval.total_cost(candidate);
        if cost < *best_cost - EPS {
            *best = candidate.clone();
            *best_cost = cost;
        }
    };

    for _ in 0..depth {
        let current = two_opt(&best, instance);
        let current = relocate(&current, instance);
        observe(&current, &mut best, &mut best_cost);

        if let Some(perturbed) = random_relocation(&current, instance, rng) {
            observe(&perturbed, &mut best, &mut best_cost);
        }
    }

    best
}
