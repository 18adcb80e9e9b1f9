//! The four search phases and the attempt each one repeats.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constructive::grasp;
use crate::giant::giant_split;
use crate::local_search::{ejection_chain, random_relocation, relocate, two_opt};
use crate::models::{Instance, Solution};

/// A search phase, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// GRASP construction followed by local search and a shallow ejection
    /// chain, from scratch every attempt.
    Grasp,
    /// Randomized giant tour, split and 2-opt, from scratch every attempt.
    GiantSplit,
    /// One random relocation of the incumbent followed by local search.
    Perturbation,
    /// Deep ejection chain from the incumbent.
    DeepEjection,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Phase; 4] = [
        Phase::Grasp,
        Phase::GiantSplit,
        Phase::Perturbation,
        Phase::DeepEjection,
    ];

    /// Zero-based position in [`Phase::ALL`].
    pub fn index(self) -> usize {
        match self {
            Phase::Grasp => 0,
            Phase::GiantSplit => 1,
            Phase::Perturbation => 2,
            Phase::DeepEjection => 3,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Grasp => "grasp",
            Phase::GiantSplit => "giant-split",
            Phase::Perturbation => "perturbation",
            Phase::DeepEjection => "deep-ejection",
        };
        write!(f, "phase {} ({name})", self.index() + 1)
    }
}

/// One phase-1 attempt: GRASP, a 2-opt pass, relocate and an ejection chain
/// of the given depth.
pub fn grasp_attempt<R: Rng>(
    instance: &Instance,
    alpha: f64,
    depth: usize,
    rng: &mut R,
) -> Solution {
    let solution = grasp(instance, alpha, rng);
    let solution = two_opt(&solution, instance);
    let solution = relocate(&solution, instance);
    ejection_chain(&solution, instance, depth, rng)
}

/// One phase-2 attempt.
pub fn giant_split_attempt<R: Rng>(instance: &Instance, top_k: usize, rng: &mut R) -> Solution {
    giant_split(instance, top_k, rng)
}

/// One phase-3 trial on a copy of `incumbent`.
///
/// Returns `None` when the drawn relocation does not fit; the trial still
/// counts as an iteration.
pub fn perturbation_trial<R: Rng>(
    incumbent: &Solution,
    instance: &Instance,
    rng: &mut R,
) -> Option<Solution> {
    let moved = random_relocation(incumbent, instance, rng)?;
    let moved = two_opt(&moved, instance);
    Some(relocate(&moved, instance))
}

/// One phase-4 attempt on a copy of `incumbent`.
pub fn deep_ejection_attempt<R: Rng>(
    incumbent: &Solution,
    instance: &Instance,
    depth: usize,
    rng: &mut R,
) -> Solution {
    ejection_chain(incumbent, instance, depth, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::trivial_solution;
    use crate::evaluation::CostEvaluator;
    use crate::models::InstanceBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ring() -> Instance {
        let mut b = InstanceBuilder::new("ring", 8, 1, 6);
        for v in 1..=8 {
            b = b.required_edge(v, v % 8 + 1, 2.0, 2);
        }
        b.build().expect("valid")
    }

    #[test]
    fn test_phase_order_and_display() {
        for (k, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), k);
        }
        assert_eq!(Phase::GiantSplit.to_string(), "phase 2 (giant-split)");
    }

    #[test]
    fn test_attempts_are_feasible() {
        let inst = ring();
        let eval = CostEvaluator::new(&inst);
        let mut rng = StdRng::seed_from_u64(11);
        let start = trivial_solution(&inst);
        for _ in 0..5 {
            assert!(eval.is_feasible(&grasp_attempt(&inst, 0.15, 1, &mut rng)));
            assert!(eval.is_feasible(&giant_split_attempt(&inst, 3, &mut rng)));
            if let Some(sol) = perturbation_trial(&start, &inst, &mut rng) {
                assert!(eval.is_feasible(&sol));
            }
            assert!(eval.is_feasible(&deep_ejection_attempt(&start, &inst, 3, &mut rng)));
        }
    }

    #[test]
    fn test_grasp_attempt_deterministic() {
        let inst = ring();
        let a = grasp_attempt(&inst, 0.5, 1, &mut StdRng::seed_from_u64(99));
        let b = grasp_attempt(&inst, 0.5, 1, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_deep_ejection_never_worse() {
        let inst = ring();
        let eval = CostEvaluator::new(&inst);
        let start = trivial_solution(&inst);
        let best = deep_ejection_attempt(&start, &inst, 3, &mut StdRng::seed_from_u64(2));
        assert!(eval.total_cost(&best) <= eval.total_cost(&start));
    }
}
