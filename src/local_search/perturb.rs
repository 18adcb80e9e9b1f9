//! Random single-edge relocation used to leave local optima.

use rand::Rng;

use crate::models::{Instance, Solution};

use super::relocate::{apply_move, RelocateMove};

/// Moves one random served edge from a random route to the end of a random
/// other route.
///
/// Returns `None` when the solution has fewer than two routes or the drawn
/// target route lacks capacity; the input is never modified.
///
/// # Examples
///
/// ```
/// use carp_routing::models::InstanceBuilder;
/// use carp_routing::constructive::trivial_solution;
/// use carp_routing::local_search::random_relocation;
/// use rand::SeedableRng;
///
/// let inst = InstanceBuilder::new("toy", 3, 1, 10)
///     .required_edge(1, 2, 1.0, 1)
///     .required_edge(2, 3, 1.0, 1)
///     .build()
///     .unwrap();
/// let sol = trivial_solution(&inst);
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let moved = random_relocation(&sol, &inst, &mut rng).unwrap();
/// assert_eq!(moved.num_routes(), 1);
/// assert_eq!(moved.num_served(), 2);
/// ```
pub fn random_relocation<R: Rng>(
    solution: &Solution,
    instance: &Instance,
    rng: &mut R,
) -> Option<Solution> {
    let n = solution.num_routes();
    if n < 2 {
        return None;
    }

    let from_route = rng.random_range(0..n as u64) as usize;
    let source = solution.route(from_route);
    if source.is_empty() {
        return None;
    }
    let from_pos = rng.random_range(0..source.num_services() as u64) as usize;
    let (u, v) = source.service(from_pos);
    let demand = instance.demand(u, v).unwrap_or(0);

    // Uniform over the other n - 1 routes.
    let draw = rng.random_range(0..(n - 1) as u64) as usize;
    let to_route = if draw >= from_route { draw + 1 } else { draw };
    if !solution.route(to_route).fits(demand, instance.capacity()) {
        return None;
    }

    let mut candidate = solution.clone();
    apply_move(
        &mut candidate,
        RelocateMove {
            from_route,
            from_pos,
            to_route,
        },
        instance,
    );
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::trivial_solution;
    use crate::evaluation::CostEvaluator;
    use crate::models::InstanceBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn instance(capacity: i32) -> Instance {
        InstanceBuilder::new("ring", 4, 1, capacity)
            .required_edge(1, 2, 1.0, 2)
            .required_edge(2, 3, 1.0, 2)
            .required_edge(3, 4, 1.0, 2)
            .required_edge(4, 1, 1.0, 2)
            .build()
            .expect("valid")
    }

    #[test]
    fn test_perturbation_keeps_feasibility() {
        let inst = instance(4);
        let eval = CostEvaluator::new(&inst);
        let sol = trivial_solution(&inst);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            if let Some(moved) = random_relocation(&sol, &inst, &mut rng) {
                assert!(eval.is_feasible(&moved));
                assert_eq!(moved.num_routes(), 3);
            }
        }
        assert_eq!(sol.num_routes(), 4);
    }

    #[test]
    fn test_perturbation_blocked_by_capacity() {
        let inst = instance(2);
        let sol = trivial_solution(&inst);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            assert!(random_relocation(&sol, &inst, &mut rng).is_none());
        }
    }

    #[test]
    fn test_perturbation_needs_two_routes() {
        let inst = instance(8);
        let mut rng = StdRng::seed_from_u64(1);
        let single = crate::constructive::grasp(&inst, 0.0, &mut rng);
        assert_eq!(single.num_routes(), 1);
        assert!(random_relocation(&single, &inst, &mut rng).is_none());
    }

    #[test]
    fn test_perturbation_capacity_near_i32_max() {
        let inst = InstanceBuilder::new("heavy", 3, 1, 2_000_000_000)
            .required_edge(1, 2, 1.0, 1_500_000_000)
            .required_edge(2, 3, 1.0, 1_500_000_000)
            .build()
            .expect("valid");
        let sol = trivial_solution(&inst);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..20 {
            assert!(random_relocation(&sol, &inst, &mut rng).is_none());
        }
    }
}
