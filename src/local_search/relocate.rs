//! Inter-route relocation of served edges.
//!
//! # Algorithm
//!
//! Scans routes in order; for each served edge, tries appending it (same
//! traversal direction) to the end of every other route with spare
//! capacity. The first move that strictly lowers total cost is applied and
//! the scan restarts from the first route. Stops when a full scan finds no
//! improving move, i.e. at a relocate local optimum.
//!
//! The cost change of a move is computed from the four affected deadhead
//! legs; it equals the difference of two full evaluations exactly.
//!
//! # Complexity
//!
//! O(R² · n) per scan where R = routes, n = served edges per route.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::models::{Instance, Solution};

use super::EPS;

/// A relocate move: take served edge `from_pos` of `from_route` and append it
/// to `to_route`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RelocateMove {
    pub from_route: usize,
    pub from_pos: usize,
    pub to_route: usize,
}

/// Applies first-improvement relocation until no improving move remains.
///
/// Routes emptied by a move are dropped. The input is left untouched.
///
/// # Examples
///
/// ```
/// use carp_routing::models::{InstanceBuilder, Route, Solution};
/// use carp_routing::evaluation::CostEvaluator;
/// use carp_routing::local_search::relocate;
///
/// // Two required edges on the same spoke, served by separate vehicles.
/// let inst = InstanceBuilder::new("toy", 3, 1, 10)
///     .required_edge(1, 2, 1.0, 1)
///     .required_edge(2, 3, 1.0, 1)
///     .build()
///     .unwrap();
/// let mut a = Route::new(1);
/// a.push_service(1, 2, 1);
/// let mut b = Route::new(1);
/// b.push_service(2, 3, 1);
/// let sol = Solution::from_routes(vec![a, b]);
///
/// let improved = relocate(&sol, &inst);
/// let eval = CostEvaluator::new(&inst);
/// assert_eq!(improved.num_routes(), 1);
/// assert!(eval.total_cost(&improved) < eval.total_cost(&sol));
/// ```
pub fn relocate(solution: &Solution, instance: &Instance) -> Solution {
    let mut current = solution.clone();
    while let Some(mv) = first_improving_move(&current, instance) {
        apply_move(&mut current, mv, instance);
    }
    current
}

/// Cost change of moving served edge `pos` of route `from` to the end of
/// route `to`.
pub(crate) fn move_delta(solution: &Solution, instance: &Instance, mv: RelocateMove) -> f64 {
    let src = solution.route(mv.from_route).vertices();
    let prev = src[2 * mv.from_pos];
    let (u, v) = (src[2 * mv.from_pos + 1], src[2 * mv.from_pos + 2]);
    let next = src[2 * mv.from_pos + 3];

    let dst = solution.route(mv.to_route);
    let last = dst.last_exit();
    let depot = dst.depot();

    // The service leg itself is charged in both routes and cancels out.
    let removal =
        instance.distance(prev, next) - instance.distance(prev, u) - instance.distance(v, next);
    let insertion =
        instance.distance(last, u) + instance.distance(v, depot) - instance.distance(last, depot);
    removal + insertion
}

/// Returns the first strictly improving feasible move in scan order.
fn first_improving_move(solution: &Solution, instance: &Instance) -> Option<RelocateMove> {
    let capacity = instance.capacity();
    let routes = solution.routes();

    for from_route in 0..routes.len() {
        for (from_pos, (u, v)) in routes[from_route].services().enumerate() {
            let demand = instance.demand(u, v).unwrap_or(0);
            for to_route in 0..routes.len() {
                if to_route == from_route || !routes[to_route].fits(demand, capacity) {
                    continue;
                }
                let mv = RelocateMove {
                    from_route,
                    from_pos,
                    to_route,
                };
                if move_delta(solution, instance, mv) < -EPS {
                    return Some(mv);
                }
            }
        }
    }

    None
}

/// Applies a move in place on a candidate copy, dropping an emptied source
/// route.
pub(crate) fn apply_move(solution: &mut Solution, mv: RelocateMove, instance: &Instance) {
    let (u, v) = solution.route(mv.from_route).service(mv.from_pos);
    let demand = instance.demand(u, v).unwrap_or(0);
    solution.route_mut(mv.from_route).remove_service(mv.from_pos, demand);
    solution.route_mut(mv.to_route).push_service(u, v, demand);
    if solution.route(mv.from_route).is_empty() {
        solution.remove_empty_routes();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::CostEvaluator;
    use crate::models::{InstanceBuilder, Route};

    // Depot 1 with two spokes: 1-2-3 and 1-4-5, unit costs, demand 1 each.
    fn spokes(capacity: i32) -> Instance {
        InstanceBuilder::new("spokes", 5, 1, capacity)
            .required_edge(1, 2, 1.0, 1)
            .required_edge(2, 3, 1.0, 1)
            .required_edge(1, 4, 1.0, 1)
            .required_edge(4, 5, 1.0, 1)
            .build()
            .expect("valid")
    }

    fn route(services: &[(usize, usize)]) -> Route {
        let mut r = Route::new(1);
        for &(u, v) in services {
            r.push_service(u, v, 1);
        }
        r
    }

    #[test]
    fn test_move_delta_matches_full_evaluation() {
        let inst = spokes(10);
        let eval = CostEvaluator::new(&inst);
        let sol = Solution::from_routes(vec![route(&[(1, 2), (4, 5)]), route(&[(2, 3)])]);
        let mv = RelocateMove {
            from_route: 0,
            from_pos: 1,
            to_route: 1,
        };
        let mut moved = sol.clone();
        apply_move(&mut moved, mv, &inst);
        let expected = eval.total_cost(&moved) - eval.total_cost(&sol);
        assert!((move_delta(&sol, &inst, mv) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_relocate_merges_spoke() {
        let inst = spokes(10);
        let eval = CostEvaluator::new(&inst);
        let sol = Solution::from_routes(vec![
            route(&[(1, 2)]),
            route(&[(1, 4)]),
            route(&[(2, 3)]),
            route(&[(4, 5)]),
        ]);
        let improved = relocate(&sol, &inst);
        assert!(eval.is_feasible(&improved));
        assert!(eval.total_cost(&improved) < eval.total_cost(&sol));
        assert!(improved.num_routes() < sol.num_routes());
        // Input untouched.
        assert_eq!(sol.num_routes(), 4);
    }

    #[test]
    fn test_relocate_respects_capacity() {
        let inst = spokes(1);
        let sol = Solution::from_routes(vec![
            route(&[(1, 2)]),
            route(&[(2, 3)]),
            route(&[(1, 4)]),
            route(&[(4, 5)]),
        ]);
        let improved = relocate(&sol, &inst);
        assert_eq!(improved, sol);
    }

    #[test]
    fn test_relocate_local_optimum() {
        let inst = spokes(2);
        let sol = Solution::from_routes(vec![route(&[(1, 2), (2, 3)]), route(&[(1, 4), (4, 5)])]);
        let improved = relocate(&sol, &inst);
        assert_eq!(improved, sol);
        assert!(first_improving_move(&improved, &inst).is_none());
    }

    #[test]
    fn test_relocate_single_route_noop() {
        let inst = spokes(10);
        let sol = Solution::from_routes(vec![route(&[(1, 2), (2, 3), (1, 4), (4, 5)])]);
        assert_eq!(relocate(&sol, &inst), sol);
    }

    #[test]
    fn test_relocate_capacity_near_i32_max() {
        let inst = InstanceBuilder::new("heavy", 3, 1, 2_000_000_000)
            .required_edge(1, 2, 1.0, 1_500_000_000)
            .required_edge(2, 3, 1.0, 1_500_000_000)
            .build()
            .expect("valid");
        let mut a = Route::new(1);
        a.push_service(1, 2, 1_500_000_000);
        let mut b = Route::new(1);
        b.push_service(2, 3, 1_500_000_000);
        let sol = Solution::from_routes(vec![a, b]);
        assert_eq!(relocate(&sol, &inst), sol);
    }
}
