//! Intra-route 2-opt over blocks of served edges.
//!
//! # Algorithm
//!
//! For a route `[depot, u1, v1, ..., un, vn, depot]`, reversing the block of
//! served edges `i..=j` flips their order and their traversal direction.
//! Service costs are symmetric and internal deadhead legs keep their length,
//! so only the two boundary legs change:
//!
//! ```text
//! delta = d(prev, v_j) + d(u_i, next) - d(prev, u_i) - d(v_j, next)
//! ```
//!
//! One invocation applies only the single best strictly improving reversal.
//! Callers that want a 2-opt local optimum invoke it repeatedly.
//!
//! # Complexity
//!
//! O(n²) per invocation, n = served edges in the route.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::models::{Instance, Route, Solution};

use super::EPS;

/// Finds the best improving block reversal `(i, j, delta)` for a route.
fn best_reversal(route: &Route, instance: &Instance) -> Option<(usize, usize, f64)> {
    let v = route.vertices();
    let n = route.num_services();
    let mut best: Option<(usize, usize, f64)> = None;

    for i in 0..n {
        let prev = v[2 * i];
        let first = v[2 * i + 1];
        for j in i..n {
            let last = v[2 * j + 2];
            let next = v[2 * j + 3];
            let delta = two_opt_delta(instance, prev, first, last, next);
            if delta < -EPS && best.is_none_or(|b| delta < b.2) {
                best = Some((i, j, delta));
            }
        }
    }

    best
}

#[inline]
fn two_opt_delta(instance: &Instance, prev: usize, first: usize, last: usize, next: usize) -> f64 {
    let old_cost = instance.distance(prev, first) + instance.distance(last, next);
    let new_cost = instance.distance(prev, last) + instance.distance(first, next);
    new_cost - old_cost
}

/// Applies the best improving reversal to a single route.
///
/// Returns `true` if the route changed.
///
/// # Examples
///
/// ```
/// use carp_routing::models::{InstanceBuilder, Route};
/// use carp_routing::local_search::two_opt_route;
///
/// // Path 1-2-3-4 with unit costs; 2-3 and 3-4 are required.
/// let inst = InstanceBuilder::new("toy", 4, 1, 10)
///     .edge(1, 2, 1.0)
///     .required_edge(2, 3, 1.0, 1)
///     .required_edge(3, 4, 1.0, 1)
///     .build()
///     .unwrap();
/// let mut route = Route::new(1);
/// route.push_service(3, 4, 1);
/// route.push_service(2, 3, 1);
/// assert!(two_opt_route(&mut route, &inst));
/// assert_eq!(route.vertices(), &[1, 3, 4, 3, 2, 1]);
/// ```
pub fn two_opt_route(route: &mut Route, instance: &Instance) -> bool {
    match best_reversal(route, instance) {
        Some((i, j, _)) => {
            route.reverse_services(i, j);
            true
        }
        None => false,
    }
}

/// Runs one 2-opt invocation on every route and returns the candidate.
///
/// Routes without an improving reversal stay shared with `solution`.
pub fn two_opt(solution: &Solution, instance: &Instance) -> Solution {
    let mut candidate = solution.clone();
    for idx in 0..candidate.num_routes() {
        if let Some((i, j, _)) = best_reversal(candidate.route(idx), instance) {
            candidate.route_mut(idx).reverse_services(i, j);
        }
    }
    candidate
}
