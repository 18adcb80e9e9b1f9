//! One route per required edge.
//!
//! Always feasible once every demand fits the capacity; used as the seed
//! incumbent before any search runs.

use crate::models::{Instance, Route, Solution};

/// Builds the solution that serves each required edge with its own vehicle.
///
/// # Examples
///
/// ```
/// use carp_routing::models::InstanceBuilder;
/// use carp_routing::constructive::trivial_solution;
///
/// let inst = InstanceBuilder::new("toy", 3, 1, 10)
///     .required_edge(1, 2, 1.0, 1)
///     .required_edge(2, 3, 1.0, 1)
///     .build()
///     .unwrap();
/// let sol = trivial_solution(&inst);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.route(1).vertices(), &[1, 2, 3, 1]);
/// ```
pub fn trivial_solution(instance: &Instance) -> Solution {
    let depot = instance.depot();
    let routes = instance
        .required_edges()
        .iter()
        .map(|e| {
            let mut route = Route::new(depot);
            route.push_service(e.u, e.v, e.demand);
            route
        })
        .collect();
    Solution::from_routes(routes)
}
