//! Split algorithm for partitioning a giant tour into feasible routes.
//!
//! # Algorithm
//!
//! Given a giant tour (sequence of served edges), finds the minimum-cost
//! partition into contiguous depot-to-depot segments such that each
//! segment's demand fits the vehicle capacity.
//!
//! `dp[j]` is the cheapest way to serve the first `j` tour positions. For
//! each `j` the segment start `i` is scanned backward from `j - 1`; the
//! segment's demand only grows as `i` decreases, so the scan stops at the
//! first start that overflows the capacity. Segment cost is
//!
//! ```text
//! dp[i] + d(depot, u_{i+1}) + internal(i+1..=j) + d(v_j, depot)
//! ```
//!
//! where `internal` sums service costs and the deadhead legs between
//! consecutive served edges.
//!
//! The result is optimal over partitions of this particular sequence only.
//!
//! # Complexity
//!
//! O(n²) worst case, much less when the capacity is tight.
//!
//! # Reference
//!
//! Prins, C. (2004). "A simple and effective evolutionary algorithm for the
//! vehicle routing problem", *Computers & Operations Research* 31(12), 1985-2002.
//!
//! Lacomme, P., Prins, C. & Ramdane-Chérif, W. (2004). "Competitive memetic
//! algorithms for arc routing problems", *Annals of Operations Research* 131,
//! 159-185.

use crate::models::{Instance, Route, Solution};

use super::GiantTour;

/// Result of the split algorithm.
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// Routes in giant-tour order.
    pub routes: Vec<Route>,
    /// Total cost of all routes.
    pub total_cost: f64,
}

impl SplitResult {
    /// Converts the routes into a solution.
    pub fn into_solution(self) -> Solution {
        Solution::from_routes(self.routes)
    }
}

/// Splits a giant tour into optimal capacity-feasible routes.
///
/// # Examples
///
/// ```
/// use carp_routing::models::InstanceBuilder;
/// use carp_routing::giant::{split, GiantTour};
///
/// // Path 1-2-3-4, every edge required with demand 2, capacity 4.
/// let inst = InstanceBuilder::new("toy", 4, 1, 4)
///     .required_edge(1, 2, 1.0, 2)
///     .required_edge(2, 3, 1.0, 2)
///     .required_edge(3, 4, 1.0, 2)
///     .build()
///     .unwrap();
/// let tour = GiantTour::new(vec![(1, 2), (2, 3), (3, 4)]);
/// let result = split(&tour, &inst);
/// assert_eq!(result.routes.len(), 2);
/// // [1⇒2] + [1→2⇒3⇒4→1] = 2 + 6
/// assert!((result.total_cost - 8.0).abs() < 1e-10);
/// ```
pub fn split(tour: &GiantTour, instance: &Instance) -> SplitResult {
    let services = tour.services();
    let n = services.len();

    if n == 0 {
        return SplitResult {
            routes: vec![],
            total_cost: 0.0,
        };
    }

    let depot = instance.depot();
    let capacity = instance.capacity();
    let demand: Vec<i32> = services
        .iter()
        .map(|&(u, v)| instance.demand(u, v).unwrap_or(0))
        .collect();

    // internal[k] = cost of serving positions 0..k back to back, from the
    // entry of position 0 to the exit of position k - 1.
    let mut internal = vec![0.0; n + 1];
    for k in 0..n {
        let (u, v) = services[k];
        let link = if k == 0 {
            0.0
        } else {
            instance.distance(services[k - 1].1, u)
        };
        let service = instance
            .service_cost(u, v)
            .unwrap_or_else(|| instance.distance(u, v));
        internal[k + 1] = internal[k] + link + service;
    }

    // cost[j] = minimum cost to serve tour[0..j]
    // pred[j] = start of the last route ending at j
    let mut cost = vec![f64::INFINITY; n + 1];
    let mut pred = vec![0usize; n + 1];
    cost[0] = 0.0;

    for j in 1..=n {
        let exit = services[j - 1].1;
        let mut load = 0;
        for i in (0..j).rev() {
            if demand[i] > capacity - load {
                break;
            }
            load += demand[i];
            if cost[i] == f64::INFINITY {
                continue;
            }

            let entry = services[i].0;
            // Drop the link leg that joined position i to position i - 1.
            let link_in = if i == 0 {
                0.0
            } else {
                instance.distance(services[i - 1].1, entry)
            };
            let segment = internal[j] - internal[i] - link_in;
            let new_cost = cost[i]
                + instance.distance(depot, entry)
                + segment
                + instance.distance(exit, depot);

            if new_cost < cost[j] {
                cost[j] = new_cost;
                pred[j] = i;
            }
        }
    }

    // Backtrack to find routes
    let mut routes = Vec::new();
    let mut j = n;
    while j > 0 {
        let i = pred[j];
        let mut route = Route::new(depot);
        for k in i..j {
            let (u, v) = services[k];
            route.push_service(u, v, demand[k]);
        }
        routes.push(route);
        j = i;
    }
    routes.reverse();

    SplitResult {
        routes,
        total_cost: cost[n],
    }
}
