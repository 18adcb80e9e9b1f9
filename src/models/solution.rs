//! Solution and violation types.

use std::sync::Arc;

use super::Route;

/// A type of constraint violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Route load exceeds vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// Cached route load differs from the sum of served demands.
    LoadMismatch {
        /// Route index.
        route_index: usize,
        /// Cached load.
        cached: i32,
        /// Recomputed load.
        actual: i32,
    },
    /// A service position holds a pair that is not a required edge.
    UnknownService {
        /// Route index.
        route_index: usize,
        /// Entry vertex.
        u: usize,
        /// Exit vertex.
        v: usize,
    },
    /// Route does not start and end at the depot.
    NotDepotTerminated {
        /// Route index.
        route_index: usize,
    },
    /// A required edge is served by no route.
    EdgeNotServed {
        /// Required edge index.
        edge: usize,
    },
    /// A required edge is served more than once.
    EdgeServedMultiple {
        /// Required edge index.
        edge: usize,
        /// Number of times it is served.
        count: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete set of routes.
///
/// Routes sit behind [`Arc`] so cloning a solution to build a candidate only
/// copies pointers; a route is deep-copied the first time it is mutated
/// through [`route_mut`](Solution::route_mut). The source solution is never
/// affected.
///
/// # Examples
///
/// ```
/// use carp_routing::models::{Route, Solution};
///
/// let mut route = Route::new(1);
/// route.push_service(2, 3, 4);
/// let mut sol = Solution::new();
/// sol.add_route(route);
///
/// let mut candidate = sol.clone();
/// candidate.route_mut(0).push_service(3, 4, 1);
/// assert_eq!(sol.route(0).load(), 4);
/// assert_eq!(candidate.route(0).load(), 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
    routes: Vec<Arc<Route>>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Creates a solution from owned routes.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self {
            routes: routes.into_iter().map(Arc::new).collect(),
        }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(Arc::new(route));
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    /// Returns the route at `index`.
    pub fn route(&self, index: usize) -> &Route {
        &self.routes[index]
    }

    /// Mutable access to one route, copying it first if it is shared.
    pub fn route_mut(&mut self, index: usize) -> &mut Route {
        Arc::make_mut(&mut self.routes[index])
    }

    /// Returns the number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of required edges served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.num_services()).sum()
    }

    /// Total load across all routes.
    pub fn total_load(&self) -> i32 {
        self.routes.iter().map(|r| r.load()).sum()
    }

    /// Drops routes that serve nothing.
    pub fn remove_empty_routes(&mut self) {
        self.routes.retain(|r| !r.is_empty());
    }
}
