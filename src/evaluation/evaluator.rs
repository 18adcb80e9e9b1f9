//! Solution cost and feasibility evaluation.

use crate::models::{Instance, Route, Solution, Violation, ViolationType};

/// Prices solutions and checks them against the instance constraints.
///
/// Service legs are charged the required edge's cost and deadhead legs the
/// shortest-path distance. Pricing reads the precomputed distance matrix
/// only and runs in O(total route length).
///
/// A deadhead leg between the endpoints of a required edge is still priced
/// by shortest path, never by that edge's own cost. When a required edge
/// costs more than the shortest path between its endpoints, totals are
/// therefore lower than under a "direct edge cost if defined" rule.
///
/// # Examples
///
/// ```
/// use carp_routing::models::{InstanceBuilder, Route, Solution};
/// use carp_routing::evaluation::CostEvaluator;
///
/// let inst = InstanceBuilder::new("toy", 3, 1, 10)
///     .required_edge(2, 3, 5.0, 1)
///     .edge(1, 2, 1.0)
///     .edge(1, 3, 2.0)
///     .build()
///     .unwrap();
/// let mut route = Route::new(1);
/// route.push_service(2, 3, 1);
/// let sol = Solution::from_routes(vec![route]);
///
/// let eval = CostEvaluator::new(&inst);
/// // 1→2 deadhead (1) + 2→3 service (5) + 3→1 deadhead (2)
/// assert_eq!(eval.total_cost(&sol), 8.0);
/// assert!(eval.check(&sol).is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CostEvaluator<'a> {
    instance: &'a Instance,
}

impl<'a> CostEvaluator<'a> {
    /// Creates an evaluator over the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// The instance being evaluated against.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Cost of a single route.
    pub fn route_cost(&self, route: &Route) -> f64 {
        let vertices = route.vertices();
        let mut cost = 0.0;
        for (pos, pair) in vertices.windows(2).enumerate() {
            let (a, b) = (pair[0], pair[1]);
            // Odd positions start a served edge.
            cost += if pos % 2 == 1 {
                self.instance
                    .service_cost(a, b)
                    .unwrap_or_else(|| self.instance.distance(a, b))
            } else {
                self.instance.distance(a, b)
            };
        }
        cost
    }

    /// Total cost of a solution.
    pub fn total_cost(&self, solution: &Solution) -> f64 {
        solution.routes().iter().map(|r| self.route_cost(r)).sum()
    }

    /// Lists every constraint the solution violates.
    ///
    /// An empty list means every required edge is served exactly once, every
    /// route is depot-terminated and every load is within capacity.
    pub fn check(&self, solution: &Solution) -> Vec<Violation> {
        let inst = self.instance;
        let mut violations = Vec::new();
        let mut served = vec![0usize; inst.num_required()];

        for (idx, route) in solution.routes().iter().enumerate() {
            let vertices = route.vertices();
            if vertices.first() != Some(&inst.depot()) || vertices.last() != Some(&inst.depot()) {
                violations.push(Violation::new(ViolationType::NotDepotTerminated {
                    route_index: idx,
                }));
            }

            let mut actual: i32 = 0;
            for (u, v) in route.services() {
                match inst.edge_index(u, v) {
                    Some(e) => {
                        served[e] += 1;
                        actual = actual.saturating_add(inst.required_edges()[e].demand);
                    }
                    None => violations.push(Violation::new(ViolationType::UnknownService {
                        route_index: idx,
                        u,
                        v,
                    })),
                }
            }

            if actual != route.load() {
                violations.push(Violation::new(ViolationType::LoadMismatch {
                    route_index: idx,
                    cached: route.load(),
                    actual,
                }));
            }
            if actual > inst.capacity() {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index: idx,
                    load: actual,
                    capacity: inst.capacity(),
                }));
            }
        }

        for (edge, &count) in served.iter().enumerate() {
            match count {
                1 => {}
                0 => violations.push(Violation::new(ViolationType::EdgeNotServed { edge })),
                _ => violations.push(Violation::new(ViolationType::EdgeServedMultiple {
                    edge,
                    count,
                })),
            }
        }

        violations
    }

    /// Returns `true` if [`check`](Self::check) finds nothing.
    pub fn is_feasible(&self, solution: &Solution) -> bool {
        self.check(solution).is_empty()
    }
}
