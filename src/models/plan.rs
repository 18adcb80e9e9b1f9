//! Sanitized output plan handed to report writers.

use serde::Serialize;

use crate::error::{CarpError, Result};

use super::Solution;

/// One route of the final plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedRoute {
    /// Vertex sequence, first and last element equal to the depot.
    pub vertices: Vec<usize>,
    /// Demand served.
    pub load: i32,
}

/// The final routing plan: an ordered list of depot-terminated routes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Plan {
    /// Routes in report order.
    pub routes: Vec<PlannedRoute>,
}

impl Plan {
    /// Sanitizes the routes of a solution into a plan.
    pub fn from_solution(solution: &Solution, depot: usize) -> Result<Self> {
        sanitize(
            solution
                .routes()
                .iter()
                .map(|r| (r.vertices().to_vec(), r.load())),
            depot,
        )
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if the plan has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Forces every route to begin and end at the depot.
///
/// The depot is prepended and/or appended when missing. A route that still
/// is not depot-terminated afterwards yields [`CarpError::MalformedRoute`].
///
/// # Examples
///
/// ```
/// use carp_routing::models::sanitize;
///
/// let plan = sanitize(vec![(vec![2, 3], 4), (vec![1, 5, 6, 1], 2)], 1).unwrap();
/// assert_eq!(plan.routes[0].vertices, vec![1, 2, 3, 1]);
/// assert_eq!(plan.routes[1].vertices, vec![1, 5, 6, 1]);
/// ```
pub fn sanitize<I>(routes: I, depot: usize) -> Result<Plan>
where
    I: IntoIterator<Item = (Vec<usize>, i32)>,
{
    let mut plan = Plan::default();
    for (idx, (mut vertices, load)) in routes.into_iter().enumerate() {
        if vertices.first() != Some(&depot) {
            vertices.insert(0, depot);
        }
        if vertices.len() < 2 || vertices.last() != Some(&depot) {
            vertices.push(depot);
        }
        if vertices.len() < 2 || vertices[0] != depot || vertices[vertices.len() - 1] != depot {
            return Err(CarpError::MalformedRoute {
                index: idx + 1,
                vertices,
            });
        }
        plan.routes.push(PlannedRoute { vertices, load });
    }
    Ok(plan)
}
