//! The incumbent solution and its acceptance rule.
//!
//! A candidate replaces the incumbent only when its cost is strictly below
//! the incumbent's and not below the known bound. A cost below the bound
//! cannot be a real improvement, so such a candidate is rejected, logged at
//! error level and counted instead.

use tracing::{debug, error};

use crate::models::Solution;

use super::Phase;

/// Outcome of offering a candidate to the incumbent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate became the new incumbent.
    Accepted,
    /// The candidate is not strictly cheaper.
    NotBetter,
    /// The candidate is cheaper than the known bound.
    BelowBound,
}

/// Best solution found so far together with its cost and the bound it is
/// measured against.
#[derive(Debug, Clone)]
pub struct Incumbent {
    solution: Solution,
    cost: f64,
    bound: Option<f64>,
    gap_target: f64,
    guard_rejections: u64,
}

impl Incumbent {
    /// Creates an incumbent from an initial solution and its cost.
    pub fn new(solution: Solution, cost: f64, bound: Option<f64>, gap_target: f64) -> Self {
        Self {
            solution,
            cost,
            bound,
            gap_target,
            guard_rejections: 0,
        }
    }

    /// Offers a candidate and replaces the incumbent if it is accepted.
    pub fn offer(&mut self, candidate: Solution, cost: f64, phase: Phase) -> Verdict {
        if cost >= self.cost {
            return Verdict::NotBetter;
        }
        if let Some(bound) = self.bound.filter(|&b| cost < b) {
            self.guard_rejections += 1;
            error!(
                %phase,
                cost,
                bound,
                "candidate cost below known bound, rejected"
            );
            return Verdict::BelowBound;
        }

        self.solution = candidate;
        self.cost = cost;
        debug!(%phase, cost, gap = ?self.gap(), "accepted improvement");
        Verdict::Accepted
    }

    /// Relative gap `(cost - bound) / bound`, `None` without a bound.
    pub fn gap(&self) -> Option<f64> {
        self.bound.map(|b| (self.cost - b) / b)
    }

    /// Returns `true` once the gap is at or below the target.
    ///
    /// Always `false` without a bound.
    pub fn target_reached(&self) -> bool {
        self.gap().is_some_and(|g| g <= self.gap_target)
    }

    /// The incumbent solution.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Cost of the incumbent solution.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// The bound candidates are measured against.
    pub fn bound(&self) -> Option<f64> {
        self.bound
    }

    /// Number of candidates rejected for undercutting the bound.
    pub fn guard_rejections(&self) -> u64 {
        self.guard_rejections
    }

    /// Consumes the incumbent, returning its solution.
    pub fn into_solution(self) -> Solution {
        self.solution
    }
}
