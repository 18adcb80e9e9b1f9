//! Phase deadlines, polled only between attempts.

use std::time::Instant;

use super::PhaseBudget;

/// Gatekeeper for the attempts of one phase.
///
/// [`next_attempt`](Deadline::next_attempt) is called once at the start of
/// each attempt; an attempt that has started always runs to completion.
#[derive(Debug, Clone)]
pub struct Deadline {
    expires_at: Option<Instant>,
    max_attempts: Option<u64>,
    attempts: u64,
}

impl Deadline {
    /// Starts the clock for a phase budget.
    ///
    /// A budget too large to represent never expires by time.
    pub fn start(budget: &PhaseBudget) -> Self {
        let now = Instant::now();
        Self {
            expires_at: budget.duration().and_then(|d| now.checked_add(d)),
            max_attempts: budget.max_iterations,
            attempts: 0,
        }
    }

    /// Returns `true` and counts the attempt if another one may start.
    pub fn next_attempt(&mut self) -> bool {
        if self.max_attempts.is_some_and(|max| self.attempts >= max) {
            return false;
        }
        if self.expires_at.is_some_and(|t| Instant::now() >= t) {
            return false;
        }
        self.attempts += 1;
        true
    }

    /// Number of attempts granted so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }
}
