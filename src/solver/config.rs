//! Solver parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constructive::DEFAULT_ALPHA;
use crate::error::{CarpError, Result};
use crate::giant::DEFAULT_TOP_K;

use super::Phase;

/// Budget of a single phase: wall-clock seconds plus an optional cap on the
/// number of attempts.
///
/// The phase stops at whichever limit is hit first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseBudget {
    /// Wall-clock seconds.
    pub seconds: f64,
    /// Maximum number of attempts, unlimited when `None`.
    #[serde(default)]
    pub max_iterations: Option<u64>,
}

impl PhaseBudget {
    /// A time-only budget.
    pub fn seconds(seconds: f64) -> Self {
        Self {
            seconds,
            max_iterations: None,
        }
    }

    /// Caps the number of attempts.
    pub fn with_max_iterations(mut self, max: u64) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// The time budget as a duration, `None` when it does not fit one.
    pub fn duration(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.seconds).ok()
    }
}

/// Configuration of the four-phase solver.
///
/// # Examples
///
/// ```
/// use carp_routing::solver::{Phase, PhaseBudget, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_seed(7)
///     .with_alpha(0.2)
///     .with_phase_budget(Phase::Perturbation, PhaseBudget::seconds(5.0));
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.phases[2].seconds, 5.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Seed of the single random generator shared by all phases.
    pub seed: u64,
    /// GRASP restricted-candidate-list width in `[0, 1]`.
    pub alpha: f64,
    /// Number of nearest edges sampled by the giant-tour builder.
    pub top_k: usize,
    /// Relative gap at or below which the search stops.
    pub gap_target: f64,
    /// Ejection-chain depth used after each GRASP construction.
    pub shallow_depth: usize,
    /// Ejection-chain depth of the last phase.
    pub deep_depth: usize,
    /// Budgets indexed by [`Phase::index`].
    pub phases: [PhaseBudget; 4],
    /// Known optimal or best-known cost. Looked up by instance name when
    /// `None`.
    pub known_bound: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            alpha: DEFAULT_ALPHA,
            top_k: DEFAULT_TOP_K,
            gap_target: 0.03,
            shallow_depth: 1,
            deep_depth: 3,
            phases: [
                PhaseBudget::seconds(60.0),
                PhaseBudget::seconds(60.0),
                PhaseBudget::seconds(15.0),
                PhaseBudget::seconds(15.0),
            ],
            known_bound: None,
        }
    }
}

impl SolverConfig {
    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the GRASP alpha.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the giant-tour sampling width.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Sets the relative gap target.
    pub fn with_gap_target(mut self, gap_target: f64) -> Self {
        self.gap_target = gap_target;
        self
    }

    /// Sets both ejection-chain depths.
    pub fn with_depths(mut self, shallow: usize, deep: usize) -> Self {
        self.shallow_depth = shallow;
        self.deep_depth = deep;
        self
    }

    /// Replaces the budget of one phase.
    pub fn with_phase_budget(mut self, phase: Phase, budget: PhaseBudget) -> Self {
        self.phases[phase.index()] = budget;
        self
    }

    /// Caps the attempts of every phase, keeping the time budgets.
    pub fn with_iteration_cap(mut self, max: u64) -> Self {
        for budget in &mut self.phases {
            budget.max_iterations = Some(max);
        }
        self
    }

    /// Sets the known bound used by the acceptance guard and the gap.
    pub fn with_known_bound(mut self, bound: f64) -> Self {
        self.known_bound = Some(bound);
        self
    }

    /// Checks every parameter range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(CarpError::InvalidConfig(format!(
                "alpha must lie in [0, 1], got {}",
                self.alpha
            )));
        }
        if self.top_k == 0 {
            return Err(CarpError::InvalidConfig("top_k must be at least 1".into()));
        }
        if self.shallow_depth == 0 || self.deep_depth == 0 {
            return Err(CarpError::InvalidConfig(
                "ejection-chain depths must be at least 1".into(),
            ));
        }
        if !self.gap_target.is_finite() || self.gap_target < 0.0 {
            return Err(CarpError::InvalidConfig(format!(
                "gap target must be a non-negative number, got {}",
                self.gap_target
            )));
        }
        for (k, budget) in self.phases.iter().enumerate() {
            if budget.seconds.is_nan() || budget.seconds < 0.0 {
                return Err(CarpError::InvalidConfig(format!(
                    "phase {} budget must be non-negative, got {}",
                    k + 1,
                    budget.seconds
                )));
            }
        }
        if let Some(bound) = self.known_bound {
            if !bound.is_finite() || bound <= 0.0 {
                return Err(CarpError::InvalidBound(bound));
            }
        }
        Ok(())
    }
}
