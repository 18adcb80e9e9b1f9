//! Four-phase search under per-phase budgets.
//!
//! # Algorithm
//!
//! Starting from the trivial one-route-per-edge solution, the phases run in
//! order, each repeating its attempt until its budget runs out:
//!
//! 1. GRASP + 2-opt + relocate + shallow ejection chain, from scratch
//! 2. randomized giant tour + split + 2-opt, from scratch
//! 3. random relocation of the incumbent + 2-opt + relocate
//! 4. deep ejection chain from the incumbent
//!
//! Every attempt is offered to the [`Incumbent`]. Once an acceptance brings
//! the gap to the known bound within the target, the running phase stops and
//! the remaining phases are skipped. Phases 2-4 also start only while the
//! gap is above target. Without a bound every phase runs to its budget.
//!
//! The budget is checked only at the start of an attempt, so an attempt
//! always completes.

mod config;
mod deadline;
mod incumbent;
mod phase;

pub use config::{PhaseBudget, SolverConfig};
pub use deadline::Deadline;
pub use incumbent::{Incumbent, Verdict};
pub use phase::{
    deep_ejection_attempt, giant_split_attempt, grasp_attempt, perturbation_trial, Phase,
};

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::bounds::best_known;
use crate::constructive::trivial_solution;
use crate::error::Result;
use crate::evaluation::CostEvaluator;
use crate::models::{Instance, Plan, Solution};

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Sanitized final routes.
    pub plan: Plan,
    /// Total cost of the plan.
    pub cost: f64,
    /// Bound the run was measured against.
    pub bound: Option<f64>,
    /// Relative gap `(cost - bound) / bound`.
    pub gap: Option<f64>,
    /// Attempts over all phases.
    pub iterations: u64,
    /// Attempts per phase, indexed by [`Phase::index`].
    pub phase_iterations: [u64; 4],
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// Last phase that ran.
    pub finished_in: Phase,
    /// Whether the gap target was reached.
    pub target_reached: bool,
    /// Candidates rejected for undercutting the bound.
    pub guard_rejections: u64,
}

/// The four-phase CARP solver.
///
/// # Examples
///
/// ```
/// use carp_routing::models::InstanceBuilder;
/// use carp_routing::solver::{Solver, SolverConfig};
///
/// let inst = InstanceBuilder::new("toy", 5, 1, 5)
///     .required_edge(1, 2, 2.0, 3)
///     .required_edge(3, 4, 2.0, 4)
///     .edge(2, 3, 1.0)
///     .edge(4, 5, 1.0)
///     .edge(5, 1, 1.0)
///     .build()
///     .unwrap();
/// let config = SolverConfig::default().with_iteration_cap(5);
/// let outcome = Solver::new(&inst, config).unwrap().solve().unwrap();
/// assert_eq!(outcome.plan.len(), 2);
/// assert!(outcome.plan.routes.iter().all(|r| r.vertices[0] == 1));
/// ```
#[derive(Debug, Clone)]
pub struct Solver<'a> {
    instance: &'a Instance,
    config: SolverConfig,
    bound: Option<f64>,
}

impl<'a> Solver<'a> {
    /// Creates a solver, validating the configuration.
    ///
    /// Without an explicit bound, the best-known table is consulted by
    /// instance name.
    pub fn new(instance: &'a Instance, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        let bound = config.known_bound.or_else(|| best_known(instance.name()));
        Ok(Self {
            instance,
            config,
            bound,
        })
    }

    /// The bound used for acceptance and the gap.
    pub fn bound(&self) -> Option<f64> {
        self.bound
    }

    /// The configuration in use.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs all phases and returns the sanitized best plan.
    pub fn solve(&self) -> Result<SolveOutcome> {
        let start = Instant::now();
        let instance = self.instance;
        let config = &self.config;
        let eval = CostEvaluator::new(instance);
        let mut rng = StdRng::seed_from_u64(config.seed);

        let initial = trivial_solution(instance);
        let initial_cost = eval.total_cost(&initial);
        let mut incumbent = Incumbent::new(initial, initial_cost, self.bound, config.gap_target);
        let mut phase_iterations = [0u64; 4];
        let mut finished_in = Phase::Grasp;

        info!(
            instance = instance.name(),
            required = instance.num_required(),
            bound = ?self.bound,
            initial_cost,
            "solving"
        );

        for phase in Phase::ALL {
            if phase != Phase::Grasp && incumbent.target_reached() {
                info!(%phase, "gap target already reached, skipping remaining phases");
                break;
            }
            finished_in = phase;

            let (attempts, reached) = match phase {
                Phase::Grasp => self.run_phase(phase, &mut incumbent, |_| {
                    Some(grasp_attempt(
                        instance,
                        config.alpha,
                        config.shallow_depth,
                        &mut rng,
                    ))
                }),
                Phase::GiantSplit => self.run_phase(phase, &mut incumbent, |_| {
                    Some(giant_split_attempt(instance, config.top_k, &mut rng))
                }),
                Phase::Perturbation => self.run_phase(phase, &mut incumbent, |best| {
                    perturbation_trial(best, instance, &mut rng)
                }),
                Phase::DeepEjection => self.run_phase(phase, &mut incumbent, |best| {
                    Some(deep_ejection_attempt(
                        best,
                        instance,
                        config.deep_depth,
                        &mut rng,
                    ))
                }),
            };
            phase_iterations[phase.index()] = attempts;
            if reached {
                break;
            }
        }

        let cost = incumbent.cost();
        let gap = incumbent.gap();
        let target_reached = incumbent.target_reached();
        let guard_rejections = incumbent.guard_rejections();
        let plan = Plan::from_solution(&incumbent.into_solution(), instance.depot())?;
        let iterations: u64 = phase_iterations.iter().sum();
        let elapsed = start.elapsed();

        info!(
            instance = instance.name(),
            cost,
            gap = ?gap,
            iterations,
            routes = plan.len(),
            elapsed_secs = elapsed.as_secs_f64(),
            "finished"
        );

        Ok(SolveOutcome {
            plan,
            cost,
            bound: self.bound,
            gap,
            iterations,
            phase_iterations,
            elapsed,
            finished_in,
            target_reached,
            guard_rejections,
        })
    }

    /// Repeats `attempt` until the phase budget runs out or the gap target is
    /// reached. Returns the number of attempts and whether the target was
    /// reached.
    fn run_phase<F>(&self, phase: Phase, incumbent: &mut Incumbent, mut attempt: F) -> (u64, bool)
    where
        F: FnMut(&Solution) -> Option<Solution>,
    {
        let eval = CostEvaluator::new(self.instance);
        let mut deadline = Deadline::start(&self.config.phases[phase.index()]);
        info!(%phase, incumbent = incumbent.cost(), "entering");

        while deadline.next_attempt() {
            let Some(candidate) = attempt(incumbent.solution()) else {
                continue;
            };
            let cost = eval.total_cost(&candidate);
            if incumbent.offer(candidate, cost, phase) == Verdict::Accepted
                && incumbent.target_reached()
            {
                info!(%phase, cost, attempts = deadline.attempts(), "gap target reached");
                return (deadline.attempts(), true);
            }
        }

        info!(
            %phase,
            attempts = deadline.attempts(),
            incumbent = incumbent.cost(),
            "budget exhausted"
        );
        (deadline.attempts(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InstanceBuilder;

    fn two_route_instance(name: &str) -> Instance {
        InstanceBuilder::new(name, 5, 1, 5)
            .required_edge(1, 2, 2.0, 3)
            .required_edge(3, 4, 2.0, 4)
            .edge(2, 3, 1.0)
            .edge(4, 5, 1.0)
            .edge(5, 1, 1.0)
            .build()
            .expect("valid")
    }

    #[test]
    fn test_bound_from_table() {
        let inst = two_route_instance("gdb1");
        let solver = Solver::new(&inst, SolverConfig::default()).expect("valid");
        assert_eq!(solver.bound(), Some(316.0));
    }

    #[test]
    fn test_explicit_bound_wins() {
        let inst = two_route_instance("gdb1");
        let config = SolverConfig::default().with_known_bound(10.0);
        let solver = Solver::new(&inst, config).expect("valid");
        assert_eq!(solver.bound(), Some(10.0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let inst = two_route_instance("toy");
        assert!(Solver::new(&inst, SolverConfig::default().with_top_k(0)).is_err());
    }

    #[test]
    fn test_no_bound_runs_every_phase() {
        let inst = two_route_instance("toy");
        let config = SolverConfig::default().with_iteration_cap(2);
        let outcome = Solver::new(&inst, config)
            .expect("valid")
            .solve()
            .expect("solvable");
        assert_eq!(outcome.phase_iterations, [2, 2, 2, 2]);
        assert_eq!(outcome.iterations, 8);
        assert_eq!(outcome.finished_in, Phase::DeepEjection);
        assert!(outcome.gap.is_none());
        assert!(!outcome.target_reached);
    }

    #[test]
    fn test_cost_matches_plan() {
        let inst = two_route_instance("toy");
        let config = SolverConfig::default().with_iteration_cap(3);
        let outcome = Solver::new(&inst, config)
            .expect("valid")
            .solve()
            .expect("solvable");
        // [1, 1, 2, 1] = 2 + 2 and [1, 3, 4, 1] = 3 + 2 + 2
        assert!((outcome.cost - 11.0).abs() < 1e-10);
        assert_eq!(outcome.plan.len(), 2);
    }
}
