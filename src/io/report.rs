//! Plain-text report of a finished run.

use std::fmt;

use crate::solver::SolveOutcome;

/// Formats a [`SolveOutcome`] as a human-readable report.
///
/// ```text
/// Instance: gdb1
/// Route  1 (load=  5): 1-2-4-1
/// Route  2 (load=  3): 1-12-7-1
///
/// Total cost: 323
/// Bound: 316
/// Gap: 2.22%
/// Iterations: 41
/// Elapsed: 0.87s
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    name: &'a str,
    outcome: &'a SolveOutcome,
}

impl<'a> Report<'a> {
    /// Creates a report for the named instance.
    pub fn new(name: &'a str, outcome: &'a SolveOutcome) -> Self {
        Self { name, outcome }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.outcome;
        writeln!(f, "Instance: {}", self.name)?;
        for (k, route) in outcome.plan.routes.iter().enumerate() {
            let path: Vec<String> = route.vertices.iter().map(ToString::to_string).collect();
            writeln!(
                f,
                "Route {:2} (load={:3}): {}",
                k + 1,
                route.load,
                path.join("-")
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Total cost: {}", outcome.cost)?;
        match outcome.bound {
            Some(bound) => writeln!(f, "Bound: {bound}")?,
            None => writeln!(f, "Bound: none")?,
        }
        match outcome.gap {
            Some(gap) => writeln!(f, "Gap: {:.2}%", gap * 100.0)?,
            None => writeln!(f, "Gap: n/a")?,
        }
        writeln!(f, "Iterations: {}", outcome.iterations)?;
        writeln!(f, "Elapsed: {:.2}s", outcome.elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Plan, PlannedRoute};
    use crate::solver::Phase;
    use std::time::Duration;

    fn outcome(bound: Option<f64>) -> SolveOutcome {
        SolveOutcome {
            plan: Plan {
                routes: vec![
                    PlannedRoute {
                        vertices: vec![1, 2, 3, 1],
                        load: 5,
                    },
                    PlannedRoute {
                        vertices: vec![1, 4, 1],
                        load: 12,
                    },
                ],
            },
            cost: 323.0,
            bound,
            gap: bound.map(|b| (323.0 - b) / b),
            iterations: 41,
            phase_iterations: [41, 0, 0, 0],
            elapsed: Duration::from_millis(870),
            finished_in: Phase::Grasp,
            target_reached: true,
            guard_rejections: 0,
        }
    }

    #[test]
    fn test_report_layout() {
        let out = outcome(Some(316.0));
        let text = Report::new("gdb1", &out).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Instance: gdb1");
        assert_eq!(lines[1], "Route  1 (load=  5): 1-2-3-1");
        assert_eq!(lines[2], "Route  2 (load= 12): 1-4-1");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Total cost: 323");
        assert_eq!(lines[5], "Bound: 316");
        assert_eq!(lines[6], "Gap: 2.22%");
        assert_eq!(lines[7], "Iterations: 41");
        assert_eq!(lines[8], "Elapsed: 0.87s");
    }

    #[test]
    fn test_report_without_bound() {
        let out = outcome(None);
        let text = Report::new("toy", &out).to_string();
        assert!(text.contains("Bound: none\n"));
        assert!(text.contains("Gap: n/a\n"));
    }
}
