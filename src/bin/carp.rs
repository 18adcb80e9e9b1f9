use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use carp_routing::io::{read_instance, Report};
use carp_routing::solver::{Phase, Solver, SolverConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Solves a capacitated arc routing instance and writes a route report.
#[derive(Parser, Debug)]
#[command(name = "carp", version)]
struct InputArgs {
    /// Instance file in the keyword format
    instance: PathBuf,
    /// Report destination
    output: PathBuf,
    /// JSON file with solver parameters; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    /// GRASP candidate-list width in [0, 1]
    #[arg(long)]
    alpha: Option<f64>,
    /// Nearest edges sampled by the giant-tour builder
    #[arg(long)]
    top_k: Option<usize>,
    /// Seconds per phase, four comma-separated values
    #[arg(long, value_delimiter = ',')]
    phase_secs: Option<Vec<f64>>,
    /// Attempt cap applied to every phase
    #[arg(long)]
    max_iterations: Option<u64>,
    /// Known optimal or best-known cost
    #[arg(long)]
    bound: Option<f64>,
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = InputArgs::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .init();
    info!("carp with args: {args:?}");
    run(args)
}

fn run(args: InputArgs) -> Result<()> {
    let instance = read_instance(&args.instance)
        .with_context(|| format!("reading {}", args.instance.display()))?;
    let config = build_config(&args)?;

    let solver = Solver::new(&instance, config)?;
    let outcome = solver.solve()?;

    let report = Report::new(instance.name(), &outcome);
    fs::write(&args.output, report.to_string())
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!(
        "{}: cost={} bound={:?} gap={} iterations={} elapsed={:.2}s",
        instance.name(),
        outcome.cost,
        outcome.bound,
        outcome
            .gap
            .map_or_else(|| "n/a".to_string(), |g| format!("{:.2}%", g * 100.0)),
        outcome.iterations,
        outcome.elapsed.as_secs_f64()
    );
    Ok(())
}

fn build_config(args: &InputArgs) -> Result<SolverConfig> {
    let mut config: SolverConfig = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SolverConfig::default(),
    };

    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(alpha) = args.alpha {
        config = config.with_alpha(alpha);
    }
    if let Some(top_k) = args.top_k {
        config = config.with_top_k(top_k);
    }
    if let Some(secs) = &args.phase_secs {
        if secs.len() != Phase::ALL.len() {
            bail!("--phase-secs needs {} values", Phase::ALL.len());
        }
        for (phase, &s) in Phase::ALL.iter().zip(secs) {
            config.phases[phase.index()].seconds = s;
        }
    }
    if let Some(max) = args.max_iterations {
        config = config.with_iteration_cap(max);
    }
    if let Some(bound) = args.bound {
        config = config.with_known_bound(bound);
    }
    Ok(config)
}
