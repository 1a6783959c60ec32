use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use obstacle_convolve::input::{collect_samples, parse_times, TerminalPrompt};
use obstacle_convolve::input::{OBSTACLE1_FIELD, OBSTACLE2_FIELD};
use obstacle_convolve::{ConvolutionEngine, Report, RunConfig};

/// Time under which two sequential obstacles are cleared with a given confidence.
#[derive(Debug, Parser)]
#[command(version)]
struct Opt {
    /// TOML file with [model] and [samples] tables
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// target probability, strictly between 0 and 1
    #[arg(long)]
    pub probability: Option<f64>,
    /// comma-separated observed times for obstacle 1
    #[arg(long)]
    pub obstacle1: Option<String>,
    /// comma-separated observed times for obstacle 2
    #[arg(long)]
    pub obstacle2: Option<String>,
    #[arg(long)]
    pub grid_size: Option<usize>,
    #[arg(long)]
    pub grid_step: Option<f64>,
    #[arg(long)]
    pub tolerance: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("obstacle_convolve=info")),
        )
        .init();

    let opts = Opt::parse();

    let mut run = match &opts.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(grid_size) = opts.grid_size {
        run.model = run.model.with_grid_size(grid_size);
    }
    if let Some(grid_step) = opts.grid_step {
        run.model = run.model.with_grid_step(grid_step);
    }
    if let Some(tolerance) = opts.tolerance {
        run.model = run.model.with_tolerance(tolerance);
    }
    if let Some(p) = opts.probability {
        run.samples.probability = Some(p);
    }
    if let Some(raw) = &opts.obstacle1 {
        run.samples.obstacle1 = Some(parse_times(OBSTACLE1_FIELD, raw)?);
    }
    if let Some(raw) = &opts.obstacle2 {
        run.samples.obstacle2 = Some(parse_times(OBSTACLE2_FIELD, raw)?);
    }

    let summary = collect_samples(run.samples, &mut TerminalPrompt::new())?;

    info!(
        obstacle1 = summary.obstacle1_times().len(),
        obstacle2 = summary.obstacle2_times().len(),
        grid_size = run.model.grid_size,
        "computing combined time distribution"
    );
    let engine = ConvolutionEngine::new(summary, run.model)?;
    println!("{}", Report::from(&engine));
    Ok(())
}
