use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use limes_series::{evaluate_series_with, CapPolicy, SeriesMethod, SeriesOpts};

use super::{emit, load_yaml};

#[derive(Args, Debug)]
pub struct SeriesArgs {
    /// Exponent of the series, in (0, 1].
    #[arg(long)]
    pub beta: f64,
    /// Accelerate the partial sums with a Richardson tableau.
    #[arg(long)]
    pub accelerate: bool,
    /// YAML file with `SeriesOpts`.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the maximum number of doublings.
    #[arg(long)]
    pub max_iters: Option<usize>,
    /// Override the convergence tolerance.
    #[arg(long)]
    pub tolerance: Option<f64>,
    /// Fail instead of reporting when the iteration cap is reached.
    #[arg(long)]
    pub fail_on_cap: bool,
    /// Output directory for `series_report.json`.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

fn resolve_opts(args: &SeriesArgs) -> Result<SeriesOpts, Box<dyn Error>> {
    let mut opts: SeriesOpts = match &args.config {
        Some(path) => load_yaml(path)?,
        None => SeriesOpts::default(),
    };
    if args.accelerate && !opts.method.accelerates() {
        opts.method = SeriesMethod::richardson();
    }
    if let Some(max_iters) = args.max_iters {
        opts.max_iters = max_iters;
    }
    if let Some(tolerance) = args.tolerance {
        opts.tolerance = tolerance;
    }
    if args.fail_on_cap {
        opts.on_cap = CapPolicy::Fail;
    }
    Ok(opts)
}

pub fn run(args: &SeriesArgs) -> Result<(), Box<dyn Error>> {
    let opts = resolve_opts(args)?;
    let report = evaluate_series_with(args.beta, &opts)?;
    emit("series", &report, args.out.as_deref())
}
