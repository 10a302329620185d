use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use limes_stencil::{solve_stencil_with, StencilOpts};

use super::{emit, load_yaml};

#[derive(Args, Debug)]
pub struct StencilArgs {
    /// Stencil shifts a_k, in the order the weights should be reported.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub shifts: Vec<f64>,
    /// Derivative order, strictly less than the number of shifts.
    #[arg(long)]
    pub order: usize,
    /// YAML file with `StencilOpts`.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the reciprocal condition threshold.
    #[arg(long)]
    pub min_rcond: Option<f64>,
    /// Output directory for `stencil_report.json`.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &StencilArgs) -> Result<(), Box<dyn Error>> {
    let mut opts: StencilOpts = match &args.config {
        Some(path) => load_yaml(path)?,
        None => StencilOpts::default(),
    };
    if let Some(min_rcond) = args.min_rcond {
        opts.min_rcond = min_rcond;
    }
    let report = solve_stencil_with(&args.shifts, args.order, &opts)?;
    emit("stencil", &report, args.out.as_deref())
}
