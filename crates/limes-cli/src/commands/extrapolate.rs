use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use limes_tableau::{extrapolate_report, extrapolate_scheduled, OrderSchedule};

use super::emit;

#[derive(Args, Debug)]
pub struct ExtrapolateArgs {
    /// Samples ordered from the largest step size to the smallest.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub samples: Vec<f64>,
    /// Error orders eliminated column by column, one fewer than the samples.
    #[arg(long, value_delimiter = ',', conflicts_with = "uniform_order")]
    pub orders: Vec<f64>,
    /// Eliminate the same order at every column instead of listing orders.
    #[arg(long)]
    pub uniform_order: Option<f64>,
    /// Output directory for `extrapolate_report.json`.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &ExtrapolateArgs) -> Result<(), Box<dyn Error>> {
    let report = match args.uniform_order {
        Some(order) => extrapolate_scheduled(&args.samples, &OrderSchedule::Uniform { order })?,
        None => extrapolate_report(&args.samples, &args.orders)?,
    };
    emit("extrapolate", &report, args.out.as_deref())
}
