use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::{
    extrapolate::{self, ExtrapolateArgs},
    series::{self, SeriesArgs},
    stencil::{self, StencilArgs},
    version::{self, VersionArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "limes", about = "Richardson extrapolation, accelerated series and stencil weights")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extrapolate samples taken at step sizes 2^-1, ..., 2^-n to h = 0.
    Extrapolate(ExtrapolateArgs),
    /// Evaluate sum_k (-1)^k / (2k + 1)^beta.
    Series(SeriesArgs),
    /// Solve for finite-difference stencil weights.
    Stencil(StencilArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Extrapolate(args) => extrapolate::run(&args),
        Command::Series(args) => series::run(&args),
        Command::Stencil(args) => stencil::run(&args),
        Command::Version(args) => version::run(&args),
    }
}

fn main() -> ExitCode {
    match dispatch(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
