use std::error::Error;

use clap::Args;
use limes_core::{to_canonical_json_pretty, SchemaVersion};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit the report schema version alongside the crate version.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    schema_version: SchemaVersion,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        schema_version: SchemaVersion::current(),
    };
    println!("{}", to_canonical_json_pretty(&info)?);
    Ok(())
}
