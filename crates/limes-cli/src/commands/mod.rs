pub mod extrapolate;
pub mod series;
pub mod stencil;
pub mod version;

use std::error::Error;
use std::fs;
use std::path::Path;

use limes_core::errors::{ErrorInfo, LimesError};
use limes_core::to_canonical_json_pretty;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Reads a YAML option file.
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, LimesError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        LimesError::Config(
            ErrorInfo::new("config-read", err.to_string())
                .with_context("path", path.display()),
        )
    })?;
    serde_yaml::from_str(&contents).map_err(|err| {
        LimesError::Serde(
            ErrorInfo::new("yaml-read", err.to_string()).with_context("path", path.display()),
        )
    })
}

/// Prints the report as canonical JSON, or writes `<out>/<name>_report.json`.
pub fn emit<T: Serialize>(name: &str, report: &T, out: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let json = to_canonical_json_pretty(report)?;
    match out {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            fs::write(dir.join(format!("{name}_report.json")), json)?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
