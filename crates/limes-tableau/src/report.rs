use limes_core::errors::LimesError;
use limes_core::{stable_hash_string, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::schedule::OrderSchedule;
use crate::tableau::RichardsonTableau;

/// Deterministic summary of a Richardson extrapolation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtrapolationReport {
    /// Schema of the serialized report.
    pub schema_version: SchemaVersion,
    /// Input samples, largest step first.
    pub samples: Vec<f64>,
    /// Error orders eliminated column by column.
    pub orders: Vec<f64>,
    /// Extrapolated limit `T[0][n-1]`.
    pub value: f64,
    /// Top row of the tableau.
    pub diagonal: Vec<f64>,
    /// Gap between the last two top-row estimates, absent for a single sample.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_estimate: Option<f64>,
    /// Stable hash of the report payload.
    pub report_hash: String,
}

/// Builds the tableau for `samples` and summarises it.
pub fn extrapolate_report(
    samples: &[f64],
    orders: &[f64],
) -> Result<ExtrapolationReport, LimesError> {
    let tableau = RichardsonTableau::build(samples, orders)?;
    let schema_version = SchemaVersion::current();
    let value = tableau.apex();
    let diagonal = tableau.diagonal();
    let error_estimate = tableau.error_estimate();
    let report_hash = stable_hash_string(&(
        schema_version,
        samples,
        orders,
        value,
        &diagonal,
        error_estimate,
    ))?;
    Ok(ExtrapolationReport {
        schema_version,
        samples: samples.to_vec(),
        orders: orders.to_vec(),
        value,
        diagonal,
        error_estimate,
        report_hash,
    })
}

/// Resolves `schedule` against the sample count and extrapolates.
pub fn extrapolate_scheduled(
    samples: &[f64],
    schedule: &OrderSchedule,
) -> Result<ExtrapolationReport, LimesError> {
    let orders = schedule.resolve(samples.len().saturating_sub(1))?;
    extrapolate_report(samples, &orders)
}
