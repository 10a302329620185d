use limes_core::errors::{ErrorInfo, LimesError};
use limes_core::{stable_hash_string, SchemaVersion};
use limes_tableau::extrapolate;
use serde::{Deserialize, Serialize};

use crate::config::{AccelOrders, CapPolicy, SeriesMethod, SeriesOpts};
use crate::fit::least_squares_limit;
use crate::partial::{doubling_sums, validate_beta, PartialSums};

/// Deterministic record of one series evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesReport {
    /// Schema of the serialized report.
    pub schema_version: SchemaVersion,
    /// Exponent of the series.
    pub beta: f64,
    /// Method requested by the caller.
    pub method: SeriesMethod,
    /// Final estimate of the series value.
    pub value: f64,
    /// Partial sums over `2^1, 2^2, ...` terms.
    pub partial_sums: Vec<f64>,
    /// Number of doublings performed.
    pub iterations: usize,
    /// Term count of the last partial sum.
    pub terms: u64,
    /// Change between the last two partial sums.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_delta: Option<f64>,
    /// Whether the partial sums met the tolerance before the cap.
    pub converged: bool,
    /// Whether `value` came from an acceleration step rather than the last partial sum.
    pub accelerated: bool,
    /// Stable hash of the report payload.
    pub report_hash: String,
}

fn accelerate(
    run: &PartialSums,
    beta: f64,
    method: &SeriesMethod,
) -> Result<Option<f64>, LimesError> {
    match method {
        SeriesMethod::Direct => Ok(None),
        SeriesMethod::Richardson { orders, window } => {
            let start = window
                .map(|window| run.sums.len().saturating_sub(window))
                .unwrap_or(0);
            let samples = &run.sums[start..];
            if samples.len() < 2 {
                return Ok(None);
            }
            let columns = samples.len() - 1;
            let orders = match orders {
                AccelOrders::Unit => vec![1.0; columns],
                AccelOrders::BetaShifted => (0..columns).map(|j| beta + j as f64).collect(),
                AccelOrders::Schedule { schedule } => schedule.resolve(columns)?,
            };
            extrapolate(samples, &orders).map(Some)
        }
        SeriesMethod::LeastSquares { points, terms } => {
            let used = (*points).min(run.sums.len());
            if used < 2 {
                return Ok(None);
            }
            let terms = terms.unwrap_or(used).min(used);
            least_squares_limit(&run.sums[..used], beta, terms).map(Some)
        }
    }
}

/// Evaluates `sum_k (-1)^k / (2k + 1)^beta` under `opts` and reports how the value was reached.
pub fn evaluate_series_with(beta: f64, opts: &SeriesOpts) -> Result<SeriesReport, LimesError> {
    validate_beta(beta)?;
    opts.validate()?;

    let run = doubling_sums(beta, opts.max_iters, opts.tolerance);
    let last = run.sums.last().copied().unwrap_or(0.0);
    if !run.converged && opts.on_cap == CapPolicy::Fail {
        let mut info = ErrorInfo::new(
            "iteration-cap",
            "partial sums did not meet the tolerance within max_iters doublings",
        )
        .with_context("beta", beta)
        .with_context("max_iters", opts.max_iters)
        .with_context("last_estimate", last)
        .with_hint("raise max_iters, loosen the tolerance or use CapPolicy::Report");
        if let Some(delta) = run.last_delta {
            info = info.with_context("last_delta", delta);
        }
        return Err(LimesError::Convergence(info));
    }

    let accelerated = accelerate(&run, beta, &opts.method)?;
    let value = accelerated.unwrap_or(last);
    let schema_version = SchemaVersion::current();
    let report_hash = stable_hash_string(&(
        schema_version,
        beta,
        &opts.method,
        value,
        &run.sums,
        run.terms,
        run.last_delta,
        run.converged,
    ))?;

    Ok(SeriesReport {
        schema_version,
        beta,
        method: opts.method.clone(),
        value,
        iterations: run.sums.len(),
        partial_sums: run.sums,
        terms: run.terms,
        last_delta: run.last_delta,
        converged: run.converged,
        accelerated: accelerated.is_some(),
        report_hash,
    })
}

/// Evaluates `sum_k (-1)^k / (2k + 1)^beta` for `0 < beta <= 1`.
///
/// With `accelerate` the partial sums are fed through a Richardson tableau
/// with unit error orders; otherwise the last partial sum is returned.
/// Reaching the iteration cap is not an error here; use
/// [`evaluate_series_with`] to observe or reject it.
pub fn evaluate_series(beta: f64, accelerate: bool) -> Result<f64, LimesError> {
    evaluate_series_with(beta, &SeriesOpts::from_flag(accelerate)).map(|report| report.value)
}
