use limes_core::errors::{ErrorInfo, LimesError};

/// Checks that `beta` lies in `(0, 1]`.
pub fn validate_beta(beta: f64) -> Result<(), LimesError> {
    if beta.is_finite() && beta > 0.0 && beta <= 1.0 {
        return Ok(());
    }
    Err(LimesError::Domain(
        ErrorInfo::new("beta-out-of-range", "beta must lie in (0, 1]")
            .with_context("beta", beta)
            .with_hint("the series only converges conditionally for beta in (0, 1]"),
    ))
}

/// `k`-th term `(-1)^k / (2k + 1)^beta`.
pub fn term(beta: f64, k: u64) -> f64 {
    let magnitude = ((2 * k + 1) as f64).powf(-beta);
    if k % 2 == 0 {
        magnitude
    } else {
        -magnitude
    }
}

/// Sum of the first `terms` terms, accumulated with Neumaier compensation.
pub fn partial_sum(beta: f64, terms: u64) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for k in 0..terms {
        let value = term(beta, k);
        let next = sum + value;
        if sum.abs() >= value.abs() {
            compensation += (sum - next) + value;
        } else {
            compensation += (value - next) + sum;
        }
        sum = next;
    }
    sum + compensation
}

/// Outcome of the doubling loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialSums {
    /// Partial sums over `2^1, 2^2, ...` terms.
    pub sums: Vec<f64>,
    /// Term count of the last recorded sum.
    pub terms: u64,
    /// Change between the last two sums.
    pub last_delta: Option<f64>,
    /// Whether `last_delta` dropped below the tolerance.
    pub converged: bool,
}

/// Recomputes the partial sum over `2^n` terms for `n = 1..=max_iters`,
/// stopping once consecutive sums differ by less than `tolerance`.
pub fn doubling_sums(beta: f64, max_iters: usize, tolerance: f64) -> PartialSums {
    let mut sums: Vec<f64> = Vec::with_capacity(max_iters);
    let mut terms = 0;
    let mut last_delta = None;
    let mut converged = false;
    for n in 1..=max_iters {
        terms = 1_u64 << n;
        let current = partial_sum(beta, terms);
        if let Some(&previous) = sums.last() {
            let delta = (current - previous).abs();
            last_delta = Some(delta);
            sums.push(current);
            if delta < tolerance {
                converged = true;
                break;
            }
        } else {
            sums.push(current);
        }
    }
    PartialSums {
        sums,
        terms,
        last_delta,
        converged,
    }
}
