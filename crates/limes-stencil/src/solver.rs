use limes_core::errors::{ErrorInfo, LimesError};
use limes_core::{stable_hash_string, SchemaVersion};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::opts::StencilOpts;

/// Solved stencil together with the conditioning of its system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StencilReport {
    /// Schema of the serialized report.
    pub schema_version: SchemaVersion,
    /// Shifts `a_k` in input order.
    pub shifts: Vec<f64>,
    /// Derivative order `l`.
    pub order: usize,
    /// Weights `c_k`, aligned with `shifts`, scaled by `order!`.
    pub coefficients: Vec<f64>,
    /// Leading error power of `h`: `n - l`.
    pub truncation_order: usize,
    /// Estimated 2-norm condition number of the Taylor matrix.
    pub condition: f64,
    /// `||A c - b||_inf` of the accepted solution.
    pub residual: f64,
    /// Stable hash of the report payload.
    pub report_hash: String,
}

pub(crate) fn factorial(n: usize) -> f64 {
    (1..=n).fold(1.0, |acc, k| acc * k as f64)
}

fn validate_shifts(shifts: &[f64], order: usize) -> Result<(), LimesError> {
    if order >= shifts.len() {
        return Err(LimesError::Shape(
            ErrorInfo::new(
                "order-too-high",
                "derivative order must be strictly less than the number of stencil points",
            )
            .with_context("order", order)
            .with_context("points", shifts.len()),
        ));
    }
    if let Some(index) = shifts.iter().position(|shift| !shift.is_finite()) {
        return Err(LimesError::Domain(
            ErrorInfo::new("non-finite-shift", "stencil shifts must be finite")
                .with_context("index", index)
                .with_context("shift", shifts[index]),
        ));
    }
    Ok(())
}

/// Builds the Taylor moment system `A[row][col] = a_col^row / row!`, `b = order! e_order`.
pub fn taylor_system(
    shifts: &[f64],
    order: usize,
) -> Result<(DMatrix<f64>, DVector<f64>), LimesError> {
    validate_shifts(shifts, order)?;
    let n = shifts.len();
    let mut matrix = DMatrix::<f64>::zeros(n, n);
    for row in 0..n {
        let scale = factorial(row);
        for (col, shift) in shifts.iter().enumerate() {
            matrix[(row, col)] = shift.powi(row as i32) / scale;
        }
    }
    let mut rhs = DVector::<f64>::zeros(n);
    rhs[order] = factorial(order);
    Ok((matrix, rhs))
}

fn singular(code: &str, message: &str, condition: f64, points: usize) -> LimesError {
    LimesError::Singular(
        ErrorInfo::new(code, message)
            .with_context("condition", condition)
            .with_context("points", points)
            .with_hint("stencil shifts must be pairwise distinct and not nearly coincident"),
    )
}

/// Solves for the stencil weights of the `order`-th derivative and reports conditioning.
pub fn solve_stencil_with(
    shifts: &[f64],
    order: usize,
    opts: &StencilOpts,
) -> Result<StencilReport, LimesError> {
    opts.validate()?;
    let (matrix, rhs) = taylor_system(shifts, order)?;
    let n = shifts.len();

    let singular_values = matrix.singular_values();
    let largest = singular_values.iter().fold(0.0_f64, |acc, v| acc.max(*v));
    let smallest = singular_values
        .iter()
        .fold(f64::INFINITY, |acc, v| acc.min(*v));
    let rcond = if largest > 0.0 { smallest / largest } else { 0.0 };
    let condition = 1.0 / rcond;
    if !(rcond > 0.0 && rcond >= opts.min_rcond) {
        return Err(singular(
            "singular-system",
            "Taylor matrix is singular to working precision",
            condition,
            n,
        ));
    }

    let solution = matrix.clone().lu().solve(&rhs).ok_or_else(|| {
        singular(
            "singular-system",
            "LU factorisation of the Taylor matrix failed",
            condition,
            n,
        )
    })?;
    let residual = (&matrix * &solution - &rhs)
        .iter()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let tolerance = opts.residual_tol * factorial(order).max(1.0);
    if !(residual <= tolerance) {
        return Err(LimesError::Singular(
            ErrorInfo::new(
                "residual-too-large",
                "stencil weights do not reproduce the moment conditions",
            )
            .with_context("residual", residual)
            .with_context("tolerance", tolerance)
            .with_context("condition", condition),
        ));
    }

    let coefficients: Vec<f64> = solution.iter().copied().collect();
    let schema_version = SchemaVersion::current();
    let truncation_order = n - order;
    let report_hash = stable_hash_string(&(
        schema_version,
        shifts,
        order,
        &coefficients,
        truncation_order,
        condition,
        residual,
    ))?;
    Ok(StencilReport {
        schema_version,
        shifts: shifts.to_vec(),
        order,
        coefficients,
        truncation_order,
        condition,
        residual,
        report_hash,
    })
}

/// Weights `c_k` such that `sum_k c_k f(x + a_k h)` approximates `order! h^order f^(order)(x)`.
///
/// The right-hand side of the moment system is `order!`, so the weights carry
/// that factor; [`crate::Stencil::apply`] divides it out. The approximation
/// error is `O(h^(n - order))` relative to the leading term for `n` shifts.
pub fn solve_stencil(shifts: &[f64], order: usize) -> Result<Vec<f64>, LimesError> {
    solve_stencil_with(shifts, order, &StencilOpts::default()).map(|report| report.coefficients)
}

/// First-derivative weights for `shifts`.
pub fn first_derivative(shifts: &[f64]) -> Result<Vec<f64>, LimesError> {
    solve_stencil(shifts, 1)
}
