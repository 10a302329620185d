use limes_core::errors::{ErrorInfo, LimesError};
use serde::{Deserialize, Serialize};

use crate::opts::StencilOpts;
use crate::solver::{factorial, solve_stencil_with};

/// A solved stencil bound to its shifts and derivative order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stencil {
    shifts: Vec<f64>,
    order: usize,
    coefficients: Vec<f64>,
}

impl Stencil {
    /// Solves the stencil for `shifts` and `order` with default options.
    pub fn new(shifts: &[f64], order: usize) -> Result<Self, LimesError> {
        Self::with_opts(shifts, order, &StencilOpts::default())
    }

    /// Solves the stencil with explicit singularity thresholds.
    pub fn with_opts(shifts: &[f64], order: usize, opts: &StencilOpts) -> Result<Self, LimesError> {
        let report = solve_stencil_with(shifts, order, opts)?;
        Ok(Self {
            shifts: report.shifts,
            order: report.order,
            coefficients: report.coefficients,
        })
    }

    /// Shifts in input order.
    pub fn shifts(&self) -> &[f64] {
        &self.shifts
    }

    /// Derivative order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Weights aligned with [`Stencil::shifts`], carrying the `order!` factor.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Leading error power of the step size.
    pub fn truncation_order(&self) -> usize {
        self.shifts.len() - self.order
    }

    fn scale(&self, h: f64) -> f64 {
        factorial(self.order) * h.powi(self.order as i32)
    }

    /// Approximates `f^(order)(x)` as `sum_k c_k f(x + a_k h) / (order! h^order)`.
    pub fn apply<F>(&self, f: F, x: f64, h: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let weighted: f64 = self
            .shifts
            .iter()
            .zip(&self.coefficients)
            .map(|(shift, coeff)| coeff * f(x + shift * h))
            .sum();
        weighted / self.scale(h)
    }

    /// Same as [`Stencil::apply`] for values already sampled at `x + a_k h`.
    pub fn apply_samples(&self, values: &[f64], h: f64) -> Result<f64, LimesError> {
        if values.len() != self.shifts.len() {
            return Err(LimesError::Shape(
                ErrorInfo::new(
                    "sample-count-mismatch",
                    "one sample is required per stencil shift",
                )
                .with_context("samples", values.len())
                .with_context("shifts", self.shifts.len()),
            ));
        }
        let weighted: f64 = values
            .iter()
            .zip(&self.coefficients)
            .map(|(value, coeff)| coeff * value)
            .sum();
        Ok(weighted / self.scale(h))
    }
}
