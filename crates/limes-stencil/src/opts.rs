use limes_core::errors::{ErrorInfo, LimesError};
use serde::{Deserialize, Serialize};

fn default_min_rcond() -> f64 {
    1e-13
}

fn default_residual_tol() -> f64 {
    1e-8
}

/// Thresholds deciding when a stencil system counts as singular.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StencilOpts {
    /// Smallest accepted ratio `sigma_min / sigma_max` of the Taylor matrix.
    #[serde(default = "default_min_rcond")]
    pub min_rcond: f64,
    /// Accepted `||A c - b||_inf`, scaled by `max(1, order!)`.
    #[serde(default = "default_residual_tol")]
    pub residual_tol: f64,
}

impl Default for StencilOpts {
    fn default() -> Self {
        Self {
            min_rcond: default_min_rcond(),
            residual_tol: default_residual_tol(),
        }
    }
}

impl StencilOpts {
    /// Rejects thresholds outside their meaningful ranges.
    pub fn validate(&self) -> Result<(), LimesError> {
        if !(self.min_rcond.is_finite() && (0.0..1.0).contains(&self.min_rcond)) {
            return Err(LimesError::Config(
                ErrorInfo::new("invalid-min-rcond", "min_rcond must lie in [0, 1)")
                    .with_context("min_rcond", self.min_rcond),
            ));
        }
        if !(self.residual_tol.is_finite() && self.residual_tol > 0.0) {
            return Err(LimesError::Config(
                ErrorInfo::new(
                    "invalid-residual-tol",
                    "residual_tol must be positive and finite",
                )
                .with_context("residual_tol", self.residual_tol),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(StencilOpts::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_thresholds_are_rejected() {
        let opts = StencilOpts {
            min_rcond: 1.5,
            ..StencilOpts::default()
        };
        assert_eq!(opts.validate().unwrap_err().code(), "invalid-min-rcond");
        let opts = StencilOpts {
            residual_tol: 0.0,
            ..StencilOpts::default()
        };
        assert_eq!(opts.validate().unwrap_err().code(), "invalid-residual-tol");
    }
}
