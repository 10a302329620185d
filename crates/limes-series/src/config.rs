use limes_core::errors::{ErrorInfo, LimesError};
use limes_tableau::OrderSchedule;
use serde::{Deserialize, Serialize};

/// Largest accepted iteration cap; the last partial sum then has 2^30 terms.
pub const MAX_ITERS_LIMIT: usize = 30;

/// Largest accepted least-squares point count.
pub const MAX_FIT_POINTS: usize = 15;

fn default_max_iters() -> usize {
    25
}

fn default_tolerance() -> f64 {
    1e-12
}

fn default_fit_points() -> usize {
    10
}

/// Behaviour when the iteration cap is reached before the tolerance is met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CapPolicy {
    /// Return the best estimate and mark the report as not converged.
    #[default]
    Report,
    /// Fail with [`LimesError::Convergence`].
    Fail,
}

/// Error orders handed to the tableau when accelerating partial sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AccelOrders {
    /// Every column eliminates a first-order term.
    #[default]
    Unit,
    /// Orders `beta, beta + 1, beta + 2, ...`, the tail expansion of the series.
    BetaShifted,
    /// Caller supplied schedule.
    Schedule {
        /// Schedule resolved against the number of tableau columns.
        schedule: OrderSchedule,
    },
}

/// How the recorded partial sums are turned into a series value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SeriesMethod {
    /// Last partial sum, unaccelerated.
    #[default]
    Direct,
    /// Richardson tableau over the recorded partial sums.
    Richardson {
        /// Orders eliminated column by column.
        #[serde(default)]
        orders: AccelOrders,
        /// Only the last `window` partial sums enter the tableau.
        #[serde(default)]
        window: Option<usize>,
    },
    /// Least-squares fit of `A + sum_j c_j h^(beta + j - 1)` over the first partial sums.
    LeastSquares {
        /// Number of leading partial sums used in the fit.
        #[serde(default = "default_fit_points")]
        points: usize,
        /// Number of model terms including the limit; defaults to `points`.
        #[serde(default)]
        terms: Option<usize>,
    },
}

impl SeriesMethod {
    /// Richardson acceleration with unit orders over every partial sum.
    pub fn richardson() -> Self {
        SeriesMethod::Richardson {
            orders: AccelOrders::Unit,
            window: None,
        }
    }

    /// Whether the method post-processes the partial sums.
    pub fn accelerates(&self) -> bool {
        !matches!(self, SeriesMethod::Direct)
    }
}

/// Series evaluation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesOpts {
    /// Maximum number of doublings; iteration `n` sums `2^n` terms.
    #[serde(default = "default_max_iters")]
    pub max_iters: usize,
    /// Absolute change between consecutive partial sums that ends the iteration.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// What to do when `max_iters` is exhausted.
    #[serde(default)]
    pub on_cap: CapPolicy,
    /// Post-processing of the partial sums.
    #[serde(default)]
    pub method: SeriesMethod,
}

impl Default for SeriesOpts {
    fn default() -> Self {
        Self {
            max_iters: default_max_iters(),
            tolerance: default_tolerance(),
            on_cap: CapPolicy::default(),
            method: SeriesMethod::default(),
        }
    }
}

impl SeriesOpts {
    /// Options matching `evaluate_series(beta, accelerate)`.
    pub fn from_flag(accelerate: bool) -> Self {
        Self {
            method: if accelerate {
                SeriesMethod::richardson()
            } else {
                SeriesMethod::Direct
            },
            ..Self::default()
        }
    }

    /// Rejects option combinations that cannot be evaluated.
    pub fn validate(&self) -> Result<(), LimesError> {
        if self.max_iters == 0 || self.max_iters > MAX_ITERS_LIMIT {
            return Err(LimesError::Config(
                ErrorInfo::new("invalid-max-iters", "max_iters must lie in 1..=30")
                    .with_context("max_iters", self.max_iters),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(LimesError::Config(
                ErrorInfo::new("invalid-tolerance", "tolerance must be positive and finite")
                    .with_context("tolerance", self.tolerance),
            ));
        }
        match &self.method {
            SeriesMethod::Direct => {}
            SeriesMethod::Richardson { window, .. } => {
                if let Some(window) = window {
                    if *window < 2 {
                        return Err(LimesError::Config(
                            ErrorInfo::new(
                                "invalid-window",
                                "a Richardson window needs at least two partial sums",
                            )
                            .with_context("window", window),
                        ));
                    }
                }
            }
            SeriesMethod::LeastSquares { points, terms } => {
                if *points < 2 || *points > MAX_FIT_POINTS {
                    return Err(LimesError::Config(
                        ErrorInfo::new("invalid-fit-points", "points must lie in 2..=15")
                            .with_context("points", points),
                    ));
                }
                if let Some(terms) = terms {
                    if *terms < 1 || terms > points {
                        return Err(LimesError::Config(
                            ErrorInfo::new(
                                "invalid-fit-terms",
                                "model terms must lie between 1 and the number of points",
                            )
                            .with_context("terms", terms)
                            .with_context("points", points),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}
